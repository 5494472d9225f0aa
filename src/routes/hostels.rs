use actix_web::web;

use crate::handlers::hostels;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/hostels")
            .route("", web::post().to(hostels::create_hostel))
            .route("", web::get().to(hostels::get_hostels))
            .route("/{id}", web::get().to(hostels::get_hostel))
            .route("/{id}", web::put().to(hostels::update_hostel))
            .route("/{id}", web::delete().to(hostels::delete_hostel)),
    );
}
