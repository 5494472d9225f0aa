use actix_web::web;

use crate::handlers::students;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/students")
            .route("", web::post().to(students::create_student))
            .route("/me", web::get().to(students::get_my_profile))
            .route("/{id}", web::get().to(students::get_student))
            .route(
                "/{id}/hostel",
                web::put().to(students::update_hostel_affiliation),
            ),
    );
}
