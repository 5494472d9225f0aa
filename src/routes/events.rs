use actix_web::web;

use crate::handlers::events;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/events")
            .route("", web::post().to(events::create_event))
            .route("", web::get().to(events::get_events))
            .route("/{id}", web::get().to(events::get_event))
            .route("/{id}", web::put().to(events::update_event))
            .route("/{id}", web::delete().to(events::delete_event))
            .route("/{id}/approve", web::post().to(events::approve_event))
            .route("/{id}/reject", web::post().to(events::reject_event))
            .route("/{id}/finalize", web::post().to(events::finalize_event)),
    );
}
