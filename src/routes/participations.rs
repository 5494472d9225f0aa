use actix_web::web;

use crate::handlers::participations;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/participations")
            .route(
                "",
                web::post().to(participations::register_participation),
            )
            .route("", web::get().to(participations::get_participations))
            .route("/{id}", web::get().to(participations::get_participation))
            .route(
                "/{id}/result",
                web::put().to(participations::update_result),
            )
            .route(
                "/{id}",
                web::delete().to(participations::cancel_participation),
            ),
    );
}
