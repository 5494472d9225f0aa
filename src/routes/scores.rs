use actix_web::web;

use crate::handlers::scores;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/scores")
            .route("", web::post().to(scores::record_score))
            .route("", web::get().to(scores::get_scores))
            .route("/{id}", web::get().to(scores::get_score))
            .route("/{id}", web::put().to(scores::update_score))
            .route("/{id}", web::delete().to(scores::delete_score))
            .route("/{id}/verify", web::post().to(scores::verify_score))
            .route("/{id}/unverify", web::post().to(scores::unverify_score)),
    );
}
