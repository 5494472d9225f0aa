use actix_web::web;

use crate::handlers::results;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/results")
            .route("", web::get().to(results::get_all_results))
            .route("/{event_id}", web::get().to(results::get_event_results)),
    );
}
