use actix_web::web;

pub mod auth;
pub mod events;
pub mod hostels;
pub mod participations;
pub mod results;
pub mod scores;
pub mod students;
pub mod teams;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(auth::configure)
            .configure(hostels::configure)
            .configure(students::configure)
            .configure(events::configure)
            .configure(teams::configure)
            .configure(participations::configure)
            .configure(scores::configure)
            .configure(results::configure),
    );
}
