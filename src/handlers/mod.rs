pub mod auth;
pub mod events;
pub mod hostels;
pub mod participations;
pub mod results;
pub mod scores;
pub mod shared;
pub mod students;
pub mod teams;
