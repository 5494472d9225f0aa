use std::env;

use chrono::Utc;
use fake::faker::internet::en::SafeEmail;
use fake::Fake;
use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

use gymkhana_be::config::Config;
use gymkhana_be::database::models::Role;
use gymkhana_be::services::auth::Claims;

/// Config for tests that never reach the database: the handlers under test
/// reject on auth or validation before any repository call.
pub fn test_config() -> Config {
    Config {
        database_url: "postgres://@localhost:5432/gymkhana_test".to_string(),
        jwt_secret: "test-jwt-secret-key-that-is-long-enough".to_string(),
        jwt_expiration_days: 1,
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
    }
}

/// Mint a signed bearer token for an arbitrary caller with the given role.
pub fn make_token(config: &Config, role: Role) -> String {
    let claims = Claims {
        sub: Uuid::new_v4(),
        email: SafeEmail().fake(),
        role,
        exp: (Utc::now() + chrono::Duration::days(config.jwt_expiration_days)).timestamp()
            as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_ref()),
    )
    .expect("Failed to encode test token")
}

pub fn auth_header(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

pub fn setup_test_env() {
    unsafe {
        env::set_var("RUST_LOG", "debug");
    }
    let _ = env_logger::builder().is_test(true).try_init();
}
