use actix_web::{http::StatusCode, test, web, App};
use pretty_assertions::assert_eq;
use serial_test::serial;

use gymkhana_be::routes;
use gymkhana_be::{AppState, AuthService};

mod common;

macro_rules! init_app {
    ($config:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState {
                    auth_service: AuthService::new($config.clone()),
                }))
                .app_data(web::Data::new($config.clone()))
                .configure(routes::configure),
        )
        .await
    };
}

#[actix_web::test]
#[serial]
async fn test_me_unauthorized_without_token() {
    common::setup_test_env();
    let config = common::test_config();
    let app = init_app!(config);

    let req = test::TestRequest::get().uri("/api/v1/auth/me").to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
#[serial]
async fn test_me_unauthorized_with_malformed_header() {
    common::setup_test_env();
    let config = common::test_config();
    let app = init_app!(config);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("Authorization", "Token abcdef"))
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
#[serial]
async fn test_me_unauthorized_with_token_signed_by_other_secret() {
    common::setup_test_env();
    let config = common::test_config();
    let app = init_app!(config);

    let mut other = common::test_config();
    other.jwt_secret = "a-completely-different-secret-altogether".to_string();
    let token = common::make_token(&other, gymkhana_be::database::models::Role::Student);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(common::auth_header(&token))
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
