use actix_web::{http::StatusCode, test, web, App};
use pretty_assertions::assert_eq;
use serde_json::json;
use serial_test::serial;
use uuid::Uuid;

use gymkhana_be::database::models::Role;
use gymkhana_be::handlers::shared::ApiResponse;
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
async fn test_register_participation_unauthorized() {
    common::setup_test_env();
    let config = common::test_config();
    let app = init_app!(config);

    let req = test::TestRequest::post()
        .uri("/api/v1/participations")
        .set_json(&json!({
            "eventId": Uuid::new_v4(),
            "userId": Uuid::new_v4()
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
#[serial]
async fn test_register_participation_forbidden_for_committee_roles() {
    common::setup_test_env();
    let config = common::test_config();
    let app = init_app!(config);

    let token = common::make_token(&config, Role::Tusc);
    let req = test::TestRequest::post()
        .uri("/api/v1/participations")
        .insert_header(common::auth_header(&token))
        .set_json(&json!({
            "eventId": Uuid::new_v4(),
            "userId": Uuid::new_v4()
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
#[serial]
async fn test_register_participation_rejects_both_subjects() {
    common::setup_test_env();
    let config = common::test_config();
    let app = init_app!(config);

    let token = common::make_token(&config, Role::Student);
    let req = test::TestRequest::post()
        .uri("/api/v1/participations")
        .insert_header(common::auth_header(&token))
        .set_json(&json!({
            "eventId": Uuid::new_v4(),
            "userId": Uuid::new_v4(),
            "teamId": Uuid::new_v4()
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ApiResponse<serde_json::Value> = test::read_body_json(resp).await;
    assert!(!body.success);
    assert!(body.message.unwrap().contains("not both"));
}

#[actix_web::test]
#[serial]
async fn test_register_participation_rejects_missing_subject() {
    common::setup_test_env();
    let config = common::test_config();
    let app = init_app!(config);

    let token = common::make_token(&config, Role::Student);
    let req = test::TestRequest::post()
        .uri("/api/v1/participations")
        .insert_header(common::auth_header(&token))
        .set_json(&json!({ "eventId": Uuid::new_v4() }))
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
#[serial]
async fn test_update_result_unauthorized() {
    common::setup_test_env();
    let config = common::test_config();
    let app = init_app!(config);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/participations/{}/result", Uuid::new_v4()))
        .set_json(&json!({ "position": "1st", "score": 10 }))
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
#[serial]
async fn test_update_result_forbidden_for_students() {
    common::setup_test_env();
    let config = common::test_config();
    let app = init_app!(config);

    let token = common::make_token(&config, Role::Student);
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/participations/{}/result", Uuid::new_v4()))
        .insert_header(common::auth_header(&token))
        .set_json(&json!({ "position": "1st", "score": 10 }))
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
