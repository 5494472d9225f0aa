use actix_web::{http::StatusCode, test, web, App};
use pretty_assertions::assert_eq;
use serde_json::json;
use serial_test::serial;
use uuid::Uuid;

use gymkhana_be::database::models::Role;
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
async fn test_create_team_unauthorized() {
    common::setup_test_env();
    let config = common::test_config();
    let app = init_app!(config);

    let req = test::TestRequest::post()
        .uri("/api/v1/teams")
        .set_json(&json!({ "name": "Aquila XI" }))
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
#[serial]
async fn test_create_team_forbidden_for_committee_roles() {
    common::setup_test_env();
    let config = common::test_config();
    let app = init_app!(config);

    for role in [Role::Tusc, Role::Dsw] {
        let token = common::make_token(&config, role);
        let req = test::TestRequest::post()
            .uri("/api/v1/teams")
            .insert_header(common::auth_header(&token))
            .set_json(&json!({ "name": "Aquila XI" }))
            .to_request();

        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}

#[actix_web::test]
#[serial]
async fn test_add_team_member_unauthorized() {
    common::setup_test_env();
    let config = common::test_config();
    let app = init_app!(config);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/teams/{}/members", Uuid::new_v4()))
        .set_json(&json!({
            "studentId": Uuid::new_v4(),
            "category": "sports"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
#[serial]
async fn test_add_team_member_forbidden_for_committee_roles() {
    common::setup_test_env();
    let config = common::test_config();
    let app = init_app!(config);

    let token = common::make_token(&config, Role::Tusc);
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/teams/{}/members", Uuid::new_v4()))
        .insert_header(common::auth_header(&token))
        .set_json(&json!({
            "studentId": Uuid::new_v4(),
            "category": "cultural"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
#[serial]
async fn test_remove_team_member_unauthorized() {
    common::setup_test_env();
    let config = common::test_config();
    let app = init_app!(config);

    let req = test::TestRequest::delete()
        .uri(&format!(
            "/api/v1/teams/{}/members/{}",
            Uuid::new_v4(),
            Uuid::new_v4()
        ))
        .to_request();

    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
