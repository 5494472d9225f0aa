use actix_web::{web, HttpResponse, Result};

use crate::database::models::{CreateUserInput, LoginInput, UserInfo};
use crate::handlers::shared::ApiResponse;
use crate::services::auth::Claims;
use crate::AppState;

pub async fn register(
    app_state: web::Data<AppState>,
    input: web::Json<CreateUserInput>,
) -> Result<HttpResponse> {
    let response = app_state.auth_service.register(input.into_inner()).await?;

    log::info!("New account registered: {}", response.user.email);

    Ok(ApiResponse::created(response))
}

pub async fn login(
    app_state: web::Data<AppState>,
    input: web::Json<LoginInput>,
) -> Result<HttpResponse> {
    let response = app_state.auth_service.login(input.into_inner()).await?;

    Ok(ApiResponse::success(response))
}

pub async fn me(claims: Claims, app_state: web::Data<AppState>) -> Result<HttpResponse> {
    let user = app_state.auth_service.current_user(&claims).await?;

    Ok(ApiResponse::success(UserInfo::from(user)))
}
