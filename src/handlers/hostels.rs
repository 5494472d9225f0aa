use actix_web::{web, HttpResponse, Result};
use uuid::Uuid;

use crate::database::models::HostelInput;
use crate::database::repositories::hostel as hostel_repo;
use crate::database::transaction::DatabaseTransaction;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::auth::Claims;
use crate::services::permissions::Action;

pub async fn create_hostel(
    claims: Claims,
    input: web::Json<HostelInput>,
) -> Result<HttpResponse> {
    claims.require(Action::ManageHostels)?;

    let hostel_input = input.into_inner();
    let hostel = DatabaseTransaction::run(|tx| {
        Box::pin(async move { Ok(hostel_repo::create_hostel(tx, hostel_input).await?) })
    })
    .await?;

    log::info!("Hostel '{}' created by {}", hostel.name, claims.sub);

    Ok(ApiResponse::created(hostel))
}

pub async fn get_hostels(_claims: Claims) -> Result<HttpResponse> {
    let hostels = hostel_repo::get_hostels().await.map_err(AppError::from)?;

    Ok(ApiResponse::success(hostels))
}

pub async fn get_hostel(_claims: Claims, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let hostel = hostel_repo::get_hostel_by_id(path.into_inner())
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Hostel not found".to_string()))?;

    Ok(ApiResponse::success(hostel))
}

pub async fn update_hostel(
    claims: Claims,
    path: web::Path<Uuid>,
    input: web::Json<HostelInput>,
) -> Result<HttpResponse> {
    claims.require(Action::ManageHostels)?;

    let hostel_id = path.into_inner();
    let hostel_input = input.into_inner();
    let hostel = DatabaseTransaction::run(|tx| {
        Box::pin(async move {
            hostel_repo::update_hostel(tx, hostel_id, hostel_input)
                .await?
                .ok_or_else(|| AppError::NotFound("Hostel not found".to_string()))
        })
    })
    .await?;

    Ok(ApiResponse::success(hostel))
}

pub async fn delete_hostel(claims: Claims, path: web::Path<Uuid>) -> Result<HttpResponse> {
    claims.require(Action::ManageHostels)?;

    let hostel_id = path.into_inner();
    DatabaseTransaction::run(|tx| {
        Box::pin(async move {
            hostel_repo::delete_hostel(tx, hostel_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Hostel not found".to_string()))
        })
    })
    .await?;

    log::info!("Hostel {} deleted by {}", hostel_id, claims.sub);

    Ok(HttpResponse::NoContent().finish())
}
