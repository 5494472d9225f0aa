use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::{StudentInput, StudentUpdateInput};
use crate::database::repositories::{hostel as hostel_repo, student as student_repo};
use crate::database::transaction::DatabaseTransaction;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::auth::Claims;
use crate::services::permissions::Action;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    /// Defaults to the caller; setting it for someone else needs the
    /// student-management permission.
    pub user_id: Option<Uuid>,
    #[serde(flatten)]
    pub profile: StudentInput,
}

pub async fn create_student(
    claims: Claims,
    input: web::Json<CreateStudentRequest>,
) -> Result<HttpResponse> {
    let request = input.into_inner();

    let user_id = request.user_id.unwrap_or(claims.sub);
    if user_id != claims.sub {
        claims.require(Action::ManageStudents)?;
    }

    if let Some(hostel_id) = request.profile.hostel_id {
        hostel_repo::get_hostel_by_id(hostel_id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::NotFound("Hostel not found".to_string()))?;
    }

    let profile = request.profile;
    let student = DatabaseTransaction::run(|tx| {
        Box::pin(async move { Ok(student_repo::create_student(tx, user_id, profile).await?) })
    })
    .await?;

    log::info!("Student profile {} created for user {}", student.id, user_id);

    Ok(ApiResponse::created(student))
}

pub async fn get_my_profile(claims: Claims) -> Result<HttpResponse> {
    let student = student_repo::find_by_user_id(claims.sub)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Student profile not found".to_string()))?;

    Ok(ApiResponse::success(student))
}

pub async fn get_student(_claims: Claims, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let student = student_repo::find_by_id(path.into_inner())
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

    Ok(ApiResponse::success(student))
}

pub async fn update_hostel_affiliation(
    claims: Claims,
    path: web::Path<Uuid>,
    input: web::Json<StudentUpdateInput>,
) -> Result<HttpResponse> {
    let student_id = path.into_inner();

    let existing = student_repo::find_by_id(student_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

    if existing.user_id != claims.sub {
        claims.require(Action::ManageStudents)?;
    }

    let hostel_id = input.into_inner().hostel_id;
    if let Some(hostel_id) = hostel_id {
        hostel_repo::get_hostel_by_id(hostel_id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::NotFound("Hostel not found".to_string()))?;
    }

    let student = DatabaseTransaction::run(|tx| {
        Box::pin(async move {
            student_repo::update_hostel_affiliation(tx, student_id, hostel_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Student not found".to_string()))
        })
    })
    .await?;

    Ok(ApiResponse::success(student))
}
