use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::{Participation, RegistrationInput, ResultUpdateInput, Subject};
use crate::database::repositories::{event as event_repo, participation as participation_repo};
use crate::database::transaction::DatabaseTransaction;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::auth::Claims;
use crate::services::permissions::{self, Action};
use crate::services::registrar;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationsQuery {
    pub event_id: Uuid,
}

pub async fn register_participation(
    claims: Claims,
    input: web::Json<RegistrationInput>,
) -> Result<HttpResponse> {
    claims.require(Action::RegisterParticipation)?;

    let registration = input.into_inner();
    let subject = Subject::from_parts(registration.user_id, registration.team_id)?;

    let event = event_repo::get_event_by_id(registration.event_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    let caller_id = claims.sub;
    let caller_role = claims.role;
    let participation = DatabaseTransaction::run(|tx| {
        Box::pin(async move {
            registrar::register(tx, &event, subject, caller_id, caller_role).await
        })
    })
    .await?;

    log::info!(
        "Registration {} recorded for event {}",
        participation.id,
        participation.event_id
    );

    Ok(ApiResponse::created(participation))
}

pub async fn get_participations(
    _claims: Claims,
    query: web::Query<ParticipationsQuery>,
) -> Result<HttpResponse> {
    let participations = participation_repo::get_by_event(query.event_id)
        .await
        .map_err(AppError::from)?;

    Ok(ApiResponse::success(participations))
}

pub async fn get_participation(_claims: Claims, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let participation = find_participation(path.into_inner()).await?;

    Ok(ApiResponse::success(participation))
}

/// Record a position and score for a registration. Rejected once the owning
/// event's results are final; an authority has to retract its approval
/// before results can change again.
pub async fn update_result(
    claims: Claims,
    path: web::Path<Uuid>,
    input: web::Json<ResultUpdateInput>,
) -> Result<HttpResponse> {
    claims.require(Action::UpdateResult)?;

    let participation = find_participation(path.into_inner()).await?;
    ensure_event_not_final(participation.event_id).await?;

    let update = input.into_inner();
    let participation_id = participation.id;
    let participation = DatabaseTransaction::run(|tx| {
        Box::pin(async move {
            participation_repo::update_result(tx, participation_id, update.position, update.score)
                .await?
                .ok_or_else(|| AppError::NotFound("Participation not found".to_string()))
        })
    })
    .await?;

    Ok(ApiResponse::success(participation))
}

pub async fn cancel_participation(claims: Claims, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let participation = find_participation(path.into_inner()).await?;

    // own solo registration, otherwise the on-behalf permission is needed
    if participation.user_id != Some(claims.sub) {
        claims.require(Action::CancelParticipation)?;
        if !permissions::is_allowed(claims.role, Action::RegisterOnBehalf) {
            return Err(AppError::PermissionDenied(
                "Cannot cancel another subject's registration".to_string(),
            )
            .into());
        }
    }

    ensure_event_not_final(participation.event_id).await?;

    let participation_id = participation.id;
    DatabaseTransaction::run(|tx| {
        Box::pin(async move {
            participation_repo::delete(tx, participation_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Participation not found".to_string()))
        })
    })
    .await?;

    log::info!("Registration {} cancelled by {}", participation_id, claims.sub);

    Ok(HttpResponse::NoContent().finish())
}

async fn find_participation(id: Uuid) -> Result<Participation, AppError> {
    participation_repo::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Participation not found".to_string()))
}

async fn ensure_event_not_final(event_id: Uuid) -> Result<(), AppError> {
    let event = event_repo::get_event_by_id(event_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    if event.final_approved {
        return Err(AppError::Precondition(
            "Results for this event are final and cannot be changed".to_string(),
        ));
    }

    Ok(())
}
