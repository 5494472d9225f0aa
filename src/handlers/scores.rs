use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::{EventScore, EventScoreInput, EventScoreUpdateInput};
use crate::database::repositories::{
    event as event_repo, hostel as hostel_repo, score as score_repo,
};
use crate::database::transaction::DatabaseTransaction;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::auth::Claims;
use crate::services::permissions::Action;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoresQuery {
    pub event_id: Uuid,
}

pub async fn record_score(
    claims: Claims,
    input: web::Json<EventScoreInput>,
) -> Result<HttpResponse> {
    claims.require(Action::RecordScore)?;

    let score_input = input.into_inner();

    if score_input.user_id.is_some() && score_input.team_id.is_some() {
        return Err(AppError::Validation(
            "A score may name a user or a team, not both".to_string(),
        )
        .into());
    }

    ensure_event_not_final(score_input.event_id).await?;

    hostel_repo::get_hostel_by_id(score_input.hostel_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Hostel not found".to_string()))?;

    let score = DatabaseTransaction::run(|tx| {
        Box::pin(async move { Ok(score_repo::create_score(tx, score_input).await?) })
    })
    .await?;

    log::info!(
        "Score {} recorded for event {} by {}",
        score.id,
        score.event_id,
        claims.sub
    );

    Ok(ApiResponse::created(score))
}

pub async fn get_scores(_claims: Claims, query: web::Query<ScoresQuery>) -> Result<HttpResponse> {
    let scores = score_repo::get_scores_by_event(query.event_id)
        .await
        .map_err(AppError::from)?;

    Ok(ApiResponse::success(scores))
}

pub async fn get_score(_claims: Claims, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let score = find_score(path.into_inner()).await?;

    Ok(ApiResponse::success(score))
}

pub async fn update_score(
    claims: Claims,
    path: web::Path<Uuid>,
    input: web::Json<EventScoreUpdateInput>,
) -> Result<HttpResponse> {
    claims.require(Action::RecordScore)?;

    let existing = find_score(path.into_inner()).await?;
    ensure_event_not_final(existing.event_id).await?;

    // a fully verified score is frozen until a committee retracts
    if existing.verification_gate().fully_approved() {
        return Err(AppError::Precondition(
            "Score is verified by both committees and cannot be changed".to_string(),
        )
        .into());
    }

    let update = input.into_inner();
    let score_id = existing.id;
    let score = DatabaseTransaction::run(|tx| {
        Box::pin(async move {
            score_repo::update_score(tx, score_id, update)
                .await?
                .ok_or_else(|| AppError::NotFound("Score not found".to_string()))
        })
    })
    .await?;

    Ok(ApiResponse::success(score))
}

/// Record the calling committee's verification of a score. Idempotent, same
/// state machine as event approval.
pub async fn verify_score(claims: Claims, path: web::Path<Uuid>) -> Result<HttpResponse> {
    claims.require(Action::VerifyScore)?;
    let authority = claims.authority()?;

    let score = find_score(path.into_inner()).await?;

    let mut gate = score.verification_gate();
    if !gate.approve(authority) {
        return Ok(ApiResponse::success(score));
    }

    let score = persist_gate(score.id, gate).await?;

    log::info!("Score {} verified by {} ({})", score.id, authority, claims.sub);

    Ok(ApiResponse::success(score))
}

/// Retract the calling committee's verification of a score.
pub async fn unverify_score(claims: Claims, path: web::Path<Uuid>) -> Result<HttpResponse> {
    claims.require(Action::VerifyScore)?;
    let authority = claims.authority()?;

    let score = find_score(path.into_inner()).await?;

    let mut gate = score.verification_gate();
    if !gate.retract(authority) {
        return Ok(ApiResponse::success(score));
    }

    let score = persist_gate(score.id, gate).await?;

    log::info!(
        "Score {} verification retracted by {} ({})",
        score.id,
        authority,
        claims.sub
    );

    Ok(ApiResponse::success(score))
}

pub async fn delete_score(claims: Claims, path: web::Path<Uuid>) -> Result<HttpResponse> {
    claims.require(Action::RecordScore)?;

    let existing = find_score(path.into_inner()).await?;
    ensure_event_not_final(existing.event_id).await?;

    let score_id = existing.id;
    DatabaseTransaction::run(|tx| {
        Box::pin(async move {
            score_repo::delete_score(tx, score_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Score not found".to_string()))
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

async fn find_score(id: Uuid) -> Result<EventScore, AppError> {
    score_repo::get_score_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Score not found".to_string()))
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

async fn persist_gate(
    score_id: Uuid,
    gate: crate::services::approval::DualApprovalGate,
) -> Result<EventScore, AppError> {
    DatabaseTransaction::run(|tx| {
        Box::pin(async move {
            score_repo::set_verification_state(tx, score_id, gate)
                .await?
                .ok_or_else(|| AppError::NotFound("Score not found".to_string()))
        })
    })
    .await
}
