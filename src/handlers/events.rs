use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::{Event, EventCategory, EventInput, EventMode};
use crate::database::repositories::event as event_repo;
use crate::database::transaction::DatabaseTransaction;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::auth::Claims;
use crate::services::permissions::Action;

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    pub category: Option<String>,
    pub mode: Option<String>,
}

pub async fn create_event(claims: Claims, input: web::Json<EventInput>) -> Result<HttpResponse> {
    claims.require(Action::CreateEvent)?;

    let event_input = input.into_inner();
    let created_by = claims.sub;
    let event = DatabaseTransaction::run(|tx| {
        Box::pin(async move { Ok(event_repo::create_event(tx, event_input, created_by).await?) })
    })
    .await?;

    log::info!(
        "Event '{}' ({} {}) created by {}",
        event.name,
        event.category,
        event.mode,
        claims.sub
    );

    Ok(ApiResponse::created(event))
}

pub async fn get_events(_claims: Claims, query: web::Query<EventsQuery>) -> Result<HttpResponse> {
    let category = match &query.category {
        Some(raw) => Some(raw.parse::<EventCategory>().map_err(AppError::Validation)?),
        None => None,
    };
    let mode = match &query.mode {
        Some(raw) => Some(raw.parse::<EventMode>().map_err(AppError::Validation)?),
        None => None,
    };

    let events = event_repo::get_events(category, mode)
        .await
        .map_err(AppError::from)?;

    Ok(ApiResponse::success(events))
}

pub async fn get_event(_claims: Claims, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let event = find_event(path.into_inner()).await?;

    Ok(ApiResponse::success(event))
}

pub async fn update_event(
    claims: Claims,
    path: web::Path<Uuid>,
    input: web::Json<EventInput>,
) -> Result<HttpResponse> {
    claims.require(Action::EditEvent)?;

    let event_id = path.into_inner();
    let existing = find_event(event_id).await?;
    if existing.final_approved {
        return Err(AppError::Precondition(
            "Cannot edit an event whose results are final".to_string(),
        )
        .into());
    }

    let event_input = input.into_inner();
    let event = DatabaseTransaction::run(|tx| {
        Box::pin(async move {
            event_repo::update_event(tx, event_id, event_input)
                .await?
                .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
        })
    })
    .await?;

    Ok(ApiResponse::success(event))
}

pub async fn delete_event(claims: Claims, path: web::Path<Uuid>) -> Result<HttpResponse> {
    claims.require(Action::DeleteEvent)?;

    let event_id = path.into_inner();
    DatabaseTransaction::run(|tx| {
        Box::pin(async move {
            event_repo::delete_event(tx, event_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
        })
    })
    .await?;

    log::info!("Event {} deleted by {}", event_id, claims.sub);

    Ok(HttpResponse::NoContent().finish())
}

/// Record the calling committee's approval. Idempotent; approving an
/// already-approved event changes nothing.
pub async fn approve_event(claims: Claims, path: web::Path<Uuid>) -> Result<HttpResponse> {
    claims.require(Action::ApproveEvent)?;
    let authority = claims.authority()?;

    let event_id = path.into_inner();
    let event = find_event(event_id).await?;

    let mut gate = event.approval_gate();
    if !gate.approve(authority) {
        return Ok(ApiResponse::success(event));
    }

    let event = persist_gate(event_id, gate).await?;

    log::info!("Event {} approved by {} ({})", event_id, authority, claims.sub);

    Ok(ApiResponse::success(event))
}

/// Retract the calling committee's approval. The other committee's flag is
/// untouched; public visibility is withdrawn if it had been granted.
pub async fn reject_event(claims: Claims, path: web::Path<Uuid>) -> Result<HttpResponse> {
    claims.require(Action::ApproveEvent)?;
    let authority = claims.authority()?;

    let event_id = path.into_inner();
    let event = find_event(event_id).await?;

    let mut gate = event.approval_gate();
    if !gate.retract(authority) {
        return Ok(ApiResponse::success(event));
    }

    let event = persist_gate(event_id, gate).await?;

    log::info!(
        "Event {} approval retracted by {} ({})",
        event_id,
        authority,
        claims.sub
    );

    Ok(ApiResponse::success(event))
}

/// Publish the event's results. Fails unless both committees have approved.
pub async fn finalize_event(claims: Claims, path: web::Path<Uuid>) -> Result<HttpResponse> {
    claims.require(Action::FinalizeEvent)?;

    let event_id = path.into_inner();
    let event = find_event(event_id).await?;

    let mut gate = event.approval_gate();
    gate.finalize()?;

    let event = persist_gate(event_id, gate).await?;

    log::info!("Event {} results finalized by {}", event_id, claims.sub);

    Ok(ApiResponse::success(event))
}

async fn find_event(event_id: Uuid) -> Result<Event, AppError> {
    event_repo::get_event_by_id(event_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
}

async fn persist_gate(
    event_id: Uuid,
    gate: crate::services::approval::DualApprovalGate,
) -> Result<Event, AppError> {
    DatabaseTransaction::run(|tx| {
        Box::pin(async move {
            event_repo::set_approval_state(tx, event_id, gate)
                .await?
                .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
        })
    })
    .await
}
