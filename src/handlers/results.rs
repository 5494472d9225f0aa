use actix_web::{web, HttpResponse, Result};
use uuid::Uuid;

use crate::database::models::{Event, EventResults};
use crate::database::repositories::{event as event_repo, results as results_repo};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::ranking;

/// Public standings for one event. Events still in the approval pipeline
/// return an empty table rather than an error, so the public listing can
/// link to them without leaking unapproved results.
pub async fn get_event_results(path: web::Path<Uuid>) -> Result<HttpResponse> {
    let event = event_repo::get_event_by_id(path.into_inner())
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    let results = project_results(&event).await?;

    Ok(ApiResponse::success(results))
}

/// Public standings for every finalized event, grouped by category and mode.
pub async fn get_all_results() -> Result<HttpResponse> {
    let events = event_repo::get_finalized_events()
        .await
        .map_err(AppError::from)?;

    let mut results = Vec::with_capacity(events.len());
    for event in &events {
        results.push(project_results(event).await?);
    }

    Ok(ApiResponse::success(results))
}

async fn project_results(event: &Event) -> Result<EventResults, AppError> {
    let standings = if event.final_approved {
        let mut rows = results_repo::standing_rows(event.id).await?;
        ranking::rank_standings(&mut rows);
        rows
    } else {
        Vec::new()
    };

    Ok(EventResults {
        event_id: event.id,
        event_name: event.name.clone(),
        event_date: event.event_date,
        mode: event.mode,
        category: event.category,
        standings,
    })
}
