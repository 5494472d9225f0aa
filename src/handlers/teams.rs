use actix_web::{web, HttpResponse, Result};
use uuid::Uuid;

use crate::database::models::{AddMemberInput, Role, Team, TeamInput};
use crate::database::repositories::{
    hostel as hostel_repo, student as student_repo, team as team_repo,
};
use crate::database::transaction::DatabaseTransaction;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::auth::Claims;
use crate::services::eligibility;
use crate::services::permissions::Action;

pub async fn create_team(claims: Claims, input: web::Json<TeamInput>) -> Result<HttpResponse> {
    claims.require(Action::CreateTeam)?;

    let team_input = input.into_inner();
    let created_by = claims.sub;
    let team = DatabaseTransaction::run(|tx| {
        Box::pin(async move { Ok(team_repo::create_team(tx, team_input, created_by).await?) })
    })
    .await?;

    log::info!("Team '{}' created by {}", team.name, claims.sub);

    Ok(ApiResponse::created(team))
}

pub async fn get_teams(_claims: Claims) -> Result<HttpResponse> {
    let teams = team_repo::get_teams().await.map_err(AppError::from)?;

    Ok(ApiResponse::success(teams))
}

pub async fn get_team(_claims: Claims, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let team = find_team(path.into_inner()).await?;

    Ok(ApiResponse::success(team))
}

pub async fn delete_team(claims: Claims, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let team = find_team(path.into_inner()).await?;
    require_roster_control(&claims, &team)?;

    let team_id = team.id;
    DatabaseTransaction::run(|tx| {
        Box::pin(async move {
            team_repo::delete_team(tx, team_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Team not found".to_string()))
        })
    })
    .await?;

    log::info!("Team {} deleted by {}", team_id, claims.sub);

    Ok(HttpResponse::NoContent().finish())
}

/// Add a student to a team. The composition check and the insert share one
/// transaction, with the current roster locked, so two concurrent additions
/// cannot both see the roster they would jointly violate.
pub async fn add_team_member(
    claims: Claims,
    path: web::Path<Uuid>,
    input: web::Json<AddMemberInput>,
) -> Result<HttpResponse> {
    claims.require(Action::ManageTeamMembers)?;

    let team = find_team(path.into_inner()).await?;
    require_roster_control(&claims, &team)?;

    let member_input = input.into_inner();
    let student = student_repo::find_by_id(member_input.student_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

    let hostel = match student.hostel_id {
        Some(hostel_id) => hostel_repo::get_hostel_by_id(hostel_id)
            .await
            .map_err(AppError::from)?,
        None => None,
    };

    let team_id = team.id;
    let membership = DatabaseTransaction::run(|tx| {
        Box::pin(async move {
            let roster = team_repo::member_affiliations_for_update(tx, team_id).await?;

            eligibility::can_add_member(
                member_input.category,
                student.id,
                hostel.as_ref(),
                &roster,
            )?;

            Ok(team_repo::add_member(tx, team_id, student.id, member_input.category).await?)
        })
    })
    .await?;

    log::info!(
        "Student {} joined team {} under {}",
        membership.student_id,
        membership.team_id,
        membership.category
    );

    Ok(ApiResponse::created(membership))
}

pub async fn get_team_members(_claims: Claims, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let team = find_team(path.into_inner()).await?;

    let memberships = team_repo::get_memberships(team.id)
        .await
        .map_err(AppError::from)?;

    Ok(ApiResponse::success(memberships))
}

pub async fn remove_team_member(
    claims: Claims,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse> {
    let (team_id, student_id) = path.into_inner();

    let team = find_team(team_id).await?;
    require_roster_control(&claims, &team)?;

    DatabaseTransaction::run(|tx| {
        Box::pin(async move {
            team_repo::remove_member(tx, team_id, student_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Membership not found".to_string()))
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

async fn find_team(team_id: Uuid) -> Result<Team, AppError> {
    team_repo::get_team_by_id(team_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Team not found".to_string()))
}

/// Roster changes are restricted to the team's creator; hostel admins can
/// step in for any team.
fn require_roster_control(claims: &Claims, team: &Team) -> Result<(), AppError> {
    if team.created_by == claims.sub || claims.role == Role::HostelAdmin {
        Ok(())
    } else {
        Err(AppError::PermissionDenied(
            "Only the team creator or a hostel admin may manage this roster".to_string(),
        ))
    }
}
