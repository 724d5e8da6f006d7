use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::PreviewAssignmentRequest;
use crate::api::dtos::responses::GroupDetailResponse;
use crate::error::AppError;
use std::sync::Arc;
use tracing::debug;

pub async fn list_groups(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let groups = state.group_repo.list().await?;
    Ok(Json(groups))
}

pub async fn get_group(
    State(state): State<Arc<AppState>>,
    Path(group_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let detail = state.mentorship_service.group_with_members(&group_id).await?
        .ok_or(AppError::NotFound("Mentorship group not found".into()))?;
    Ok(Json(GroupDetailResponse::from(detail)))
}

pub async fn preview_assignment(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PreviewAssignmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let placement = state.mentorship_service
        .preview_assignment(&payload.user_id, payload.interests)
        .await?;

    debug!("Previewed placement for {}: {}", payload.user_id, placement.group_id);
    Ok(Json(placement))
}
