use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateUserRequest, UpdateInterestsRequest};
use crate::api::dtos::responses::{AssignmentResponse, GroupDetailResponse};
use crate::domain::models::user::User;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = payload.name.trim();
    let email = payload.email.trim().to_lowercase();

    if name.is_empty() || email.is_empty() {
        return Err(AppError::Validation("Name and email are required".into()));
    }
    if !email.contains('@') {
        return Err(AppError::Validation("Email address is invalid".into()));
    }

    if state.user_repo.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("Email already exists".into()));
    }

    let user = User::new(name.to_string(), email, payload.role);
    let created = state.user_repo.create(&user).await?;

    info!("Created {} user: {}", created.role.as_str(), created.id);
    Ok(Json(created))
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let users = state.user_repo.list().await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_repo.find_by_id(&user_id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.mentorship_service.remove_user(&user_id).await?;
    info!("Deleted user {}", user_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

/// Profile save: stores the interests and places the intern in a mentorship group.
pub async fn update_interests(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(payload): Json<UpdateInterestsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (user, placement) = state.mentorship_service
        .update_interests(&user_id, payload.interests)
        .await?;

    Ok(Json(AssignmentResponse { user, placement }))
}

pub async fn get_user_group(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let detail = state.mentorship_service.group_for_user(&user_id).await?
        .ok_or(AppError::NotFound("User is not in a mentorship group".into()))?;
    Ok(Json(GroupDetailResponse::from(detail)))
}
