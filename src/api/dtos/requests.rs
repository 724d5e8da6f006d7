use crate::domain::models::user::Role;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Deserialize)]
pub struct UpdateInterestsRequest {
    pub interests: Vec<String>,
}

#[derive(Deserialize)]
pub struct PreviewAssignmentRequest {
    pub user_id: String,
    pub interests: Vec<String>,
}
