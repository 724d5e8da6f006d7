use std::sync::Arc;
use crate::domain::ports::{MentorshipGroupRepository, UserRepository};
use crate::domain::services::mentorship_service::MentorshipService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub group_repo: Arc<dyn MentorshipGroupRepository>,
    pub mentorship_service: Arc<MentorshipService>,
}
