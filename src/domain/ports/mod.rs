use crate::domain::models::{mentorship_group::MentorshipGroup, user::User};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn list(&self) -> Result<Vec<User>, AppError>;
}

#[async_trait]
pub trait MentorshipGroupRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<MentorshipGroup>, AppError>;
    /// Groups in creation order. The assignment scan depends on this order.
    async fn list(&self) -> Result<Vec<MentorshipGroup>, AppError>;
    /// Writes the changed member lists, inserts `new_group` and stores the user's
    /// interests and group id in one transaction.
    async fn save_assignment(
        &self,
        user: &User,
        changed_groups: &[MentorshipGroup],
        new_group: Option<&MentorshipGroup>,
    ) -> Result<User, AppError>;
    /// Deletes the user and writes the member lists they were removed from, atomically.
    async fn delete_user(&self, user_id: &str, changed_groups: &[MentorshipGroup]) -> Result<(), AppError>;
}

pub trait GroupIdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}
