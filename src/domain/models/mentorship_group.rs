use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const MAX_GROUP_MEMBERS: usize = 6;
pub const GENERAL_GROUP_ID: &str = "general";
pub const GENERAL_GROUP_NAME: &str = "General Mentorship";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct MentorshipGroup {
    pub id: String,
    pub name: String,
    #[sqlx(json)]
    pub members: Vec<String>,
    #[sqlx(json)]
    pub shared_interests: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl MentorshipGroup {
    pub fn new(id: String, name: String, shared_interests: Vec<String>) -> Self {
        Self {
            id,
            name,
            members: Vec::new(),
            shared_interests,
            created_at: Utc::now(),
        }
    }

    /// The fallback group for interns nobody else shares interests with.
    pub fn general() -> Self {
        Self::new(GENERAL_GROUP_ID.to_string(), GENERAL_GROUP_NAME.to_string(), Vec::new())
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= MAX_GROUP_MEMBERS
    }

    pub fn remove_member(&mut self, user_id: &str) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m != user_id);
        self.members.len() != before
    }
}

/// Where the assignment heuristic wants to put an intern.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GroupPlacement {
    pub group_id: String,
    pub group_name: String,
    pub shared_interests: Vec<String>,
    pub is_new_group: bool,
}
