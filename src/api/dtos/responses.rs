use crate::domain::models::{
    mentorship_group::{GroupPlacement, MentorshipGroup},
    user::User,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct AssignmentResponse {
    pub user: User,
    pub placement: GroupPlacement,
}

#[derive(Serialize)]
pub struct MemberSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub interests: Vec<String>,
}

impl From<User> for MemberSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            interests: user.interests,
        }
    }
}

#[derive(Serialize)]
pub struct GroupDetailResponse {
    pub group: MentorshipGroup,
    pub members: Vec<MemberSummary>,
}

impl From<(MentorshipGroup, Vec<User>)> for GroupDetailResponse {
    fn from((group, members): (MentorshipGroup, Vec<User>)) -> Self {
        Self {
            group,
            members: members.into_iter().map(MemberSummary::from).collect(),
        }
    }
}
