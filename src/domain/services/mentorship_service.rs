use std::sync::Arc;
use crate::domain::{
    models::{
        mentorship_group::{GroupPlacement, MentorshipGroup},
        user::User,
    },
    ports::{GroupIdGenerator, MentorshipGroupRepository, UserRepository},
    services::group_assignment::assign_mentorship_group,
};
use crate::error::AppError;
use tracing::{info, warn};

pub const MIN_INTERESTS: usize = 3;
pub const MAX_INTERESTS: usize = 5;

/// Trims the submitted interests and enforces the 3 to 5 distinct entries rule.
pub fn normalize_interests(interests: Vec<String>) -> Result<Vec<String>, AppError> {
    let mut normalized: Vec<String> = Vec::with_capacity(interests.len());

    for interest in interests {
        let trimmed = interest.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation("Interests must not be blank".into()));
        }
        if normalized.iter().any(|i| i.eq_ignore_ascii_case(trimmed)) {
            return Err(AppError::Validation(format!("Duplicate interest: {}", trimmed)));
        }
        normalized.push(trimmed.to_string());
    }

    if !(MIN_INTERESTS..=MAX_INTERESTS).contains(&normalized.len()) {
        return Err(AppError::Validation(format!(
            "Select between {} and {} interests, got {}",
            MIN_INTERESTS, MAX_INTERESTS, normalized.len()
        )));
    }

    Ok(normalized)
}

struct AssignmentPlan {
    user: User,
    interests: Vec<String>,
    placement: GroupPlacement,
    /// Stored groups with the user already taken out of every member list.
    groups: Vec<MentorshipGroup>,
    /// Ids of the groups the user was a member of before this save.
    previous_group_ids: Vec<String>,
}

pub struct MentorshipService {
    user_repo: Arc<dyn UserRepository>,
    group_repo: Arc<dyn MentorshipGroupRepository>,
    id_generator: Arc<dyn GroupIdGenerator>,
}

impl MentorshipService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        group_repo: Arc<dyn MentorshipGroupRepository>,
        id_generator: Arc<dyn GroupIdGenerator>,
    ) -> Self {
        Self { user_repo, group_repo, id_generator }
    }

    pub async fn preview_assignment(&self, user_id: &str, interests: Vec<String>) -> Result<GroupPlacement, AppError> {
        let plan = self.plan(user_id, interests).await?;
        Ok(plan.placement)
    }

    /// Saves an intern's interests and moves them into the group the heuristic picks.
    pub async fn update_interests(&self, user_id: &str, interests: Vec<String>) -> Result<(User, GroupPlacement), AppError> {
        let AssignmentPlan { mut user, interests, placement, groups, previous_group_ids } =
            self.plan(user_id, interests).await?;

        let target = groups.iter().find(|g| g.id == placement.group_id);

        if !placement.is_new_group
            && let Some(group) = target
            && group.is_full()
        {
            warn!("Mentorship group {} is full, cannot place user {}", group.id, user.id);
            return Err(AppError::Conflict(format!("Mentorship group {} is full", group.name)));
        }

        let left: Vec<MentorshipGroup> = groups.iter()
            .filter(|g| previous_group_ids.contains(&g.id) && g.id != placement.group_id)
            .cloned()
            .collect();
        let mut changed = left.clone();
        let mut new_group = None;

        if placement.is_new_group {
            let mut group = MentorshipGroup::new(
                placement.group_id.clone(),
                placement.group_name.clone(),
                placement.shared_interests.clone(),
            );
            group.members.push(user.id.clone());
            new_group = Some(group);
        } else if let Some(group) = target {
            if !previous_group_ids.contains(&group.id) {
                let mut group = group.clone();
                group.members.push(user.id.clone());
                changed.push(group);
            }
        } else {
            // Only the general group can be picked without being stored yet.
            let mut group = MentorshipGroup::general();
            group.members.push(user.id.clone());
            new_group = Some(group);
        }

        user.interests = interests;
        user.mentorship_group_id = Some(placement.group_id.clone());
        let updated = self.group_repo.save_assignment(&user, &changed, new_group.as_ref()).await?;

        for group in &left {
            info!("Removed user {} from mentorship group {}", updated.id, group.id);
        }
        info!(
            user_id = %updated.id,
            group_id = %placement.group_id,
            is_new_group = placement.is_new_group,
            "Assigned mentorship group"
        );

        Ok((updated, placement))
    }

    /// Takes the user out of any group they belong to and deletes them in one write.
    pub async fn remove_user(&self, user_id: &str) -> Result<(), AppError> {
        let user = self.user_repo.find_by_id(user_id).await?
            .ok_or(AppError::NotFound("User not found".into()))?;

        let mut changed = Vec::new();
        for mut group in self.group_repo.list().await? {
            if group.remove_member(&user.id) {
                changed.push(group);
            }
        }

        self.group_repo.delete_user(&user.id, &changed).await?;
        for group in &changed {
            info!("Removed user {} from mentorship group {}", user.id, group.id);
        }
        Ok(())
    }

    pub async fn group_with_members(&self, group_id: &str) -> Result<Option<(MentorshipGroup, Vec<User>)>, AppError> {
        let Some(group) = self.group_repo.find_by_id(group_id).await? else {
            return Ok(None);
        };

        let users = self.user_repo.list().await?;
        let members = group.members.iter()
            .filter_map(|id| users.iter().find(|u| &u.id == id).cloned())
            .collect();

        Ok(Some((group, members)))
    }

    pub async fn group_for_user(&self, user_id: &str) -> Result<Option<(MentorshipGroup, Vec<User>)>, AppError> {
        let user = self.user_repo.find_by_id(user_id).await?
            .ok_or(AppError::NotFound("User not found".into()))?;

        match user.mentorship_group_id {
            Some(group_id) => self.group_with_members(&group_id).await,
            None => Ok(None),
        }
    }

    async fn plan(&self, user_id: &str, interests: Vec<String>) -> Result<AssignmentPlan, AppError> {
        let user = self.user_repo.find_by_id(user_id).await?
            .ok_or(AppError::NotFound("User not found".into()))?;

        if !user.is_intern() {
            warn!("Rejected interests for non-intern user {}", user.id);
            return Err(AppError::Validation("Only interns can join mentorship groups".into()));
        }

        let interests = normalize_interests(interests).inspect_err(|e| {
            warn!("Rejected interests for user {}: {}", user.id, e);
        })?;

        let users = self.user_repo.list().await?;
        let mut groups = self.group_repo.list().await?;

        let previous_group_ids = groups.iter_mut()
            .filter_map(|g| g.remove_member(&user.id).then(|| g.id.clone()))
            .collect();

        let placement = assign_mentorship_group(&user.id, &interests, &users, &groups, self.id_generator.as_ref());

        Ok(AssignmentPlan { user, interests, placement, groups, previous_group_ids })
    }
}
