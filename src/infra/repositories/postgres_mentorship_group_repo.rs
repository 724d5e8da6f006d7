use crate::domain::{
    models::{mentorship_group::MentorshipGroup, user::User},
    ports::MentorshipGroupRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{types::Json, PgPool, Postgres, Transaction};

pub struct PostgresMentorshipGroupRepo {
    pool: PgPool,
}

impl PostgresMentorshipGroupRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn write_members(tx: &mut Transaction<'_, Postgres>, groups: &[MentorshipGroup]) -> Result<(), AppError> {
    for group in groups {
        let result = sqlx::query("UPDATE mentorship_groups SET name=$1, members=$2, shared_interests=$3 WHERE id=$4")
            .bind(&group.name)
            .bind(Json(&group.members))
            .bind(Json(&group.shared_interests))
            .bind(&group.id)
            .execute(&mut **tx)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Mentorship group {} not found", group.id)));
        }
    }
    Ok(())
}

#[async_trait]
impl MentorshipGroupRepository for PostgresMentorshipGroupRepo {
    async fn find_by_id(&self, id: &str) -> Result<Option<MentorshipGroup>, AppError> {
        sqlx::query_as::<_, MentorshipGroup>("SELECT * FROM mentorship_groups WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<MentorshipGroup>, AppError> {
        sqlx::query_as::<_, MentorshipGroup>(
            "SELECT * FROM mentorship_groups ORDER BY created_at ASC, id ASC"
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn save_assignment(
        &self,
        user: &User,
        changed_groups: &[MentorshipGroup],
        new_group: Option<&MentorshipGroup>,
    ) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        write_members(&mut tx, changed_groups).await?;

        if let Some(group) = new_group {
            sqlx::query(
                "INSERT INTO mentorship_groups (id, name, members, shared_interests, created_at) VALUES ($1, $2, $3, $4, $5)"
            )
                .bind(&group.id)
                .bind(&group.name)
                .bind(Json(&group.members))
                .bind(Json(&group.shared_interests))
                .bind(group.created_at)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }

        let updated = sqlx::query_as::<_, User>(
            "UPDATE users SET interests=$1, mentorship_group_id=$2 WHERE id=$3 RETURNING *",
        )
            .bind(Json(&user.interests))
            .bind(&user.mentorship_group_id)
            .bind(&user.id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("User not found".into()))?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }

    async fn delete_user(&self, user_id: &str, changed_groups: &[MentorshipGroup]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        write_members(&mut tx, changed_groups).await?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".into()));
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }
}
