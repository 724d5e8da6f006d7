use crate::domain::{
    models::{mentorship_group::MentorshipGroup, user::User},
    ports::MentorshipGroupRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{types::Json, Sqlite, SqlitePool, Transaction};

pub struct SqliteMentorshipGroupRepo {
    pool: SqlitePool,
}

impl SqliteMentorshipGroupRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

async fn write_members(tx: &mut Transaction<'_, Sqlite>, groups: &[MentorshipGroup]) -> Result<(), AppError> {
    for group in groups {
        let result = sqlx::query("UPDATE mentorship_groups SET name=?, members=?, shared_interests=? WHERE id=?")
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
impl MentorshipGroupRepository for SqliteMentorshipGroupRepo {
    async fn find_by_id(&self, id: &str) -> Result<Option<MentorshipGroup>, AppError> {
        sqlx::query_as::<_, MentorshipGroup>("SELECT * FROM mentorship_groups WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<MentorshipGroup>, AppError> {
        sqlx::query_as::<_, MentorshipGroup>(
            "SELECT * FROM mentorship_groups ORDER BY created_at ASC, rowid ASC"
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
                "INSERT INTO mentorship_groups (id, name, members, shared_interests, created_at) VALUES (?, ?, ?, ?, ?)"
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
            "UPDATE users SET interests=?, mentorship_group_id=? WHERE id=? RETURNING *",
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

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
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
