pub mod sqlite_user_repo;
pub mod sqlite_mentorship_group_repo;

pub mod postgres_user_repo;
pub mod postgres_mentorship_group_repo;
