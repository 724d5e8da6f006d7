use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::ports::{GroupIdGenerator, MentorshipGroupRepository, UserRepository};
use crate::domain::services::mentorship_service::MentorshipService;
use crate::infra::id_generator::TimestampGroupIdGenerator;
use crate::infra::repositories::{
    postgres_user_repo::PostgresUserRepo, postgres_mentorship_group_repo::PostgresMentorshipGroupRepo,
    sqlite_user_repo::SqliteUserRepo, sqlite_mentorship_group_repo::SqliteMentorshipGroupRepo,
};

/// Wires repositories and services together. Shared by startup and the test harness.
pub fn build_state(
    config: Config,
    user_repo: Arc<dyn UserRepository>,
    group_repo: Arc<dyn MentorshipGroupRepository>,
    id_generator: Arc<dyn GroupIdGenerator>,
) -> AppState {
    let mentorship_service = Arc::new(MentorshipService::new(
        user_repo.clone(),
        group_repo.clone(),
        id_generator,
    ));

    AppState {
        config,
        user_repo,
        group_repo,
        mentorship_service,
    }
}

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let id_generator = Arc::new(TimestampGroupIdGenerator);

    if config.uses_postgres() {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        build_state(
            config.clone(),
            Arc::new(PostgresUserRepo::new(pool.clone())),
            Arc::new(PostgresMentorshipGroupRepo::new(pool)),
            id_generator,
        )
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        build_state(
            config.clone(),
            Arc::new(SqliteUserRepo::new(pool.clone())),
            Arc::new(SqliteMentorshipGroupRepo::new(pool)),
            id_generator,
        )
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
