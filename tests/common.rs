use internflow_backend::{
    api::router::create_router,
    config::Config,
    domain::ports::GroupIdGenerator,
    infra::{
        factory::build_state,
        repositories::{
            sqlite_mentorship_group_repo::SqliteMentorshipGroupRepo,
            sqlite_user_repo::SqliteUserRepo,
        },
    },
    state::AppState,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    Router,
};
use tower::ServiceExt;
use serde_json::{json, Value};

/// Hands out `mg_1`, `mg_2`, ... so tests can predict new group ids.
pub struct SequentialGroupIds(AtomicUsize);

impl GroupIdGenerator for SequentialGroupIds {
    fn next_id(&self) -> String {
        format!("mg_{}", self.0.fetch_add(1, Ordering::SeqCst))
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
        };

        let state = Arc::new(build_state(
            config,
            Arc::new(SqliteUserRepo::new(pool.clone())),
            Arc::new(SqliteMentorshipGroupRepo::new(pool.clone())),
            Arc::new(SequentialGroupIds(AtomicUsize::new(1))),
        ));

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(payload) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    pub async fn create_user(&self, name: &str, role: &str) -> String {
        let (status, body) = self.request("POST", "/api/v1/users", Some(json!({
            "name": name,
            "email": format!("{}@internflow.test", name.to_lowercase().replace(' ', ".")),
            "role": role
        }))).await;

        if status != StatusCode::OK {
            panic!("User creation failed in test helper: status {} body {}", status, body);
        }
        body["id"].as_str().expect("No id in created user").to_string()
    }

    pub async fn create_intern_with_interests(&self, name: &str, interests: &[&str]) -> (String, Value) {
        let id = self.create_user(name, "intern").await;
        let (status, body) = self.save_interests(&id, interests).await;
        if status != StatusCode::OK {
            panic!("Saving interests failed in test helper: status {} body {}", status, body);
        }
        (id, body)
    }

    pub async fn save_interests(&self, user_id: &str, interests: &[&str]) -> (StatusCode, Value) {
        self.request(
            "PUT",
            &format!("/api/v1/users/{}/interests", user_id),
            Some(json!({ "interests": interests })),
        ).await
    }

    pub async fn group(&self, group_id: &str) -> Value {
        let (status, body) = self.request("GET", &format!("/api/v1/mentorship-groups/{}", group_id), None).await;
        assert_eq!(status, StatusCode::OK, "group {} missing: {}", group_id, body);
        body
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
