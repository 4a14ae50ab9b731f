/// Common test utilities for integration tests
///
/// Provides shared infrastructure for the auth-flow tests:
/// - Test database setup (migrations applied, unique identity per context)
/// - A router wired to a `MockMailer` so tests can read the mailed token
/// - Request/response helpers and row-count probes
///
/// Tests construct a context with [`TestContext::new`], which returns
/// `Ok(None)` when `DATABASE_URL` is not set so suites can skip gracefully.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use sqlx::PgPool;
use std::sync::Arc;
use tickdone_api::app::{build_router, AppState};
use tickdone_api::config::{ApiConfig, Config, DatabaseConfig, EmailConfig, SecurityConfig};
use tickdone_shared::db::migrations::run_migrations;
use tickdone_shared::email::MockMailer;
use tower::ServiceExt;
use uuid::Uuid;

/// Pepper used by every test context
pub const TEST_PEPPER: &str = "integration-test-pepper";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub mailer: Arc<MockMailer>,

    /// Unique identity for this test run, so parallel tests don't collide
    pub email: String,
    pub username: String,
}

impl TestContext {
    /// Creates a new test context, or `None` when no database is configured
    pub async fn new() -> anyhow::Result<Option<Self>> {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            return Ok(None);
        };

        let db = PgPool::connect(&url).await?;
        run_migrations(&db).await?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url,
                max_connections: 5,
            },
            security: SecurityConfig {
                pepper: TEST_PEPPER.to_string(),
            },
            email: EmailConfig {
                resend_api_key: "re_test".to_string(),
                public_api_url: "http://localhost:8080".to_string(),
                from_address: "onboarding@resend.dev".to_string(),
            },
        };

        let mailer = Arc::new(MockMailer::new());
        let state = AppState::new(db.clone(), config, mailer.clone());
        let app = build_router(state);

        let suffix = Uuid::new_v4().simple().to_string();
        Ok(Some(Self {
            db,
            app,
            mailer,
            email: format!("user-{}@example.com", suffix),
            username: format!("user-{}", suffix),
        }))
    }

    /// Sends a JSON POST and returns (status, parsed body)
    pub async fn post_json(
        &self,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    /// Sends a GET and returns (status, parsed body)
    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body)
    }

    /// Registers this context's identity and returns the mailed token
    pub async fn register(&self, password: &str) -> String {
        let (status, body) = self
            .post_json(
                "/v1/auth/register",
                serde_json::json!({
                    "email": self.email,
                    "username": self.username,
                    "password": password,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);

        self.mailer
            .last_token_for(&self.email)
            .expect("verification email should have been captured")
    }

    /// Backdates this context's pending registration by `minutes`
    pub async fn age_pending(&self, minutes: i32) {
        sqlx::query(
            "UPDATE pending_users SET created_at = NOW() - make_interval(mins => $2) WHERE email = $1",
        )
        .bind(&self.email)
        .bind(minutes)
        .execute(&self.db)
        .await
        .expect("backdating pending row should succeed");
    }

    /// Number of pending rows for this context's identity
    pub async fn pending_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM pending_users WHERE email = $1 OR username = $2")
            .bind(&self.email)
            .bind(&self.username)
            .fetch_one(&self.db)
            .await
            .unwrap()
    }

    /// Number of active user rows for this context's identity
    pub async fn user_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1 OR username = $2")
            .bind(&self.email)
            .bind(&self.username)
            .fetch_one(&self.db)
            .await
            .unwrap()
    }

    /// Removes all rows created under this context's identity
    pub async fn cleanup(&self) {
        sqlx::query("DELETE FROM pending_users WHERE email = $1 OR username = $2")
            .bind(&self.email)
            .bind(&self.username)
            .execute(&self.db)
            .await
            .unwrap();
        sqlx::query("DELETE FROM users WHERE email = $1 OR username = $2")
            .bind(&self.email)
            .bind(&self.username)
            .execute(&self.db)
            .await
            .unwrap();
    }
}

/// Expands to an early return when no test database is configured
#[macro_export]
macro_rules! require_database {
    () => {
        match common::TestContext::new().await.unwrap() {
            Some(ctx) => ctx,
            None => {
                eprintln!("DATABASE_URL not set; skipping integration test");
                return;
            }
        }
    };
}
