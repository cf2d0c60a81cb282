/// Common test utilities for integration tests
///
/// Provides shared infrastructure: app construction against a test database,
/// request helpers, and registration/login shortcuts.
///
/// Integration tests need a reachable PostgreSQL instance; when DATABASE_URL
/// is not set, `TestContext::new` returns `None` and the test returns early.

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use sqlx::PgPool;
use tasknest_api::app::{build_router, AppState};
use tasknest_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use tower::Service as _;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Test context containing the app and its database pool
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
}

impl TestContext {
    /// Creates a test context, or `None` when no database is configured
    pub async fn new() -> anyhow::Result<Option<Self>> {
        let Ok(database_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set; skipping integration test");
            return Ok(None);
        };

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: database_url.clone(),
                max_connections: 5,
            },
            jwt: JwtConfig {
                secret: TEST_JWT_SECRET.to_string(),
                ttl_minutes: 30,
            },
        };

        let db = PgPool::connect(&database_url).await?;

        // Path relative to Cargo.toml, not this file
        sqlx::migrate!("../migrations").run(&db).await?;

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(Some(TestContext { db, app, config }))
    }

    /// Sends a request through the router
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app
            .clone()
            .call(request)
            .await
            .expect("Router call should not fail")
    }

    /// Sends a JSON request, optionally authenticated
    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: &serde_json::Value,
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        self.send(request).await
    }

    /// Sends a bodyless request, optionally authenticated
    pub async fn send_empty(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let request = builder.body(Body::empty()).unwrap();
        self.send(request).await
    }

    /// Registers a user and returns their access token
    pub async fn register_user(&self, name: &str, email: &str, password: &str) -> String {
        let response = self
            .send_json(
                "POST",
                "/register",
                None,
                &serde_json::json!({ "name": name, "email": email, "password": password }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK, "registration failed");

        let body = body_json(response).await;
        assert_eq!(body["token_type"], "bearer");
        body["access_token"].as_str().unwrap().to_string()
    }

    /// Logs in with form-encoded credentials
    pub async fn login(&self, email: &str, password: &str) -> Response<Body> {
        let form = format!(
            "username={}&password={}",
            urlencode(email),
            urlencode(password)
        );
        let request = Request::builder()
            .method("POST")
            .uri("/login")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(form))
            .unwrap();
        self.send(request).await
    }

    /// Creates a to-do item and returns its generated ID
    pub async fn create_todo(&self, token: &str, title: &str, description: &str) -> i64 {
        let response = self
            .send_json(
                "POST",
                "/todos",
                Some(token),
                &serde_json::json!({ "title": title, "description": description }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED, "create failed");

        let body = body_json(response).await;
        body["id"].as_i64().unwrap()
    }
}

/// Reads a response body as JSON
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Generates an email unique to this test run
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, Uuid::new_v4())
}

/// Minimal percent-encoding for form values used in tests
fn urlencode(value: &str) -> String {
    value.replace('@', "%40").replace('+', "%2B")
}
