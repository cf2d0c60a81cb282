/// Application state and router builder
///
/// Defines the shared application state and builds the Axum router with all
/// routes and middleware.
///
/// # Example
///
/// ```no_run
/// use tasknest_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = tasknest_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    routing::{get, post, put},
    Router,
};
use chrono::Duration;
use sqlx::PgPool;
use std::sync::Arc;
use tasknest_shared::auth::middleware::{bearer_token, resolve_user_from_token, CurrentUser};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. The pool
/// and configuration are read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the signing secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }

    /// Gets the configured access-token lifetime
    pub fn token_ttl(&self) -> Duration {
        Duration::minutes(self.config.jwt.ttl_minutes)
    }
}

/// Builds the complete Axum router
///
/// # Routes
///
/// ```text
/// GET    /health          # Health check (public)
/// POST   /register        # Register a new user (public)
/// POST   /login           # Login with form credentials (public)
/// GET    /me              # Resolved user for the bearer token
/// POST   /todos           # Create a to-do item
/// GET    /todos           # List owned items (paginated)
/// PUT    /todos/:id       # Update an owned item
/// DELETE /todos/:id       # Delete an owned item
/// ```
///
/// Everything below `/me` and `/todos` requires a valid bearer token; the
/// auth layer resolves the token to a user before the handler runs.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    let protected_routes = Router::new()
        .route("/me", get(routes::auth::whoami))
        .route(
            "/todos",
            post(routes::todos::create_todo).get(routes::todos::list_todos),
        )
        .route(
            "/todos/:id",
            put(routes::todos::update_todo).delete(routes::todos::delete_todo),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bearer-token authentication layer
///
/// Extracts the bearer token from the Authorization header, resolves it to a
/// user (signature, expiration, and store lookup), and injects [`CurrentUser`]
/// into the request extensions.
async fn bearer_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let token = bearer_token(auth_header)?;

    let user = resolve_user_from_token(&state.db, state.jwt_secret(), token).await?;

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}
