/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /register` - Register a new user, returns an access token
/// - `POST /login` - Login with form-encoded credentials, returns an access token
/// - `GET /me` - The user resolved from the bearer token

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Extension, Form, Json};
use serde::{Deserialize, Serialize};
use tasknest_shared::{
    auth::{jwt, middleware::CurrentUser, password},
    models::user::{CreateUser, User},
};
use uuid::Uuid;
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    pub name: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (hashed before storage, never persisted in plaintext)
    pub password: String,
}

/// Login form, field names per the OAuth2 password flow
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Email address
    pub username: String,

    /// Password
    pub password: String,
}

/// Token response returned by both register and login
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed access token
    pub access_token: String,

    /// Always "bearer"
    pub token_type: String,
}

impl TokenResponse {
    fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Current-user response (password hash omitted)
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    /// Unique user ID
    pub user_id: Uuid,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,
}

/// Register a new user
///
/// Hashes the password, inserts the user, and returns a fresh access token
/// scoped to the email. The insert enforces email uniqueness atomically, so a
/// duplicate registration always fails even under concurrent requests.
///
/// # Endpoint
///
/// ```text
/// POST /register
/// Content-Type: application/json
///
/// {
///   "name": "Alice",
///   "email": "alice@example.com",
///   "password": "pw"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Invalid email format, or email already registered
/// - `500 Internal Server Error`: Server error
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<TokenResponse>> {
    req.validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let password_hash = password::hash_password(&req.password)?;

    let created = User::create(
        &state.db,
        CreateUser {
            name: req.name,
            email: req.email.clone(),
            password_hash,
        },
    )
    .await?;

    if created.is_none() {
        return Err(ApiError::Conflict(
            "A user has already been registered with this email address".to_string(),
        ));
    }

    let claims = jwt::Claims::new(req.email, state.token_ttl());
    let access_token = jwt::issue_token(&claims, state.jwt_secret())?;

    Ok(Json(TokenResponse::bearer(access_token)))
}

/// Login endpoint
///
/// Accepts form-encoded credentials (`username` carries the email, per the
/// OAuth2 password flow) and returns a fresh access token. Unknown email and
/// wrong password are indistinguishable in the response.
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/x-www-form-urlencoded
///
/// username=alice@example.com&password=pw
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Unknown email or wrong password
/// - `500 Internal Server Error`: Server error
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> ApiResult<Json<TokenResponse>> {
    let user = User::find_by_email(&state.db, &form.username)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let valid = password::verify_password(&form.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::InvalidCredentials);
    }

    let claims = jwt::Claims::new(user.email, state.token_ttl());
    let access_token = jwt::issue_token(&claims, state.jwt_secret())?;

    Ok(Json(TokenResponse::bearer(access_token)))
}

/// Current-user endpoint
///
/// Returns the user record resolved from the bearer token by the auth layer.
///
/// # Endpoint
///
/// ```text
/// GET /me
/// Authorization: Bearer <token>
/// ```
pub async fn whoami(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<UserResponse>> {
    Ok(Json(UserResponse {
        user_id: user.id,
        name: user.name,
        email: user.email,
    }))
}
