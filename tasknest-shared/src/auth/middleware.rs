/// Bearer-token authentication for Axum
///
/// Protected routes require an `Authorization: Bearer <token>` header. The
/// middleware validates the token signature and expiration, extracts the
/// `email` claim, loads the matching user from the store, and inserts a
/// [`CurrentUser`] into the request extensions for handlers to extract.
///
/// A token for a user that no longer exists is rejected the same way as an
/// invalid token.
///
/// # Example
///
/// ```no_run
/// use axum::Extension;
/// use tasknest_shared::auth::middleware::CurrentUser;
///
/// async fn handler(Extension(CurrentUser(user)): Extension<CurrentUser>) -> String {
///     format!("Hello, {}!", user.name)
/// }
/// ```

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use sqlx::PgPool;

use super::jwt::{validate_token, JwtError};
use crate::models::user::User;

/// The authenticated user, inserted into request extensions after a
/// successful bearer-token resolution
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Error type for bearer-token authentication
#[derive(Debug)]
pub enum AuthError {
    /// Missing or non-Bearer authorization header
    MissingCredentials,

    /// Token validation failed (bad signature, expired, malformed)
    InvalidToken(String),

    /// Token was valid but no matching user exists
    UnknownUser,

    /// Store lookup failed
    DatabaseError(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingCredentials => (StatusCode::UNAUTHORIZED, "Missing credentials"),
            AuthError::InvalidToken(_) => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            AuthError::UnknownUser => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            AuthError::DatabaseError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let mut response = (status, message).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                axum::http::HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}

/// Extracts the bearer token from an `Authorization` header value
///
/// # Errors
///
/// Returns `AuthError::MissingCredentials` if the header is absent or does
/// not use the Bearer scheme
pub fn bearer_token(auth_header: Option<&str>) -> Result<&str, AuthError> {
    auth_header
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(AuthError::MissingCredentials)
}

/// Resolves a bearer token to the user it belongs to
///
/// Verifies the token signature and expiration, extracts the `email` claim,
/// and looks the user up by email.
///
/// # Errors
///
/// - `AuthError::InvalidToken` if the signature is invalid or the token has
///   expired
/// - `AuthError::UnknownUser` if no user matches the email claim (e.g. the
///   account was removed after the token was issued)
/// - `AuthError::DatabaseError` if the store lookup fails
pub async fn resolve_user_from_token(
    pool: &PgPool,
    secret: &str,
    token: &str,
) -> Result<User, AuthError> {
    let claims = validate_token(token, secret).map_err(|e| match e {
        JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
        _ => AuthError::InvalidToken(format!("Invalid token: {}", e)),
    })?;

    let user = User::find_by_email(pool, &claims.email)
        .await
        .map_err(|e| AuthError::DatabaseError(format!("Database error: {}", e)))?
        .ok_or(AuthError::UnknownUser)?;

    Ok(user)
}
