/// Access-token generation and validation
///
/// Tokens are signed with HS256 (HMAC-SHA256) and carry the holder's email
/// plus issued-at and expiration timestamps. They are ephemeral: nothing is
/// persisted, and a token is valid only while its signature verifies against
/// the process-wide secret and its expiration has not passed.
///
/// # Example
///
/// ```
/// use tasknest_shared::auth::jwt::{issue_token, validate_token, Claims};
/// use chrono::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "your-secret-key-at-least-32-bytes!!!";
/// let claims = Claims::new("user@example.com", Duration::minutes(30));
/// let token = issue_token(&claims, secret)?;
///
/// let validated = validate_token(&token, secret)?;
/// assert_eq!(validated.email, "user@example.com");
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Default token lifetime when no explicit TTL is configured
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,
}

/// Access-token claim set
///
/// # Claims
///
/// - `email`: the holder's email address, used to resolve the user
/// - `iat`: issued-at (Unix timestamp)
/// - `exp`: expiration (Unix timestamp)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Email address of the token holder
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates claims expiring `ttl` from now
    pub fn new(email: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + ttl;

        Self {
            email: email.into(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Checks whether the expiration timestamp has passed
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Creates a signed token from claims
///
/// # Arguments
///
/// * `claims` - Token claims
/// * `secret` - Signing secret (should be at least 32 bytes)
///
/// # Errors
///
/// Returns `JwtError::CreateError` if encoding fails
pub fn issue_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a token and extracts its claims
///
/// Verifies the HS256 signature and the expiration timestamp.
///
/// # Errors
///
/// - `JwtError::Expired` if the token's `exp` has passed
/// - `JwtError::ValidationError` for any other failure (bad signature,
///   malformed token, missing claims)
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}
