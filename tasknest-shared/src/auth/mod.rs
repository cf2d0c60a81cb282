/// Authentication utilities
///
/// This module provides the authentication primitives for tasknest:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: Access-token generation and validation
/// - [`middleware`]: Bearer-token extraction and user resolution
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Access Tokens**: HS256 signing with configurable expiration
/// - **Constant-time Comparison**: Verification uses the hashing library's
///   constant-time verify routine
///
/// # Example
///
/// ```no_run
/// use tasknest_shared::auth::password::{hash_password, verify_password};
/// use tasknest_shared::auth::jwt::{issue_token, Claims};
/// use chrono::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Password authentication
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// // Access token issuance
/// let claims = Claims::new("user@example.com", Duration::minutes(30));
/// let token = issue_token(&claims, "secret-key-at-least-32-bytes-long!!")?;
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
