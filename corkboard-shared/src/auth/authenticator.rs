/// Credential collaborator used by the service façade
///
/// The façade never hashes passwords or signs tokens itself; it calls an
/// [`Authenticator`]. [`JwtAuthenticator`] is the production implementation
/// (Argon2id + HS256 JWT).
///
/// # Example
///
/// ```
/// use corkboard_shared::auth::authenticator::{Authenticator, JwtAuthenticator};
/// use chrono::Duration;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let auth = JwtAuthenticator::new("a-secret-key-of-at-least-32-bytes!", Duration::minutes(30));
///
/// let user_id = Uuid::new_v4();
/// let token = auth.issue_token(user_id)?;
/// assert_eq!(auth.verify_token(&token.access_token)?, user_id);
/// # Ok(())
/// # }
/// ```

use chrono::Duration;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::{self, Claims, JwtError};
use super::password::{self, HashParams, PasswordError};

/// Token handed to a client after login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,

    /// Always `"bearer"`
    pub token_type: String,
}

impl AccessToken {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Password hashing and token issuance/verification
pub trait Authenticator: Send + Sync {
    /// Hashes a plaintext password for storage
    fn hash_password(&self, password: &str) -> Result<String, PasswordError>;

    /// Checks a plaintext password against a stored hash
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;

    /// Issues a bearer token identifying `user_id`
    fn issue_token(&self, user_id: Uuid) -> Result<AccessToken, JwtError>;

    /// Verifies a bearer token and returns the user id it identifies
    fn verify_token(&self, token: &str) -> Result<Uuid, JwtError>;
}

/// Argon2id passwords and HS256 JWT access tokens
#[derive(Clone)]
pub struct JwtAuthenticator {
    secret: String,
    token_ttl: Duration,
    hash_params: HashParams,
}

impl JwtAuthenticator {
    pub fn new(secret: impl Into<String>, token_ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            token_ttl,
            hash_params: HashParams::default(),
        }
    }

    /// Overrides the Argon2id cost parameters used for new hashes
    pub fn with_hash_params(mut self, hash_params: HashParams) -> Self {
        self.hash_params = hash_params;
        self
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }
}

impl std::fmt::Debug for JwtAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAuthenticator")
            .field("secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("hash_params", &self.hash_params)
            .finish()
    }
}

impl Authenticator for JwtAuthenticator {
    fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        password::hash_password_with(password, self.hash_params)
    }

    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        password::verify_password(password, hash)
    }

    fn issue_token(&self, user_id: Uuid) -> Result<AccessToken, JwtError> {
        let claims = Claims::new(user_id, self.token_ttl);
        jwt::create_token(&claims, &self.secret).map(AccessToken::bearer)
    }

    fn verify_token(&self, token: &str) -> Result<Uuid, JwtError> {
        jwt::validate_token(token, &self.secret).map(|claims| claims.sub)
    }
}
