/// Authentication and authorization
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing
/// - [`jwt`]: HS256 access tokens
/// - [`authenticator`]: the `Authenticator` collaborator the façade calls
/// - [`authorization`]: ownership-chain resolution and the owner check
/// - [`middleware`]: request `AuthContext` and bearer-token extraction
///
/// # Example
///
/// ```
/// use corkboard_shared::auth::password::{hash_password, verify_password};
/// use corkboard_shared::auth::jwt::{create_token, validate_token, Claims};
/// use chrono::Duration;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let secret = "a-secret-key-of-at-least-32-bytes!";
/// let token = create_token(&Claims::new(Uuid::new_v4(), Duration::minutes(30)), secret)?;
/// validate_token(&token, secret)?;
/// # Ok(())
/// # }
/// ```

pub mod authenticator;
pub mod authorization;
pub mod jwt;
pub mod middleware;
pub mod password;
