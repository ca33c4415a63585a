/// Accounts: registration, login, token authentication, profile management
use tracing::{debug, info, warn};

use super::BoardService;
use crate::auth::authenticator::AccessToken;
use crate::auth::middleware::AuthContext;
use crate::error::{BoardError, BoardResult};
use crate::models::user::{CreateUser, UpdateUser, User};

/// Input for [`BoardService::register`]
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub username: String,

    /// Plaintext; hashed before it reaches storage
    pub password: String,

    pub full_name: Option<String>,
}

/// Input for [`BoardService::update_profile`]
///
/// `full_name: Some(None)` clears the name.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub email: Option<String>,
    pub username: Option<String>,
    pub full_name: Option<Option<String>>,
    pub is_active: Option<bool>,
}

fn email_taken() -> BoardError {
    BoardError::Conflict("Email already registered".to_string())
}

fn username_taken() -> BoardError {
    BoardError::Conflict("Username already taken".to_string())
}

fn bad_credentials() -> BoardError {
    BoardError::Unauthorized("Incorrect email or password".to_string())
}

fn inactive() -> BoardError {
    BoardError::Unauthorized("Inactive user".to_string())
}

impl BoardService {
    /// Creates a new account
    ///
    /// # Errors
    ///
    /// `Conflict` if the email or the username is already in use
    pub async fn register(&self, input: Registration) -> BoardResult<User> {
        let mut uow = self.begin().await?;

        if uow.find_user_by_email(&input.email).await?.is_some() {
            return Err(email_taken());
        }
        if uow.find_user_by_username(&input.username).await?.is_some() {
            return Err(username_taken());
        }

        let hashed_password = self.authenticator.hash_password(&input.password)?;
        let user = uow
            .insert_user(CreateUser {
                email: input.email,
                username: input.username,
                hashed_password,
                full_name: input.full_name,
                is_superuser: false,
            })
            .await?;
        uow.commit().await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Exchanges email and password for a bearer token
    ///
    /// The login name is the account's email address.
    ///
    /// # Errors
    ///
    /// `Unauthorized` for an unknown email, a wrong password, or an inactive account
    pub async fn login(&self, email: &str, password: &str) -> BoardResult<AccessToken> {
        let mut uow = self.begin().await?;
        let user = uow.find_user_by_email(email).await?.ok_or_else(bad_credentials)?;
        drop(uow);

        if !self.authenticator.verify_password(password, &user.hashed_password)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(bad_credentials());
        }
        if !user.is_active {
            return Err(inactive());
        }

        let token = self.authenticator.issue_token(user.id)?;
        info!(user_id = %user.id, "User logged in");
        Ok(token)
    }

    /// Resolves a bearer token to an active caller
    ///
    /// # Errors
    ///
    /// `Unauthorized` if the token is invalid or expired, or its user no
    /// longer exists or is inactive
    pub async fn authenticate(&self, token: &str) -> BoardResult<AuthContext> {
        let user_id = self.authenticator.verify_token(token)?;

        let mut uow = self.begin().await?;
        let user = uow.find_user(user_id).await?.ok_or_else(|| {
            BoardError::Unauthorized("Could not validate credentials".to_string())
        })?;

        if !user.is_active {
            return Err(inactive());
        }

        debug!(user_id = %user.id, "Token authenticated");
        Ok(AuthContext::new(user.id))
    }

    /// Returns the caller's account
    pub async fn current_user(&self, ctx: &AuthContext) -> BoardResult<User> {
        let mut uow = self.begin().await?;
        uow.find_user(ctx.user_id)
            .await?
            .ok_or_else(|| BoardError::NotFound("User not found".to_string()))
    }

    /// Updates the caller's profile
    ///
    /// # Errors
    ///
    /// `Conflict` if the new email or username belongs to another account;
    /// nothing is changed in that case
    pub async fn update_profile(&self, ctx: &AuthContext, changes: ProfileChanges) -> BoardResult<User> {
        let mut uow = self.begin().await?;
        let current = uow
            .find_user(ctx.user_id)
            .await?
            .ok_or_else(|| BoardError::NotFound("User not found".to_string()))?;

        if let Some(email) = changes.email.as_deref().filter(|e| *e != current.email) {
            if uow.find_user_by_email(email).await?.is_some() {
                return Err(email_taken());
            }
        }
        if let Some(username) = changes.username.as_deref().filter(|u| *u != current.username) {
            if uow.find_user_by_username(username).await?.is_some() {
                return Err(username_taken());
            }
        }

        let user = uow
            .update_user(
                ctx.user_id,
                UpdateUser {
                    email: changes.email,
                    username: changes.username,
                    full_name: changes.full_name,
                    is_active: changes.is_active,
                    hashed_password: None,
                },
            )
            .await?
            .ok_or_else(|| BoardError::NotFound("User not found".to_string()))?;
        uow.commit().await?;

        info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }

    /// Replaces the caller's password after checking the current one
    ///
    /// # Errors
    ///
    /// `InvalidOperation` if `current_password` is wrong
    pub async fn change_password(
        &self,
        ctx: &AuthContext,
        current_password: &str,
        new_password: &str,
    ) -> BoardResult<User> {
        let mut uow = self.begin().await?;
        let user = uow
            .find_user(ctx.user_id)
            .await?
            .ok_or_else(|| BoardError::NotFound("User not found".to_string()))?;

        if !self.authenticator.verify_password(current_password, &user.hashed_password)? {
            return Err(BoardError::InvalidOperation("Incorrect password".to_string()));
        }

        let hashed_password = self.authenticator.hash_password(new_password)?;
        let user = uow
            .update_user(
                ctx.user_id,
                UpdateUser {
                    hashed_password: Some(hashed_password),
                    ..Default::default()
                },
            )
            .await?
            .ok_or_else(|| BoardError::NotFound("User not found".to_string()))?;
        uow.commit().await?;

        info!(user_id = %user.id, "Password changed");
        Ok(user)
    }

    /// Deletes the caller's account with all owned boards
    ///
    /// Cards on other users' boards assigned to the caller become unassigned.
    pub async fn delete_account(&self, ctx: &AuthContext) -> BoardResult<()> {
        let mut uow = self.begin().await?;
        if !uow.delete_user(ctx.user_id).await? {
            return Err(BoardError::NotFound("User not found".to_string()));
        }
        uow.commit().await?;

        info!(user_id = %ctx.user_id, "Account deleted");
        Ok(())
    }

    /// Creates the bootstrap superuser unless an account with `email` exists
    ///
    /// Returns the existing or newly created user.
    pub async fn ensure_superuser(&self, email: &str, username: &str, password: &str) -> BoardResult<User> {
        let mut uow = self.begin().await?;

        if let Some(existing) = uow.find_user_by_email(email).await? {
            debug!(user_id = %existing.id, "Superuser already present");
            return Ok(existing);
        }

        let hashed_password = self.authenticator.hash_password(password)?;
        let user = uow
            .insert_user(CreateUser {
                email: email.to_string(),
                username: username.to_string(),
                hashed_password,
                full_name: None,
                is_superuser: true,
            })
            .await?;
        uow.commit().await?;

        info!(user_id = %user.id, "Superuser created");
        Ok(user)
    }
}
