/// User model and database operations
///
/// Users are the identity anchor of the ownership chain: every board has
/// exactly one owning user, and everything below a board inherits that owner.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email VARCHAR(255) NOT NULL,
///     username VARCHAR(50) NOT NULL,
///     hashed_password VARCHAR(255) NOT NULL,
///     full_name VARCHAR(255),
///     is_active BOOLEAN NOT NULL DEFAULT TRUE,
///     is_superuser BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT users_email_key UNIQUE (email),
///     CONSTRAINT users_username_key UNIQUE (username)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use corkboard_shared::models::user::{User, CreateUser};
/// use corkboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser {
///     email: "user@example.com".to_string(),
///     username: "user".to_string(),
///     hashed_password: "$argon2id$...".to_string(),
///     full_name: Some("Jane Doe".to_string()),
///     is_superuser: false,
/// }).await?;
///
/// let found = User::find_by_email(&pool, "user@example.com").await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, Postgres, QueryBuilder};
use uuid::Uuid;

/// User account
///
/// Passwords are stored as Argon2id hashes and never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Email address, unique across all users
    pub email: String,

    /// Login handle, unique across all users
    pub username: String,

    /// Argon2id password hash
    #[serde(skip_serializing, default)]
    pub hashed_password: String,

    /// Optional display name
    pub full_name: Option<String>,

    /// Inactive users cannot log in or use existing tokens
    pub is_active: bool,

    /// Bootstrap administrator flag
    pub is_superuser: bool,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub username: String,

    /// Argon2id password hash (NOT the plaintext password)
    pub hashed_password: String,

    pub full_name: Option<String>,
    pub is_superuser: bool,
}

/// Input for updating an existing user
///
/// Only `Some` fields are written. `full_name: Some(None)` clears the name.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub username: Option<String>,
    pub full_name: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub hashed_password: Option<String>,
}

impl UpdateUser {
    /// Returns true when no field would change
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.username.is_none()
            && self.full_name.is_none()
            && self.is_active.is_none()
            && self.hashed_password.is_none()
    }

    /// Applies the present fields to an in-memory user and bumps `updated_at`
    pub fn apply_to(self, user: &mut User) {
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(full_name) = self.full_name {
            user.full_name = full_name;
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
        if let Some(hashed_password) = self.hashed_password {
            user.hashed_password = hashed_password;
        }
        user.updated_at = Utc::now();
    }
}

impl User {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Email or username already exists (unique constraint violation)
    /// - Database connection fails
    pub async fn create<'e, E>(executor: E, data: CreateUser) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, username, hashed_password, full_name, is_superuser)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, email, username, hashed_password, full_name, is_active,
                      is_superuser, created_at, updated_at
            "#,
        )
        .bind(data.email)
        .bind(data.username)
        .bind(data.hashed_password)
        .bind(data.full_name)
        .bind(data.is_superuser)
        .fetch_one(executor)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, username, hashed_password, full_name, is_active,
                   is_superuser, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address (exact match)
    pub async fn find_by_email<'e, E>(
        executor: E,
        email: &str,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, username, hashed_password, full_name, is_active,
                   is_superuser, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }

    /// Finds a user by username (exact match)
    pub async fn find_by_username<'e, E>(
        executor: E,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, username, hashed_password, full_name, is_active,
                   is_superuser, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }

    /// Updates an existing user
    ///
    /// Only `Some` fields in `data` are written. `updated_at` is always set to
    /// the current time.
    ///
    /// # Returns
    ///
    /// The updated user if found, None if the user doesn't exist
    ///
    /// # Errors
    ///
    /// Returns an error if the new email or username belongs to another user,
    /// or if the database connection fails
    pub async fn update<'e, E>(
        executor: E,
        id: Uuid,
        data: UpdateUser,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE users SET updated_at = NOW()");

        if let Some(email) = data.email {
            query.push(", email = ").push_bind(email);
        }
        if let Some(username) = data.username {
            query.push(", username = ").push_bind(username);
        }
        if let Some(full_name) = data.full_name {
            query.push(", full_name = ").push_bind(full_name);
        }
        if let Some(is_active) = data.is_active {
            query.push(", is_active = ").push_bind(is_active);
        }
        if let Some(hashed_password) = data.hashed_password {
            query.push(", hashed_password = ").push_bind(hashed_password);
        }

        query.push(" WHERE id = ").push_bind(id);
        query.push(
            " RETURNING id, email, username, hashed_password, full_name, is_active, \
             is_superuser, created_at, updated_at",
        );

        let user = query.build_query_as::<User>().fetch_optional(executor).await?;

        Ok(user)
    }

    /// Deletes a user by ID
    ///
    /// Owned boards (and their lists and cards) cascade; card assignments to
    /// this user are cleared.
    ///
    /// # Returns
    ///
    /// True if the user was deleted, false if the user didn't exist
    pub async fn delete<'e, E>(executor: E, id: Uuid) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
