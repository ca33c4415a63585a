/// List model and database operations
///
/// A list belongs to exactly one board for its whole life and is ordered
/// within that board by `position` (see [`super::ordering`]).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE lists (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     position INTEGER NOT NULL DEFAULT 0,
///     board_id UUID NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, Postgres, QueryBuilder};
use uuid::Uuid;

use super::card::Card;
use super::ordering::Positioned;

/// List record
///
/// Named `BoardList` to keep it apart from `std` collections; the table is `lists`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BoardList {
    pub id: Uuid,
    pub title: String,
    pub position: i32,

    /// Parent board; immutable
    pub board_id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Positioned for BoardList {
    fn position(&self) -> i32 {
        self.position
    }

    fn container_id(&self) -> Uuid {
        self.board_id
    }
}

/// Input for creating a new list
#[derive(Debug, Clone)]
pub struct CreateList {
    pub title: String,
    pub position: i32,
    pub board_id: Uuid,
}

/// Input for updating a list
///
/// Has no `board_id`: lists never change boards.
#[derive(Debug, Clone, Default)]
pub struct UpdateList {
    pub title: Option<String>,
    pub position: Option<i32>,
}

impl UpdateList {
    /// Update that only sets a new position
    pub fn position(position: i32) -> Self {
        Self {
            title: None,
            position: Some(position),
        }
    }

    /// Applies the present fields to an in-memory list and bumps `updated_at`
    pub fn apply_to(self, list: &mut BoardList) {
        if let Some(title) = self.title {
            list.title = title;
        }
        if let Some(position) = self.position {
            list.position = position;
        }
        list.updated_at = Utc::now();
    }
}

/// List with its cards in display order
#[derive(Debug, Clone, Serialize)]
pub struct ListDetail {
    #[serde(flatten)]
    pub list: BoardList,
    pub cards: Vec<Card>,
}

impl BoardList {
    /// Creates a new list
    ///
    /// # Errors
    ///
    /// Returns an error if the board doesn't exist (foreign key violation)
    /// or if the database connection fails
    pub async fn create<'e, E>(executor: E, data: CreateList) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let list = sqlx::query_as::<_, BoardList>(
            r#"
            INSERT INTO lists (title, position, board_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, position, board_id, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.position)
        .bind(data.board_id)
        .fetch_one(executor)
        .await?;

        Ok(list)
    }

    /// Finds a list by ID
    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let list = sqlx::query_as::<_, BoardList>(
            r#"
            SELECT id, title, position, board_id, created_at, updated_at
            FROM lists
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(list)
    }

    /// Lists the lists of a board in display order
    pub async fn list_by_board<'e, E>(
        executor: E,
        board_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let lists = sqlx::query_as::<_, BoardList>(
            r#"
            SELECT id, title, position, board_id, created_at, updated_at
            FROM lists
            WHERE board_id = $1
            ORDER BY position, created_at, id
            "#,
        )
        .bind(board_id)
        .fetch_all(executor)
        .await?;

        Ok(lists)
    }

    /// Updates a list
    ///
    /// # Returns
    ///
    /// The updated list if found, None if the list doesn't exist
    pub async fn update<'e, E>(
        executor: E,
        id: Uuid,
        data: UpdateList,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE lists SET updated_at = NOW()");

        if let Some(title) = data.title {
            query.push(", title = ").push_bind(title);
        }
        if let Some(position) = data.position {
            query.push(", position = ").push_bind(position);
        }

        query.push(" WHERE id = ").push_bind(id);
        query.push(" RETURNING id, title, position, board_id, created_at, updated_at");

        let list = query
            .build_query_as::<BoardList>()
            .fetch_optional(executor)
            .await?;

        Ok(list)
    }

    /// Deletes a list (cards cascade)
    ///
    /// # Returns
    ///
    /// True if the list was deleted, false if it didn't exist
    pub async fn delete<'e, E>(executor: E, id: Uuid) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM lists WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
