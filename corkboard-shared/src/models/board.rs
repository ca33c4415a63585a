/// Board model and database operations
///
/// A board is the top-level container and the root of the ownership chain.
/// It has exactly one owner; lists and cards below it are reachable only
/// through that owner.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE boards (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, Postgres, QueryBuilder};
use uuid::Uuid;

use super::card::Card;
use super::list::{BoardList, ListDetail};
use super::ordering::{in_container, sort_by_position};

/// Board record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Board {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,

    /// Owning user; never changes after creation
    pub owner_id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new board
#[derive(Debug, Clone)]
pub struct CreateBoard {
    pub title: String,
    pub description: Option<String>,
    pub owner_id: Uuid,
}

/// Input for updating a board
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default)]
pub struct UpdateBoard {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
}

impl UpdateBoard {
    /// Applies the present fields to an in-memory board and bumps `updated_at`
    pub fn apply_to(self, board: &mut Board) {
        if let Some(title) = self.title {
            board.title = title;
        }
        if let Some(description) = self.description {
            board.description = description;
        }
        board.updated_at = Utc::now();
    }
}

/// Board with its lists, each carrying its cards, all in display order
#[derive(Debug, Clone, Serialize)]
pub struct BoardDetail {
    #[serde(flatten)]
    pub board: Board,
    pub lists: Vec<ListDetail>,
}

impl BoardDetail {
    /// Assembles the nested view from flat rows
    ///
    /// Cards whose `list_id` is not among `lists` are ignored.
    pub fn assemble(board: Board, mut lists: Vec<BoardList>, cards: Vec<Card>) -> Self {
        sort_by_position(&mut lists);

        let lists = lists
            .into_iter()
            .map(|list| {
                let cards = in_container(&cards, list.id);
                ListDetail { list, cards }
            })
            .collect();

        Self { board, lists }
    }
}

impl Board {
    /// Creates a new board
    ///
    /// # Errors
    ///
    /// Returns an error if the owner doesn't exist (foreign key violation)
    /// or if the database connection fails
    pub async fn create<'e, E>(executor: E, data: CreateBoard) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let board = sqlx::query_as::<_, Board>(
            r#"
            INSERT INTO boards (title, description, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, owner_id, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.owner_id)
        .fetch_one(executor)
        .await?;

        Ok(board)
    }

    /// Finds a board by ID
    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let board = sqlx::query_as::<_, Board>(
            r#"
            SELECT id, title, description, owner_id, created_at, updated_at
            FROM boards
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(board)
    }

    /// Lists boards owned by a user, oldest first
    pub async fn list_by_owner<'e, E>(
        executor: E,
        owner_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let boards = sqlx::query_as::<_, Board>(
            r#"
            SELECT id, title, description, owner_id, created_at, updated_at
            FROM boards
            WHERE owner_id = $1
            ORDER BY created_at, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(owner_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await?;

        Ok(boards)
    }

    /// Updates a board
    ///
    /// # Returns
    ///
    /// The updated board if found, None if the board doesn't exist
    pub async fn update<'e, E>(
        executor: E,
        id: Uuid,
        data: UpdateBoard,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE boards SET updated_at = NOW()");

        if let Some(title) = data.title {
            query.push(", title = ").push_bind(title);
        }
        if let Some(description) = data.description {
            query.push(", description = ").push_bind(description);
        }

        query.push(" WHERE id = ").push_bind(id);
        query.push(" RETURNING id, title, description, owner_id, created_at, updated_at");

        let board = query.build_query_as::<Board>().fetch_optional(executor).await?;

        Ok(board)
    }

    /// Deletes a board (lists and cards cascade)
    ///
    /// # Returns
    ///
    /// True if the board was deleted, false if it didn't exist
    pub async fn delete<'e, E>(executor: E, id: Uuid) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM boards WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
