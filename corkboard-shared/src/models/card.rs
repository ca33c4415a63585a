/// Card model and database operations
///
/// Cards are the leaf task items. A card is ordered within its list by
/// `position` and, unlike lists, may change its parent list through the move
/// operation, but only to another list of the same board.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE card_priority AS ENUM ('low', 'medium', 'high');
///
/// CREATE TABLE cards (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     position INTEGER NOT NULL DEFAULT 0,
///     list_id UUID NOT NULL REFERENCES lists(id) ON DELETE CASCADE,
///     assigned_to_id UUID REFERENCES users(id) ON DELETE SET NULL,
///     due_date TIMESTAMPTZ,
///     priority card_priority,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, Postgres, QueryBuilder};
use uuid::Uuid;

use super::ordering::Positioned;

/// Card priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "card_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CardPriority {
    Low,
    Medium,
    High,
}

/// Card record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Card {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub position: i32,

    /// Current parent list; changes only through a move
    pub list_id: Uuid,

    /// Assignee. Carries no authority over the card.
    pub assigned_to_id: Option<Uuid>,

    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<CardPriority>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Positioned for Card {
    fn position(&self) -> i32 {
        self.position
    }

    fn container_id(&self) -> Uuid {
        self.list_id
    }
}

/// Input for creating a new card
#[derive(Debug, Clone)]
pub struct CreateCard {
    pub title: String,
    pub description: Option<String>,
    pub position: i32,
    pub list_id: Uuid,
    pub assigned_to_id: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<CardPriority>,
}

/// Input for updating a card
///
/// Nullable columns use `Option<Option<_>>`: `None` leaves the column alone,
/// `Some(None)` clears it. The parent list is not updatable here; use
/// [`Card::relocate`].
#[derive(Debug, Clone, Default)]
pub struct UpdateCard {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub position: Option<i32>,
    pub assigned_to_id: Option<Option<Uuid>>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub priority: Option<Option<CardPriority>>,
}

impl UpdateCard {
    /// Update that only sets a new position
    pub fn position(position: i32) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    /// Applies the present fields to an in-memory card and bumps `updated_at`
    pub fn apply_to(self, card: &mut Card) {
        if let Some(title) = self.title {
            card.title = title;
        }
        if let Some(description) = self.description {
            card.description = description;
        }
        if let Some(position) = self.position {
            card.position = position;
        }
        if let Some(assigned_to_id) = self.assigned_to_id {
            card.assigned_to_id = assigned_to_id;
        }
        if let Some(due_date) = self.due_date {
            card.due_date = due_date;
        }
        if let Some(priority) = self.priority {
            card.priority = priority;
        }
        card.updated_at = Utc::now();
    }
}

impl Card {
    /// Creates a new card
    ///
    /// # Errors
    ///
    /// Returns an error if the list or the assignee doesn't exist (foreign key
    /// violation) or if the database connection fails
    pub async fn create<'e, E>(executor: E, data: CreateCard) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let card = sqlx::query_as::<_, Card>(
            r#"
            INSERT INTO cards (title, description, position, list_id, assigned_to_id,
                               due_date, priority)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, description, position, list_id, assigned_to_id,
                      due_date, priority, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.position)
        .bind(data.list_id)
        .bind(data.assigned_to_id)
        .bind(data.due_date)
        .bind(data.priority)
        .fetch_one(executor)
        .await?;

        Ok(card)
    }

    /// Finds a card by ID
    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let card = sqlx::query_as::<_, Card>(
            r#"
            SELECT id, title, description, position, list_id, assigned_to_id,
                   due_date, priority, created_at, updated_at
            FROM cards
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(card)
    }

    /// Lists the cards of a list in display order
    pub async fn list_by_list<'e, E>(executor: E, list_id: Uuid) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let cards = sqlx::query_as::<_, Card>(
            r#"
            SELECT id, title, description, position, list_id, assigned_to_id,
                   due_date, priority, created_at, updated_at
            FROM cards
            WHERE list_id = $1
            ORDER BY position, created_at, id
            "#,
        )
        .bind(list_id)
        .fetch_all(executor)
        .await?;

        Ok(cards)
    }

    /// Lists every card on a board, grouped by list and in display order
    pub async fn list_by_board<'e, E>(
        executor: E,
        board_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let cards = sqlx::query_as::<_, Card>(
            r#"
            SELECT c.id, c.title, c.description, c.position, c.list_id, c.assigned_to_id,
                   c.due_date, c.priority, c.created_at, c.updated_at
            FROM cards c
            JOIN lists l ON l.id = c.list_id
            WHERE l.board_id = $1
            ORDER BY c.list_id, c.position, c.created_at, c.id
            "#,
        )
        .bind(board_id)
        .fetch_all(executor)
        .await?;

        Ok(cards)
    }

    /// Updates a card
    ///
    /// # Returns
    ///
    /// The updated card if found, None if the card doesn't exist
    pub async fn update<'e, E>(
        executor: E,
        id: Uuid,
        data: UpdateCard,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let mut query = QueryBuilder::<Postgres>::new("UPDATE cards SET updated_at = NOW()");

        if let Some(title) = data.title {
            query.push(", title = ").push_bind(title);
        }
        if let Some(description) = data.description {
            query.push(", description = ").push_bind(description);
        }
        if let Some(position) = data.position {
            query.push(", position = ").push_bind(position);
        }
        if let Some(assigned_to_id) = data.assigned_to_id {
            query.push(", assigned_to_id = ").push_bind(assigned_to_id);
        }
        if let Some(due_date) = data.due_date {
            query.push(", due_date = ").push_bind(due_date);
        }
        if let Some(priority) = data.priority {
            query.push(", priority = ").push_bind(priority);
        }

        query.push(" WHERE id = ").push_bind(id);
        query.push(
            " RETURNING id, title, description, position, list_id, assigned_to_id, \
             due_date, priority, created_at, updated_at",
        );

        let card = query.build_query_as::<Card>().fetch_optional(executor).await?;

        Ok(card)
    }

    /// Sets a card's parent list and position in one statement
    ///
    /// Callers are expected to have checked that `list_id` belongs to the
    /// card's current board.
    ///
    /// # Returns
    ///
    /// The moved card if found, None if the card doesn't exist
    pub async fn relocate<'e, E>(
        executor: E,
        id: Uuid,
        list_id: Uuid,
        position: i32,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let card = sqlx::query_as::<_, Card>(
            r#"
            UPDATE cards
            SET list_id = $2, position = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, position, list_id, assigned_to_id,
                      due_date, priority, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(list_id)
        .bind(position)
        .fetch_optional(executor)
        .await?;

        Ok(card)
    }

    /// Deletes a card
    ///
    /// # Returns
    ///
    /// True if the card was deleted, false if it didn't exist
    pub async fn delete<'e, E>(executor: E, id: Uuid) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM cards WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
