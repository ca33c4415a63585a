/// Database models for Corkboard
///
/// This module contains the entity graph and the SQL that reads and writes it.
///
/// # Models
///
/// - `user`: User accounts (identity anchor, owns boards)
/// - `board`: Top-level containers, single owner
/// - `list`: Ordered containers of cards within a board
/// - `card`: Leaf task items with a mutable parent list
/// - `ordering`: Position semantics shared by lists and cards
///
/// # Ownership
///
/// Every entity resolves to exactly one owning user through one-directional
/// parent references: card → list → board → owner.
///
/// # Example
///
/// ```no_run
/// use corkboard_shared::models::board::{Board, CreateBoard};
/// use corkboard_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let board = Board::create(&pool, CreateBoard {
///     title: "Roadmap".to_string(),
///     description: None,
///     owner_id: Uuid::new_v4(),
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod board;
pub mod card;
pub mod list;
pub mod ordering;
pub mod user;
