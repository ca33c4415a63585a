/// Transactional persistence
///
/// The service layer never talks to a database directly. It opens a
/// [`UnitOfWork`] from a [`PersistenceStore`], performs every read and write
/// of one operation through it, and commits. Dropping a unit of work without
/// committing discards all of its writes.
///
/// Two implementations are provided:
///
/// - [`postgres::PgStore`]: one PostgreSQL transaction per unit of work
/// - [`memory::MemoryStore`]: a process-local store used by tests and
///   development, with the same constraint and cascade behavior
///
/// # Example
///
/// ```no_run
/// use corkboard_shared::store::{memory::MemoryStore, PersistenceStore};
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), corkboard_shared::store::StoreError> {
/// let store = MemoryStore::new();
///
/// let mut uow = store.begin().await?;
/// let board = uow.find_board(Uuid::new_v4()).await?;
/// assert!(board.is_none());
/// uow.commit().await?;
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::board::{Board, CreateBoard, UpdateBoard};
use crate::models::card::{Card, CreateCard, UpdateCard};
use crate::models::list::{BoardList, CreateList, UpdateList};
use crate::models::user::{CreateUser, UpdateUser, User};

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage failure
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write (carries the constraint name)
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint rejected the write (carries the constraint name)
    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            let constraint = db_err.constraint().unwrap_or_default().to_string();
            if db_err.is_unique_violation() {
                return StoreError::UniqueViolation(constraint);
            }
            if db_err.is_foreign_key_violation() {
                return StoreError::ForeignKeyViolation(constraint);
            }
        }
        StoreError::Database(err)
    }
}

/// Storage engine handle
///
/// Cheap to share behind an `Arc`; every request opens its own unit of work.
#[async_trait]
pub trait PersistenceStore: Send + Sync {
    /// Opens a new unit of work
    async fn begin(&self) -> StoreResult<Box<dyn UnitOfWork>>;

    /// Checks that the storage engine is reachable
    async fn ping(&self) -> StoreResult<()>;
}

/// One transactional unit of work
///
/// Finders return `Ok(None)` for missing rows. Updates and deletes report a
/// missing row the same way (`None` / `false`) instead of failing.
#[async_trait]
pub trait UnitOfWork: Send {
    // Users

    async fn find_user(&mut self, id: Uuid) -> StoreResult<Option<User>>;
    async fn find_user_by_email(&mut self, email: &str) -> StoreResult<Option<User>>;
    async fn find_user_by_username(&mut self, username: &str) -> StoreResult<Option<User>>;
    async fn insert_user(&mut self, data: CreateUser) -> StoreResult<User>;
    async fn update_user(&mut self, id: Uuid, data: UpdateUser) -> StoreResult<Option<User>>;

    /// Deletes a user, cascading to owned boards and clearing card assignments
    async fn delete_user(&mut self, id: Uuid) -> StoreResult<bool>;

    // Boards

    async fn find_board(&mut self, id: Uuid) -> StoreResult<Option<Board>>;

    /// Boards owned by `owner_id`, oldest first
    async fn boards_by_owner(
        &mut self,
        owner_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Board>>;

    async fn insert_board(&mut self, data: CreateBoard) -> StoreResult<Board>;
    async fn update_board(&mut self, id: Uuid, data: UpdateBoard) -> StoreResult<Option<Board>>;

    /// Deletes a board with its lists and cards
    async fn delete_board(&mut self, id: Uuid) -> StoreResult<bool>;

    // Lists

    async fn find_list(&mut self, id: Uuid) -> StoreResult<Option<BoardList>>;

    /// Lists of a board in display order
    async fn lists_in_board(&mut self, board_id: Uuid) -> StoreResult<Vec<BoardList>>;

    async fn insert_list(&mut self, data: CreateList) -> StoreResult<BoardList>;
    async fn update_list(&mut self, id: Uuid, data: UpdateList)
        -> StoreResult<Option<BoardList>>;

    /// Deletes a list with its cards
    async fn delete_list(&mut self, id: Uuid) -> StoreResult<bool>;

    // Cards

    async fn find_card(&mut self, id: Uuid) -> StoreResult<Option<Card>>;

    /// Cards of a list in display order
    async fn cards_in_list(&mut self, list_id: Uuid) -> StoreResult<Vec<Card>>;

    /// All cards on a board
    async fn cards_in_board(&mut self, board_id: Uuid) -> StoreResult<Vec<Card>>;

    async fn insert_card(&mut self, data: CreateCard) -> StoreResult<Card>;
    async fn update_card(&mut self, id: Uuid, data: UpdateCard) -> StoreResult<Option<Card>>;

    /// Sets parent list and position together
    async fn relocate_card(
        &mut self,
        id: Uuid,
        list_id: Uuid,
        position: i32,
    ) -> StoreResult<Option<Card>>;

    async fn delete_card(&mut self, id: Uuid) -> StoreResult<bool>;

    /// Makes every write of this unit visible to later units of work
    async fn commit(self: Box<Self>) -> StoreResult<()>;
}
