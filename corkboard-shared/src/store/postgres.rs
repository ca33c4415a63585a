/// PostgreSQL-backed store
///
/// Each unit of work is a single `sqlx` transaction. Dropping a
/// [`PgUnitOfWork`] without calling `commit` rolls the transaction back.
///
/// # Example
///
/// ```no_run
/// use corkboard_shared::db::pool::{create_pool, DatabaseConfig};
/// use corkboard_shared::store::{postgres::PgStore, PersistenceStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// let store = PgStore::new(pool);
///
/// store.ping().await?;
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::{PersistenceStore, StoreError, StoreResult, UnitOfWork};
use crate::db::pool::health_check;
use crate::models::board::{Board, CreateBoard, UpdateBoard};
use crate::models::card::{Card, CreateCard, UpdateCard};
use crate::models::list::{BoardList, CreateList, UpdateList};
use crate::models::user::{CreateUser, UpdateUser, User};

/// Store over a PostgreSQL connection pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl PersistenceStore for PgStore {
    async fn begin(&self) -> StoreResult<Box<dyn UnitOfWork>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgUnitOfWork { tx }))
    }

    async fn ping(&self) -> StoreResult<()> {
        health_check(&self.pool).await.map_err(StoreError::from)
    }
}

/// Unit of work over one open transaction
pub struct PgUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn find_user(&mut self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(User::find_by_id(&mut *self.tx, id).await?)
    }

    async fn find_user_by_email(&mut self, email: &str) -> StoreResult<Option<User>> {
        Ok(User::find_by_email(&mut *self.tx, email).await?)
    }

    async fn find_user_by_username(&mut self, username: &str) -> StoreResult<Option<User>> {
        Ok(User::find_by_username(&mut *self.tx, username).await?)
    }

    async fn insert_user(&mut self, data: CreateUser) -> StoreResult<User> {
        Ok(User::create(&mut *self.tx, data).await?)
    }

    async fn update_user(&mut self, id: Uuid, data: UpdateUser) -> StoreResult<Option<User>> {
        Ok(User::update(&mut *self.tx, id, data).await?)
    }

    async fn delete_user(&mut self, id: Uuid) -> StoreResult<bool> {
        Ok(User::delete(&mut *self.tx, id).await?)
    }

    async fn find_board(&mut self, id: Uuid) -> StoreResult<Option<Board>> {
        Ok(Board::find_by_id(&mut *self.tx, id).await?)
    }

    async fn boards_by_owner(
        &mut self,
        owner_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Board>> {
        Ok(Board::list_by_owner(&mut *self.tx, owner_id, limit, offset).await?)
    }

    async fn insert_board(&mut self, data: CreateBoard) -> StoreResult<Board> {
        Ok(Board::create(&mut *self.tx, data).await?)
    }

    async fn update_board(&mut self, id: Uuid, data: UpdateBoard) -> StoreResult<Option<Board>> {
        Ok(Board::update(&mut *self.tx, id, data).await?)
    }

    async fn delete_board(&mut self, id: Uuid) -> StoreResult<bool> {
        Ok(Board::delete(&mut *self.tx, id).await?)
    }

    async fn find_list(&mut self, id: Uuid) -> StoreResult<Option<BoardList>> {
        Ok(BoardList::find_by_id(&mut *self.tx, id).await?)
    }

    async fn lists_in_board(&mut self, board_id: Uuid) -> StoreResult<Vec<BoardList>> {
        Ok(BoardList::list_by_board(&mut *self.tx, board_id).await?)
    }

    async fn insert_list(&mut self, data: CreateList) -> StoreResult<BoardList> {
        Ok(BoardList::create(&mut *self.tx, data).await?)
    }

    async fn update_list(
        &mut self,
        id: Uuid,
        data: UpdateList,
    ) -> StoreResult<Option<BoardList>> {
        Ok(BoardList::update(&mut *self.tx, id, data).await?)
    }

    async fn delete_list(&mut self, id: Uuid) -> StoreResult<bool> {
        Ok(BoardList::delete(&mut *self.tx, id).await?)
    }

    async fn find_card(&mut self, id: Uuid) -> StoreResult<Option<Card>> {
        Ok(Card::find_by_id(&mut *self.tx, id).await?)
    }

    async fn cards_in_list(&mut self, list_id: Uuid) -> StoreResult<Vec<Card>> {
        Ok(Card::list_by_list(&mut *self.tx, list_id).await?)
    }

    async fn cards_in_board(&mut self, board_id: Uuid) -> StoreResult<Vec<Card>> {
        Ok(Card::list_by_board(&mut *self.tx, board_id).await?)
    }

    async fn insert_card(&mut self, data: CreateCard) -> StoreResult<Card> {
        Ok(Card::create(&mut *self.tx, data).await?)
    }

    async fn update_card(&mut self, id: Uuid, data: UpdateCard) -> StoreResult<Option<Card>> {
        Ok(Card::update(&mut *self.tx, id, data).await?)
    }

    async fn relocate_card(
        &mut self,
        id: Uuid,
        list_id: Uuid,
        position: i32,
    ) -> StoreResult<Option<Card>> {
        Ok(Card::relocate(&mut *self.tx, id, list_id, position).await?)
    }

    async fn delete_card(&mut self, id: Uuid) -> StoreResult<bool> {
        Ok(Card::delete(&mut *self.tx, id).await?)
    }

    async fn commit(self: Box<Self>) -> StoreResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}
