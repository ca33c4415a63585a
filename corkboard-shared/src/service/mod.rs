/// Access-controlled operation façade
///
/// [`BoardService`] is the single entry point for everything a caller can do:
/// account management, and create/read/update/delete plus reorder and move
/// for boards, lists and cards. Every operation:
///
/// 1. opens one unit of work,
/// 2. walks the ownership chain of the target (fetch first, authorize second),
/// 3. applies the change,
/// 4. commits.
///
/// Reads simply drop their unit of work. Any error before `commit` leaves
/// storage untouched.
///
/// The operations are split by entity across `accounts`, `boards`, `lists`
/// and `cards`.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use chrono::Duration;
/// use corkboard_shared::auth::authenticator::JwtAuthenticator;
/// use corkboard_shared::service::{accounts::Registration, boards::NewBoard, BoardService};
/// use corkboard_shared::store::memory::MemoryStore;
///
/// # async fn example() -> Result<(), corkboard_shared::error::BoardError> {
/// let service = BoardService::new(
///     Arc::new(MemoryStore::new()),
///     Arc::new(JwtAuthenticator::new("a-secret-key-of-at-least-32-bytes!", Duration::minutes(30))),
/// );
///
/// service.register(Registration {
///     email: "ada@example.com".to_string(),
///     username: "ada".to_string(),
///     password: "analytical".to_string(),
///     full_name: None,
/// }).await?;
///
/// let token = service.login("ada@example.com", "analytical").await?;
/// let caller = service.authenticate(&token.access_token).await?;
///
/// let board = service.create_board(&caller, NewBoard {
///     title: "Engines".to_string(),
///     description: None,
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod accounts;
pub mod boards;
pub mod cards;
pub mod lists;

use std::sync::Arc;

use crate::auth::authenticator::Authenticator;
use crate::error::BoardResult;
use crate::store::{PersistenceStore, UnitOfWork};

/// Default page size for board listings
pub const DEFAULT_PAGE_LIMIT: i64 = 100;

/// Largest page size a caller may request
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Offset pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl Page {
    /// Builds a page, clamping `skip` to ≥ 0 and `limit` to `0..=MAX_PAGE_LIMIT`
    pub fn new(skip: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            skip: skip.unwrap_or(0).max(0),
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(0, MAX_PAGE_LIMIT),
        }
    }
}

/// The operation façade
///
/// Cheap to clone; share one per process.
#[derive(Clone)]
pub struct BoardService {
    store: Arc<dyn PersistenceStore>,
    authenticator: Arc<dyn Authenticator>,
}

impl BoardService {
    pub fn new(store: Arc<dyn PersistenceStore>, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            store,
            authenticator,
        }
    }

    /// Checks that the storage engine is reachable
    pub async fn health(&self) -> BoardResult<()> {
        self.store.ping().await?;
        Ok(())
    }

    async fn begin(&self) -> BoardResult<Box<dyn UnitOfWork>> {
        Ok(self.store.begin().await?)
    }
}
