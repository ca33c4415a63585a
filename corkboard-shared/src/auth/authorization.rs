/// Ownership resolution and authorization
///
/// Every board has a single owner, and everything below a board belongs to
/// that owner. Resolving who controls an entity means walking its parent
/// references up to the board:
///
/// ```text
/// card ──list_id──▶ list ──board_id──▶ board ──owner_id──▶ user
/// ```
///
/// The walk fetches first and authorizes second. A missing entity, or a
/// missing parent at any hop, is reported as `NotFound` before ownership is
/// ever compared, so `NotFound` always wins over `Forbidden`.
///
/// # Example
///
/// ```no_run
/// use corkboard_shared::auth::authorization::{authorize, card_chain};
/// use corkboard_shared::error::BoardResult;
/// use corkboard_shared::store::UnitOfWork;
/// use uuid::Uuid;
///
/// async fn can_edit(uow: &mut dyn UnitOfWork, user_id: Uuid, card_id: Uuid) -> BoardResult<()> {
///     let chain = card_chain(uow, card_id).await?;
///     authorize(user_id, chain.owner_id()).require("update this card")
/// }
/// ```

use uuid::Uuid;

use crate::error::{BoardError, BoardResult};
use crate::models::board::Board;
use crate::models::card::Card;
use crate::models::list::BoardList;
use crate::store::UnitOfWork;

/// Reference to any ownable entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef {
    Board(Uuid),
    List(Uuid),
    Card(Uuid),
}

/// Outcome of comparing a caller with an owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Forbidden,
}

impl Access {
    /// Turns `Forbidden` into `BoardError::Forbidden("Not authorized to {action}")`
    pub fn require(self, action: &str) -> BoardResult<()> {
        match self {
            Access::Allowed => Ok(()),
            Access::Forbidden => Err(BoardError::Forbidden(format!("Not authorized to {}", action))),
        }
    }
}

/// Compares the caller with the resolved owner
pub fn authorize(user_id: Uuid, owner_id: Uuid) -> Access {
    if user_id == owner_id {
        Access::Allowed
    } else {
        Access::Forbidden
    }
}

/// A list together with its board
#[derive(Debug, Clone)]
pub struct ListChain {
    pub list: BoardList,
    pub board: Board,
}

impl ListChain {
    pub fn owner_id(&self) -> Uuid {
        self.board.owner_id
    }
}

/// A card together with its current list and that list's board
#[derive(Debug, Clone)]
pub struct CardChain {
    pub card: Card,
    pub list: BoardList,
    pub board: Board,
}

impl CardChain {
    pub fn owner_id(&self) -> Uuid {
        self.board.owner_id
    }
}

/// Fetches a board or fails with `NotFound`
pub async fn board_chain(uow: &mut dyn UnitOfWork, board_id: Uuid) -> BoardResult<Board> {
    uow.find_board(board_id)
        .await?
        .ok_or_else(|| BoardError::NotFound("Board not found".to_string()))
}

/// Fetches a list and its board, failing with `NotFound` at the first missing hop
pub async fn list_chain(uow: &mut dyn UnitOfWork, list_id: Uuid) -> BoardResult<ListChain> {
    let list = uow
        .find_list(list_id)
        .await?
        .ok_or_else(|| BoardError::NotFound("List not found".to_string()))?;
    let board = board_chain(uow, list.board_id).await?;

    Ok(ListChain { list, board })
}

/// Fetches a card, its current list, and that list's board
///
/// Fails with `NotFound` at the first missing hop.
pub async fn card_chain(uow: &mut dyn UnitOfWork, card_id: Uuid) -> BoardResult<CardChain> {
    let card = uow
        .find_card(card_id)
        .await?
        .ok_or_else(|| BoardError::NotFound("Card not found".to_string()))?;
    let ListChain { list, board } = list_chain(uow, card.list_id).await?;

    Ok(CardChain { card, list, board })
}

/// Resolves the user that (transitively) owns an entity
///
/// # Errors
///
/// `BoardError::NotFound` if the entity or any parent on its chain is missing
pub async fn resolve_owner(uow: &mut dyn UnitOfWork, entity: EntityRef) -> BoardResult<Uuid> {
    match entity {
        EntityRef::Board(id) => Ok(board_chain(uow, id).await?.owner_id),
        EntityRef::List(id) => Ok(list_chain(uow, id).await?.owner_id()),
        EntityRef::Card(id) => Ok(card_chain(uow, id).await?.owner_id()),
    }
}
