/// Card operations, including reorder and the cross-list move
///
/// Cards are checked two hops up: card → list → board → owner.
///
/// # Move protocol
///
/// [`BoardService::move_card`] checks, in this order:
///
/// 1. the card exists (`NotFound`)
/// 2. the caller owns the board reached through the card's *current* list
///    (`Forbidden`)
/// 3. the target list exists (`NotFound`)
/// 4. the target list is on that same board (`InvalidOperation`), which holds
///    even when the caller also owns the other board
///
/// It then sets `list_id` and `position` in a single write inside the same
/// unit of work, so no reader ever sees the new list with a stale position.
use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use super::BoardService;
use crate::auth::authorization::{authorize, card_chain, list_chain};
use crate::auth::middleware::AuthContext;
use crate::error::{BoardError, BoardResult};
use crate::models::card::{Card, CardPriority, CreateCard, UpdateCard};
use crate::models::ordering::DEFAULT_POSITION;
use crate::store::UnitOfWork;

/// Input for [`BoardService::create_card`]
#[derive(Debug, Clone)]
pub struct NewCard {
    pub title: String,
    pub description: Option<String>,

    /// Caller-supplied position, `None` for [`DEFAULT_POSITION`]
    pub position: Option<i32>,

    pub assigned_to_id: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<CardPriority>,
}

/// Input for [`BoardService::update_card`]
///
/// Nullable fields use `Option<Option<_>>`: `None` leaves the field alone,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct CardChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub position: Option<i32>,
    pub assigned_to_id: Option<Option<Uuid>>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub priority: Option<Option<CardPriority>>,
}

/// Input for [`BoardService::move_card`]
#[derive(Debug, Clone, Copy)]
pub struct CardMove {
    /// Target list; must be on the card's current board
    pub list_id: Uuid,
    pub position: i32,
}

fn card_gone() -> BoardError {
    BoardError::NotFound("Card not found".to_string())
}

/// Fails with `NotFound` unless `assignee` names an existing user
async fn check_assignee(uow: &mut dyn UnitOfWork, assignee: Option<Uuid>) -> BoardResult<()> {
    if let Some(user_id) = assignee {
        if uow.find_user(user_id).await?.is_none() {
            return Err(BoardError::NotFound("Assigned user not found".to_string()));
        }
    }
    Ok(())
}

impl BoardService {
    /// Creates a card in one of the caller's lists
    ///
    /// # Errors
    ///
    /// `NotFound` if the list (or its board, or the assignee) doesn't exist,
    /// `Forbidden` if the caller doesn't own the board
    pub async fn create_card(&self, ctx: &AuthContext, list_id: Uuid, input: NewCard) -> BoardResult<Card> {
        let mut uow = self.begin().await?;
        let chain = list_chain(&mut *uow, list_id).await?;
        authorize(ctx.user_id, chain.owner_id()).require("access this list")?;
        check_assignee(&mut *uow, input.assigned_to_id).await?;

        let card = uow
            .insert_card(CreateCard {
                title: input.title,
                description: input.description,
                position: input.position.unwrap_or(DEFAULT_POSITION),
                list_id: chain.list.id,
                assigned_to_id: input.assigned_to_id,
                due_date: input.due_date,
                priority: input.priority,
            })
            .await?;
        uow.commit().await?;

        info!(card_id = %card.id, list_id = %card.list_id, position = card.position, "Card created");
        Ok(card)
    }

    /// Lists a list's cards in display order
    pub async fn cards_in_list(&self, ctx: &AuthContext, list_id: Uuid) -> BoardResult<Vec<Card>> {
        let mut uow = self.begin().await?;
        let chain = list_chain(&mut *uow, list_id).await?;
        authorize(ctx.user_id, chain.owner_id()).require("access this list")?;

        Ok(uow.cards_in_list(chain.list.id).await?)
    }

    /// Returns a single card
    pub async fn get_card(&self, ctx: &AuthContext, card_id: Uuid) -> BoardResult<Card> {
        let mut uow = self.begin().await?;
        let chain = card_chain(&mut *uow, card_id).await?;
        authorize(ctx.user_id, chain.owner_id()).require("access this card")?;

        Ok(chain.card)
    }

    /// Updates a card's fields
    ///
    /// The parent list cannot be changed here; use [`BoardService::move_card`].
    pub async fn update_card(&self, ctx: &AuthContext, card_id: Uuid, changes: CardChanges) -> BoardResult<Card> {
        let mut uow = self.begin().await?;
        let chain = card_chain(&mut *uow, card_id).await?;
        authorize(ctx.user_id, chain.owner_id()).require("update this card")?;
        check_assignee(&mut *uow, changes.assigned_to_id.flatten()).await?;

        let card = uow
            .update_card(
                chain.card.id,
                UpdateCard {
                    title: changes.title,
                    description: changes.description,
                    position: changes.position,
                    assigned_to_id: changes.assigned_to_id,
                    due_date: changes.due_date,
                    priority: changes.priority,
                },
            )
            .await?
            .ok_or_else(card_gone)?;
        uow.commit().await?;

        info!(card_id = %card.id, "Card updated");
        Ok(card)
    }

    /// Deletes a card
    pub async fn delete_card(&self, ctx: &AuthContext, card_id: Uuid) -> BoardResult<()> {
        let mut uow = self.begin().await?;
        let chain = card_chain(&mut *uow, card_id).await?;
        authorize(ctx.user_id, chain.owner_id()).require("delete this card")?;

        uow.delete_card(chain.card.id).await?;
        uow.commit().await?;

        info!(card_id = %chain.card.id, list_id = %chain.list.id, "Card deleted");
        Ok(())
    }

    /// Sets a card's position within its current list
    ///
    /// A raw assignment: siblings keep their positions and a duplicate is
    /// accepted. Repeating the call with the same position is a no-op apart
    /// from `updated_at`.
    pub async fn reorder_card(&self, ctx: &AuthContext, card_id: Uuid, position: i32) -> BoardResult<Card> {
        let mut uow = self.begin().await?;
        let chain = card_chain(&mut *uow, card_id).await?;
        authorize(ctx.user_id, chain.owner_id()).require("reorder this card")?;

        let card = uow
            .update_card(chain.card.id, UpdateCard::position(position))
            .await?
            .ok_or_else(card_gone)?;
        uow.commit().await?;

        debug!(card_id = %card.id, from = chain.card.position, to = position, "Card reordered");
        Ok(card)
    }

    /// Moves a card to another list of the same board
    ///
    /// # Errors
    ///
    /// - `NotFound` if the card doesn't exist
    /// - `Forbidden` if the caller doesn't own the card's board
    /// - `NotFound` if the target list doesn't exist
    /// - `InvalidOperation` if the target list is on a different board
    pub async fn move_card(&self, ctx: &AuthContext, card_id: Uuid, target: CardMove) -> BoardResult<Card> {
        let mut uow = self.begin().await?;
        let chain = card_chain(&mut *uow, card_id).await?;
        authorize(ctx.user_id, chain.owner_id()).require("move this card")?;

        let target_list = uow
            .find_list(target.list_id)
            .await?
            .ok_or_else(|| BoardError::NotFound("Target list not found".to_string()))?;

        if target_list.board_id != chain.board.id {
            return Err(BoardError::InvalidOperation(
                "Cannot move card to a list in a different board".to_string(),
            ));
        }

        let card = uow
            .relocate_card(chain.card.id, target_list.id, target.position)
            .await?
            .ok_or_else(card_gone)?;
        uow.commit().await?;

        info!(
            card_id = %card.id,
            from_list = %chain.list.id,
            to_list = %card.list_id,
            position = card.position,
            "Card moved"
        );
        Ok(card)
    }
}
