/// List operations
///
/// Lists are checked one hop up: fetch the list, fetch its board, compare the
/// board owner. Lists never change boards; reorder only rewrites `position`.
use tracing::{debug, info};
use uuid::Uuid;

use super::BoardService;
use crate::auth::authorization::{authorize, board_chain, list_chain};
use crate::auth::middleware::AuthContext;
use crate::error::{BoardError, BoardResult};
use crate::models::list::{BoardList, CreateList, UpdateList};
use crate::models::ordering::DEFAULT_POSITION;

/// Input for [`BoardService::create_list`]
#[derive(Debug, Clone)]
pub struct NewList {
    pub title: String,

    /// Caller-supplied position, `None` for [`DEFAULT_POSITION`]
    pub position: Option<i32>,
}

/// Input for [`BoardService::update_list`]
#[derive(Debug, Clone, Default)]
pub struct ListChanges {
    pub title: Option<String>,
    pub position: Option<i32>,
}

fn list_gone() -> BoardError {
    BoardError::NotFound("List not found".to_string())
}

impl BoardService {
    /// Creates a list on one of the caller's boards
    ///
    /// Siblings are not shifted; the new list may share a position with an
    /// existing one.
    ///
    /// # Errors
    ///
    /// `NotFound` if the board doesn't exist, `Forbidden` if the caller
    /// doesn't own it
    pub async fn create_list(
        &self,
        ctx: &AuthContext,
        board_id: Uuid,
        input: NewList,
    ) -> BoardResult<BoardList> {
        let mut uow = self.begin().await?;
        let board = board_chain(&mut *uow, board_id).await?;
        authorize(ctx.user_id, board.owner_id).require("access this board")?;

        let list = uow
            .insert_list(CreateList {
                title: input.title,
                position: input.position.unwrap_or(DEFAULT_POSITION),
                board_id: board.id,
            })
            .await?;
        uow.commit().await?;

        info!(list_id = %list.id, board_id = %board.id, position = list.position, "List created");
        Ok(list)
    }

    /// Lists a board's lists in display order
    pub async fn lists_in_board(&self, ctx: &AuthContext, board_id: Uuid) -> BoardResult<Vec<BoardList>> {
        let mut uow = self.begin().await?;
        let board = board_chain(&mut *uow, board_id).await?;
        authorize(ctx.user_id, board.owner_id).require("access this board")?;

        Ok(uow.lists_in_board(board.id).await?)
    }

    /// Returns a single list
    pub async fn get_list(&self, ctx: &AuthContext, list_id: Uuid) -> BoardResult<BoardList> {
        let mut uow = self.begin().await?;
        let chain = list_chain(&mut *uow, list_id).await?;
        authorize(ctx.user_id, chain.owner_id()).require("access this list")?;

        Ok(chain.list)
    }

    /// Updates a list's title and/or position
    pub async fn update_list(
        &self,
        ctx: &AuthContext,
        list_id: Uuid,
        changes: ListChanges,
    ) -> BoardResult<BoardList> {
        let mut uow = self.begin().await?;
        let chain = list_chain(&mut *uow, list_id).await?;
        authorize(ctx.user_id, chain.owner_id()).require("update this list")?;

        let list = uow
            .update_list(
                chain.list.id,
                UpdateList {
                    title: changes.title,
                    position: changes.position,
                },
            )
            .await?
            .ok_or_else(list_gone)?;
        uow.commit().await?;

        info!(list_id = %list.id, "List updated");
        Ok(list)
    }

    /// Deletes a list together with its cards
    pub async fn delete_list(&self, ctx: &AuthContext, list_id: Uuid) -> BoardResult<()> {
        let mut uow = self.begin().await?;
        let chain = list_chain(&mut *uow, list_id).await?;
        authorize(ctx.user_id, chain.owner_id()).require("delete this list")?;

        uow.delete_list(chain.list.id).await?;
        uow.commit().await?;

        info!(list_id = %chain.list.id, board_id = %chain.board.id, "List deleted");
        Ok(())
    }

    /// Sets a list's position within its board
    ///
    /// A raw assignment: no sibling is renumbered, and a duplicate position
    /// is accepted (ties display in creation order).
    pub async fn reorder_list(&self, ctx: &AuthContext, list_id: Uuid, position: i32) -> BoardResult<BoardList> {
        let mut uow = self.begin().await?;
        let chain = list_chain(&mut *uow, list_id).await?;
        authorize(ctx.user_id, chain.owner_id()).require("reorder this list")?;

        let list = uow
            .update_list(chain.list.id, UpdateList::position(position))
            .await?
            .ok_or_else(list_gone)?;
        uow.commit().await?;

        debug!(list_id = %list.id, from = chain.list.position, to = position, "List reordered");
        Ok(list)
    }
}
