/// Board operations
///
/// Boards sit at the top of the ownership chain, so the check is a direct
/// `board.owner_id == caller` comparison after the board is fetched.
use tracing::{debug, info};
use uuid::Uuid;

use super::{BoardService, Page};
use crate::auth::authorization::{authorize, board_chain};
use crate::auth::middleware::AuthContext;
use crate::error::{BoardError, BoardResult};
use crate::models::board::{Board, BoardDetail, CreateBoard, UpdateBoard};

/// Input for [`BoardService::create_board`]
#[derive(Debug, Clone)]
pub struct NewBoard {
    pub title: String,
    pub description: Option<String>,
}

/// Input for [`BoardService::update_board`]
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default)]
pub struct BoardChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
}

impl BoardService {
    /// Creates a board owned by the caller
    pub async fn create_board(&self, ctx: &AuthContext, input: NewBoard) -> BoardResult<Board> {
        let mut uow = self.begin().await?;
        let board = uow
            .insert_board(CreateBoard {
                title: input.title,
                description: input.description,
                owner_id: ctx.user_id,
            })
            .await?;
        uow.commit().await?;

        info!(board_id = %board.id, user_id = %ctx.user_id, "Board created");
        Ok(board)
    }

    /// Lists the caller's boards, oldest first
    ///
    /// Scoped by owner at the query level; other users' boards never appear.
    pub async fn list_boards(&self, ctx: &AuthContext, page: Page) -> BoardResult<Vec<Board>> {
        let mut uow = self.begin().await?;
        let boards = uow.boards_by_owner(ctx.user_id, page.limit, page.skip).await?;

        debug!(user_id = %ctx.user_id, count = boards.len(), "Listed boards");
        Ok(boards)
    }

    /// Returns a board with its lists and their cards, all in display order
    ///
    /// # Errors
    ///
    /// `NotFound` if the board doesn't exist, `Forbidden` if the caller
    /// doesn't own it
    pub async fn get_board(&self, ctx: &AuthContext, board_id: Uuid) -> BoardResult<BoardDetail> {
        let mut uow = self.begin().await?;
        let board = board_chain(&mut *uow, board_id).await?;
        authorize(ctx.user_id, board.owner_id).require("access this board")?;

        let lists = uow.lists_in_board(board.id).await?;
        let cards = uow.cards_in_board(board.id).await?;

        Ok(BoardDetail::assemble(board, lists, cards))
    }

    /// Updates a board's title and/or description
    pub async fn update_board(
        &self,
        ctx: &AuthContext,
        board_id: Uuid,
        changes: BoardChanges,
    ) -> BoardResult<Board> {
        let mut uow = self.begin().await?;
        let board = board_chain(&mut *uow, board_id).await?;
        authorize(ctx.user_id, board.owner_id).require("update this board")?;

        let board = uow
            .update_board(
                board.id,
                UpdateBoard {
                    title: changes.title,
                    description: changes.description,
                },
            )
            .await?
            .ok_or_else(|| BoardError::NotFound("Board not found".to_string()))?;
        uow.commit().await?;

        info!(board_id = %board.id, "Board updated");
        Ok(board)
    }

    /// Deletes a board together with its lists and cards
    pub async fn delete_board(&self, ctx: &AuthContext, board_id: Uuid) -> BoardResult<()> {
        let mut uow = self.begin().await?;
        let board = board_chain(&mut *uow, board_id).await?;
        authorize(ctx.user_id, board.owner_id).require("delete this board")?;

        uow.delete_board(board.id).await?;
        uow.commit().await?;

        info!(board_id = %board.id, "Board deleted");
        Ok(())
    }
}
