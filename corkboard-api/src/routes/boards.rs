/// Board endpoints
///
/// # Endpoints
///
/// - `GET /v1/boards?skip=0&limit=100` - Caller's boards
/// - `POST /v1/boards` - Create board
/// - `GET /v1/boards/:board_id` - Board with lists and cards
/// - `PUT /v1/boards/:board_id` - Update board
/// - `DELETE /v1/boards/:board_id` - Delete board (cascades)

use crate::{app::AppState, error::ApiResult, routes::deserialize_some};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use corkboard_shared::{
    auth::middleware::AuthContext,
    models::board::{Board, BoardDetail},
    service::{
        boards::{BoardChanges, NewBoard},
        Page,
    },
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// `skip` / `limit` query parameters
#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBoardRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBoardRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    /// `null` clears the description
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
}

pub async fn list_boards(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(page): Query<Pagination>,
) -> ApiResult<Json<Vec<Board>>> {
    let boards = state
        .service
        .list_boards(&auth, Page::new(page.skip, page.limit))
        .await?;
    Ok(Json(boards))
}

pub async fn create_board(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(req): Json<CreateBoardRequest>,
) -> ApiResult<(StatusCode, Json<Board>)> {
    req.validate()?;

    let board = state
        .service
        .create_board(
            &auth,
            NewBoard {
                title: req.title,
                description: req.description,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(board)))
}

/// Board detail: lists by position, each with its cards by position
pub async fn get_board(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(board_id): Path<Uuid>,
) -> ApiResult<Json<BoardDetail>> {
    Ok(Json(state.service.get_board(&auth, board_id).await?))
}

pub async fn update_board(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(board_id): Path<Uuid>,
    Json(req): Json<UpdateBoardRequest>,
) -> ApiResult<Json<Board>> {
    req.validate()?;

    let board = state
        .service
        .update_board(
            &auth,
            board_id,
            BoardChanges {
                title: req.title,
                description: req.description,
            },
        )
        .await?;

    Ok(Json(board))
}

pub async fn delete_board(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(board_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.service.delete_board(&auth, board_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
