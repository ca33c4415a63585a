/// List endpoints
///
/// # Endpoints
///
/// - `GET /v1/boards/:board_id/lists` - Lists of a board, by position
/// - `POST /v1/boards/:board_id/lists` - Create list
/// - `GET /v1/lists/:list_id` - Get list
/// - `PUT /v1/lists/:list_id` - Update list
/// - `DELETE /v1/lists/:list_id` - Delete list (cascades to cards)
/// - `PATCH /v1/lists/:list_id/reorder` - Set position

use crate::{app::AppState, error::ApiResult, routes::ReorderRequest};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use corkboard_shared::{
    auth::middleware::AuthContext,
    models::list::BoardList,
    service::lists::{ListChanges, NewList},
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateListRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Defaults to 0
    pub position: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateListRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    pub position: Option<i32>,
}

pub async fn lists_in_board(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(board_id): Path<Uuid>,
) -> ApiResult<Json<Vec<BoardList>>> {
    Ok(Json(state.service.lists_in_board(&auth, board_id).await?))
}

pub async fn create_list(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(board_id): Path<Uuid>,
    Json(req): Json<CreateListRequest>,
) -> ApiResult<(StatusCode, Json<BoardList>)> {
    req.validate()?;

    let list = state
        .service
        .create_list(
            &auth,
            board_id,
            NewList {
                title: req.title,
                position: req.position,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(list)))
}

pub async fn get_list(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(list_id): Path<Uuid>,
) -> ApiResult<Json<BoardList>> {
    Ok(Json(state.service.get_list(&auth, list_id).await?))
}

pub async fn update_list(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(list_id): Path<Uuid>,
    Json(req): Json<UpdateListRequest>,
) -> ApiResult<Json<BoardList>> {
    req.validate()?;

    let list = state
        .service
        .update_list(
            &auth,
            list_id,
            ListChanges {
                title: req.title,
                position: req.position,
            },
        )
        .await?;

    Ok(Json(list))
}

pub async fn delete_list(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(list_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.service.delete_list(&auth, list_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reorder_list(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(list_id): Path<Uuid>,
    Json(req): Json<ReorderRequest>,
) -> ApiResult<Json<BoardList>> {
    Ok(Json(state.service.reorder_list(&auth, list_id, req.position).await?))
}
