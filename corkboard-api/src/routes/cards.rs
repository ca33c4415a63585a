/// Card endpoints
///
/// # Endpoints
///
/// - `GET /v1/lists/:list_id/cards` - Cards of a list, by position
/// - `POST /v1/lists/:list_id/cards` - Create card
/// - `GET /v1/cards/:card_id` - Get card
/// - `PUT /v1/cards/:card_id` - Update card
/// - `DELETE /v1/cards/:card_id` - Delete card
/// - `PATCH /v1/cards/:card_id/reorder` - Set position within the list
/// - `PATCH /v1/cards/:card_id/move` - Move to another list of the same board
///
/// # Move
///
/// ```text
/// PATCH /v1/cards/:card_id/move
/// Content-Type: application/json
///
/// { "list_id": "uuid", "position": 0 }
/// ```
///
/// `position` defaults to 0. A target list on another board is rejected
/// with `400 Bad Request` even when the caller owns both boards.

use crate::{
    app::AppState,
    error::ApiResult,
    routes::{deserialize_some, ReorderRequest},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use corkboard_shared::{
    auth::middleware::AuthContext,
    models::card::{Card, CardPriority},
    service::cards::{CardChanges, CardMove, NewCard},
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCardRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    pub description: Option<String>,

    /// Defaults to 0
    pub position: Option<i32>,

    pub assigned_to_id: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<CardPriority>,
}

/// Card update; absent fields are left unchanged and `null` clears a
/// nullable field
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCardRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,

    pub position: Option<i32>,

    #[serde(default, deserialize_with = "deserialize_some")]
    pub assigned_to_id: Option<Option<Uuid>>,

    #[serde(default, deserialize_with = "deserialize_some")]
    pub due_date: Option<Option<DateTime<Utc>>>,

    #[serde(default, deserialize_with = "deserialize_some")]
    pub priority: Option<Option<CardPriority>>,
}

#[derive(Debug, Deserialize)]
pub struct MoveCardRequest {
    pub list_id: Uuid,

    #[serde(default)]
    pub position: i32,
}

pub async fn cards_in_list(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(list_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Card>>> {
    Ok(Json(state.service.cards_in_list(&auth, list_id).await?))
}

pub async fn create_card(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(list_id): Path<Uuid>,
    Json(req): Json<CreateCardRequest>,
) -> ApiResult<(StatusCode, Json<Card>)> {
    req.validate()?;

    let card = state
        .service
        .create_card(
            &auth,
            list_id,
            NewCard {
                title: req.title,
                description: req.description,
                position: req.position,
                assigned_to_id: req.assigned_to_id,
                due_date: req.due_date,
                priority: req.priority,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(card)))
}

pub async fn get_card(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(card_id): Path<Uuid>,
) -> ApiResult<Json<Card>> {
    Ok(Json(state.service.get_card(&auth, card_id).await?))
}

pub async fn update_card(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(card_id): Path<Uuid>,
    Json(req): Json<UpdateCardRequest>,
) -> ApiResult<Json<Card>> {
    req.validate()?;

    let card = state
        .service
        .update_card(
            &auth,
            card_id,
            CardChanges {
                title: req.title,
                description: req.description,
                position: req.position,
                assigned_to_id: req.assigned_to_id,
                due_date: req.due_date,
                priority: req.priority,
            },
        )
        .await?;

    Ok(Json(card))
}

pub async fn delete_card(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(card_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.service.delete_card(&auth, card_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reorder_card(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(card_id): Path<Uuid>,
    Json(req): Json<ReorderRequest>,
) -> ApiResult<Json<Card>> {
    Ok(Json(state.service.reorder_card(&auth, card_id, req.position).await?))
}

pub async fn move_card(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(card_id): Path<Uuid>,
    Json(req): Json<MoveCardRequest>,
) -> ApiResult<Json<Card>> {
    let card = state
        .service
        .move_card(
            &auth,
            card_id,
            CardMove {
                list_id: req.list_id,
                position: req.position,
            },
        )
        .await?;

    Ok(Json(card))
}
