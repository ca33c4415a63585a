/// Caller account management
///
/// # Endpoints
///
/// - `PUT /v1/users/me` - Update profile
/// - `PATCH /v1/users/me/password` - Change password
/// - `DELETE /v1/users/me` - Delete account (owned boards cascade)

use crate::{app::AppState, error::ApiResult, routes::deserialize_some};
use axum::{extract::State, http::StatusCode, Json};
use corkboard_shared::{
    auth::middleware::AuthContext,
    models::user::User,
    service::accounts::ProfileChanges,
};
use serde::Deserialize;
use validator::Validate;

/// Profile update; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: Option<String>,

    /// `null` clears the name
    #[serde(default, deserialize_with = "deserialize_some")]
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub full_name: Option<Option<String>>,

    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub current_password: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<User>> {
    req.validate()?;

    let user = state
        .service
        .update_profile(
            &auth,
            ProfileChanges {
                email: req.email,
                username: req.username,
                full_name: req.full_name,
                is_active: req.is_active,
            },
        )
        .await?;

    Ok(Json(user))
}

/// Changes the caller's password
///
/// # Errors
///
/// - `400 Bad Request`: `current_password` is wrong
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<Json<User>> {
    req.validate()?;

    let user = state
        .service
        .change_password(&auth, &req.current_password, &req.new_password)
        .await?;

    Ok(Json(user))
}

pub async fn delete_me(State(state): State<AppState>, auth: AuthContext) -> ApiResult<StatusCode> {
    state.service.delete_account(&auth).await?;
    Ok(StatusCode::NO_CONTENT)
}
