/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /v1/auth/register` - Register new user
/// - `POST /v1/auth/login` - Exchange credentials for a bearer token
/// - `GET /v1/auth/me` - Current user (authenticated)

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, http::StatusCode, Form, Json};
use corkboard_shared::{
    auth::{authenticator::AccessToken, middleware::AuthContext},
    models::user::User,
    service::accounts::Registration,
};
use serde::Deserialize;
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address, also the login name
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Optional display name
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub full_name: Option<String>,
}

/// Login form (`application/x-www-form-urlencoded`)
///
/// `username` carries the account's email address.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/register
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "username": "user",
///   "password": "SecureP@ss123",
///   "full_name": "Jane Doe"
/// }
/// ```
///
/// # Errors
///
/// - `409 Conflict`: Email or username already in use
/// - `422 Unprocessable Entity`: Validation failed
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    req.validate()?;

    let user = state
        .service
        .register(Registration {
            email: req.email,
            username: req.username,
            password: req.password,
            full_name: req.full_name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Login endpoint
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/login
/// Content-Type: application/x-www-form-urlencoded
///
/// username=user%40example.com&password=SecureP%40ss123
/// ```
///
/// # Response
///
/// ```json
/// { "access_token": "eyJ...", "token_type": "bearer" }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Bad credentials or inactive account
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> ApiResult<Json<AccessToken>> {
    let token = state.service.login(&form.username, &form.password).await?;
    Ok(Json(token))
}

/// Returns the authenticated user
pub async fn me(State(state): State<AppState>, auth: AuthContext) -> ApiResult<Json<User>> {
    Ok(Json(state.service.current_user(&auth).await?))
}
