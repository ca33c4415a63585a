/// Bearer authentication middleware
///
/// Reads `Authorization: Bearer <token>`, resolves it to an active user
/// through the façade, and inserts the resulting
/// [`AuthContext`](corkboard_shared::auth::middleware::AuthContext) into the
/// request extensions for handlers to extract.
///
/// Any failure short-circuits with `401` and `WWW-Authenticate: Bearer`.

use crate::{app::AppState, error::ApiError};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use corkboard_shared::auth::middleware::extract_bearer_token;

pub async fn require_bearer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(req.headers())?.to_owned();

    let ctx = state.service.authenticate(&token).await.map_err(|err| {
        tracing::debug!(error = %err, "Bearer authentication failed");
        ApiError::from(err)
    })?;

    req.extensions_mut().insert(ctx);
    Ok(next.run(req).await)
}
