/// Application state and router builder
///
/// This module defines the shared application state and builds the Axum
/// router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use corkboard_api::{app::{build_router, AppState}, config::Config};
/// use corkboard_shared::auth::authenticator::JwtAuthenticator;
/// use corkboard_shared::service::BoardService;
/// use corkboard_shared::store::memory::MemoryStore;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let authenticator = JwtAuthenticator::new(config.jwt.secret.clone(), config.token_ttl());
/// let service = BoardService::new(Arc::new(MemoryStore::new()), Arc::new(authenticator));
/// let app = build_router(AppState::new(service, config));
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::security::SecurityHeadersLayer, routes};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, patch, post, put},
    Router,
};
use corkboard_shared::service::BoardService;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Access-controlled operation façade
    pub service: BoardService,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(service: BoardService, config: Config) -> Self {
        Self {
            service,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET /                          # Welcome (public)
/// ├── GET /health                    # Health check (public)
/// └── /v1/
///     ├── /auth/
///     │   ├── POST /register         # public
///     │   ├── POST /login            # public, form-encoded
///     │   └── GET  /me
///     ├── /users/me                  # PUT, DELETE; PATCH /password
///     ├── /boards                    # GET, POST
///     │   └── /:board_id             # GET, PUT, DELETE; GET/POST /lists
///     ├── /lists/:list_id            # GET, PUT, DELETE; PATCH /reorder; GET/POST /cards
///     └── /cards/:card_id            # GET, PUT, DELETE; PATCH /reorder, /move
/// ```
///
/// Everything except the welcome, health, register and login routes runs
/// behind the bearer middleware.
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Security headers
/// 2. CORS (tower-http CorsLayer)
/// 3. Logging (tower-http TraceLayer)
/// 4. Bearer authentication (protected routes only)
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(routes::health::welcome))
        .route("/health", get(routes::health::health_check))
        .route("/v1/auth/register", post(routes::auth::register))
        .route("/v1/auth/login", post(routes::auth::login));

    let protected_routes = Router::new()
        .route("/auth/me", get(routes::auth::me))
        .route(
            "/users/me",
            put(routes::users::update_me).delete(routes::users::delete_me),
        )
        .route("/users/me/password", patch(routes::users::change_password))
        .route(
            "/boards",
            get(routes::boards::list_boards).post(routes::boards::create_board),
        )
        .route(
            "/boards/:board_id",
            get(routes::boards::get_board)
                .put(routes::boards::update_board)
                .delete(routes::boards::delete_board),
        )
        .route(
            "/boards/:board_id/lists",
            get(routes::lists::lists_in_board).post(routes::lists::create_list),
        )
        .route(
            "/lists/:list_id",
            get(routes::lists::get_list)
                .put(routes::lists::update_list)
                .delete(routes::lists::delete_list),
        )
        .route("/lists/:list_id/reorder", patch(routes::lists::reorder_list))
        .route(
            "/lists/:list_id/cards",
            get(routes::cards::cards_in_list).post(routes::cards::create_card),
        )
        .route(
            "/cards/:card_id",
            get(routes::cards::get_card)
                .put(routes::cards::update_card)
                .delete(routes::cards::delete_card),
        )
        .route("/cards/:card_id/reorder", patch(routes::cards::reorder_card))
        .route("/cards/:card_id/move", patch(routes::cards::move_card))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth::require_bearer,
        ));

    // Configure CORS based on environment
    let cors = if state.config.allows_any_origin() {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        // Production mode: configure allowed origins
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(public_routes)
        .nest("/v1", protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}
