//! Game Records API Library
//!
//! Leaderboard backend: token issuance plus CRUD over games and their
//! records. Exposes the router and state for the binary and for tests.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod security;

pub use config::Config;
pub use db::{open_database, open_in_memory, Db};
pub use error::{AppError, Result};
pub use security::{Claims, TokenService};

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub config: Config,
    pub tokens: TokenService,
}

impl AppState {
    /// Create a new AppState, deriving the token service from the configuration
    pub fn new(db: Db, config: Config) -> Self {
        let tokens = TokenService::from_config(&config);
        Self { db, config, tokens }
    }
}

/// Build the full router: public reads, token issuance and admin-gated mutations
pub fn app(state: AppState) -> Router {
    use routes::*;

    let admin = Router::new()
        .route("/games", post(create_game))
        .route("/games/:id", axum::routing::patch(update_game).delete(delete_game))
        .route("/games/:id/records", post(create_record))
        .route(
            "/records/:id",
            axum::routing::patch(update_record).delete(delete_record),
        )
        .route_layer(from_fn_with_state(state.clone(), middleware::require_admin));

    let public = Router::new()
        .route("/authenticate", post(authenticate))
        .route("/games", get(list_games))
        .route("/games/:id", get(get_game))
        .route("/games/:id/records", get(list_game_records))
        .route("/records", get(list_records))
        .route("/records/:id", get(get_record));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", public.merge(admin))
        .with_state(state)
}
