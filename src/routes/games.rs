use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::constants::no_resource;
use crate::db;
use crate::error::{AppError, Result};
use crate::models::{Game, GamePatch, NewGame, Record};
use crate::routes::validation::{reject_blank, require_text, JsonBody, PathParam};
use crate::AppState;

/// GET /api/v1/games
pub async fn list_games(State(state): State<AppState>) -> Result<Json<Vec<Game>>> {
    let games = db::games::list(&state.db).await?;
    Ok(Json(games))
}

/// Fetch a single game
///
/// Responds with the matching rows as an array; 404 when there are none.
///
/// GET /api/v1/games/:id
pub async fn get_game(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Vec<Game>>> {
    let games = db::games::find_by_id(&state.db, id).await?;
    if games.is_empty() {
        return Err(AppError::NotFound(format!(
            "Unable to locate record with id of {}",
            id
        )));
    }
    Ok(Json(games))
}

/// GET /api/v1/games/:id/records
pub async fn list_game_records(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Vec<Record>>> {
    if !db::games::exists(&state.db, id).await? {
        return Err(AppError::NotFound(format!(
            "Unable to locate game record with id of {}",
            id
        )));
    }

    let records = db::records::list(&state.db, Some(id)).await?;
    Ok(Json(records))
}

/// Create a game (admin only)
///
/// POST /api/v1/games
pub async fn create_game(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewGame>,
) -> Result<(StatusCode, Json<Game>)> {
    let title = require_text(payload.game_title, "game_title")?;

    let game = db::games::insert(&state.db, &title, payload.game_image.as_deref()).await?;
    tracing::info!("Created game {} ({})", game.id, game.game_title);

    Ok((StatusCode::CREATED, Json(game)))
}

/// Partially update a game (admin only)
///
/// 422 when no game matches the id or the body names no updatable field.
///
/// PATCH /api/v1/games/:id
pub async fn update_game(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    JsonBody(patch): JsonBody<GamePatch>,
) -> Result<Json<Game>> {
    if patch.is_empty() {
        return Err(AppError::Validation(
            "Expected at least one of game_title, game_image.".to_string(),
        ));
    }
    reject_blank(&patch.game_title, "game_title")?;

    let game = db::games::update(&state.db, id, &patch)
        .await?
        .ok_or_else(|| AppError::NoSuchResource(no_resource(id)))?;

    tracing::info!("Updated game {}", id);
    Ok(Json(game))
}

/// Delete a game and its records (admin only)
///
/// Both deletes share one transaction, so a failure leaves neither applied.
///
/// DELETE /api/v1/games/:id
pub async fn delete_game(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<StatusCode> {
    let removed = db::games::delete_with_records(&state.db, id).await?;
    if removed == 0 {
        return Err(AppError::NoSuchResource(no_resource(id)));
    }

    tracing::info!("Deleted game {} and its records", id);
    Ok(StatusCode::NO_CONTENT)
}
