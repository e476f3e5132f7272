use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::constants::no_resource;
use crate::db::{
    self,
    records::{InsertRecord, RecordChanges},
};
use crate::error::{AppError, Result};
use crate::models::record::time_to_text;
use crate::models::{NewRecord, Record, RecordFilter, RecordPatch};
use crate::routes::validation::{
    reject_blank, require, require_text, JsonBody, PathParam, QueryParams,
};
use crate::AppState;

/// GET /api/v1/records[?game_id=N]
pub async fn list_records(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<RecordFilter>,
) -> Result<Json<Vec<Record>>> {
    let records = db::records::list(&state.db, filter.game_id).await?;
    Ok(Json(records))
}

/// GET /api/v1/records/:id
pub async fn get_record(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Vec<Record>>> {
    let records = db::records::find_by_id(&state.db, id).await?;
    if records.is_empty() {
        return Err(AppError::NotFound(format!(
            "Unable to locate record with id of {}",
            id
        )));
    }
    Ok(Json(records))
}

/// Add a record to a game (admin only)
///
/// `handle`, `rank`, `time` and `game_id` are all required, and `game_id`
/// must name the game in the path.
///
/// POST /api/v1/games/:id/records
pub async fn create_record(
    State(state): State<AppState>,
    PathParam(path_game_id): PathParam<i64>,
    JsonBody(payload): JsonBody<NewRecord>,
) -> Result<(StatusCode, Json<Record>)> {
    let handle = require_text(payload.handle, "handle")?;
    let rank = require(payload.rank, "rank")?;
    let time = require(payload.time.as_ref().and_then(time_to_text), "time")?;
    let game_id = require(payload.game_id, "game_id")?;

    if game_id != path_game_id {
        return Err(AppError::Validation(format!(
            "The game_id property ({}) does not match the game in the path ({}).",
            game_id, path_game_id
        )));
    }

    let insert = InsertRecord {
        handle,
        rank,
        time,
        game_id,
    };
    // The foreign key is the existence check, so a game deleted concurrently still maps to 422
    let record = match db::records::insert(&state.db, &insert).await {
        Ok(record) => record,
        Err(e) if db::is_foreign_key_violation(&e) => {
            return Err(AppError::Validation(format!(
                "No game with an id of {} was found.",
                game_id
            )));
        }
        Err(e) => return Err(e.into()),
    };
    tracing::info!("Created record {} for game {}", record.id, game_id);

    Ok((StatusCode::CREATED, Json(record)))
}

/// Partially update a record (admin only)
///
/// PATCH /api/v1/records/:id
pub async fn update_record(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    JsonBody(patch): JsonBody<RecordPatch>,
) -> Result<Json<Record>> {
    if patch.is_empty() {
        return Err(AppError::Validation(
            "Expected at least one of handle, rank, time.".to_string(),
        ));
    }
    reject_blank(&patch.handle, "handle")?;

    let time = match &patch.time {
        Some(value) => Some(time_to_text(value).ok_or_else(|| {
            AppError::Validation("The time property must be a number or a string.".to_string())
        })?),
        None => None,
    };

    let changes = RecordChanges {
        handle: patch.handle,
        rank: patch.rank,
        time,
    };

    let record = db::records::update(&state.db, id, changes)
        .await?
        .ok_or_else(|| AppError::NoSuchResource(no_resource(id)))?;

    tracing::info!("Updated record {}", id);
    Ok(Json(record))
}

/// DELETE /api/v1/records/:id
pub async fn delete_record(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<StatusCode> {
    let removed = db::records::delete(&state.db, id).await?;
    if removed == 0 {
        return Err(AppError::NoSuchResource(no_resource(id)));
    }

    tracing::info!("Deleted record {}", id);
    Ok(StatusCode::NO_CONTENT)
}
