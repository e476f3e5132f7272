use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};

use super::Db;
use crate::models::Record;

const RECORD_COLUMNS: &str = "id, handle, rank, time, game_id, created_at, updated_at";

/// Validated values for a new record row
#[derive(Debug, Clone)]
pub struct InsertRecord {
    pub handle: String,
    pub rank: i64,
    pub time: String,
    pub game_id: i64,
}

/// Validated subset of record columns to overwrite
#[derive(Debug, Clone, Default)]
pub struct RecordChanges {
    pub handle: Option<String>,
    pub rank: Option<i64>,
    pub time: Option<String>,
}

/// All records, optionally restricted to one game
pub async fn list(db: &Db, game_id: Option<i64>) -> Result<Vec<Record>, sqlx::Error> {
    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {RECORD_COLUMNS} FROM records"));

    if let Some(game_id) = game_id {
        builder.push(" WHERE game_id = ").push_bind(game_id);
    }
    builder.push(" ORDER BY id");

    builder.build_query_as::<Record>().fetch_all(db).await
}

/// All rows with the given id (zero or one)
pub async fn find_by_id(db: &Db, id: i64) -> Result<Vec<Record>, sqlx::Error> {
    sqlx::query_as::<_, Record>(&format!("SELECT {RECORD_COLUMNS} FROM records WHERE id = ?"))
        .bind(id)
        .fetch_all(db)
        .await
}

pub async fn insert(db: &Db, record: &InsertRecord) -> Result<Record, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, Record>(&format!(
        "INSERT INTO records (handle, rank, time, game_id, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING {RECORD_COLUMNS}"
    ))
    .bind(&record.handle)
    .bind(record.rank)
    .bind(&record.time)
    .bind(record.game_id)
    .bind(now)
    .bind(now)
    .fetch_one(db)
    .await
}

/// Apply `changes`; `None` when no record has that id
pub async fn update(
    db: &Db,
    id: i64,
    changes: RecordChanges,
) -> Result<Option<Record>, sqlx::Error> {
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE records SET updated_at = ");
    builder.push_bind(Utc::now());

    if let Some(handle) = changes.handle {
        builder.push(", handle = ").push_bind(handle);
    }
    if let Some(rank) = changes.rank {
        builder.push(", rank = ").push_bind(rank);
    }
    if let Some(time) = changes.time {
        builder.push(", time = ").push_bind(time);
    }

    builder.push(" WHERE id = ").push_bind(id);
    builder.push(format!(" RETURNING {RECORD_COLUMNS}"));

    builder.build_query_as::<Record>().fetch_optional(db).await
}

/// Returns the number of rows removed
pub async fn delete(db: &Db, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM records WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
