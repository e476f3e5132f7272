use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};

use super::Db;
use crate::models::{Game, GamePatch};

const GAME_COLUMNS: &str = "id, game_title, game_image, created_at, updated_at";

pub async fn list(db: &Db) -> Result<Vec<Game>, sqlx::Error> {
    sqlx::query_as::<_, Game>(&format!("SELECT {GAME_COLUMNS} FROM games ORDER BY id"))
        .fetch_all(db)
        .await
}

/// All rows with the given id (zero or one)
pub async fn find_by_id(db: &Db, id: i64) -> Result<Vec<Game>, sqlx::Error> {
    sqlx::query_as::<_, Game>(&format!("SELECT {GAME_COLUMNS} FROM games WHERE id = ?"))
        .bind(id)
        .fetch_all(db)
        .await
}

pub async fn exists(db: &Db, id: i64) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM games WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(found.is_some())
}

pub async fn insert(db: &Db, title: &str, image: Option<&str>) -> Result<Game, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, Game>(&format!(
        "INSERT INTO games (game_title, game_image, created_at, updated_at) \
         VALUES (?, ?, ?, ?) RETURNING {GAME_COLUMNS}"
    ))
    .bind(title)
    .bind(image)
    .bind(now)
    .bind(now)
    .fetch_one(db)
    .await
}

/// Apply the fields present in `patch`; `None` when no game has that id
pub async fn update(db: &Db, id: i64, patch: &GamePatch) -> Result<Option<Game>, sqlx::Error> {
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE games SET updated_at = ");
    builder.push_bind(Utc::now());

    if let Some(title) = &patch.game_title {
        builder.push(", game_title = ").push_bind(title.clone());
    }
    if let Some(image) = &patch.game_image {
        builder.push(", game_image = ").push_bind(image.clone());
    }

    builder.push(" WHERE id = ").push_bind(id);
    builder.push(format!(" RETURNING {GAME_COLUMNS}"));

    builder.build_query_as::<Game>().fetch_optional(db).await
}

/// Delete a game and every record that references it in one transaction
///
/// Returns the number of games removed. When the game does not exist the
/// transaction is rolled back, so no records are touched either.
pub async fn delete_with_records(db: &Db, id: i64) -> Result<u64, sqlx::Error> {
    let mut tx = db.begin().await?;

    let records = sqlx::query("DELETE FROM records WHERE game_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let games = sqlx::query("DELETE FROM games WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if games == 0 {
        tx.rollback().await?;
        return Ok(0);
    }

    tx.commit().await?;
    tracing::debug!("Deleted game {} with {} records", id, records);

    Ok(games)
}
