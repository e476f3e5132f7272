use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Game row as stored in the `games` table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Game {
    pub id: i64,
    pub game_title: String,
    pub game_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /games`
///
/// Every field is optional at the serde level so that a missing title
/// surfaces as a 422 naming the field rather than a generic parse error.
#[derive(Debug, Default, Deserialize)]
pub struct NewGame {
    pub game_title: Option<String>,
    pub game_image: Option<String>,
}

/// Body of `PATCH /games/:id`
#[derive(Debug, Default, Deserialize)]
pub struct GamePatch {
    pub game_title: Option<String>,
    pub game_image: Option<String>,
}

impl GamePatch {
    pub fn is_empty(&self) -> bool {
        self.game_title.is_none() && self.game_image.is_none()
    }
}
