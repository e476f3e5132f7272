use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Leaderboard entry as stored in the `records` table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Record {
    pub id: i64,
    pub handle: String,
    pub rank: i64,
    /// Finish time exactly as submitted (number or string), kept as text
    pub time: String,
    pub game_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /games/:id/records`
#[derive(Debug, Default, Deserialize)]
pub struct NewRecord {
    pub handle: Option<String>,
    pub rank: Option<i64>,
    pub time: Option<Value>,
    pub game_id: Option<i64>,
}

/// Body of `PATCH /records/:id`
#[derive(Debug, Default, Deserialize)]
pub struct RecordPatch {
    pub handle: Option<String>,
    pub rank: Option<i64>,
    pub time: Option<Value>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        self.handle.is_none() && self.rank.is_none() && self.time.is_none()
    }
}

/// Query string accepted by `GET /records`
#[derive(Debug, Default, Deserialize)]
pub struct RecordFilter {
    pub game_id: Option<i64>,
}

/// Normalise a submitted time to its stored text form
///
/// Accepts JSON numbers and non-blank strings; anything else is treated as absent.
pub fn time_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_time_to_text() {
        assert_eq!(time_to_text(&json!(93)), Some("93".to_string()));
        assert_eq!(time_to_text(&json!(12.5)), Some("12.5".to_string()));
        assert_eq!(time_to_text(&json!("01:33")), Some("01:33".to_string()));

        assert_eq!(time_to_text(&json!("")), None);
        assert_eq!(time_to_text(&json!(null)), None);
        assert_eq!(time_to_text(&json!([1, 2])), None);
    }

    #[test]
    fn test_record_patch_is_empty() {
        assert!(RecordPatch::default().is_empty());

        let patch: RecordPatch = serde_json::from_value(json!({ "rank": 2 })).unwrap();
        assert!(!patch.is_empty());
    }
}
