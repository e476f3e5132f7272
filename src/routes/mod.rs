pub mod auth;
pub mod games;
pub mod health;
pub mod records;
pub mod validation;

pub use auth::authenticate;
pub use games::{create_game, delete_game, get_game, list_game_records, list_games, update_game};
pub use health::health_check;
pub use records::{create_record, delete_record, get_record, list_records, update_record};
