pub mod game;
pub mod record;

pub use game::{Game, GamePatch, NewGame};
pub use record::{NewRecord, Record, RecordFilter, RecordPatch};
