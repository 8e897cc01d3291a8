//! Storage seams for score entries and the member roster.
//!
//! Every backend is picked once at startup and handed to the services as a
//! trait object; nothing downstream branches on which one it got.

pub mod file;
pub mod memory;
pub mod sqlite;

use crate::domain::{NewScore, Player, ScoreEntry, Season, Standing};
use crate::errors::StorageError;

pub use file::JsonFileScoreRepository;
pub use memory::{MemoryRosterRepository, MemoryScoreRepository};
pub use sqlite::{SqliteRosterRepository, SqliteScoreRepository};

pub trait ScoreRepository: Send + Sync {
    /// Entries of one player in one season; empty when there are none.
    fn player_scores(&self, player_id: &str, season: Season) -> Result<Vec<ScoreEntry>, StorageError>;

    /// Persist a score under a freshly generated id.
    fn add_score(&self, score: NewScore) -> Result<ScoreEntry, StorageError>;

    /// Remove an entry. Unknown ids are not an error.
    fn delete_score(&self, id: &str) -> Result<(), StorageError>;

    /// One unordered standing per `(player_id, player_name)` with entries in `season`.
    fn season_standings(&self, season: Season) -> Result<Vec<Standing>, StorageError>;
    /// `false` when standings are keyed by player name instead of roster id.
    fn keys_rows_by_player_id(&self) -> bool {
        true
    }
}

pub trait RosterRepository: Send + Sync {
    /// `None` when no player has this id.
    fn get_player_by_id(&self, id: &str) -> Result<Option<Player>, StorageError>;

    fn find_player_by_name(&self, name: &str) -> Result<Option<Player>, StorageError>;

    /// All players ordered by name
    fn list_players(&self) -> Result<Vec<Player>, StorageError>;

    fn insert_player(&self, player: Player) -> Result<(), StorageError>;

    /// Returns `false` when the id is unknown.
    fn rename_player(&self, id: &str, name: &str) -> Result<bool, StorageError>;

    fn delete_player(&self, id: &str) -> Result<(), StorageError>;
}

pub(crate) fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
