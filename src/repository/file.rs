use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::ScoreRepository;
use crate::domain::{NewScore, ScoreEntry, Season, Standing};
use crate::errors::{StorageContext, StorageError, storage_context};

#[derive(Debug, Deserialize)]
struct SeasonSnapshot {
    season: Season,
    #[serde(alias = "game")]
    players: Vec<SnapshotPlayer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotPlayer {
    id: Option<String>,
    name: String,
    points: i64,
    #[serde(default)]
    last_played: String,
}

impl SnapshotPlayer {
    fn to_standing(&self) -> Standing {
        Standing {
            player_id: self.id.clone().unwrap_or_else(|| self.name.clone()),
            player_name: self.name.clone(),
            total_points: self.points,
            last_played: self.last_played.clone(),
        }
    }
}

/// Read-only scoreboard snapshot loaded from a JSON document.
///
/// The document holds precomputed season totals only, so it can answer
/// scoreboard reads but has no per-round entries and refuses writes.
#[derive(Debug)]
pub struct JsonFileScoreRepository {
    seasons: Vec<SeasonSnapshot>,
}

impl JsonFileScoreRepository {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let key = path.display().to_string();

        let json = fs::read_to_string(path)
            .with_storage_context(|| storage_context("read scoreboard file", &key))?;
        let seasons: Vec<SeasonSnapshot> = serde_json::from_str(&json)
            .with_storage_context(|| storage_context("parse scoreboard file", &key))?;

        log::info!("Loaded {} season(s) from {}", seasons.len(), key);
        Ok(Self { seasons })
    }
}

impl ScoreRepository for JsonFileScoreRepository {
    fn player_scores(&self, _player_id: &str, _season: Season) -> Result<Vec<ScoreEntry>, StorageError> {
        Ok(Vec::new())
    }

    fn add_score(&self, _score: NewScore) -> Result<ScoreEntry, StorageError> {
        Err(StorageError::ReadOnly { operation: "add score" })
    }

    fn delete_score(&self, _id: &str) -> Result<(), StorageError> {
        Err(StorageError::ReadOnly { operation: "delete score" })
    }

    fn keys_rows_by_player_id(&self) -> bool {
        false
    }

    fn season_standings(&self, season: Season) -> Result<Vec<Standing>, StorageError> {
        Ok(self
            .seasons
            .iter()
            .filter(|s| s.season == season)
            .flat_map(|s| s.players.iter().map(SnapshotPlayer::to_standing))
            .collect())
    }
}
