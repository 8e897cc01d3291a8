use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{RosterRepository, ScoreRepository, generate_id};
use crate::domain::{NewScore, Player, ScoreEntry, Season, Standing};
use crate::errors::{StorageError, storage_context};
use crate::scoring;

fn read<'a, T>(lock: &'a RwLock<T>, context: &str) -> Result<RwLockReadGuard<'a, T>, StorageError> {
    lock.read().map_err(|_| StorageError::poisoned(context))
}

fn write<'a, T>(lock: &'a RwLock<T>, context: &str) -> Result<RwLockWriteGuard<'a, T>, StorageError> {
    lock.write().map_err(|_| StorageError::poisoned(context))
}

/// Score entries kept in process memory, in insertion order
#[derive(Debug, Default)]
pub struct MemoryScoreRepository {
    scores: RwLock<Vec<ScoreEntry>>,
}

impl MemoryScoreRepository {
    pub fn new(scores: Vec<ScoreEntry>) -> Self {
        Self {
            scores: RwLock::new(scores),
        }
    }

    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(read(&self.scores, "count scores")?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }
}

impl ScoreRepository for MemoryScoreRepository {
    fn player_scores(&self, player_id: &str, season: Season) -> Result<Vec<ScoreEntry>, StorageError> {
        let scores = read(&self.scores, "list scores")?;
        Ok(scores
            .iter()
            .filter(|s| s.player_id == player_id && s.season == season)
            .cloned()
            .collect())
    }

    fn add_score(&self, score: NewScore) -> Result<ScoreEntry, StorageError> {
        let entry = score.into_entry(generate_id());
        write(&self.scores, "add score")?.push(entry.clone());
        Ok(entry)
    }

    fn delete_score(&self, id: &str) -> Result<(), StorageError> {
        write(&self.scores, "delete score")?.retain(|s| s.id != id);
        Ok(())
    }

    fn season_standings(&self, season: Season) -> Result<Vec<Standing>, StorageError> {
        let scores = read(&self.scores, "sum scores")?;
        Ok(scoring::season_standings(scores.iter(), season))
    }
}

/// Roster kept in process memory
#[derive(Debug, Default)]
pub struct MemoryRosterRepository {
    players: RwLock<Vec<Player>>,
}

impl MemoryRosterRepository {
    pub fn new(players: Vec<Player>) -> Self {
        Self {
            players: RwLock::new(players),
        }
    }
}

impl RosterRepository for MemoryRosterRepository {
    fn get_player_by_id(&self, id: &str) -> Result<Option<Player>, StorageError> {
        let players = read(&self.players, "query player by id")?;
        Ok(players.iter().find(|p| p.id == id).cloned())
    }

    fn find_player_by_name(&self, name: &str) -> Result<Option<Player>, StorageError> {
        let players = read(&self.players, "query player by name")?;
        Ok(players.iter().find(|p| p.name == name).cloned())
    }

    fn list_players(&self) -> Result<Vec<Player>, StorageError> {
        let mut players = read(&self.players, "list players")?.clone();
        players.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(players)
    }

    fn insert_player(&self, player: Player) -> Result<(), StorageError> {
        let mut players = write(&self.players, "insert player")?;
        if players.iter().any(|p| p.id == player.id || p.name == player.name) {
            return Err(StorageError::conflict(storage_context("insert player", &player.id)));
        }
        players.push(player);
        Ok(())
    }

    fn rename_player(&self, id: &str, name: &str) -> Result<bool, StorageError> {
        let mut players = write(&self.players, "rename player")?;
        if !players.iter().any(|p| p.id == id) {
            return Ok(false);
        }
        if players.iter().any(|p| p.id != id && p.name == name) {
            return Err(StorageError::conflict(storage_context("rename player", id)));
        }

        for player in players.iter_mut().filter(|p| p.id == id) {
            player.name = name.to_string();
        }
        Ok(true)
    }

    fn delete_player(&self, id: &str) -> Result<(), StorageError> {
        write(&self.players, "delete player")?.retain(|p| p.id != id);
        Ok(())
    }
}
