use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::Local;
use log::info;

use crate::domain::{NewScore, Player, ScoreEntry, ScoreInput, Scoreboard, Season, Standing};
use crate::errors::{ServiceContext, ServiceError};
use crate::repository::{RosterRepository, ScoreRepository};
use crate::scoring;

pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Source of the day stamped on new score entries
pub trait Clock: Send + Sync {
    /// Today as a fixed-width `YYYY-MM-DD` string
    fn today(&self) -> String;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> String {
        Local::now().date_naive().format(DAY_FORMAT).to_string()
    }
}

/// Whether roster members without entries in a season appear on its scoreboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroEntryPolicy {
    /// Only players with at least one entry that season
    #[default]
    EntriesOnly,
    /// Every roster member; those without entries get zero points
    FullRoster,
}

impl FromStr for ZeroEntryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "entries" => Ok(Self::EntriesOnly),
            "roster" => Ok(Self::FullRoster),
            other => Err(format!("unknown scoreboard policy '{}', expected entries or roster", other)),
        }
    }
}

impl fmt::Display for ZeroEntryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EntriesOnly => write!(f, "entries"),
            Self::FullRoster => write!(f, "roster"),
        }
    }
}

/// Score operations, identical whichever backends are plugged in
pub struct ScoreService {
    scores: Arc<dyn ScoreRepository>,
    roster: Arc<dyn RosterRepository>,
    policy: ZeroEntryPolicy,
    clock: Arc<dyn Clock>,
}

impl ScoreService {
    pub fn new(scores: Arc<dyn ScoreRepository>, roster: Arc<dyn RosterRepository>) -> Self {
        Self {
            scores,
            roster,
            policy: ZeroEntryPolicy::default(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_policy(mut self, policy: ZeroEntryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn policy(&self) -> ZeroEntryPolicy {
        self.policy
    }

    /// Entries of one player in one season, most recent day first.
    pub fn get_player_score_by_season(
        &self,
        player_id: &str,
        season: Season,
    ) -> Result<Vec<ScoreEntry>, ServiceError> {
        let mut scores = self
            .scores
            .player_scores(player_id, season)
            .during(format!("fetch scores of player {} for season {}", player_id, season))?;

        scores.sort_by(|a, b| b.day.cmp(&a.day).then_with(|| a.id.cmp(&b.id)));
        Ok(scores)
    }

    pub fn add_score(&self, input: ScoreInput) -> Result<ScoreEntry, ServiceError> {
        let player = self
            .roster
            .get_player_by_id(&input.player_id)
            .during(format!("look up player {}", input.player_id))?
            .ok_or_else(|| ServiceError::validation("player does not exist"))?;

        let player_id = player.id.clone();
        let score = NewScore::from_input(input, &player, self.clock.today());
        let entry = self
            .scores
            .add_score(score)
            .during(format!("add score for player {}", player_id))?;

        info!("Added score {} for player {} in season {}", entry.id, entry.player_id, entry.season);
        Ok(entry)
    }

    /// Unknown ids are accepted silently.
    pub fn delete_score(&self, id: &str) -> Result<(), ServiceError> {
        self.scores
            .delete_score(id)
            .during(format!("delete score {}", id))?;

        info!("Deleted score {}", id);
        Ok(())
    }

    pub fn get_scoreboard(&self, season: Season) -> Result<Scoreboard, ServiceError> {
        let mut standings = self
            .scores
            .season_standings(season)
            .during(format!("fetch scoreboard for season {}", season))?;

        if self.policy == ZeroEntryPolicy::FullRoster {
            self.add_idle_players(&mut standings)?;
        }

        Ok(Scoreboard {
            season,
            standings: scoring::rank_standings(standings),
        })
    }

    fn add_idle_players(&self, standings: &mut Vec<Standing>) -> Result<(), ServiceError> {
        let players = self
            .roster
            .list_players()
            .during("list roster for scoreboard")?;

        if !self.scores.keys_rows_by_player_id() {
            adopt_roster_ids(standings, &players);
        }

        for player in &players {
            if !standings.iter().any(|s| s.player_id == player.id) {
                standings.push(Standing::without_entries(player));
            }
        }
        Ok(())
    }
}

/// Give name-keyed rows the id of the roster member with that name.
fn adopt_roster_ids(standings: &mut [Standing], players: &[Player]) {
    let ids: HashMap<&str, &str> = players
        .iter()
        .map(|p| (p.name.as_str(), p.id.as_str()))
        .collect();

    for standing in standings.iter_mut() {
        if let Some(id) = ids.get(standing.player_name.as_str()) {
            standing.player_id = id.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StorageError;
    use crate::repository::{JsonFileScoreRepository, MemoryRosterRepository, MemoryScoreRepository};

    struct FixedClock(&'static str);

    impl Clock for FixedClock {
        fn today(&self) -> String {
            self.0.to_string()
        }
    }

    struct BrokenScores;

    impl ScoreRepository for BrokenScores {
        fn player_scores(&self, _: &str, _: Season) -> Result<Vec<ScoreEntry>, StorageError> {
            Err(StorageError::poisoned("list scores"))
        }
        fn add_score(&self, _: NewScore) -> Result<ScoreEntry, StorageError> {
            Err(StorageError::poisoned("add score"))
        }
        fn delete_score(&self, _: &str) -> Result<(), StorageError> {
            Err(StorageError::poisoned("delete score"))
        }
        fn season_standings(&self, _: Season) -> Result<Vec<Standing>, StorageError> {
            Err(StorageError::poisoned("sum scores"))
        }
    }

    fn roster() -> Arc<MemoryRosterRepository> {
        Arc::new(MemoryRosterRepository::new(vec![
            Player { id: "p1".to_string(), name: "Player1".to_string() },
            Player { id: "p2".to_string(), name: "Player2".to_string() },
            Player { id: "p3".to_string(), name: "Player3".to_string() },
        ]))
    }

    fn input(player_id: &str, points: u32, season: Season) -> ScoreInput {
        ScoreInput {
            player_id: player_id.to_string(),
            points,
            birdies: 0,
            eagles: 0,
            mulligans: 0,
            season,
        }
    }

    fn service(scores: Arc<MemoryScoreRepository>) -> ScoreService {
        ScoreService::new(scores, roster()).with_clock(Arc::new(FixedClock("2024-07-14")))
    }

    #[test]
    fn test_add_score_denormalizes_name_and_stamps_day() {
        let service = service(Arc::new(MemoryScoreRepository::default()));

        let entry = service.add_score(input("p1", 30, 1)).unwrap();

        assert_eq!(entry.player_name, "Player1");
        assert_eq!(entry.day, "2024-07-14");
        assert!(!entry.id.is_empty());
    }

    #[test]
    fn test_add_score_for_unknown_player_is_rejected_and_not_stored() {
        let scores = Arc::new(MemoryScoreRepository::default());
        let service = service(scores.clone());

        let err = service.add_score(input("ghost", 30, 1)).unwrap_err();

        assert!(err.is_validation());
        assert!(scores.is_empty().unwrap());
    }

    #[test]
    fn test_deleted_score_is_not_listed() {
        let service = service(Arc::new(MemoryScoreRepository::default()));
        let kept = service.add_score(input("p1", 30, 1)).unwrap();
        let gone = service.add_score(input("p1", 12, 1)).unwrap();

        service.delete_score(&gone.id).unwrap();
        service.delete_score(&gone.id).unwrap();

        let scores = service.get_player_score_by_season("p1", 1).unwrap();
        assert_eq!(scores, vec![kept]);
    }

    #[test]
    fn test_player_scores_most_recent_first() {
        let scores = Arc::new(MemoryScoreRepository::default());
        let early = ScoreService::new(scores.clone(), roster()).with_clock(Arc::new(FixedClock("2024-05-01")));
        let late = ScoreService::new(scores.clone(), roster()).with_clock(Arc::new(FixedClock("2024-06-01")));

        early.add_score(input("p1", 1, 1)).unwrap();
        late.add_score(input("p1", 2, 1)).unwrap();

        let days: Vec<String> = early
            .get_player_score_by_season("p1", 1)
            .unwrap()
            .into_iter()
            .map(|s| s.day)
            .collect();
        assert_eq!(days, vec!["2024-06-01", "2024-05-01"]);
        assert!(early.get_player_score_by_season("p1", 9).unwrap().is_empty());
    }

    #[test]
    fn test_scoreboard_ranks_by_total() {
        let service = service(Arc::new(MemoryScoreRepository::default()));
        service.add_score(input("p1", 30, 1)).unwrap();
        service.add_score(input("p2", 31, 1)).unwrap();

        let board = service.get_scoreboard(1).unwrap();

        assert_eq!(board.season, 1);
        let names: Vec<&str> = board.standings.iter().map(|s| s.player_name.as_str()).collect();
        assert_eq!(names, vec!["Player2", "Player1"]);
        assert!(service.get_scoreboard(2).unwrap().standings.is_empty());
    }

    #[test]
    fn test_full_roster_policy_includes_idle_players() {
        let service = service(Arc::new(MemoryScoreRepository::default())).with_policy(ZeroEntryPolicy::FullRoster);
        let mut penalised = input("p2", 0, 1);
        penalised.mulligans = 2;
        service.add_score(input("p1", 30, 1)).unwrap();
        service.add_score(penalised).unwrap();

        let board = service.get_scoreboard(1).unwrap();

        let rows: Vec<(&str, i64)> = board
            .standings
            .iter()
            .map(|s| (s.player_id.as_str(), s.total_points))
            .collect();
        assert_eq!(rows, vec![("p1", 30), ("p3", 0), ("p2", -6)]);
        assert_eq!(board.standings[1].last_played, "");
    }

    #[test]
    fn test_entries_only_policy_omits_idle_players() {
        let service = service(Arc::new(MemoryScoreRepository::default()));
        service.add_score(input("p1", 30, 1)).unwrap();

        assert_eq!(service.policy(), ZeroEntryPolicy::EntriesOnly);
        assert_eq!(service.get_scoreboard(1).unwrap().standings.len(), 1);
    }

    #[test]
    fn test_storage_failures_are_not_validation_errors() {
        let service = ScoreService::new(Arc::new(BrokenScores), roster());

        let err = service.get_scoreboard(1).unwrap_err();
        assert!(matches!(err, ServiceError::Storage { .. }));
        assert_eq!(err.to_string(), "fetch scoreboard for season 1 failed");

        assert!(!service.add_score(input("p1", 1, 1)).unwrap_err().is_validation());
        assert!(service.get_player_score_by_season("p1", 1).is_err());
        assert!(service.delete_score("x").is_err());
    }

    #[test]
    fn test_read_only_snapshot_still_validates_player_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scoreboard.json");
        std::fs::write(&path, r#"[{"season": 1, "players": [{"name": "Player1", "points": 5}]}]"#).unwrap();
        let snapshot = Arc::new(JsonFileScoreRepository::open(&path).unwrap());
        let service = ScoreService::new(snapshot, roster());

        assert!(service.add_score(input("ghost", 1, 1)).unwrap_err().is_validation());
        assert!(!service.add_score(input("p1", 1, 1)).unwrap_err().is_validation());
        assert_eq!(service.get_scoreboard(1).unwrap().standings[0].total_points, 5);
    }

    #[test]
    fn test_full_roster_policy_matches_snapshot_rows_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scoreboard.json");
        std::fs::write(&path, r#"[{"season": 1, "players": [{"name": "Player1", "points": 5}]}]"#).unwrap();
        let snapshot = Arc::new(JsonFileScoreRepository::open(&path).unwrap());
        let service = ScoreService::new(snapshot, roster()).with_policy(ZeroEntryPolicy::FullRoster);

        let board = service.get_scoreboard(1).unwrap();

        let rows: Vec<(&str, i64)> = board
            .standings
            .iter()
            .map(|s| (s.player_id.as_str(), s.total_points))
            .collect();
        assert_eq!(rows, vec![("p1", 5), ("p2", 0), ("p3", 0)]);
    }

    #[test]
    fn test_full_roster_policy_keeps_departed_rows_apart_from_members() {
        let scores = Arc::new(MemoryScoreRepository::default());
        scores
            .add_score(NewScore {
                player_id: "gone".to_string(),
                player_name: "Player2".to_string(),
                points: 4,
                birdies: 0,
                eagles: 0,
                mulligans: 0,
                season: 1,
                day: "2024-05-01".to_string(),
            })
            .unwrap();
        let service = service(scores).with_policy(ZeroEntryPolicy::FullRoster);

        let board = service.get_scoreboard(1).unwrap();

        let rows: Vec<(&str, i64)> = board
            .standings
            .iter()
            .map(|s| (s.player_id.as_str(), s.total_points))
            .collect();
        assert_eq!(rows, vec![("gone", 4), ("p1", 0), ("p2", 0), ("p3", 0)]);
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("entries".parse::<ZeroEntryPolicy>().unwrap(), ZeroEntryPolicy::EntriesOnly);
        assert_eq!(" Roster ".parse::<ZeroEntryPolicy>().unwrap(), ZeroEntryPolicy::FullRoster);
        assert!("everyone".parse::<ZeroEntryPolicy>().is_err());
        assert_eq!(ZeroEntryPolicy::FullRoster.to_string(), "roster");
    }
}
