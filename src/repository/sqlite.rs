use super::{RosterRepository, ScoreRepository, generate_id};
use crate::database::{self, DbPool, get_connection};
use crate::domain::{NewScore, Player, ScoreEntry, Season, Standing};
use crate::errors::StorageError;

/// Score entries in the `score` table; the season fold runs inside SQLite.
#[derive(Clone)]
pub struct SqliteScoreRepository {
    pool: DbPool,
}

impl SqliteScoreRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ScoreRepository for SqliteScoreRepository {
    fn player_scores(&self, player_id: &str, season: Season) -> Result<Vec<ScoreEntry>, StorageError> {
        let mut conn = get_connection(&self.pool)?;
        database::scores::list_by_player_and_season(&mut conn, player_id, season)
    }

    fn add_score(&self, score: NewScore) -> Result<ScoreEntry, StorageError> {
        let mut conn = get_connection(&self.pool)?;
        database::scores::insert_score(&mut conn, &generate_id(), &score)
    }

    fn delete_score(&self, id: &str) -> Result<(), StorageError> {
        let mut conn = get_connection(&self.pool)?;
        let removed = database::scores::delete_by_id(&mut conn, id)?;
        if removed == 0 {
            log::debug!("Delete of unknown score {} ignored", id);
        }
        Ok(())
    }

    fn season_standings(&self, season: Season) -> Result<Vec<Standing>, StorageError> {
        let mut conn = get_connection(&self.pool)?;
        database::scores::season_standings(&mut conn, season)
    }
}

/// Roster in the `player` table
#[derive(Clone)]
pub struct SqliteRosterRepository {
    pool: DbPool,
}

impl SqliteRosterRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl RosterRepository for SqliteRosterRepository {
    fn get_player_by_id(&self, id: &str) -> Result<Option<Player>, StorageError> {
        let mut conn = get_connection(&self.pool)?;
        database::players::find_by_id(&mut conn, id)
    }

    fn find_player_by_name(&self, name: &str) -> Result<Option<Player>, StorageError> {
        let mut conn = get_connection(&self.pool)?;
        database::players::find_by_name(&mut conn, name)
    }

    fn list_players(&self) -> Result<Vec<Player>, StorageError> {
        let mut conn = get_connection(&self.pool)?;
        database::players::list_all(&mut conn)
    }

    fn insert_player(&self, player: Player) -> Result<(), StorageError> {
        let mut conn = get_connection(&self.pool)?;
        database::players::insert_player(&mut conn, &player)
    }

    fn rename_player(&self, id: &str, name: &str) -> Result<bool, StorageError> {
        let mut conn = get_connection(&self.pool)?;
        Ok(database::players::rename_player(&mut conn, id, name)? > 0)
    }

    fn delete_player(&self, id: &str) -> Result<(), StorageError> {
        let mut conn = get_connection(&self.pool)?;
        database::players::delete_player(&mut conn, id)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_memory_pool, setup::ensure_schema};
    use crate::repository::MemoryScoreRepository;

    fn test_pool() -> DbPool {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        ensure_schema(&mut conn).unwrap();
        pool
    }

    fn new_score(player_id: &str, points: u32, birdies: u32, eagles: u32, mulligans: u32, day: &str) -> NewScore {
        NewScore {
            player_id: player_id.to_string(),
            player_name: format!("Player {}", player_id),
            points,
            birdies,
            eagles,
            mulligans,
            season: 1,
            day: day.to_string(),
        }
    }

    #[test]
    fn test_add_then_list_most_recent_first() {
        let repo = SqliteScoreRepository::new(test_pool());
        repo.add_score(new_score("p1", 10, 0, 0, 0, "2024-05-01")).unwrap();
        let latest = repo.add_score(new_score("p1", 12, 1, 0, 0, "2024-06-01")).unwrap();

        let scores = repo.player_scores("p1", 1).unwrap();

        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0], latest);
        assert!(repo.player_scores("p1", 2).unwrap().is_empty());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let pool = test_pool();
        let repo = SqliteScoreRepository::new(pool.clone());
        let entry = repo.add_score(new_score("p1", 10, 0, 0, 0, "2024-05-01")).unwrap();

        repo.delete_score(&entry.id).unwrap();
        repo.delete_score(&entry.id).unwrap();

        assert!(repo.player_scores("p1", 1).unwrap().is_empty());
        let mut conn = get_connection(&pool).unwrap();
        assert_eq!(database::scores::count_all(&mut conn).unwrap(), 0);
    }

    #[test]
    fn test_sql_fold_matches_in_memory_fold() {
        let sqlite = SqliteScoreRepository::new(test_pool());
        let memory = MemoryScoreRepository::default();
        let rounds = vec![
            new_score("p1", 30, 2, 1, 0, "2024-05-01"),
            new_score("p1", 4, 0, 0, 3, "2024-05-20"),
            new_score("p2", 1, 0, 0, 4, "2024-04-11"),
            new_score("p3", 31, 0, 0, 0, "2024-05-02"),
        ];
        for round in rounds {
            sqlite.add_score(round.clone()).unwrap();
            memory.add_score(round).unwrap();
        }

        let mut from_sql = sqlite.season_standings(1).unwrap();
        let mut from_memory = memory.season_standings(1).unwrap();
        from_sql.sort_by(|a, b| a.player_id.cmp(&b.player_id));
        from_memory.sort_by(|a, b| a.player_id.cmp(&b.player_id));

        assert_eq!(from_sql, from_memory);
        assert_eq!(from_sql[0].total_points, 30 + 4 + 3 + 4 - 9);
        assert_eq!(from_sql[0].last_played, "2024-05-20");
        assert_eq!(from_sql[1].total_points, -11);
    }

    #[test]
    fn test_roster_crud() {
        let roster = SqliteRosterRepository::new(test_pool());
        roster.insert_player(Player { id: "b".to_string(), name: "Bob".to_string() }).unwrap();
        roster.insert_player(Player { id: "a".to_string(), name: "Ann".to_string() }).unwrap();

        assert_eq!(roster.get_player_by_id("a").unwrap().unwrap().name, "Ann");
        assert!(roster.get_player_by_id("zzz").unwrap().is_none());
        assert_eq!(roster.find_player_by_name("Bob").unwrap().unwrap().id, "b");
        assert_eq!(roster.list_players().unwrap()[0].name, "Ann");

        assert!(roster.rename_player("b", "Bert").unwrap());
        assert!(!roster.rename_player("zzz", "Nobody").unwrap());

        roster.delete_player("a").unwrap();
        let names: Vec<String> = roster.list_players().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Bert"]);
    }

    #[test]
    fn test_duplicate_name_is_a_conflict() {
        let roster = SqliteRosterRepository::new(test_pool());
        roster.insert_player(Player { id: "a".to_string(), name: "Ann".to_string() }).unwrap();
        roster.insert_player(Player { id: "b".to_string(), name: "Bob".to_string() }).unwrap();

        let err = roster
            .insert_player(Player { id: "c".to_string(), name: "Ann".to_string() })
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict { .. }));

        let err = roster.rename_player("b", "Ann").unwrap_err();
        assert!(matches!(err, StorageError::Conflict { .. }));
        assert_eq!(roster.get_player_by_id("b").unwrap().unwrap().name, "Bob");
    }

    #[test]
    fn test_missing_schema_surfaces_as_storage_error() {
        let repo = SqliteScoreRepository::new(create_memory_pool().unwrap());

        assert!(repo.season_standings(1).is_err());
        assert!(repo.player_scores("p1", 1).is_err());
    }
}
