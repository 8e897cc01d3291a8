use rusqlite::params;

use super::connection::DbConn;
use crate::domain::{NewScore, ScoreEntry, Season, Standing};
use crate::errors::{StorageContext, StorageError, storage_context};

// Keep in step with crate::scoring::formula
const SEASON_STANDINGS_SQL: &str = "
    SELECT player_id,
           player_name,
           SUM(points) + 2 * SUM(birdies) + 3 * SUM(eagles) - 3 * SUM(mulligans) AS total_points,
           MAX(day) AS last_played
    FROM score
    WHERE season = ?1
    GROUP BY player_id, player_name
";

pub fn insert_score(conn: &mut DbConn, id: &str, score: &NewScore) -> Result<ScoreEntry, StorageError> {
    let sql = "INSERT INTO score (id, player_id, player_name, points, birdies, eagles, mulligans, season, day) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9) RETURNING id, player_id, player_name, points, birdies, eagles, mulligans, season, day";

    conn.query_row(
        sql,
        params![
            id,
            score.player_id,
            score.player_name,
            score.points,
            score.birdies,
            score.eagles,
            score.mulligans,
            score.season,
            score.day
        ],
        parse_score_row,
    )
    .with_storage_context(|| storage_context("insert score", &score.player_id))
}

fn parse_score_row(row: &rusqlite::Row) -> rusqlite::Result<ScoreEntry> {
    Ok(ScoreEntry {
        id: row.get(0)?,
        player_id: row.get(1)?,
        player_name: row.get(2)?,
        points: row.get(3)?,
        birdies: row.get(4)?,
        eagles: row.get(5)?,
        mulligans: row.get(6)?,
        season: row.get(7)?,
        day: row.get(8)?,
    })
}

pub fn list_by_player_and_season(
    conn: &mut DbConn,
    player_id: &str,
    season: Season,
) -> Result<Vec<ScoreEntry>, StorageError> {
    let sql = "SELECT id, player_id, player_name, points, birdies, eagles, mulligans, season, day FROM score WHERE player_id = ?1 AND season = ?2 ORDER BY day DESC, id ASC";
    let context = || storage_context("list scores", &format!("{}/{}", player_id, season));

    let mut stmt = conn.prepare(sql).with_storage_context(context)?;
    let rows = stmt
        .query_map(params![player_id, season], parse_score_row)
        .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
        .with_storage_context(context)?;

    Ok(rows)
}

pub fn delete_by_id(conn: &mut DbConn, id: &str) -> Result<usize, StorageError> {
    conn.execute("DELETE FROM score WHERE id = ?1", params![id])
        .with_storage_context(|| storage_context("delete score", id))
}

pub fn season_standings(conn: &mut DbConn, season: Season) -> Result<Vec<Standing>, StorageError> {
    let context = || storage_context("sum scores", &season.to_string());

    let mut stmt = conn.prepare(SEASON_STANDINGS_SQL).with_storage_context(context)?;
    let rows = stmt
        .query_map(params![season], |row| {
            Ok(Standing {
                player_id: row.get(0)?,
                player_name: row.get(1)?,
                total_points: row.get(2)?,
                last_played: row.get(3)?,
            })
        })
        .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
        .with_storage_context(context)?;

    Ok(rows)
}

pub fn count_all(conn: &mut DbConn) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM score", [], |row| row.get(0))
        .storage_context("Failed to count scores")
}
