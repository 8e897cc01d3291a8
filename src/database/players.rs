use rusqlite::{ErrorCode, OptionalExtension, params};

use super::connection::DbConn;
use crate::domain::Player;
use crate::errors::{StorageContext, StorageError, storage_context};

/// Map a UNIQUE/PRIMARY KEY violation to `StorageError::Conflict`
fn write_context<T>(result: rusqlite::Result<T>, operation: &str, key: &str) -> Result<T, StorageError> {
    result.map_err(|e| match e.sqlite_error_code() {
        Some(ErrorCode::ConstraintViolation) => StorageError::conflict(storage_context(operation, key)),
        _ => StorageError::backend(storage_context(operation, key), e),
    })
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

pub fn find_by_id(conn: &mut DbConn, id: &str) -> Result<Option<Player>, StorageError> {
    let sql = "SELECT id, name FROM player WHERE id = ?1";

    conn.query_row(sql, params![id], parse_player_row)
        .optional()
        .with_storage_context(|| storage_context("query player by id", id))
}

pub fn find_by_name(conn: &mut DbConn, name: &str) -> Result<Option<Player>, StorageError> {
    let sql = "SELECT id, name FROM player WHERE name = ?1";

    conn.query_row(sql, params![name], parse_player_row)
        .optional()
        .with_storage_context(|| storage_context("query player by name", name))
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<Player>, StorageError> {
    let sql = "SELECT id, name FROM player ORDER BY name";

    let mut stmt = conn.prepare(sql).storage_context("Failed to prepare player list")?;
    let rows = stmt
        .query_map([], parse_player_row)
        .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
        .storage_context("Failed to list players")?;

    Ok(rows)
}

pub fn insert_player(conn: &mut DbConn, player: &Player) -> Result<(), StorageError> {
    let sql = "INSERT INTO player (id, name) VALUES (?1, ?2)";

    let result = conn.execute(sql, params![player.id, player.name]).map(|_| ());
    write_context(result, "insert player", &player.id)
}

pub fn rename_player(conn: &mut DbConn, id: &str, name: &str) -> Result<usize, StorageError> {
    let sql = "UPDATE player SET name = ?2 WHERE id = ?1";

    write_context(conn.execute(sql, params![id, name]), "rename player", id)
}

pub fn delete_player(conn: &mut DbConn, id: &str) -> Result<usize, StorageError> {
    conn.execute("DELETE FROM player WHERE id = ?1", params![id])
        .with_storage_context(|| storage_context("delete player", id))
}
