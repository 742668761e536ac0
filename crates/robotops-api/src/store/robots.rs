use super::StoreError;
use robotops_core::{Page, Robot, RobotId};
use robotops_protocol::{RobotCreate, RobotUpdate};
use rusqlite::{Connection, params};

pub fn list(conn: &Connection, page: Page) -> Result<Vec<Robot>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, model_name FROM robots ORDER BY id ASC LIMIT ?1 OFFSET ?2",
    )?;
    let rows = stmt.query_map(params![page.limit, page.skip], map_robot_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn get_by_id(conn: &Connection, id: RobotId) -> Result<Option<Robot>, StoreError> {
    let mut stmt = conn.prepare("SELECT id, name, model_name FROM robots WHERE id = ?1")?;
    let mut rows = stmt.query(params![id.0])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(map_robot_row(row)?));
    }
    Ok(None)
}

pub fn create(conn: &Connection, payload: RobotCreate) -> Result<Robot, StoreError> {
    conn.execute(
        "INSERT INTO robots (name, model_name) VALUES (?1, ?2)",
        params![payload.name, payload.model_name],
    )?;
    Ok(payload.into_robot(RobotId(conn.last_insert_rowid())))
}

/// Replaces every mutable field. Returns `None` without writing when `id`
/// does not exist.
pub fn update(
    conn: &Connection,
    id: RobotId,
    payload: RobotUpdate,
) -> Result<Option<Robot>, StoreError> {
    let changed = conn.execute(
        "UPDATE robots SET name = ?2, model_name = ?3 WHERE id = ?1",
        params![id.0, payload.name, payload.model_name],
    )?;
    if changed == 0 {
        return Ok(None);
    }
    get_by_id(conn, id)
}

fn map_robot_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Robot> {
    Ok(Robot { id: RobotId(row.get(0)?), name: row.get(1)?, model_name: row.get(2)? })
}
