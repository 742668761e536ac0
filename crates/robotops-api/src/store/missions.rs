use super::StoreError;
use robotops_core::{Mission, MissionId, Page, RobotId};
use robotops_protocol::{MissionCreate, MissionUpdate};
use rusqlite::{Connection, params};

pub fn list(conn: &Connection, page: Page) -> Result<Vec<Mission>, StoreError> {
    let mut stmt = conn.prepare(
        "
        SELECT id, name, description, robot_id
        FROM missions
        ORDER BY id ASC
        LIMIT ?1 OFFSET ?2
        ",
    )?;
    let rows = stmt.query_map(params![page.limit, page.skip], map_mission_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Missions assigned to `robot_id`, paged the same way as [`list`].
pub fn list_for_robot(
    conn: &Connection,
    robot_id: RobotId,
    page: Page,
) -> Result<Vec<Mission>, StoreError> {
    let mut stmt = conn.prepare(
        "
        SELECT id, name, description, robot_id
        FROM missions
        WHERE robot_id = ?1
        ORDER BY id ASC
        LIMIT ?2 OFFSET ?3
        ",
    )?;
    let rows = stmt.query_map(params![robot_id.0, page.limit, page.skip], map_mission_row)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn get_by_id(conn: &Connection, id: MissionId) -> Result<Option<Mission>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, description, robot_id FROM missions WHERE id = ?1",
    )?;
    let mut rows = stmt.query(params![id.0])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(map_mission_row(row)?));
    }
    Ok(None)
}

/// Inserts as given. `robot_id` is not checked against `robots`.
pub fn create(conn: &Connection, payload: MissionCreate) -> Result<Mission, StoreError> {
    conn.execute(
        "INSERT INTO missions (name, description, robot_id) VALUES (?1, ?2, ?3)",
        params![payload.name, payload.description, payload.robot_id.0],
    )?;
    Ok(payload.into_mission(MissionId(conn.last_insert_rowid())))
}

pub fn update(
    conn: &Connection,
    id: MissionId,
    payload: MissionUpdate,
) -> Result<Option<Mission>, StoreError> {
    let changed = conn.execute(
        "UPDATE missions SET name = ?2, description = ?3, robot_id = ?4 WHERE id = ?1",
        params![id.0, payload.name, payload.description, payload.robot_id.0],
    )?;
    if changed == 0 {
        return Ok(None);
    }
    get_by_id(conn, id)
}

fn map_mission_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Mission> {
    Ok(Mission {
        id: MissionId(row.get(0)?),
        name: row.get(1)?,
        description: row.get(2)?,
        robot_id: RobotId(row.get(3)?),
    })
}
