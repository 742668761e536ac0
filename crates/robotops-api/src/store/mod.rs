//! Data access for robots and missions.
//!
//! Every function takes a borrowed connection (the request's session) and
//! runs plain SQL against it. Lookups that match no row return `None`;
//! anything the database itself rejects comes back as a [`StoreError`].

pub mod missions;
pub mod robots;

use rusqlite::Connection;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("failed to prepare database location: {0}")]
    Io(#[from] std::io::Error),
}

/// Round-trips a trivial statement so health checks exercise a real session.
pub fn ping(conn: &Connection) -> Result<(), StoreError> {
    conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
    Ok(())
}
