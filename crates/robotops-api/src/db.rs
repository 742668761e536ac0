use crate::store::StoreError;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::{fs, path::Path};

pub type Session = PooledConnection<SqliteConnectionManager>;

const SCHEMA: &str = "
    PRAGMA journal_mode = WAL;

    CREATE TABLE IF NOT EXISTS robots (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      name TEXT NOT NULL,
      model_name TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_robots_name ON robots(name);

    CREATE TABLE IF NOT EXISTS missions (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      name TEXT NOT NULL,
      description TEXT NOT NULL,
      robot_id INTEGER NOT NULL,
      FOREIGN KEY(robot_id) REFERENCES robots(id)
    );

    CREATE INDEX IF NOT EXISTS idx_missions_name ON missions(name);
    CREATE INDEX IF NOT EXISTS idx_missions_robot_id ON missions(robot_id);
";

/// Pool of sqlite sessions. Cloning shares the pool.
#[derive(Clone)]
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Opens (creating if needed) the database file and ensures the schema exists.
    pub fn open(db_path: &Path, pool_size: u32) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let manager = SqliteConnectionManager::file(db_path).with_init(configure_session);
        Self::from_manager(manager, pool_size)
    }

    /// Private shared-cache database that lives as long as the pool.
    pub fn in_memory() -> Result<Self, StoreError> {
        let manager = SqliteConnectionManager::memory().with_init(configure_session);
        Self::from_manager(manager, 2)
    }

    fn from_manager(manager: SqliteConnectionManager, pool_size: u32) -> Result<Self, StoreError> {
        let pool = Pool::builder().max_size(pool_size.max(1)).build(manager)?;
        pool.get()?.execute_batch(SCHEMA)?;
        Ok(Self { pool })
    }

    pub fn session(&self) -> Result<Session, StoreError> {
        Ok(self.pool.get()?)
    }

    /// Runs `work` on the blocking pool with a session checked out for its
    /// whole duration. The session goes back to the pool when `work` returns,
    /// whether it succeeded or not.
    pub async fn run<T, F>(&self, work: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let session = pool.get()?;
            work(&*session)
        })
        .await?
    }
}

/// `missions.robot_id` is declared as a foreign key but not enforced: a
/// mission may reference a robot id that has no row.
fn configure_session(conn: &mut Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = OFF;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_creates_parent_directories_and_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("robotops.db");

        let db = Database::open(&path, 2).unwrap();

        assert!(path.exists());
        let conn = db.session().unwrap();
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('robots', 'missions')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 2);
    }

    #[test]
    fn reopening_keeps_existing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("robotops.db");

        {
            let db = Database::open(&path, 1).unwrap();
            db.session()
                .unwrap()
                .execute("INSERT INTO robots (name, model_name) VALUES ('Keep', 'Me')", [])
                .unwrap();
        }

        let db = Database::open(&path, 1).unwrap();
        let count: i64 = db
            .session()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM robots", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn sessions_leave_foreign_keys_unenforced() {
        let db = Database::in_memory().unwrap();
        let enabled: i64 =
            db.session().unwrap().query_row("PRAGMA foreign_keys", [], |row| row.get(0)).unwrap();
        assert_eq!(enabled, 0);

        db.session()
            .unwrap()
            .execute(
                "INSERT INTO missions (name, description, robot_id) VALUES ('m', 'd', 404)",
                [],
            )
            .unwrap();
    }

    #[tokio::test]
    async fn run_hands_work_a_live_session() {
        let db = Database::in_memory().unwrap();
        let value = db
            .run(|conn| Ok(conn.query_row("SELECT 41 + 1", [], |row| row.get::<_, i64>(0))?))
            .await
            .unwrap();
        assert_eq!(value, 42);
    }
}
