use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::errors::{FeedError, FeedResult};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS followed_publications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    publication_slug TEXT NOT NULL,
    followed_at TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE (user_id, publication_slug)
);

CREATE INDEX IF NOT EXISTS idx_followed_publications_user ON followed_publications(user_id);
"#;

#[derive(Clone)]
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> FeedResult<Self> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    pub fn in_memory() -> FeedResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> FeedResult<Self> {
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn connection(&self) -> Result<std::sync::MutexGuard<'_, Connection>, FeedError> {
        self.conn
            .lock()
            .map_err(|_| FeedError::Database(rusqlite::Error::InvalidQuery))
    }
}
