//! SQLite-backed user store.

use crate::error::{StorageError, StorageResult};
use crate::UserStore;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info};
use userbase_query::{KeysetQuery, PageSource};
use userbase_types::{User, UserId};

/// Ordered schema migrations. Entry `n` moves `user_version` from `n` to
/// `n + 1`.
const MIGRATIONS: &[&str] = &[
    // 1: users keyed case-insensitively by email
    "CREATE TABLE users (
        id TEXT PRIMARY KEY NOT NULL,
        email TEXT NOT NULL UNIQUE COLLATE NOCASE
    );",
];

// The email column's NOCASE collation drives both `>` and ORDER BY.
const PAGE_SQL: &str = "
    SELECT id, email FROM users
    WHERE email LIKE ?1 ESCAPE '\\'
      AND (?2 IS NULL OR email > ?2)
    ORDER BY email
    LIMIT ?3";

/// Persistent user store backed by SQLite.
pub struct SqliteUserStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteUserStore {
    /// Opens (or creates) a store at the given path and migrates it.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        info!("Opened user database at {}", path.display());
        Self::init(conn)
    }

    /// Opens an empty in-memory store.
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        debug!("Opened in-memory user database");
        Self::init(conn)
    }

    fn init(conn: Connection) -> StorageResult<Self> {
        conn.busy_timeout(Duration::from_secs(5))?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.migrate()?;
        Ok(store)
    }

    /// Current schema version.
    pub fn schema_version(&self) -> StorageResult<u32> {
        let conn = self.lock()?;
        Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
    }

    fn migrate(&self) -> StorageResult<()> {
        let mut conn = self.lock()?;
        let current: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
        let target = MIGRATIONS.len();

        if current as usize > target {
            return Err(StorageError::Migration(format!(
                "database schema version {current} is newer than supported version {target}"
            )));
        }

        for (idx, sql) in MIGRATIONS.iter().enumerate().skip(current as usize) {
            let version = idx + 1;
            let tx = conn.transaction()?;
            tx.execute_batch(sql)
                .map_err(|e| StorageError::Migration(format!("step {version}: {e}")))?;
            tx.pragma_update(None, "user_version", version as i64)?;
            tx.commit()?;
            info!("Applied schema migration {}", version);
        }
        Ok(())
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }
}

fn user_from_parts(id: String, email: String) -> StorageResult<User> {
    let id = UserId::parse_v4(&id).map_err(|e| StorageError::InvalidData(e.to_string()))?;
    Ok(User::new(id, email))
}

impl PageSource for SqliteUserStore {
    type Error = StorageError;

    fn fetch_page(&self, query: &KeysetQuery<'_>) -> StorageResult<Vec<User>> {
        // SQLite refuses LIKE patterns past 50,000 bytes
        if query.predicate.is_unsatisfiable() {
            return Ok(Vec::new());
        }
        let conn = self.lock()?;
        let limit = i64::try_from(query.limit).unwrap_or(i64::MAX);
        let mut stmt = conn.prepare_cached(PAGE_SQL)?;
        let rows = stmt.query_map(
            params![query.predicate.like_pattern(), query.after, limit],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
        )?;

        let mut users = Vec::new();
        for row in rows {
            let (id, email) = row?;
            users.push(user_from_parts(id, email)?);
        }
        Ok(users)
    }
}

impl UserStore for SqliteUserStore {
    fn insert(&self, email: &str) -> StorageResult<User> {
        let conn = self.lock()?;
        let user = User::new(UserId::new(), email);
        match conn.execute(
            "INSERT INTO users (id, email) VALUES (?1, ?2)",
            params![user.id.to_string(), user.email],
        ) {
            Ok(_) => Ok(user),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(StorageError::DuplicateEmail(email.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn get(&self, id: &UserId) -> StorageResult<Option<User>> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                "SELECT id, email FROM users WHERE id = ?1",
                params![id.to_string()],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;
        row.map(|(id, email)| user_from_parts(id, email)).transpose()
    }

    fn delete(&self, id: &UserId) -> StorageResult<bool> {
        let conn = self.lock()?;
        let removed = conn.execute("DELETE FROM users WHERE id = ?1", params![id.to_string()])?;
        Ok(removed > 0)
    }
}
