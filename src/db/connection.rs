use rusqlite::Connection;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::errors::DbError;

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

// Thread-local connection slot, keyed by the path it was opened on.
thread_local! {
    static DB_CONN: RefCell<Option<(PathBuf, Connection)>> = const { RefCell::new(None) };
}

#[derive(Clone, Debug)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Provides a mutable connection to the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, DbError>
    where
        F: FnOnce(&mut Connection) -> Result<T, DbError>,
    {
        DB_CONN
            .try_with(|cell| {
                let mut slot = cell.borrow_mut();

                let stale = !matches!(slot.as_ref(), Some((p, _)) if *p == self.path);
                if stale {
                    let conn = Connection::open(&self.path)
                        .map_err(|e| DbError::Open(format!("{}: {e}", self.path.display())))?;
                    *slot = Some((self.path.clone(), conn));
                }

                match slot.as_mut() {
                    Some((_, conn)) => f(conn),
                    None => Err(DbError::Internal),
                }
            })
            .map_err(|_| DbError::Internal)?
    }
}

/// Opens the database and applies the bundled schema.
pub fn init_db(db: &Database) -> Result<(), DbError> {
    db.with_conn(|conn| {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    })?;

    tracing::debug!(path = %db.path.display(), "database schema applied");
    Ok(())
}
