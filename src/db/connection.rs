use rusqlite::Connection;
use std::cell::RefCell;

use crate::errors::AppError;

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

// Thread-local connection slot.
thread_local! {
    static DB_CONN: RefCell<Option<Connection>> = RefCell::new(None);
}

#[derive(Clone)]
pub struct Database {
    path: String,
}

impl Database {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Provides a mutable connection to the closure, opening it lazily.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Connection) -> Result<T, AppError>,
    {
        let inner_result = DB_CONN
            .try_with(|cell| {
                let mut slot = cell.borrow_mut();
                if slot.is_none() {
                    let conn = Connection::open(&self.path)
                        .map_err(|e| AppError::Db(format!("Open DB failed: {e}")))?;
                    *slot = Some(conn);
                }
                match slot.as_mut() {
                    Some(conn) => f(conn),
                    None => Err(AppError::Db("connection slot empty".to_string())),
                }
            })
            .map_err(|e| AppError::Db(format!("Thread-local access failed: {e}")))?;
        inner_result
    }
}

/// Apply the embedded schema; idempotent.
pub fn init_offers_db(db: &Database) -> Result<(), AppError> {
    db.with_conn(|conn| {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| AppError::Db(format!("Failed to apply schema: {e}")))?;
        Ok(())
    })
}
