use super::error::{DatabaseError, Result};
use super::schema::initialize_schema;
use rusqlite::Connection;
use std::path::Path;

/// Thin wrapper over a sqlite connection backing the audit/event
/// ledger (§6.4) and the backtest trade ledger (§3 `Trade`). This is
/// deliberately not used to store bar history — that stays in the
/// indicator engine's in-memory ring per spec's Non-goals.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn new_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DatabaseError::InitializationError(e.to_string()))?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn new_file(path: &Path) -> Result<Self> {
        let conn =
            Connection::open(path).map_err(|e| DatabaseError::InitializationError(e.to_string()))?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_in_memory_database() {
        let db = Database::new_memory().unwrap();
        assert!(db.connection().is_autocommit());
    }

    #[test]
    fn opens_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.sqlite");
        let db = Database::new_file(&path).unwrap();
        assert!(db.connection().is_autocommit());
        assert!(path.exists());
    }
}
