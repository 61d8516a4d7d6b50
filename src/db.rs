use rusqlite::{Connection, OpenFlags, Params};
use std::path::{Path, PathBuf};
use tracing::trace;

use crate::error::{Error, Result};
use crate::record::RawRow;

/// Handle to a SQLite file. Every query opens its own read-only connection
/// and drops it when done.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a read-only connection; a missing file is a schema read error
    pub fn connect(&self) -> Result<Connection> {
        Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| Error::SchemaRead {
            path: self.path.clone(),
            source,
        })
    }

    /// Run a query and collect every row keyed by column name
    pub fn fetch_rows<P: Params>(&self, sql: &str, params: P) -> Result<Vec<RawRow>> {
        trace!(sql, "Executing query");
        let conn = self.connect()?;
        let mut stmt = conn.prepare(sql).map_err(|e| Error::query(sql, e))?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();

        let rows = stmt
            .query_map(params, |row| RawRow::from_row(&columns, row))
            .map_err(|e| Error::query(sql, e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| Error::query(sql, e))?;

        Ok(rows)
    }

    /// Run a query expected to return at most one row
    pub fn fetch_optional<P: Params>(&self, sql: &str, params: P) -> Result<Option<RawRow>> {
        Ok(self.fetch_rows(sql, params)?.into_iter().next())
    }
}

/// Double-quote an identifier for interpolation into SQL text
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// `SELECT * FROM "<table>" WHERE "<key>" = ?1`
pub fn select_by_key_sql(table: &str, key: &str) -> String {
    format!(
        "SELECT * FROM {} WHERE {} = ?1",
        quote_identifier(table),
        quote_identifier(key)
    )
}

/// `SELECT * FROM "<table>" LIMIT ?1`
pub fn select_limit_sql(table: &str) -> String {
    format!("SELECT * FROM {} LIMIT ?1", quote_identifier(table))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("locations"), "\"locations\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_select_by_key_sql_names_table() {
        assert_eq!(
            select_by_key_sql("locations", "location_id"),
            "SELECT * FROM \"locations\" WHERE \"location_id\" = ?1"
        );
    }

    #[test]
    fn test_connect_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("missing.db"));
        assert!(matches!(db.connect(), Err(Error::SchemaRead { .. })));
    }
}
