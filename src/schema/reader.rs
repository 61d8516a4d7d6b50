use tracing::{debug, instrument};

use super::builder::{build_record_definition, DuplicateColumnPolicy};
use super::types::{ColumnDescriptor, RecordDefinition};
use crate::db::Database;
use crate::error::{Error, Result};

const LIST_TABLES_SQL: &str = "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY rowid";

const TABLE_INFO_SQL: &str =
    "SELECT cid, name, type, \"notnull\", pk FROM pragma_table_info(?1) ORDER BY cid";

/// Reads table names and column metadata from the SQLite catalog
pub struct SchemaReader<'a> {
    db: &'a Database,
}

impl<'a> SchemaReader<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// All table names in creation order
    #[instrument(skip(self), fields(db = ?self.db.path()))]
    pub fn list_tables(&self) -> Result<Vec<String>> {
        let conn = self.db.connect()?;
        let mut stmt = conn
            .prepare(LIST_TABLES_SQL)
            .map_err(|e| self.schema_error(e))?;
        let tables = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| self.schema_error(e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| self.schema_error(e))?;

        debug!(count = tables.len(), "Listed tables");
        Ok(tables)
    }

    /// Column metadata for one table, ordered by position
    #[instrument(skip(self))]
    pub fn table_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        debug!(table, "Getting table schema");

        let conn = self.db.connect()?;
        let mut stmt = conn
            .prepare(TABLE_INFO_SQL)
            .map_err(|e| self.schema_error(e))?;
        let columns = stmt
            .query_map([table], |row| {
                Ok(ColumnDescriptor {
                    position: row.get(0)?,
                    name: row.get(1)?,
                    declared_type: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    not_null: row.get::<_, i64>(3)? != 0,
                    primary_key: row.get::<_, i64>(4)? != 0,
                })
            })
            .map_err(|e| self.schema_error(e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| self.schema_error(e))?;

        Ok(columns)
    }

    /// Build a record definition for every table in the database
    pub fn generate_all_models(&self, policy: DuplicateColumnPolicy) -> Result<Vec<RecordDefinition>> {
        let tables = self.list_tables()?;
        let mut definitions = Vec::with_capacity(tables.len());

        for table in &tables {
            debug!(table = %table, "Generating models for table");
            let columns = self.table_columns(table)?;
            definitions.push(build_record_definition(table, &columns, policy)?);
        }

        Ok(definitions)
    }

    fn schema_error(&self, source: rusqlite::Error) -> Error {
        Error::SchemaRead {
            path: self.db.path().to_path_buf(),
            source,
        }
    }
}
