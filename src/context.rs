use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

use crate::config::Settings;
use crate::db::Database;
use crate::repository::SqliteRepository;
use crate::schema::SchemaReader;

/// Settings and database handle shared by one run
#[derive(Debug, Clone)]
pub struct AppContext {
    pub settings: Settings,
    pub database: Database,
}

impl AppContext {
    /// Resolve the database from an explicit path or by searching for the
    /// configured file name.
    pub fn new(settings: Settings, database_path: Option<PathBuf>) -> Result<Self> {
        let path = match database_path {
            Some(path) => path,
            None => {
                let name = settings.database_file_name()?;
                debug!(file = %name, "Database file");
                settings.locate_database()?
            }
        };
        debug!(path = ?path, "Database path");

        Ok(Self {
            settings,
            database: Database::new(path),
        })
    }

    pub fn schema_reader(&self) -> SchemaReader<'_> {
        SchemaReader::new(&self.database)
    }

    pub fn repository(&self) -> SqliteRepository<'_> {
        SqliteRepository::new(&self.database)
    }
}
