//! Primary-key lookups for record types, and the country -> region join

use std::collections::HashMap;
use tracing::{debug, instrument, warn};

use crate::db::{select_by_key_sql, select_limit_sql, Database};
use crate::error::Result;
use crate::models::{Country, ExpandedCountry, Record, Region};
use crate::record::{RawRow, SqlValue};

/// Row access by record type
pub trait Repository {
    /// Raw row whose primary key equals `id`
    fn find_raw_by_id<T: Record>(&self, id: &T::Id) -> Result<Option<RawRow>>;

    /// Up to `limit` raw rows of the record's table
    fn first_raw<T: Record>(&self, limit: usize) -> Result<Vec<RawRow>>;

    fn find_by_id<T: Record>(&self, id: &T::Id) -> Result<Option<T>> {
        match self.find_raw_by_id::<T>(id)? {
            Some(row) => Ok(Some(T::from_raw(&row)?)),
            None => Ok(None),
        }
    }

    fn first<T: Record>(&self, limit: usize) -> Result<Vec<T>> {
        self.first_raw::<T>(limit)?
            .iter()
            .map(|row| T::from_raw(row).map_err(Into::into))
            .collect()
    }
}

/// Repository over a SQLite file
pub struct SqliteRepository<'a> {
    db: &'a Database,
}

impl<'a> SqliteRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }
}

impl Repository for SqliteRepository<'_> {
    #[instrument(skip(self), fields(table = T::TABLE))]
    fn find_raw_by_id<T: Record>(&self, id: &T::Id) -> Result<Option<RawRow>> {
        let sql = select_by_key_sql(T::TABLE, T::PRIMARY_KEY);
        let key: SqlValue = id.clone().into();
        self.db.fetch_optional(&sql, [key])
    }

    #[instrument(skip(self), fields(table = T::TABLE))]
    fn first_raw<T: Record>(&self, limit: usize) -> Result<Vec<RawRow>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.db.fetch_rows(&select_limit_sql(T::TABLE), [limit])
    }
}

/// Repository over rows held in memory, keyed by table name
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    tables: HashMap<String, Vec<RawRow>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, table: &str, row: RawRow) {
        self.tables.entry(table.to_string()).or_default().push(row);
    }

    pub fn with(mut self, table: &str, row: RawRow) -> Self {
        self.insert(table, row);
        self
    }
}

impl Repository for MemoryRepository {
    fn find_raw_by_id<T: Record>(&self, id: &T::Id) -> Result<Option<RawRow>> {
        let key: SqlValue = id.clone().into();
        Ok(self.tables.get(T::TABLE).and_then(|rows| {
            rows.iter()
                .find(|row| row.get(T::PRIMARY_KEY) == Some(&key))
                .cloned()
        }))
    }

    fn first_raw<T: Record>(&self, limit: usize) -> Result<Vec<RawRow>> {
        Ok(self
            .tables
            .get(T::TABLE)
            .map(|rows| rows.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

/// Hydrate a country row and, when `expand` is set, attach its region
pub fn expand_country(
    row: &RawRow,
    expand: bool,
    repo: &impl Repository,
) -> Result<ExpandedCountry> {
    let country = Country::from_raw(row)?;

    let region = if expand {
        let region = repo.find_by_id::<Region>(&country.region_id)?;
        match &region {
            Some(r) => debug!(country = %country.country_id, region = %r.region_name, "Resolved region"),
            None => warn!(country = %country.country_id, region_id = country.region_id, "Region not found"),
        }
        region
    } else {
        None
    };

    Ok(ExpandedCountry { country, region })
}
