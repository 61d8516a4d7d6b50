use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use super::dynamic::DynamicRecord;
use super::value::RawRow;
use crate::error::{Error, Result};
use crate::models::{Country, Location, Record, Region};
use crate::schema::RecordDefinition;

/// A validated row of any table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecordInstance {
    Country(Country),
    Region(Region),
    Location(Location),
    Dynamic(DynamicRecord),
}

impl RecordInstance {
    pub fn type_name(&self) -> &str {
        match self {
            RecordInstance::Country(_) => "Countries",
            RecordInstance::Region(_) => "Regions",
            RecordInstance::Location(_) => "Locations",
            RecordInstance::Dynamic(record) => record.type_name(),
        }
    }
}

/// Turns raw rows into validated records.
///
/// Tables with a hand-written record type use it; any other table is
/// validated against the definition read from its schema.
#[derive(Debug, Clone, Default)]
pub struct Hydrator {
    definitions: HashMap<String, RecordDefinition>,
}

impl Hydrator {
    pub fn new(definitions: impl IntoIterator<Item = RecordDefinition>) -> Self {
        Self {
            definitions: definitions
                .into_iter()
                .map(|def| (def.table_name.clone(), def))
                .collect(),
        }
    }

    pub fn definition(&self, table: &str) -> Option<&RecordDefinition> {
        self.definitions.get(table)
    }

    pub fn hydrate(&self, table: &str, row: &RawRow) -> Result<RecordInstance> {
        debug!(table, "Hydrating row");

        match table {
            t if t == Country::TABLE => self.hydrate_static(row, RecordInstance::Country),
            t if t == Region::TABLE => self.hydrate_static(row, RecordInstance::Region),
            t if t == Location::TABLE => self.hydrate_static(row, RecordInstance::Location),
            _ => {
                let definition = self
                    .definitions
                    .get(table)
                    .ok_or_else(|| Error::UnknownTable(table.to_string()))?;
                Ok(RecordInstance::Dynamic(DynamicRecord::from_raw(definition, row)?))
            }
        }
    }

    /// Use the hand-written type only while the schema's fields match it;
    /// otherwise validate against the schema's definition.
    fn hydrate_static<T: Record>(
        &self,
        row: &RawRow,
        wrap: fn(T) -> RecordInstance,
    ) -> Result<RecordInstance> {
        if let Some(schema) = self.definitions.get(T::TABLE) {
            let expected = T::definition();
            if !schema.field_names().eq(expected.field_names()) {
                debug!(table = T::TABLE, "Schema differs from record type, hydrating dynamically");
                return Ok(RecordInstance::Dynamic(DynamicRecord::from_raw(schema, row)?));
            }
        }

        Ok(wrap(T::from_raw(row)?))
    }
}
