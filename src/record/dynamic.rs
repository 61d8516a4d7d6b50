use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::trace;

use super::validate::validate_field;
use super::value::{RawRow, SqlValue};
use crate::error::ValidationError;
use crate::schema::RecordDefinition;

/// Validated row of a table with no hand-written record type.
///
/// Holds exactly the definition's fields, in definition order.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicRecord {
    type_name: String,
    values: Vec<(String, SqlValue)>,
}

impl DynamicRecord {
    pub fn from_raw(definition: &RecordDefinition, row: &RawRow) -> Result<Self, ValidationError> {
        let values = definition
            .fields
            .iter()
            .map(|field| {
                validate_field(&definition.type_name, field, row.get(&field.name))
                    .map(|value| (field.name.clone(), value))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for column in row.values.keys() {
            if definition.field(column).is_none() {
                trace!(record = %definition.type_name, column = %column, "Ignoring column without field");
            }
        }

        Ok(Self {
            type_name: definition.type_name.clone(),
            values,
        })
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn get(&self, field: &str) -> Option<&SqlValue> {
        self.values
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl Serialize for DynamicRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
