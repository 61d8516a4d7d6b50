use tracing::debug;

use super::mapper::map_type;
use super::types::{ColumnDescriptor, FieldDef, RecordDefinition};
use crate::error::{Error, Result};
use crate::record::SqlValue;

/// What to do when a table reports the same column name twice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateColumnPolicy {
    /// Fail with `Error::DuplicateColumn`
    #[default]
    Reject,
    /// Later column replaces the earlier field, keeping its position
    LastWriteWins,
}

/// Build a record definition from a table's column metadata
pub fn build_record_definition(
    table_name: &str,
    columns: &[ColumnDescriptor],
    policy: DuplicateColumnPolicy,
) -> Result<RecordDefinition> {
    debug!(table = table_name, columns = columns.len(), "Generating record definition");

    let mut fields: Vec<FieldDef> = Vec::with_capacity(columns.len());

    for col in columns {
        let Some(name) = col.name.as_deref() else {
            continue;
        };
        debug!(table = table_name, column = name, declared_type = %col.declared_type, "Examining column");

        let field = FieldDef {
            name: name.to_string(),
            field_type: map_type(&col.declared_type),
            required: col.not_null || col.primary_key,
            default: SqlValue::Null,
        };

        match fields.iter().position(|f| f.name == name) {
            Some(existing) => match policy {
                DuplicateColumnPolicy::Reject => {
                    return Err(Error::DuplicateColumn {
                        table: table_name.to_string(),
                        column: name.to_string(),
                    });
                }
                DuplicateColumnPolicy::LastWriteWins => fields[existing] = field,
            },
            None => fields.push(field),
        }
    }

    Ok(RecordDefinition::new(table_name, fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;

    fn country_columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new(1, "country_id", "CHAR(2)"),
            ColumnDescriptor::new(2, "country_name", "TEXT"),
            ColumnDescriptor::new(3, "region_id", "INTEGER"),
        ]
    }

    #[test]
    fn test_builds_fields_in_order() {
        let def = build_record_definition("countries", &country_columns(), DuplicateColumnPolicy::Reject)
            .unwrap();

        assert_eq!(def.type_name, "Countries");
        let names: Vec<&str> = def.field_names().collect();
        assert_eq!(names, ["country_id", "country_name", "region_id"]);
        assert_eq!(def.fields[0].field_type, FieldType::FixedText(2));
        assert_eq!(def.fields[1].field_type, FieldType::Text);
        assert_eq!(def.fields[2].field_type, FieldType::Integer);
        assert!(def.fields.iter().all(|f| f.default == SqlValue::Null));
    }

    #[test]
    fn test_skips_unnamed_columns() {
        let mut columns = country_columns();
        columns.insert(
            1,
            ColumnDescriptor {
                name: None,
                ..ColumnDescriptor::new(9, "", "TEXT")
            },
        );
        let def = build_record_definition("countries", &columns, DuplicateColumnPolicy::Reject).unwrap();
        assert_eq!(def.fields.len(), 3);
    }

    #[test]
    fn test_required_from_constraints() {
        let columns = vec![
            ColumnDescriptor::new(0, "region_id", "INTEGER").primary_key(),
            ColumnDescriptor::new(1, "region_name", "TEXT").not_null(),
            ColumnDescriptor::new(2, "notes", "TEXT"),
        ];
        let def = build_record_definition("regions", &columns, DuplicateColumnPolicy::Reject).unwrap();
        let required: Vec<bool> = def.fields.iter().map(|f| f.required).collect();
        assert_eq!(required, [true, true, false]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut columns = country_columns();
        columns.push(ColumnDescriptor::new(4, "country_name", "BLOB"));

        let err = build_record_definition("countries", &columns, DuplicateColumnPolicy::Reject).unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateColumn { ref table, ref column } if table == "countries" && column == "country_name"
        ));
    }

    #[test]
    fn test_duplicate_last_write_wins() {
        let mut columns = country_columns();
        columns.push(ColumnDescriptor::new(4, "country_name", "BLOB"));

        let def = build_record_definition("countries", &columns, DuplicateColumnPolicy::LastWriteWins)
            .unwrap();
        assert_eq!(def.fields.len(), 3);
        assert_eq!(def.fields[1].name, "country_name");
        assert_eq!(def.fields[1].field_type, FieldType::Blob);
    }
}
