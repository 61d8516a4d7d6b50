use serde_json::{json, Map, Value};

use crate::record::SqlValue;

/// Semantic type of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Text,
    /// Text constrained to exactly this many characters
    FixedText(usize),
    Real,
    Blob,
    /// Nullable fallback for declared types no rule recognizes
    Untyped,
}

impl FieldType {
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Integer => "integer",
            FieldType::Text | FieldType::FixedText(_) => "string",
            FieldType::Real => "real",
            FieldType::Blob => "bytes",
            FieldType::Untyped => "any",
        }
    }

    fn json_schema(&self) -> Map<String, Value> {
        let mut schema = Map::new();
        match self {
            FieldType::Integer => {
                schema.insert("type".into(), json!("integer"));
            }
            FieldType::Text => {
                schema.insert("type".into(), json!("string"));
            }
            FieldType::FixedText(len) => {
                schema.insert("type".into(), json!("string"));
                schema.insert("minLength".into(), json!(len));
                schema.insert("maxLength".into(), json!(len));
            }
            FieldType::Real => {
                schema.insert("type".into(), json!("number"));
            }
            FieldType::Blob => {
                schema.insert("type".into(), json!("string"));
                schema.insert("format".into(), json!("binary"));
            }
            FieldType::Untyped => {
                schema.insert(
                    "anyOf".into(),
                    json!([{ "type": "string" }, { "type": "null" }]),
                );
            }
        }
        schema
    }
}

/// Column metadata as reported by the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    pub position: i64,
    pub name: Option<String>,
    pub declared_type: String,
    pub not_null: bool,
    pub primary_key: bool,
}

impl ColumnDescriptor {
    /// Nullable, non-key column
    pub fn new(position: i64, name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            position,
            name: Some(name.into()),
            declared_type: declared_type.into(),
            not_null: false,
            primary_key: false,
        }
    }

    pub fn not_null(self) -> Self {
        Self {
            not_null: true,
            ..self
        }
    }

    pub fn primary_key(self) -> Self {
        Self {
            primary_key: true,
            ..self
        }
    }
}

/// Field definition
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub field_type: FieldType,
    pub required: bool,
    /// Value used when the row has no entry for this field
    pub default: SqlValue,
}

impl FieldDef {
    /// Create an optional field defaulting to NULL
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            default: SqlValue::Null,
        }
    }

    /// Create a required field
    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            required: true,
            ..Self::new(name, field_type)
        }
    }
}

/// Blueprint of one table's record
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDefinition {
    pub table_name: String,
    /// Capitalized identifier of the record type, e.g. `Countries`
    pub type_name: String,
    pub fields: Vec<FieldDef>,
}

impl RecordDefinition {
    pub fn new(table_name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        let table_name = table_name.into();
        Self {
            type_name: capitalize(&table_name),
            table_name,
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Render the definition as a JSON schema object
    pub fn json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in &self.fields {
            let mut prop = Map::new();
            prop.insert("title".into(), json!(field_title(&field.name)));
            prop.extend(field.field_type.json_schema());
            if !field.required {
                prop.insert("default".into(), Value::Null);
            } else {
                required.push(json!(field.name));
            }
            properties.insert(field.name.clone(), Value::Object(prop));
        }

        json!({
            "title": self.type_name,
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// Upper-case the first character and lower-case the rest
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// `country_id` -> `Country Id`
fn field_title(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("countries"), "Countries");
        assert_eq!(capitalize("job_HISTORY"), "Job_history");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_field_title() {
        assert_eq!(field_title("country_id"), "Country Id");
        assert_eq!(field_title("city"), "City");
    }

    #[test]
    fn test_json_schema() {
        let def = RecordDefinition::new(
            "countries",
            vec![
                FieldDef::required("country_id", FieldType::FixedText(2)),
                FieldDef::new("country_name", FieldType::Text),
            ],
        );
        let schema = def.json_schema();
        assert_eq!(schema["title"], "Countries");
        assert_eq!(schema["properties"]["country_id"]["minLength"], 2);
        assert_eq!(schema["properties"]["country_id"]["maxLength"], 2);
        assert_eq!(schema["properties"]["country_name"]["default"], Value::Null);
        assert_eq!(schema["required"], json!(["country_id"]));
    }
}
