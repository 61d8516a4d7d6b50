use super::value::{RawRow, SqlValue};
use crate::error::{ValidationError, ValidationErrorKind};
use crate::schema::{FieldDef, FieldType};

/// Check a value against a field definition, returning the value to store
pub fn validate_field(
    record: &str,
    field: &FieldDef,
    value: Option<&SqlValue>,
) -> Result<SqlValue, ValidationError> {
    let fail = |kind| ValidationError::new(record, field.name.as_str(), kind);

    let value = match value {
        Some(v) => v,
        None if field.required => return Err(fail(ValidationErrorKind::Missing)),
        None => &field.default,
    };

    if value.is_null() {
        return if field.required && field.field_type != FieldType::Untyped {
            Err(fail(ValidationErrorKind::Null))
        } else {
            Ok(SqlValue::Null)
        };
    }

    match (field.field_type, value) {
        (FieldType::Integer, SqlValue::Integer(_))
        | (FieldType::Real, SqlValue::Real(_))
        | (FieldType::Text, SqlValue::Text(_))
        | (FieldType::Blob, SqlValue::Blob(_))
        | (FieldType::Untyped, _) => Ok(value.clone()),
        (FieldType::Real, SqlValue::Integer(i)) => Ok(SqlValue::Real(*i as f64)),
        (FieldType::FixedText(len), SqlValue::Text(s)) => {
            check_length(s, len).map_err(fail)?;
            Ok(value.clone())
        }
        (expected, found) => Err(fail(ValidationErrorKind::WrongType {
            expected: expected.name(),
            found: found.type_name(),
        })),
    }
}

pub(crate) fn check_length(s: &str, expected: usize) -> Result<(), ValidationErrorKind> {
    let actual = s.chars().count();
    if actual == expected {
        Ok(())
    } else {
        Err(ValidationErrorKind::Length { expected, actual })
    }
}

/// Typed field extraction for hand-written record types
pub struct FieldReader<'a> {
    record: &'static str,
    row: &'a RawRow,
}

impl<'a> FieldReader<'a> {
    pub fn new(record: &'static str, row: &'a RawRow) -> Self {
        Self { record, row }
    }

    fn error(&self, field: &str, kind: ValidationErrorKind) -> ValidationError {
        ValidationError::new(self.record, field, kind)
    }

    fn wrong_type(&self, field: &str, expected: &'static str, found: &SqlValue) -> ValidationError {
        self.error(
            field,
            ValidationErrorKind::WrongType {
                expected,
                found: found.type_name(),
            },
        )
    }

    fn present(&self, field: &str) -> Result<&'a SqlValue, ValidationError> {
        match self.row.get(field) {
            None => Err(self.error(field, ValidationErrorKind::Missing)),
            Some(SqlValue::Null) => Err(self.error(field, ValidationErrorKind::Null)),
            Some(v) => Ok(v),
        }
    }

    pub fn integer(&self, field: &str) -> Result<i64, ValidationError> {
        match self.present(field)? {
            SqlValue::Integer(i) => Ok(*i),
            other => Err(self.wrong_type(field, "integer", other)),
        }
    }

    pub fn text(&self, field: &str) -> Result<String, ValidationError> {
        match self.present(field)? {
            SqlValue::Text(s) => Ok(s.clone()),
            other => Err(self.wrong_type(field, "string", other)),
        }
    }

    /// Text that may be NULL or absent
    pub fn optional_text(&self, field: &str) -> Result<Option<String>, ValidationError> {
        match self.row.get(field) {
            None | Some(SqlValue::Null) => Ok(None),
            Some(SqlValue::Text(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.wrong_type(field, "string", other)),
        }
    }
}
