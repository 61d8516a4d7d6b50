use super::types::FieldType;

/// Map a declared column type to a field type.
///
/// Rules are checked in order against the upper-cased declaration and the
/// first hit wins, so `POINT` is an integer and `CHARINT` is too.
pub fn map_type(declared_type: &str) -> FieldType {
    let upper = declared_type.to_uppercase();

    if upper.contains("INT") {
        FieldType::Integer
    } else if upper.contains("CHAR") || upper.contains("TEXT") {
        match length_argument(&upper) {
            Some(len) => FieldType::FixedText(len),
            None => FieldType::Text,
        }
    } else if ["REAL", "DOUBLE", "FLOAT", "NUMERIC"]
        .iter()
        .any(|t| upper.contains(t))
    {
        FieldType::Real
    } else if upper.contains("BLOB") {
        FieldType::Blob
    } else {
        FieldType::Untyped
    }
}

/// First parenthesized argument, e.g. `2` in `CHAR(2)`
fn length_argument(declared: &str) -> Option<usize> {
    let open = declared.find('(')?;
    let close = open + declared[open..].find(')')?;
    declared[open + 1..close]
        .split(',')
        .next()
        .and_then(|arg| arg.trim().parse().ok())
}
