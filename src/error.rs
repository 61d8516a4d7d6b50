use std::fmt;
use std::path::PathBuf;

/// Errors raised while reading schemas, running queries, or hydrating rows
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database file missing, unreadable, or its catalog could not be queried
    #[error("failed to read schema from {path:?}: {source}")]
    SchemaRead {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A row failed field validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A statement failed to prepare or execute
    #[error("query failed: {sql}: {source}")]
    Query {
        sql: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("duplicate column `{column}` in table `{table}`")]
    DuplicateColumn { table: String, column: String },

    #[error("no record definition for table `{0}`")]
    UnknownTable(String),
}

impl Error {
    pub(crate) fn query(sql: impl Into<String>, source: rusqlite::Error) -> Self {
        Error::Query {
            sql: sql.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A field of a record failed its constraints
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{record}.{field}: {kind}")]
pub struct ValidationError {
    pub record: String,
    pub field: String,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn new(record: impl Into<String>, field: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            record: record.into(),
            field: field.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationErrorKind {
    /// Required field absent from the row
    Missing,
    /// Required field present but NULL
    Null,
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
    /// Fixed-length string of the wrong character count
    Length { expected: usize, actual: usize },
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationErrorKind::Missing => write!(f, "field required"),
            ValidationErrorKind::Null => write!(f, "value must not be null"),
            ValidationErrorKind::WrongType { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
            ValidationErrorKind::Length { expected, actual } => write!(
                f,
                "string should have exactly {} characters, got {}",
                expected, actual
            ),
        }
    }
}
