pub mod entities;
pub mod fixed;

pub use entities::*;
pub use fixed::*;

use serde::Serialize;
use std::fmt::Debug;

use crate::error::ValidationError;
use crate::record::{RawRow, SqlValue};
use crate::schema::RecordDefinition;

/// A statically-typed record backed by one table
pub trait Record: Sized + Serialize {
    const TABLE: &'static str;
    const PRIMARY_KEY: &'static str;
    type Id: Clone + Debug + Into<SqlValue>;

    /// Field blueprint matching the struct's fields
    fn definition() -> RecordDefinition;

    /// Validate a raw row into the record
    fn from_raw(row: &RawRow) -> Result<Self, ValidationError>;

    fn id(&self) -> Self::Id;
}
