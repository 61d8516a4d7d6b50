use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationErrorKind;
use crate::record::validate::check_length;
use crate::record::SqlValue;

/// A string of exactly `N` characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FixedString<const N: usize>(String);

impl<const N: usize> FixedString<N> {
    pub fn new(s: impl Into<String>) -> Result<Self, ValidationErrorKind> {
        let s = s.into();
        check_length(&s, N)?;
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<const N: usize> TryFrom<String> for FixedString<N> {
    type Error = ValidationErrorKind;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl<const N: usize> From<FixedString<N>> for String {
    fn from(s: FixedString<N>) -> Self {
        s.0
    }
}

impl<const N: usize> From<FixedString<N>> for SqlValue {
    fn from(s: FixedString<N>) -> Self {
        SqlValue::Text(s.0)
    }
}

impl<const N: usize> fmt::Display for FixedString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ISO 3166 two-letter country code
pub type CountryCode = FixedString<2>;
