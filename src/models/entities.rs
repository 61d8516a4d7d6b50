//! Record types for the tables the demonstration knows by name

use serde::Serialize;

use super::fixed::CountryCode;
use super::Record;
use crate::error::{ValidationError, ValidationErrorKind};
use crate::record::validate::FieldReader;
use crate::record::RawRow;
use crate::schema::{FieldDef, FieldType, RecordDefinition};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub region_id: i64,
    pub region_name: String,
}

impl Record for Region {
    const TABLE: &'static str = "regions";
    const PRIMARY_KEY: &'static str = "region_id";
    type Id = i64;

    fn definition() -> RecordDefinition {
        RecordDefinition::new(
            Self::TABLE,
            vec![
                FieldDef::required("region_id", FieldType::Integer),
                FieldDef::required("region_name", FieldType::Text),
            ],
        )
    }

    fn from_raw(row: &RawRow) -> Result<Self, ValidationError> {
        let r = FieldReader::new("Regions", row);
        Ok(Self {
            region_id: r.integer("region_id")?,
            region_name: r.text("region_name")?,
        })
    }

    fn id(&self) -> i64 {
        self.region_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Country {
    pub country_id: CountryCode,
    pub country_name: String,
    pub region_id: i64,
}

impl Record for Country {
    const TABLE: &'static str = "countries";
    const PRIMARY_KEY: &'static str = "country_id";
    type Id = CountryCode;

    fn definition() -> RecordDefinition {
        RecordDefinition::new(
            Self::TABLE,
            vec![
                FieldDef::required("country_id", FieldType::FixedText(2)),
                FieldDef::required("country_name", FieldType::Text),
                FieldDef::required("region_id", FieldType::Integer),
            ],
        )
    }

    fn from_raw(row: &RawRow) -> Result<Self, ValidationError> {
        let r = FieldReader::new("Countries", row);
        Ok(Self {
            country_id: country_code(&r, "Countries", "country_id")?,
            country_name: r.text("country_name")?,
            region_id: r.integer("region_id")?,
        })
    }

    fn id(&self) -> CountryCode {
        self.country_id.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub location_id: i64,
    pub street_address: String,
    pub postal_code: Option<String>,
    pub city: String,
    pub state_province: Option<String>,
    /// References `countries.country_id`; never resolved here
    pub country_id: CountryCode,
}

impl Record for Location {
    const TABLE: &'static str = "locations";
    const PRIMARY_KEY: &'static str = "location_id";
    type Id = i64;

    fn definition() -> RecordDefinition {
        RecordDefinition::new(
            Self::TABLE,
            vec![
                FieldDef::required("location_id", FieldType::Integer),
                FieldDef::required("street_address", FieldType::Text),
                FieldDef::new("postal_code", FieldType::Text),
                FieldDef::required("city", FieldType::Text),
                FieldDef::new("state_province", FieldType::Text),
                FieldDef::required("country_id", FieldType::FixedText(2)),
            ],
        )
    }

    fn from_raw(row: &RawRow) -> Result<Self, ValidationError> {
        let r = FieldReader::new("Locations", row);
        Ok(Self {
            location_id: r.integer("location_id")?,
            street_address: r.text("street_address")?,
            postal_code: r.optional_text("postal_code")?,
            city: r.text("city")?,
            state_province: r.optional_text("state_province")?,
            country_id: country_code(&r, "Locations", "country_id")?,
        })
    }

    fn id(&self) -> i64 {
        self.location_id
    }
}

fn country_code(
    reader: &FieldReader<'_>,
    record: &str,
    field: &str,
) -> Result<CountryCode, ValidationError> {
    CountryCode::new(reader.text(field)?)
        .map_err(|kind: ValidationErrorKind| ValidationError::new(record, field, kind))
}

/// A country with its region attached by a secondary lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpandedCountry {
    #[serde(flatten)]
    pub country: Country,
    pub region: Option<Region>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SqlValue;

    fn us_row() -> RawRow {
        RawRow::new()
            .with("country_id", "US")
            .with("country_name", "United States")
            .with("region_id", 1)
    }

    #[test]
    fn test_country_from_raw() {
        let country = Country::from_raw(&us_row()).unwrap();
        assert_eq!(country.country_id.as_str(), "US");
        assert_eq!(country.country_name, "United States");
        assert_eq!(country.region_id, 1);
    }

    #[test]
    fn test_country_rejects_three_letter_code() {
        let row = us_row().with("country_id", "USA");
        let err = Country::from_raw(&row).unwrap_err();
        assert_eq!(err.record, "Countries");
        assert_eq!(err.field, "country_id");
        assert_eq!(
            err.kind,
            ValidationErrorKind::Length {
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_country_missing_field() {
        let mut row = us_row();
        row.values.remove("region_id");
        let err = Country::from_raw(&row).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::Missing);
    }

    #[test]
    fn test_location_nullable_fields() {
        let row = RawRow::new()
            .with("location_id", 2500)
            .with("street_address", "Magdalen Centre, The Oxford Science Park")
            .with("postal_code", "OX9 9ZB")
            .with("city", "Oxford")
            .with("state_province", SqlValue::Null)
            .with("country_id", "UK");
        let location = Location::from_raw(&row).unwrap();
        assert_eq!(location.state_province, None);
        assert_eq!(location.postal_code.as_deref(), Some("OX9 9ZB"));
        assert_eq!(location.id(), 2500);
    }

    #[test]
    fn test_expanded_country_serializes_flat() {
        let expanded = ExpandedCountry {
            country: Country::from_raw(&us_row()).unwrap(),
            region: Some(Region {
                region_id: 1,
                region_name: "Europe".into(),
            }),
        };
        let json = serde_json::to_value(&expanded).unwrap();
        assert_eq!(json["country_id"], "US");
        assert_eq!(json["region"]["region_name"], "Europe");
    }

    #[test]
    fn test_definitions_match_fields() {
        let def = Location::definition();
        assert_eq!(def.type_name, "Locations");
        assert_eq!(def.fields.len(), 6);
        assert_eq!(Country::definition().fields[0].field_type, FieldType::FixedText(2));
    }
}
