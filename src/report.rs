//! Human-readable output for each command

use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use tracing::debug;

use crate::context::AppContext;
use crate::db::select_limit_sql;
use crate::error::Error;
use crate::models::{Country, Location, Record, Region};
use crate::record::Hydrator;
use crate::repository::{expand_country, Repository};
use crate::schema::{build_record_definition, DuplicateColumnPolicy};

/// Print every table name
pub fn print_tables(ctx: &AppContext, out: &mut impl Write) -> Result<()> {
    for name in ctx.schema_reader().list_tables()? {
        writeln!(out, "{}", name)?;
    }
    Ok(())
}

/// Print each table's record definition as a JSON schema
pub fn print_models(ctx: &AppContext, policy: DuplicateColumnPolicy, out: &mut impl Write) -> Result<()> {
    for definition in ctx.schema_reader().generate_all_models(policy)? {
        writeln!(out, "Record definition for table: {}", definition.table_name)?;
        writeln!(out, "{}", serde_json::to_string_pretty(&definition.json_schema())?)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Hydrate and print up to `limit` rows of any table
pub fn print_table(
    ctx: &AppContext,
    table: &str,
    limit: usize,
    policy: DuplicateColumnPolicy,
    out: &mut impl Write,
) -> Result<()> {
    let reader = ctx.schema_reader();
    if !reader.list_tables()?.iter().any(|t| t == table) {
        return Err(Error::UnknownTable(table.to_string()).into());
    }

    let columns = reader.table_columns(table)?;
    let hydrator = Hydrator::new([build_record_definition(table, &columns, policy)?]);

    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let rows = ctx.database.fetch_rows(&select_limit_sql(table), [limit])?;

    writeln!(out, "{}:", table)?;
    for row in &rows {
        print_json(out, &hydrator.hydrate(table, row)?)?;
    }
    Ok(())
}

/// A few countries with their region, then regions, locations, and one
/// location looked up by id.
pub fn print_demo(ctx: &AppContext, out: &mut impl Write) -> Result<()> {
    let repo = ctx.repository();
    let limit = ctx.settings.sample_rows;

    writeln!(out, "Countries:")?;
    for row in repo.first_raw::<Country>(limit)? {
        print_json(out, &expand_country(&row, true, &repo)?)?;
    }

    writeln!(out, "Regions:")?;
    for region in repo.first::<Region>(limit)? {
        print_json(out, &region)?;
    }

    writeln!(out, "Locations:")?;
    let locations = repo.first::<Location>(limit)?;
    for location in &locations {
        print_json(out, location)?;
    }

    if let Some(first) = locations.first() {
        let id = first.id();
        debug!(location_id = id, "Looking up location");
        writeln!(out, "Location {}:", id)?;
        match repo.find_by_id::<Location>(&id)? {
            Some(location) => print_json(out, &location)?,
            None => writeln!(out, "  not found")?,
        }
    }

    Ok(())
}

fn print_json(out: &mut impl Write, value: &impl Serialize) -> Result<()> {
    writeln!(out, "  {}", serde_json::to_string(value)?)?;
    Ok(())
}
