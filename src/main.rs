use anyhow::Result;
use sqlite_table_models::{
    cli::{Cli, Commands},
    config::Settings,
    context::AppContext,
    logging,
    report::{print_demo, print_models, print_table, print_tables},
};
use std::io;
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let settings = Settings::load(cli.config.as_deref())?;
    let _guard = logging::init(&settings)?;
    debug!(version = env!("CARGO_PKG_VERSION"), "Starting");

    let ctx = AppContext::new(settings, cli.database.clone())?;
    let mut out = io::stdout().lock();

    match cli.resolved_command() {
        Commands::Demo => print_demo(&ctx, &mut out)?,

        Commands::Models { duplicates } => print_models(&ctx, duplicates.into(), &mut out)?,

        Commands::ListTables => print_tables(&ctx, &mut out)?,

        Commands::Show {
            table,
            limit,
            duplicates,
        } => print_table(&ctx, &table, limit, duplicates.into(), &mut out)?,
    }

    Ok(())
}
