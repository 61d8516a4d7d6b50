use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::schema::DuplicateColumnPolicy;

#[derive(Parser, Debug)]
#[command(name = "sqlite-table-models")]
#[command(version, about = "Build validated records from a SQLite database's schema")]
pub struct Cli {
    /// Settings file (default: ./settings.json, then the user config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database path; skips the search for SQLITE_DATABASE_FILE_NAME
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Print sample countries (with region), regions and locations
    Demo,

    /// Print every table's record definition as JSON schema
    Models {
        /// How to treat repeated column names
        #[arg(long, value_enum, default_value_t = DuplicatePolicyArg::Reject)]
        duplicates: DuplicatePolicyArg,
    },

    /// List all table names
    ListTables,

    /// Hydrate and print rows from any table
    Show {
        table: String,

        /// Maximum rows to print
        #[arg(short, long, default_value_t = 5)]
        limit: usize,

        /// How to treat repeated column names
        #[arg(long, value_enum, default_value_t = DuplicatePolicyArg::Reject)]
        duplicates: DuplicatePolicyArg,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicyArg {
    Reject,
    LastWriteWins,
}

impl From<DuplicatePolicyArg> for DuplicateColumnPolicy {
    fn from(arg: DuplicatePolicyArg) -> Self {
        match arg {
            DuplicatePolicyArg::Reject => DuplicateColumnPolicy::Reject,
            DuplicatePolicyArg::LastWriteWins => DuplicateColumnPolicy::LastWriteWins,
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// The subcommand to run; no subcommand means the demonstration
    pub fn resolved_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Demo)
    }
}
