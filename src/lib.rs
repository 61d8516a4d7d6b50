pub mod cli;
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod record;
pub mod report;
pub mod repository;
pub mod schema;

pub use cli::{Cli, Commands};
pub use context::AppContext;
pub use error::{Error, Result, ValidationError};
