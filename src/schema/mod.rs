pub mod builder;
pub mod mapper;
pub mod reader;
pub mod types;

pub use builder::*;
pub use mapper::*;
pub use reader::*;
pub use types::*;
