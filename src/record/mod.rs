pub mod dynamic;
pub mod hydrate;
pub mod validate;
pub mod value;

pub use dynamic::*;
pub use hydrate::*;
pub use value::*;
