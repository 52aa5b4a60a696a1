pub mod query;
pub mod reader;

pub use query::*;
pub use reader::*;
