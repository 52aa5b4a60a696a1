pub mod context;
pub mod publisher;

pub use context::*;
pub use publisher::*;
