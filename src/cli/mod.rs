pub mod commands;
pub mod create;
pub mod delete;
pub mod print;
pub mod session;
pub mod version;

pub use commands::*;
