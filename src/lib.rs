pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod models;
pub mod output;
pub mod properties;
pub mod publish;
pub mod version;
