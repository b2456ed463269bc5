pub mod cli;
pub mod commands;

pub use cli::{CatalogArgs, Cli, Commands};
