//! satpoint support library
//!
//! Catalog and config loading plus report rendering for the `satpoint`
//! binary.

use thiserror::Error;

pub mod catalog;
pub mod config;
pub mod render;

pub use render::Report;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
