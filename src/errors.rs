//! Error types for the FilterHaus crate
//!
//! This module contains all error types that can be returned by FilterHaus operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterHausError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Filter error: {0}")]
    Filter(#[from] inspector::FilterError),
}
