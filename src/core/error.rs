//! Error types for the pile's configuration boundary.
//!
//! Pile operations themselves never fail: empty batches, unresolved card
//! ids and suppressed moves are handled as no-ops or placeholders.

use thiserror::Error;

/// Errors raised while configuring or driving a pile.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PileError {
    /// Configuration values are out of range.
    #[error("invalid pile configuration: {0}")]
    InvalidConfig(String),

    /// Configuration text could not be parsed.
    #[error("failed to parse pile configuration: {0}")]
    ConfigParse(String),

    /// The clearance timer thread could not be started.
    #[error("failed to spawn clearance timer: {0}")]
    TimerSpawn(String),
}

/// Result type for pile configuration and lifecycle operations.
pub type PileResult<T> = Result<T, PileError>;

impl From<toml::de::Error> for PileError {
    fn from(err: toml::de::Error) -> Self {
        PileError::ConfigParse(err.to_string())
    }
}
