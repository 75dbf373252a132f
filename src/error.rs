//! Error types for tx_merkle

use thiserror::Error;

/// Result type alias for tx_merkle operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or rendering a merkle tree
#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot build a merkle tree from zero leaves")]
    EmptyInput,

    #[error("Level {level} has an odd number of nodes ({width}) and cannot be paired")]
    UnbalancedIntermediateLevel { level: usize, width: usize },

    #[error("Invalid node construction: {0}")]
    InvalidNodeConstruction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid hash: {0}")]
    InvalidHash(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Config error: {0}")]
    Config(String),
}
