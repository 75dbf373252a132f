//! Core data model types for tx_merkle

mod block;
mod hash;

pub use block::TransactionPayloads;
pub use hash::{Hash, HashAlgorithm};
