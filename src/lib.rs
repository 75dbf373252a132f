//! # tx_merkle
//!
//! Merkle roots over a block's transaction payloads.
//!
//! The root is a tamper-evident summary: changing, removing or reordering
//! any payload changes it. The tree can also be walked or rendered for
//! inspection.
//!
//! ## Core Concepts
//!
//! - **Leaves**: the hash of each payload, in block order
//! - **Padding**: an odd leaf count repeats the last leaf once
//! - **Branches**: the hash of the left digest followed by the right digest
//! - **Root**: the single node left after pairing level by level
//!
//! ## Example
//!
//! ```
//! use tx_merkle::{render_tree, MerkleTree};
//!
//! let tree = MerkleTree::build([b"alice->bob", b"bob->carol"])?;
//! println!("root: {}", tree.root_hash());
//! print!("{}", render_tree(&tree));
//! # Ok::<(), tx_merkle::Error>(())
//! ```

pub mod config;
pub mod model;
pub mod tree;

mod error;

pub use config::{ConfigStore, OddLevelPolicy, TreeConfig};
pub use error::{Error, Result};
pub use model::{Hash, HashAlgorithm, TransactionPayloads};
pub use tree::{
    print_block_tree, print_tree, render_tree, write_block_tree, write_tree, MerkleNode,
    MerkleTree, Preorder, Visit,
};
