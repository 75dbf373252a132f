//! Binary merkle tree over transaction payloads
//!
//! - Each leaf's digest is the hash of one payload
//! - Each branch's digest is the hash of its children's digests, left first
//! - The root digest fingerprints every payload and their order

mod builder;
mod node;
mod printer;
mod traversal;

pub use builder::MerkleTree;
pub use node::MerkleNode;
pub use printer::{
    format_visit, print_block_tree, print_tree, render_tree, write_block_tree, write_tree,
    BLOCK_HEADER, INDENT, LEFT_MARKER, RIGHT_MARKER,
};
pub use traversal::{Preorder, Visit};
