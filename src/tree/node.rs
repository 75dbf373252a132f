//! Merkle tree node types

use crate::model::{Hash, HashAlgorithm};
use crate::{Error, Result};

/// A node in the merkle tree
///
/// A leaf holds the digest of a raw payload. A branch holds the digest of
/// its two children's digests concatenated left then right. Children are
/// owned outright, so a node has either zero or two of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleNode {
    digest: Hash,
    children: Option<Box<(MerkleNode, MerkleNode)>>,
}

impl MerkleNode {
    /// Build a node from optional children and an optional payload
    ///
    /// With no children this is a leaf and `payload` is required. Otherwise
    /// both children are required and `payload` is ignored.
    pub fn new(
        left: Option<MerkleNode>,
        right: Option<MerkleNode>,
        payload: Option<&[u8]>,
        algorithm: HashAlgorithm,
    ) -> Result<Self> {
        match (left, right) {
            (None, None) => payload
                .map(|data| Self::leaf(data, algorithm))
                .ok_or_else(|| {
                    Error::InvalidNodeConstruction("leaf node requires a payload".into())
                }),
            (Some(left), Some(right)) => Ok(Self::branch(left, right, algorithm)),
            (Some(_), None) => Err(Error::InvalidNodeConstruction(
                "branch node is missing its right child".into(),
            )),
            (None, Some(_)) => Err(Error::InvalidNodeConstruction(
                "branch node is missing its left child".into(),
            )),
        }
    }

    /// Create a leaf node over a raw payload
    pub fn leaf(payload: &[u8], algorithm: HashAlgorithm) -> Self {
        MerkleNode {
            digest: algorithm.digest(payload),
            children: None,
        }
    }

    /// Create a branch node over two children
    pub fn branch(left: MerkleNode, right: MerkleNode, algorithm: HashAlgorithm) -> Self {
        MerkleNode {
            digest: algorithm.digest_pair(&left.digest, &right.digest),
            children: Some(Box::new((left, right))),
        }
    }

    /// The digest stored at this node
    pub fn digest(&self) -> Hash {
        self.digest
    }

    pub fn left(&self) -> Option<&MerkleNode> {
        self.children.as_deref().map(|(left, _)| left)
    }

    pub fn right(&self) -> Option<&MerkleNode> {
        self.children.as_deref().map(|(_, right)| right)
    }

    /// Both children, if this is a branch
    pub fn children(&self) -> Option<(&MerkleNode, &MerkleNode)> {
        self.children.as_deref().map(|(left, right)| (left, right))
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Number of nodes in the subtree rooted here, this node included
    pub fn node_count(&self) -> usize {
        match self.children() {
            Some((left, right)) => 1 + left.node_count() + right.node_count(),
            None => 1,
        }
    }

    /// Number of edges on the longest path down to a leaf
    pub fn height(&self) -> usize {
        match self.children() {
            Some((left, right)) => 1 + left.height().max(right.height()),
            None => 0,
        }
    }
}
