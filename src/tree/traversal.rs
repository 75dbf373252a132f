//! Preorder traversal of a merkle tree

use super::MerkleNode;
use crate::model::Hash;
use serde::Serialize;
use std::iter::FusedIterator;

/// One step of a traversal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Visit {
    /// Distance from the root (root = 0)
    pub depth: usize,
    /// Whether this node is its parent's left child. True for the root.
    pub is_left: bool,
    pub digest: Hash,
}

/// Lazy depth-first walk: node, then left subtree, then right subtree
///
/// Created by [`MerkleTree::preorder`](super::MerkleTree::preorder). Once
/// exhausted it keeps returning `None`.
pub struct Preorder<'a> {
    stack: Vec<(&'a MerkleNode, usize, bool)>,
}

impl<'a> Preorder<'a> {
    pub(crate) fn new(root: &'a MerkleNode) -> Self {
        Preorder {
            stack: vec![(root, 0, true)],
        }
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = Visit;

    fn next(&mut self) -> Option<Visit> {
        let (node, depth, is_left) = self.stack.pop()?;

        if let Some((left, right)) = node.children() {
            // Right goes on first so left is visited first
            self.stack.push((right, depth + 1, false));
            self.stack.push((left, depth + 1, true));
        }

        Some(Visit {
            depth,
            is_left,
            digest: node.digest(),
        })
    }
}

impl FusedIterator for Preorder<'_> {}
