//! Level-by-level construction of a merkle tree

use super::{MerkleNode, Preorder};
use crate::config::{OddLevelPolicy, TreeConfig};
use crate::model::{Hash, HashAlgorithm, TransactionPayloads};
use crate::{Error, Result};
use tracing::{debug, trace};

/// A fully built, immutable merkle tree
///
/// Leaves are hashed in input order. An odd number of leaves is padded by
/// repeating the last one, then adjacent nodes are paired and hashed until
/// a single root remains.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleTree {
    root: MerkleNode,
    leaf_count: usize,
    algorithm: HashAlgorithm,
}

impl MerkleTree {
    /// Build a tree with the default config
    pub fn build<I, T>(leaves: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        Self::build_with_config(leaves, &TreeConfig::default())
    }

    /// Build a tree over the given leaf payloads
    pub fn build_with_config<I, T>(leaves: I, config: &TreeConfig) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let algorithm = config.algorithm;

        let mut level: Vec<MerkleNode> = leaves
            .into_iter()
            .enumerate()
            .map(|(index, payload)| {
                trace!(index, len = payload.as_ref().len(), "hashing leaf");
                MerkleNode::leaf(payload.as_ref(), algorithm)
            })
            .collect();

        if level.is_empty() {
            return Err(Error::EmptyInput);
        }

        if level.len() % 2 != 0 {
            debug!(leaves = level.len(), "duplicating last leaf");
            pad_with_last(&mut level);
        }
        let leaf_count = level.len();

        let mut depth = 0;
        while level.len() > 1 {
            if level.len() % 2 != 0 {
                match config.odd_level {
                    OddLevelPolicy::Reject => {
                        return Err(Error::UnbalancedIntermediateLevel {
                            level: depth,
                            width: level.len(),
                        });
                    }
                    OddLevelPolicy::DuplicateLast => {
                        debug!(level = depth, width = level.len(), "duplicating last node");
                        pad_with_last(&mut level);
                    }
                }
            }

            level = pair_up(level, algorithm);
            depth += 1;
            debug!(level = depth, width = level.len(), "reduced level");
        }

        let root = level.pop().ok_or(Error::EmptyInput)?;
        debug!(root = %root.digest(), leaf_count, %algorithm, "built merkle tree");

        Ok(MerkleTree {
            root,
            leaf_count,
            algorithm,
        })
    }

    /// Build a tree over a block's transaction payloads
    pub fn from_block<B>(block: &B, config: &TreeConfig) -> Result<Self>
    where
        B: TransactionPayloads + ?Sized,
    {
        Self::build_with_config(block.transaction_payloads(), config)
    }

    pub fn root(&self) -> &MerkleNode {
        &self.root
    }

    /// The merkle root
    pub fn root_hash(&self) -> Hash {
        self.root.digest()
    }

    /// Number of leaves, counting the padding leaf if one was added
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Total number of nodes, leaves included
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    pub fn height(&self) -> usize {
        self.root.height()
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Digests of the leaf level, left to right
    pub fn leaf_digests(&self) -> Vec<Hash> {
        let mut out = Vec::with_capacity(self.leaf_count);
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node.children() {
                Some((left, right)) => {
                    stack.push(right);
                    stack.push(left);
                }
                None => out.push(node.digest()),
            }
        }
        out
    }

    /// Walk every node depth-first, parent before children, left before right
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder::new(&self.root)
    }
}

fn pad_with_last(level: &mut Vec<MerkleNode>) {
    if let Some(last) = level.last().cloned() {
        level.push(last);
    }
}

fn pair_up(level: Vec<MerkleNode>, algorithm: HashAlgorithm) -> Vec<MerkleNode> {
    let mut next = Vec::with_capacity(level.len() / 2);
    let mut nodes = level.into_iter();
    while let (Some(left), Some(right)) = (nodes.next(), nodes.next()) {
        next.push(MerkleNode::branch(left, right, algorithm));
    }
    next
}
