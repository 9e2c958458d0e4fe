//! Merkle tree implementation
//!
//! The tree is built bottom-up from an ordered list of leaf digests. Whenever a
//! level holds an odd number of nodes its last node is duplicated before
//! pairing, so every internal node has exactly two children and both children
//! cover the same number of leaves. Each node stores that leaf count, which is
//! what proof extraction navigates by.

use crate::core::{error::*, hash::hash_pair, types::*};
use serde::{Deserialize, Serialize};

/// A single vertex of the merkle tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub(crate) hash: Hash,
    pub(crate) leaf_count: usize,
    pub(crate) left: Option<Box<Node>>,
    pub(crate) right: Option<Box<Node>>,
}

impl Node {
    fn leaf(hash: Hash) -> Self {
        Self {
            hash,
            leaf_count: 1,
            left: None,
            right: None,
        }
    }

    fn parent(left: Node, right: Node) -> Self {
        Self {
            hash: hash_pair(&left.hash, &right.hash),
            leaf_count: left.leaf_count + right.leaf_count,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    /// Digest committed to by this node
    pub fn hash(&self) -> Hash {
        self.hash
    }

    /// Number of leaves below this node, padding duplicates included
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Both children, or `None` for a leaf
    pub fn children(&self) -> Option<(&Node, &Node)> {
        match (&self.left, &self.right) {
            (Some(left), Some(right)) => Some((left, right)),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Merkle tree for generating proofs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleTree {
    pub(crate) root: Node,
    /// Number of leaves supplied at build time, before padding
    pub(crate) leaf_count: usize,
}

impl MerkleTree {
    /// Build a merkle tree from a list of hashes
    pub fn from_hashes(hashes: &[Hash]) -> Result<Self> {
        if hashes.is_empty() {
            return Err(ProofstoreError::EmptyInput);
        }

        let mut level: Vec<Node> = hashes.iter().copied().map(Node::leaf).collect();

        while level.len() > 1 {
            if level.len() % 2 == 1 {
                // Checked non-empty above, so `last` always exists here.
                if let Some(last) = level.last().cloned() {
                    level.push(last);
                }
            }

            let mut parents = Vec::with_capacity(level.len() / 2);
            let mut nodes = level.into_iter();
            while let (Some(left), Some(right)) = (nodes.next(), nodes.next()) {
                parents.push(Node::parent(left, right));
            }
            level = parents;
        }

        let root = level.pop().ok_or(ProofstoreError::EmptyInput)?;
        Ok(Self {
            root,
            leaf_count: hashes.len(),
        })
    }

    /// Root digest of the tree
    pub fn root(&self) -> Hash {
        self.root.hash
    }

    /// Root node of the tree
    pub fn root_node(&self) -> &Node {
        &self.root
    }

    /// Number of leaves the tree was built from (padding excluded)
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Sibling digests for the leaf at `index`, ordered from the leaf upward
    pub fn prove_inclusion(&self, index: usize) -> Result<Vec<Hash>> {
        if index >= self.leaf_count {
            return Err(ProofstoreError::index_out_of_range(index, self.leaf_count));
        }

        let mut proof = Vec::new();
        let mut node = &self.root;
        let mut index = index;

        while let Some((left, right)) = node.children() {
            if index < left.leaf_count {
                proof.push(right.hash);
                node = left;
            } else {
                proof.push(left.hash);
                index -= left.leaf_count;
                node = right;
            }
        }

        proof.reverse();
        Ok(proof)
    }

    /// Verify a proof against this tree's root
    pub fn verify_proof(&self, leaf_hash: Hash, proof: &[Hash], leaf_index: usize) -> bool {
        verify_proof(self.root(), leaf_index, leaf_hash, proof)
    }
}

/// Recompute the root from `leaf` and its sibling path and compare it to `root`.
///
/// At every level an even index means the recorded sibling sits to the right,
/// an odd index means it sits to the left.
pub fn verify_proof(root: Hash, index: usize, leaf: Hash, proof: &[Hash]) -> bool {
    let mut current = leaf;
    let mut index = index;

    for sibling in proof {
        current = if index % 2 == 0 {
            hash_pair(&current, sibling)
        } else {
            hash_pair(sibling, &current)
        };
        index /= 2;
    }

    current == root
}
