//! Persistent encoding of merkle trees
//!
//! Stored trees come back from an untrusted store, so `decode` re-checks every
//! structural invariant the builder guarantees before handing the tree out.
//!
//! JSON keeps the nested node layout; serde_json's recursion limit bounds how
//! deep a hostile document can nest. The binary format stores nodes as a flat
//! post-order list and the tree is rebuilt with an explicit stack, so no
//! input can drive deserialization deeper than [`MAX_DEPTH`].

use crate::core::{error::*, hash::hash_pair, types::Hash};
use crate::proofs::merkle::{MerkleTree, Node};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Deepest tree a `usize` leaf count can produce
pub const MAX_DEPTH: usize = usize::BITS as usize;

/// On-disk representation of a tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeFormat {
    /// Pretty-printed JSON with hex digests
    #[default]
    Json,
    /// Compact bincode with raw digests
    Binary,
}

impl TreeFormat {
    /// File extension used when a tree is written next to stored files
    pub fn extension(self) -> &'static str {
        match self {
            TreeFormat::Json => "json",
            TreeFormat::Binary => "bin",
        }
    }
}

impl fmt::Display for TreeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeFormat::Json => f.write_str("json"),
            TreeFormat::Binary => f.write_str("binary"),
        }
    }
}

impl FromStr for TreeFormat {
    type Err = ProofstoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(TreeFormat::Json),
            "binary" | "bin" | "bincode" => Ok(TreeFormat::Binary),
            other => Err(ProofstoreError::configuration(format!(
                "unknown tree format '{}', expected 'json' or 'binary'",
                other
            ))),
        }
    }
}

/// Binary layout of a tree: nodes in post-order, children before parents
#[derive(Debug, Serialize, Deserialize)]
struct FlatTree {
    leaf_count: usize,
    nodes: Vec<FlatNode>,
}

#[derive(Debug, Serialize, Deserialize)]
struct FlatNode {
    hash: Hash,
    leaf_count: usize,
    /// 0 for a leaf, 2 for an internal node
    children: u8,
}

impl FlatTree {
    fn from_tree(tree: &MerkleTree) -> Self {
        let mut nodes = Vec::new();
        flatten(&tree.root, &mut nodes);
        Self {
            leaf_count: tree.leaf_count,
            nodes,
        }
    }

    fn into_tree(self) -> Result<MerkleTree> {
        // Each entry carries the height of the subtree it holds.
        let mut stack: Vec<(Node, usize)> = Vec::new();

        for (position, flat) in self.nodes.into_iter().enumerate() {
            let entry = match flat.children {
                0 => (
                    Node {
                        hash: flat.hash,
                        leaf_count: flat.leaf_count,
                        left: None,
                        right: None,
                    },
                    0,
                ),
                2 => {
                    let (right, right_height) =
                        stack.pop().ok_or_else(|| missing_child(position))?;
                    let (left, left_height) =
                        stack.pop().ok_or_else(|| missing_child(position))?;
                    let height = left_height.max(right_height) + 1;
                    if height > MAX_DEPTH {
                        return Err(ProofstoreError::malformed_tree("tree is too deep"));
                    }
                    (
                        Node {
                            hash: flat.hash,
                            leaf_count: flat.leaf_count,
                            left: Some(Box::new(left)),
                            right: Some(Box::new(right)),
                        },
                        height,
                    )
                },
                other => {
                    return Err(ProofstoreError::malformed_tree(format!(
                        "node {} has {} children",
                        position, other
                    )))
                },
            };
            stack.push(entry);
        }

        let (root, _) = stack
            .pop()
            .ok_or_else(|| ProofstoreError::malformed_tree("tree has no nodes"))?;
        if !stack.is_empty() {
            return Err(ProofstoreError::malformed_tree(format!(
                "{} nodes are not connected to the root",
                stack.len()
            )));
        }

        Ok(MerkleTree {
            root,
            leaf_count: self.leaf_count,
        })
    }
}

fn flatten(node: &Node, out: &mut Vec<FlatNode>) {
    let children = match (&node.left, &node.right) {
        (Some(left), Some(right)) => {
            flatten(left, out);
            flatten(right, out);
            2
        },
        _ => 0,
    };
    out.push(FlatNode {
        hash: node.hash,
        leaf_count: node.leaf_count,
        children,
    });
}

fn missing_child(position: usize) -> ProofstoreError {
    ProofstoreError::malformed_tree(format!("internal node {} is missing a child", position))
}

/// Serialize a tree
pub fn encode(tree: &MerkleTree, format: TreeFormat) -> Result<Vec<u8>> {
    match format {
        TreeFormat::Json => Ok(serde_json::to_vec_pretty(tree)?),
        TreeFormat::Binary => Ok(bincode::serialize(&FlatTree::from_tree(tree))?),
    }
}

/// Deserialize a tree and validate its structure
pub fn decode(bytes: &[u8], format: TreeFormat) -> Result<MerkleTree> {
    let tree: MerkleTree = match format {
        TreeFormat::Json => serde_json::from_slice(bytes)
            .map_err(|e| ProofstoreError::malformed_tree(format!("invalid JSON: {}", e)))?,
        TreeFormat::Binary => bincode::deserialize::<FlatTree>(bytes)
            .map_err(|e| ProofstoreError::malformed_tree(format!("invalid bincode: {}", e)))?
            .into_tree()?,
    };

    validate(&tree)?;
    Ok(tree)
}

/// Check the invariants `MerkleTree::from_hashes` guarantees
pub fn validate(tree: &MerkleTree) -> Result<()> {
    if tree.leaf_count == 0 {
        return Err(ProofstoreError::malformed_tree("tree has zero leaves"));
    }

    let padded = tree.leaf_count.checked_next_power_of_two().ok_or_else(|| {
        ProofstoreError::malformed_tree(format!("leaf count {} is too large", tree.leaf_count))
    })?;
    if tree.root.leaf_count != padded {
        return Err(ProofstoreError::malformed_tree(format!(
            "root covers {} leaves, expected {} for {} original leaves",
            tree.root.leaf_count, padded, tree.leaf_count
        )));
    }

    validate_node(&tree.root, 0)?;

    // Positions past the original count must be duplicate-last-node padding.
    let mut leaves = Vec::with_capacity(tree.leaf_count);
    collect_leaves(&tree.root, tree.leaf_count, &mut leaves);
    if MerkleTree::from_hashes(&leaves)?.root() != tree.root() {
        return Err(ProofstoreError::malformed_tree(
            "padding leaves do not duplicate the last real leaf",
        ));
    }
    Ok(())
}

fn collect_leaves(node: &Node, limit: usize, out: &mut Vec<Hash>) {
    if out.len() >= limit {
        return;
    }
    match node.children() {
        Some((left, right)) => {
            collect_leaves(left, limit, out);
            collect_leaves(right, limit, out);
        },
        None => out.push(node.hash),
    }
}

fn validate_node(node: &Node, depth: usize) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(ProofstoreError::malformed_tree("tree is too deep"));
    }

    match (&node.left, &node.right) {
        (None, None) => {
            if node.leaf_count != 1 {
                return Err(ProofstoreError::malformed_tree(format!(
                    "leaf at depth {} claims {} leaves",
                    depth, node.leaf_count
                )));
            }
            Ok(())
        },
        (Some(left), Some(right)) => {
            if left.leaf_count != right.leaf_count {
                return Err(ProofstoreError::malformed_tree(format!(
                    "unbalanced children at depth {}: {} vs {} leaves",
                    depth, left.leaf_count, right.leaf_count
                )));
            }
            if left.leaf_count.checked_add(right.leaf_count) != Some(node.leaf_count) {
                return Err(ProofstoreError::malformed_tree(format!(
                    "node at depth {} claims {} leaves, children hold {} + {}",
                    depth, node.leaf_count, left.leaf_count, right.leaf_count
                )));
            }
            if hash_pair(&left.hash, &right.hash) != node.hash {
                return Err(ProofstoreError::malformed_tree(format!(
                    "digest mismatch at depth {}",
                    depth
                )));
            }
            validate_node(left, depth + 1)?;
            validate_node(right, depth + 1)
        },
        _ => Err(ProofstoreError::malformed_tree(format!(
            "node at depth {} has exactly one child",
            depth
        ))),
    }
}
