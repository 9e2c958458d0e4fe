//! Portable inclusion proofs

use crate::core::{error::*, types::*};
use crate::proofs::merkle::{verify_proof, MerkleTree};
use serde::{Deserialize, Serialize};

/// Version of the proof document format
pub const PROOF_VERSION: &str = "1.0";

/// Proof that one stored file belongs to the file set under `key`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusionProof {
    /// Version of the proof format
    pub version: String,
    /// Store key of the file set
    pub key: StoreKey,
    /// Position of the file within the set
    pub index: usize,
    /// Name the store reported for the file
    pub name: Option<String>,
    /// Digest of the file contents
    pub leaf: Hash,
    /// Sibling digests from the leaf up to the root
    pub siblings: Vec<Hash>,
    /// Timestamp when proof was generated
    pub created_at: i64,
}

impl InclusionProof {
    /// Assemble a proof from already extracted siblings
    pub fn new(key: StoreKey, index: usize, leaf: Hash, siblings: Vec<Hash>) -> Self {
        Self {
            version: PROOF_VERSION.to_string(),
            key,
            index,
            name: None,
            leaf,
            siblings,
            created_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Extract the proof for `index` from a tree
    pub fn from_tree(tree: &MerkleTree, key: StoreKey, index: usize, leaf: Hash) -> Result<Self> {
        let siblings = tree.prove_inclusion(index)?;
        Ok(Self::new(key, index, leaf, siblings))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Verify this proof against a trusted root
    pub fn verify(&self, root: &RootHash) -> bool {
        verify_proof(*root, self.index, self.leaf, &self.siblings)
    }

    /// Serialize proof to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(ProofstoreError::JsonSerialization)
    }

    /// Deserialize proof from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(ProofstoreError::JsonSerialization)
    }
}
