//! proofstore - verifiable file storage
//!
//! proofstore stores a set of files under an opaque key and serves any single
//! file back together with a merkle inclusion proof. The uploader keeps only
//! the merkle root; a downloaded file is accepted when its proof recomputes
//! that root, so the store's own bookkeeping never has to be trusted.
//!
//! # Core Features
//!
//! - **Merkle Trees**: Binary SHA-256 trees with duplicate-last-node padding
//! - **Inclusion Proofs**: Sibling paths for any leaf, verified from the root alone
//! - **Tree Codec**: JSON or bincode persistence, validated on load
//! - **File Store**: One directory per key, files addressed by name order
//!
//! # Example Usage
//!
//! ```rust
//! use proofstore::{core::hash::sha256, MerkleTree, verify_proof};
//!
//! let leaves: Vec<_> = ["a", "b", "c"].iter().map(|s| sha256(s.as_bytes())).collect();
//! let tree = MerkleTree::from_hashes(&leaves)?;
//!
//! let proof = tree.prove_inclusion(2)?;
//! assert!(verify_proof(tree.root(), 2, leaves[2], &proof));
//! # Ok::<(), proofstore::ProofstoreError>(())
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod core;
pub mod proofs;
pub mod storage;

// Re-export commonly used types
pub use crate::core::{
    error::{ProofstoreError, Result},
    types::{FileInfo, Hash, RootHash, StoreKey},
};

pub use crate::proofs::{merkle::MerkleTree, merkle::verify_proof, proof::InclusionProof};

pub use crate::storage::{file_store::FileStore, service::FileService};

pub use crate::client::{Remote, RootRegistry, UploadService};

/// Current version of proofstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
