//! Merkle proof system for proofstore
//!
//! This module builds merkle trees over file digests, extracts inclusion
//! proofs for single files, verifies them against a trusted root, and
//! encodes trees for storage next to the files they cover.

pub mod codec;
pub mod merkle;
pub mod proof;

// Re-export commonly used items
pub use codec::{decode, encode, TreeFormat};
pub use merkle::{verify_proof, MerkleTree, Node};
pub use proof::InclusionProof;
