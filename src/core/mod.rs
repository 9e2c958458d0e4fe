//! Core types and utilities for proofstore
//!
//! This module contains the digest type, error handling,
//! and hashing functions used throughout the system.

pub mod error;
pub mod hash;
pub mod types;

// Re-export commonly used items
pub use error::{ProofstoreError, Result};
pub use hash::{hash_file, hash_pair, sha256};
pub use types::{FileInfo, Hash, RootHash, StoreKey};
