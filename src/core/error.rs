//! Error types for proofstore

use crate::core::types::StoreKey;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for proofstore operations
#[derive(Error, Debug)]
pub enum ProofstoreError {
    /// Merkle tree errors
    #[error("Cannot build a merkle tree from zero leaves")]
    EmptyInput,

    #[error("Leaf index {index} out of range for tree with {leaf_count} leaves")]
    IndexOutOfRange { index: usize, leaf_count: usize },

    #[error("Malformed merkle tree: {reason}")]
    MalformedTree { reason: String },

    #[error("Verification failed for file {index} under key {key}")]
    VerificationFailed { key: StoreKey, index: usize },

    /// Store-related errors
    #[error("No files stored under key: {key}")]
    KeyNotFound { key: StoreKey },

    #[error("File not found under key {key}: {name}")]
    FileNotFound { key: StoreKey, name: String },

    #[error("Invalid file name: {name:?}")]
    InvalidFileName { name: String },

    #[error("Invalid store key: {key:?}")]
    InvalidKey { key: String },

    #[error("No files to upload in {}", .path.display())]
    NoFiles { path: PathBuf },

    /// Client-side root registry errors
    #[error("No merkle root recorded for key: {key}")]
    RootNotFound { key: StoreKey },

    /// Configuration errors
    #[error("Configuration error: {reason}")]
    ConfigurationError { reason: String },

    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// Hex encoding/decoding errors
    #[error("Hex encoding error: {0}")]
    HexError(#[from] hex::FromHexError),
}

impl ProofstoreError {
    /// Create a new index out of range error
    pub fn index_out_of_range(index: usize, leaf_count: usize) -> Self {
        Self::IndexOutOfRange { index, leaf_count }
    }

    /// Create a new malformed tree error
    pub fn malformed_tree(reason: impl Into<String>) -> Self {
        Self::MalformedTree {
            reason: reason.into(),
        }
    }

    /// Create a new key not found error
    pub fn key_not_found(key: &StoreKey) -> Self {
        Self::KeyNotFound { key: key.clone() }
    }

    /// Create a new file not found error
    pub fn file_not_found(key: &StoreKey, name: impl Into<String>) -> Self {
        Self::FileNotFound {
            key: key.clone(),
            name: name.into(),
        }
    }

    /// Create a new invalid file name error
    pub fn invalid_file_name(name: impl Into<String>) -> Self {
        Self::InvalidFileName { name: name.into() }
    }

    /// Create a new invalid key error
    pub fn invalid_key(key: impl Into<String>) -> Self {
        Self::InvalidKey { key: key.into() }
    }

    /// Create a new configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::ConfigurationError {
            reason: reason.into(),
        }
    }
}

/// Result type alias for proofstore operations
pub type Result<T> = std::result::Result<T, ProofstoreError>;
