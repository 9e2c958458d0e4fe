//! Storage layer for proofstore
//!
//! This module handles the store side: persisting uploaded file sets under
//! their key, keeping the encoded merkle tree next to them, and serving
//! single files with their inclusion proofs.

pub mod file_store;
pub mod service;

// Re-export commonly used items
pub use file_store::{is_safe_file_name, tree_file_name, FileStore};
pub use service::FileService;
