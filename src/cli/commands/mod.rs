//! CLI command implementations

pub mod config;
pub mod demo;
pub mod get;
pub mod prove;
pub mod root;
pub mod upload;
pub mod verify;

// Common utilities for commands
use crate::core::{error::ProofstoreError, types::StoreKey};
use anyhow::Result;

/// Parse a store key given on the command line
pub fn parse_key(key: &str) -> Result<StoreKey> {
    StoreKey::parse(key).ok_or_else(|| ProofstoreError::invalid_key(key).into())
}
