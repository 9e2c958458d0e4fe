//! Client-side registry of merkle roots
//!
//! The root of every uploaded set is kept locally at
//! `<roots_dir>/<key>/merkle_root` as a hex string. Verification is only
//! meaningful against a root from here, never one echoed back by the store.

use crate::core::{error::*, types::*};
use std::path::{Path, PathBuf};

const ROOT_FILE_NAME: &str = "merkle_root";

#[derive(Debug, Clone)]
pub struct RootRegistry {
    dir: PathBuf,
}

impl RootRegistry {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn root_path(&self, key: &StoreKey) -> Result<PathBuf> {
        if !key.is_valid() {
            return Err(ProofstoreError::invalid_key(key.as_str()));
        }
        Ok(self.dir.join(key).join(ROOT_FILE_NAME))
    }

    /// Remember `root` as the trusted root for `key`
    pub fn record(&self, key: &StoreKey, root: &RootHash) -> Result<()> {
        let path = self.root_path(key)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, root.to_hex())?;
        Ok(())
    }

    /// The trusted root previously recorded for `key`
    pub fn load(&self, key: &StoreKey) -> Result<RootHash> {
        let path = self.root_path(key)?;
        if !path.is_file() {
            return Err(ProofstoreError::RootNotFound { key: key.clone() });
        }
        let content = std::fs::read_to_string(path)?;
        Ok(Hash::from_hex(&content)?)
    }

    /// Keys with a recorded root, sorted
    pub fn keys(&self) -> Result<Vec<StoreKey>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            let key = entry
                .file_name()
                .to_str()
                .and_then(|name| StoreKey::parse(name));
            if let Some(key) = key {
                if self.root_path(&key)?.is_file() {
                    keys.push(key);
                }
            }
        }
        keys.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(keys)
    }
}
