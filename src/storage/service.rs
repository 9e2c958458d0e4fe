//! Store-side file service
//!
//! Wraps a [`FileStore`] with the merkle bookkeeping: on upload the tree is
//! built over the stored files and persisted next to them, on request the
//! tree is decoded again and a proof extracted for the asked-for index.

use crate::core::{error::*, types::*};
use crate::proofs::{codec, MerkleTree, TreeFormat};
use crate::storage::file_store::{tree_file_name, FileStore};
use tracing::{debug, info};

/// File service serving files and inclusion proofs by key and index
#[derive(Debug, Clone)]
pub struct FileService {
    store: FileStore,
    format: TreeFormat,
}

impl FileService {
    pub fn new(store: FileStore, format: TreeFormat) -> Self {
        Self { store, format }
    }

    /// Underlying file store
    pub fn store(&self) -> &FileStore {
        &self.store
    }

    /// Format trees are persisted in
    pub fn format(&self) -> TreeFormat {
        self.format
    }

    /// Store a file set and its merkle tree, generating a key when none is given
    pub fn store_files(&self, key: Option<StoreKey>, files: Vec<FileInfo>) -> Result<StoreKey> {
        if files.is_empty() {
            return Err(ProofstoreError::EmptyInput);
        }
        let key = key.unwrap_or_else(StoreKey::generate);
        let file_count = files.len();

        let hashes = self.store.store_files(&key, files)?;
        let tree = MerkleTree::from_hashes(&hashes)?;
        let encoded = codec::encode(&tree, self.format)?;
        self.store
            .store_file(&key, &tree_file_name(self.format), &encoded)?;

        info!(key = %key, files = file_count, root = %tree.root(), "stored file set");
        Ok(key)
    }

    /// Load and validate the tree stored under `key`
    pub fn load_tree(&self, key: &StoreKey) -> Result<MerkleTree> {
        let bytes = self
            .store
            .get_file_by_name(key, &tree_file_name(self.format))?;
        codec::decode(&bytes, self.format)
    }

    /// Inclusion proof for the `index`-th file under `key`
    pub fn get_proof(&self, key: &StoreKey, index: usize) -> Result<Vec<Hash>> {
        let proof = self.load_tree(key)?.prove_inclusion(index)?;
        debug!(key = %key, index, siblings = proof.len(), "extracted proof");
        Ok(proof)
    }

    /// Contents and name of the `index`-th file under `key`
    pub fn get_file(&self, key: &StoreKey, index: usize) -> Result<(Vec<u8>, String)> {
        let (content, name) = self.store.get_file_by_number(key, index)?;
        debug!(key = %key, index, name = %name, "served file");
        Ok((content, name))
    }
}
