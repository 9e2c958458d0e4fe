//! The seam between the client and whatever holds the uploaded files

use crate::core::{error::Result, types::*};
use crate::storage::FileService;

/// Retrieve-by-key-and-index access to a file store.
///
/// Nothing returned through this trait is trusted: files are re-hashed and
/// proofs are checked against a root the client recorded itself.
pub trait Remote {
    /// Upload a file set and return the key the store filed it under
    fn upload(&self, files: Vec<FileInfo>) -> Result<StoreKey>;

    /// Contents and name of the `index`-th file under `key`
    fn fetch_file(&self, key: &StoreKey, index: usize) -> Result<(Vec<u8>, String)>;

    /// Sibling digests proving the `index`-th file belongs to the set
    fn fetch_proof(&self, key: &StoreKey, index: usize) -> Result<Vec<Hash>>;
}

impl Remote for FileService {
    fn upload(&self, files: Vec<FileInfo>) -> Result<StoreKey> {
        self.store_files(None, files)
    }

    fn fetch_file(&self, key: &StoreKey, index: usize) -> Result<(Vec<u8>, String)> {
        self.get_file(key, index)
    }

    fn fetch_proof(&self, key: &StoreKey, index: usize) -> Result<Vec<Hash>> {
        self.get_proof(key, index)
    }
}

impl<R: Remote + ?Sized> Remote for &R {
    fn upload(&self, files: Vec<FileInfo>) -> Result<StoreKey> {
        (**self).upload(files)
    }

    fn fetch_file(&self, key: &StoreKey, index: usize) -> Result<(Vec<u8>, String)> {
        (**self).fetch_file(key, index)
    }

    fn fetch_proof(&self, key: &StoreKey, index: usize) -> Result<Vec<Hash>> {
        (**self).fetch_proof(key, index)
    }
}
