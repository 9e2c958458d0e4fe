//! On-disk file store
//!
//! Every uploaded set lives in its own directory named after its store key:
//!
//! ```text
//! <data_dir>/<key>/<file name>
//! <data_dir>/<key>/_merkle_tree.<json|bin>
//! ```
//!
//! Files are always addressed in byte-wise name order, which is also the leaf
//! order of the merkle tree built over them.

use crate::core::{error::*, hash::sha256, types::*};
use crate::proofs::TreeFormat;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name stem reserved for the encoded merkle tree
pub const TREE_FILE_STEM: &str = "_merkle_tree";

/// Name of the encoded tree file for a given format
pub fn tree_file_name(format: TreeFormat) -> String {
    format!("{}.{}", TREE_FILE_STEM, format.extension())
}

fn is_tree_file(name: &str) -> bool {
    [TreeFormat::Json, TreeFormat::Binary]
        .iter()
        .any(|format| name == tree_file_name(*format))
}

/// Directory-backed store of uploaded file sets
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`; the directory is created lazily
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding every stored set
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_dir(&self, key: &StoreKey) -> PathBuf {
        self.root.join(key)
    }

    /// Replace whatever is stored under `key` with `files`.
    ///
    /// Returns the content digests in the order the files are addressed by
    /// index (sorted by name).
    pub fn store_files(&self, key: &StoreKey, mut files: Vec<FileInfo>) -> Result<Vec<Hash>> {
        files.sort_by(|a, b| a.name.cmp(&b.name));

        for file in &files {
            validate_file_name(&file.name)?;
        }
        if let Some(pair) = files.windows(2).find(|pair| pair[0].name == pair[1].name) {
            return Err(ProofstoreError::invalid_file_name(format!(
                "{} (duplicate)",
                pair[0].name
            )));
        }

        self.cleanup_dir(key)?;

        let hashes: Vec<Hash> = files.par_iter().map(|file| sha256(&file.content)).collect();

        let dir = self.key_dir(key);
        for file in &files {
            std::fs::write(dir.join(&file.name), &file.content)?;
            debug!(key = %key, name = %file.name, size = file.content.len(), "stored file");
        }

        Ok(hashes)
    }

    /// Write a single file under `key`, creating the key directory if needed
    pub fn store_file(&self, key: &StoreKey, name: &str, content: &[u8]) -> Result<()> {
        if !is_safe_file_name(name) {
            return Err(ProofstoreError::invalid_file_name(name));
        }
        let dir = self.key_dir(key);
        std::fs::create_dir_all(&dir)?;
        std::fs::write(dir.join(name), content)?;
        Ok(())
    }

    /// Read a stored file by name
    pub fn get_file_by_name(&self, key: &StoreKey, name: &str) -> Result<Vec<u8>> {
        self.ensure_key(key)?;
        let path = self.key_dir(key).join(name);
        if !is_safe_file_name(name) || !path.is_file() {
            return Err(ProofstoreError::file_not_found(key, name));
        }
        Ok(std::fs::read(path)?)
    }

    /// Stored file names under `key`, sorted, without the tree file
    pub fn list_files(&self, key: &StoreKey) -> Result<Vec<String>> {
        self.ensure_key(key)?;

        let mut names = Vec::new();
        for entry in std::fs::read_dir(self.key_dir(key))? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if !is_tree_file(&name) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Read the `index`-th stored file in name order
    pub fn get_file_by_number(&self, key: &StoreKey, index: usize) -> Result<(Vec<u8>, String)> {
        let names = self.list_files(key)?;
        let name = names
            .get(index)
            .ok_or_else(|| ProofstoreError::index_out_of_range(index, names.len()))?;

        let content = std::fs::read(self.key_dir(key).join(name))?;
        Ok((content, name.clone()))
    }

    /// Whether anything is stored under `key`
    pub fn contains(&self, key: &StoreKey) -> bool {
        self.key_dir(key).is_dir()
    }

    fn ensure_key(&self, key: &StoreKey) -> Result<()> {
        if self.contains(key) {
            Ok(())
        } else {
            Err(ProofstoreError::key_not_found(key))
        }
    }

    fn cleanup_dir(&self, key: &StoreKey) -> Result<()> {
        let dir = self.key_dir(key);
        if dir.exists() {
            std::fs::remove_dir_all(&dir)?;
        }
        std::fs::create_dir_all(&dir)?;
        Ok(())
    }
}

/// Whether `name` is a single path component that stays inside its directory
pub fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\', '\0'])
}

/// Names accepted for uploaded files: safe, and not the reserved tree file
fn validate_file_name(name: &str) -> Result<()> {
    if is_safe_file_name(name) && !is_tree_file(name) {
        Ok(())
    } else {
        Err(ProofstoreError::invalid_file_name(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn files() -> Vec<FileInfo> {
        vec![
            FileInfo::new("c.txt", "charlie"),
            FileInfo::new("a.txt", "alpha"),
            FileInfo::new("b.txt", "bravo"),
        ]
    }

    #[test]
    fn test_store_files_sorts_by_name() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        let key = StoreKey::generate();

        let hashes = store.store_files(&key, files()).unwrap();

        assert_eq!(
            hashes,
            vec![sha256(b"alpha"), sha256(b"bravo"), sha256(b"charlie")]
        );
        assert_eq!(store.list_files(&key).unwrap(), vec!["a.txt", "b.txt", "c.txt"]);

        let (content, name) = store.get_file_by_number(&key, 1).unwrap();
        assert_eq!(name, "b.txt");
        assert_eq!(content, b"bravo");
    }

    #[test]
    fn test_tree_file_is_not_listed() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        let key = StoreKey::generate();

        store.store_files(&key, files()).unwrap();
        store
            .store_file(&key, &tree_file_name(TreeFormat::Json), b"{}")
            .unwrap();

        assert_eq!(store.list_files(&key).unwrap().len(), 3);
        assert!(matches!(
            store.get_file_by_number(&key, 3),
            Err(ProofstoreError::IndexOutOfRange { index: 3, leaf_count: 3 })
        ));
    }

    #[test]
    fn test_restore_replaces_previous_set() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        let key = StoreKey::generate();

        store.store_files(&key, files()).unwrap();
        store
            .store_files(&key, vec![FileInfo::new("z.txt", "zulu")])
            .unwrap();

        assert_eq!(store.list_files(&key).unwrap(), vec!["z.txt"]);
    }

    #[test]
    fn test_invalid_names_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        let key = StoreKey::generate();

        for name in ["", "..", "dir/file", "_merkle_tree.json"] {
            let result = store.store_files(&key, vec![FileInfo::new(name, "x")]);
            assert!(
                matches!(result, Err(ProofstoreError::InvalidFileName { .. })),
                "{:?} should be rejected",
                name
            );
        }

        let duplicate = vec![FileInfo::new("a", "1"), FileInfo::new("a", "2")];
        assert!(store.store_files(&key, duplicate).is_err());
    }

    #[test]
    fn test_safe_file_names() {
        for name in ["a.txt", "_merkle_tree.json", "..hidden", "spaced name"] {
            assert!(is_safe_file_name(name), "{:?} should be accepted", name);
        }
        for name in ["", ".", "..", "a/b", "a\\b", "nul\0byte", "/abs"] {
            assert!(!is_safe_file_name(name), "{:?} should be rejected", name);
        }
    }

    #[test]
    fn test_store_file_rejects_unsafe_names() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        let key = StoreKey::generate();

        for name in ["nul\0byte", "../escape", "..", ""] {
            assert!(
                matches!(
                    store.store_file(&key, name, b"x"),
                    Err(ProofstoreError::InvalidFileName { .. })
                ),
                "{:?} should be rejected",
                name
            );
        }
        assert!(!temp_dir.path().join("escape").exists());

        // The tree file itself is written through this path.
        store
            .store_file(&key, &tree_file_name(TreeFormat::Binary), b"tree")
            .unwrap();
    }

    #[test]
    fn test_unknown_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        let key = StoreKey::generate();

        assert!(matches!(
            store.list_files(&key),
            Err(ProofstoreError::KeyNotFound { .. })
        ));
        assert!(matches!(
            store.get_file_by_name(&key, "a.txt"),
            Err(ProofstoreError::KeyNotFound { .. })
        ));
    }
}
