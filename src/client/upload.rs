//! Client-side upload and verified download

use crate::client::{remote::Remote, roots::RootRegistry};
use crate::core::{error::*, hash::sha256, types::*};
use crate::proofs::{verify_proof, MerkleTree};
use crate::storage::is_safe_file_name;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Outcome of a successful upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadReceipt {
    /// Key the store filed the set under
    pub key: StoreKey,
    /// Root computed locally from the uploaded payloads
    pub root: RootHash,
    /// Number of files uploaded
    pub file_count: usize,
}

/// A downloaded file whose inclusion proof checked out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedFile {
    pub index: usize,
    pub name: String,
    pub content: Vec<u8>,
    /// Where the file was saved, if it was written to disk
    pub path: Option<PathBuf>,
}

/// Uploads directories and downloads single files with proof verification
pub struct UploadService<R: Remote> {
    remote: R,
    roots: RootRegistry,
    downloads_dir: PathBuf,
    remove_after_upload: bool,
}

impl<R: Remote> UploadService<R> {
    pub fn new(remote: R, roots: RootRegistry, downloads_dir: impl Into<PathBuf>) -> Self {
        Self {
            remote,
            roots,
            downloads_dir: downloads_dir.into(),
            remove_after_upload: false,
        }
    }

    /// Delete the source directory once its upload and root are recorded
    pub fn with_remove_after_upload(mut self, remove: bool) -> Self {
        self.remove_after_upload = remove;
        self
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn roots(&self) -> &RootRegistry {
        &self.roots
    }

    /// Upload every regular file directly inside `dir`
    pub fn upload_dir(&self, dir: &Path) -> Result<UploadReceipt> {
        let files = read_dir_files(dir)?;
        if files.is_empty() {
            return Err(ProofstoreError::NoFiles {
                path: dir.to_path_buf(),
            });
        }

        // The root is derived from our own copy of the payloads, never from the store.
        let hashes: Vec<Hash> = files.iter().map(|file| sha256(&file.content)).collect();
        let root = MerkleTree::from_hashes(&hashes)?.root();
        let file_count = files.len();

        let key = self.remote.upload(files)?;
        self.roots.record(&key, &root)?;
        info!(key = %key, root = %root, files = file_count, "uploaded directory");

        if self.remove_after_upload {
            std::fs::remove_dir_all(dir)?;
            debug!(path = %dir.display(), "removed uploaded directory");
        }

        Ok(UploadReceipt {
            key,
            root,
            file_count,
        })
    }

    /// Fetch the `index`-th file under `key` and verify it against the recorded root
    pub fn fetch_verified(&self, key: &StoreKey, index: usize) -> Result<VerifiedFile> {
        let root = self.roots.load(key)?;

        let (content, name) = self.remote.fetch_file(key, index)?;
        let proof = self.remote.fetch_proof(key, index)?;

        if !verify_proof(root, index, sha256(&content), &proof) {
            warn!(key = %key, index, name = %name, "inclusion proof rejected");
            return Err(ProofstoreError::VerificationFailed {
                key: key.clone(),
                index,
            });
        }

        debug!(key = %key, index, name = %name, "inclusion proof verified");
        Ok(VerifiedFile {
            index,
            name,
            content,
            path: None,
        })
    }

    /// Fetch, verify, and save the file into the downloads directory
    pub fn download(&self, key: &StoreKey, index: usize) -> Result<VerifiedFile> {
        let mut file = self.fetch_verified(key, index)?;

        // The name comes from the store, so it must not steer the write elsewhere.
        if !is_safe_file_name(&file.name) {
            return Err(ProofstoreError::invalid_file_name(file.name));
        }

        std::fs::create_dir_all(&self.downloads_dir)?;
        let path = self.downloads_dir.join(&file.name);
        std::fs::write(&path, &file.content)?;
        info!(key = %key, index, path = %path.display(), "downloaded and verified file");

        file.path = Some(path);
        Ok(file)
    }
}

/// Regular files directly inside `dir`, sorted by name
fn read_dir_files(dir: &Path) -> Result<Vec<FileInfo>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry
            .file_name()
            .to_str()
            .ok_or_else(|| {
                ProofstoreError::invalid_file_name(entry.file_name().to_string_lossy())
            })?
            .to_string();
        let content = std::fs::read(entry.path())?;
        files.push(FileInfo { name, content });
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proofs::TreeFormat;
    use crate::storage::{FileService, FileStore};
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
        source: PathBuf,
        service: UploadService<FileService>,
    }

    fn fixture(files: &[(&str, &str)]) -> Fixture {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("source");
        std::fs::create_dir_all(&source).unwrap();
        for (name, content) in files {
            std::fs::write(source.join(name), content).unwrap();
        }

        let remote = FileService::new(FileStore::new(temp.path().join("store")), TreeFormat::Json);
        let service = UploadService::new(
            remote,
            RootRegistry::new(temp.path().join("roots")),
            temp.path().join("downloads"),
        );

        Fixture {
            _temp: temp,
            source,
            service,
        }
    }

    #[test]
    fn test_upload_records_local_root() {
        let fx = fixture(&[("b.txt", "bravo"), ("a.txt", "alpha")]);

        let receipt = fx.service.upload_dir(&fx.source).unwrap();

        let expected = MerkleTree::from_hashes(&[sha256(b"alpha"), sha256(b"bravo")])
            .unwrap()
            .root();
        assert_eq!(receipt.root, expected);
        assert_eq!(receipt.file_count, 2);
        assert_eq!(fx.service.roots().load(&receipt.key).unwrap(), expected);
        assert!(fx.source.exists());
    }

    #[test]
    fn test_download_writes_verified_file() {
        let fx = fixture(&[("a.txt", "alpha"), ("b.txt", "bravo"), ("c.txt", "charlie")]);
        let receipt = fx.service.upload_dir(&fx.source).unwrap();

        let file = fx.service.download(&receipt.key, 2).unwrap();

        assert_eq!(file.name, "c.txt");
        assert_eq!(file.content, b"charlie");
        let path = file.path.unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"charlie");
    }

    #[test]
    fn test_empty_dir_rejected() {
        let fx = fixture(&[]);
        assert!(matches!(
            fx.service.upload_dir(&fx.source),
            Err(ProofstoreError::NoFiles { .. })
        ));
    }

    #[test]
    fn test_remove_after_upload() {
        let fx = fixture(&[("a.txt", "alpha")]);
        let service = fx.service.with_remove_after_upload(true);

        service.upload_dir(&fx.source).unwrap();

        assert!(!fx.source.exists());
    }
}
