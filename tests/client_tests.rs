//! Client upload and verified download tests

use anyhow::Result;
use pretty_assertions::assert_eq;
use proofstore::client::{Remote, RootRegistry, UploadService};
use proofstore::core::{hash::sha256, types::*};
use proofstore::proofs::TreeFormat;
use proofstore::storage::{FileService, FileStore};
use proofstore::ProofstoreError;
use std::cell::Cell;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test workspace holding a source directory, a store, and client state
struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    fn new(files: &[(&str, &[u8])]) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let source = temp_dir.path().join("source");
        std::fs::create_dir_all(&source)?;
        for (name, content) in files {
            std::fs::write(source.join(name), content)?;
        }
        Ok(Self { temp_dir })
    }

    fn source(&self) -> PathBuf {
        self.temp_dir.path().join("source")
    }

    fn store_dir(&self) -> PathBuf {
        self.temp_dir.path().join("store")
    }

    fn downloads(&self) -> PathBuf {
        self.temp_dir.path().join("downloads")
    }

    fn file_service(&self) -> FileService {
        FileService::new(FileStore::new(self.store_dir()), TreeFormat::Json)
    }

    fn client<R: Remote>(&self, remote: R) -> UploadService<R> {
        UploadService::new(
            remote,
            RootRegistry::new(self.temp_dir.path().join("roots")),
            self.downloads(),
        )
    }
}

const FILES: &[(&str, &[u8])] = &[
    ("a.txt", b"first file" as &[u8]),
    ("b.txt", b"second file" as &[u8]),
    ("c.txt", b"third file" as &[u8]),
    ("d.txt", b"fourth file" as &[u8]),
    ("e.txt", b"fifth file" as &[u8]),
    ("f.txt", b"sixth file" as &[u8]),
    ("g.txt", b"seventh file" as &[u8]),
];

#[test]
fn test_upload_then_download_every_file() -> Result<()> {
    let ws = TestWorkspace::new(FILES)?;
    let client = ws.client(ws.file_service());

    let receipt = client.upload_dir(&ws.source())?;
    assert_eq!(receipt.file_count, FILES.len());

    for (index, (name, content)) in FILES.iter().enumerate() {
        let file = client.download(&receipt.key, index)?;
        assert_eq!(file.name, *name);
        assert_eq!(file.content, *content);
        assert_eq!(std::fs::read(ws.downloads().join(name))?, *content);
    }

    Ok(())
}

#[test]
fn test_modified_stored_file_fails_verification() -> Result<()> {
    let ws = TestWorkspace::new(FILES)?;
    let client = ws.client(ws.file_service());
    let receipt = client.upload_dir(&ws.source())?;

    std::fs::write(
        ws.store_dir().join(receipt.key.as_str()).join("c.txt"),
        b"tampered",
    )?;

    assert!(matches!(
        client.download(&receipt.key, 2),
        Err(ProofstoreError::VerificationFailed { index: 2, .. })
    ));
    assert!(!ws.downloads().join("c.txt").exists());

    // Other files are still served correctly.
    assert_eq!(client.download(&receipt.key, 3)?.content, b"fourth file");

    Ok(())
}

#[test]
fn test_store_cannot_substitute_a_consistent_new_set() -> Result<()> {
    let ws = TestWorkspace::new(FILES)?;
    let service = ws.file_service();
    let client = ws.client(&service);
    let receipt = client.upload_dir(&ws.source())?;

    // A store replacing the whole set rebuilds a self-consistent tree...
    service.store_files(
        Some(receipt.key.clone()),
        vec![FileInfo::new("a.txt", "forged"), FileInfo::new("b.txt", "set")],
    )?;

    // ...which still does not match the root the client recorded.
    assert!(matches!(
        client.fetch_verified(&receipt.key, 0),
        Err(ProofstoreError::VerificationFailed { .. })
    ));

    Ok(())
}

#[test]
fn test_download_without_recorded_root() -> Result<()> {
    let ws = TestWorkspace::new(FILES)?;
    let service = ws.file_service();
    let key = service.store_files(None, vec![FileInfo::new("x", "y")])?;

    let client = ws.client(&service);
    assert!(matches!(
        client.download(&key, 0),
        Err(ProofstoreError::RootNotFound { .. })
    ));

    Ok(())
}

/// Remote that serves a fixed file and proof and counts requests
struct ScriptedRemote {
    name: String,
    content: Vec<u8>,
    proof: Vec<Hash>,
    requests: Cell<usize>,
}

impl Remote for ScriptedRemote {
    fn upload(&self, _files: Vec<FileInfo>) -> proofstore::Result<StoreKey> {
        Ok(StoreKey::parse("scripted").unwrap())
    }

    fn fetch_file(&self, _key: &StoreKey, _index: usize) -> proofstore::Result<(Vec<u8>, String)> {
        self.requests.set(self.requests.get() + 1);
        Ok((self.content.clone(), self.name.clone()))
    }

    fn fetch_proof(&self, _key: &StoreKey, _index: usize) -> proofstore::Result<Vec<Hash>> {
        self.requests.set(self.requests.get() + 1);
        Ok(self.proof.clone())
    }
}

#[test]
fn test_hostile_file_name_is_not_written() -> Result<()> {
    let ws = TestWorkspace::new(&[("only.txt", &b"payload"[..])])?;
    let remote = ScriptedRemote {
        name: "../escape.txt".to_string(),
        content: b"payload".to_vec(),
        proof: Vec::new(),
        requests: Cell::new(0),
    };
    let client = ws.client(remote);

    let receipt = client.upload_dir(&ws.source())?;
    assert_eq!(receipt.root, sha256(b"payload"));

    // The proof is valid, but the name would escape the downloads directory.
    assert!(client.fetch_verified(&receipt.key, 0).is_ok());
    assert!(matches!(
        client.download(&receipt.key, 0),
        Err(ProofstoreError::InvalidFileName { .. })
    ));
    assert!(!ws.temp_dir.path().join("escape.txt").exists());
    assert_eq!(client.remote().requests.get(), 4);

    Ok(())
}

#[test]
fn test_unsafe_names_from_remote_are_refused() -> Result<()> {
    for name in ["nul\0.txt", "..", ".", "dir\\file", ""] {
        let ws = TestWorkspace::new(&[("only.txt", &b"payload"[..])])?;
        let client = ws.client(ScriptedRemote {
            name: name.to_string(),
            content: b"payload".to_vec(),
            proof: Vec::new(),
            requests: Cell::new(0),
        });
        let receipt = client.upload_dir(&ws.source())?;

        assert!(
            matches!(
                client.download(&receipt.key, 0),
                Err(ProofstoreError::InvalidFileName { .. })
            ),
            "{:?} should be refused",
            name
        );
        assert!(!ws.downloads().exists());
    }

    Ok(())
}

#[test]
fn test_upload_ignores_subdirectories() -> Result<()> {
    let ws = TestWorkspace::new(&[("top.txt", &b"top"[..])])?;
    let nested = ws.source().join("nested");
    std::fs::create_dir_all(&nested)?;
    std::fs::write(nested.join("inner.txt"), b"inner")?;

    let client = ws.client(ws.file_service());
    let receipt = client.upload_dir(&ws.source())?;

    assert_eq!(receipt.file_count, 1);
    assert_eq!(receipt.root, sha256(b"top"));

    Ok(())
}

#[test]
fn test_upload_missing_directory() {
    let ws = TestWorkspace::new(&[]).unwrap();
    let client = ws.client(ws.file_service());

    assert!(client.upload_dir(Path::new("/definitely/not/here")).is_err());
}
