//! Core data types for proofstore

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length in bytes of every digest in the system
pub const HASH_LEN: usize = 32;

/// 32-byte SHA-256 digest
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash([u8; HASH_LEN]);

impl Hash {
    /// Create a Hash from a 32-byte array
    pub fn from_bytes(bytes: [u8; HASH_LEN]) -> Self {
        Hash(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }

    /// Create a Hash from a hex string
    pub fn from_hex(hex: &str) -> Result<Self, hex::FromHexError> {
        let mut array = [0u8; HASH_LEN];
        hex::decode_to_slice(hex.trim(), &mut array)?;
        Ok(Hash(array))
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Create a zero hash (for testing and special cases)
    pub fn zero() -> Self {
        Hash([0u8; HASH_LEN])
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", &hex::encode(self.0)[..8])
    }
}

impl From<[u8; HASH_LEN]> for Hash {
    fn from(bytes: [u8; HASH_LEN]) -> Self {
        Hash(bytes)
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Hash {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash::from_hex(s)
    }
}

// Custom serialization to use hex strings instead of byte arrays
impl Serialize for Hash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let hex_string = String::deserialize(deserializer)?;
            Hash::from_hex(&hex_string).map_err(serde::de::Error::custom)
        } else {
            <[u8; HASH_LEN]>::deserialize(deserializer).map(Hash)
        }
    }
}

/// Root digest of an uploaded file set
pub type RootHash = Hash;

/// Opaque handle under which a file set is stored
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StoreKey(String);

impl StoreKey {
    /// Generate a fresh random key
    pub fn generate() -> Self {
        StoreKey(uuid::Uuid::new_v4().to_string())
    }

    /// Wrap an existing key, rejecting anything that is not a single path component
    pub fn parse(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        is_valid_key(&key).then_some(StoreKey(key))
    }

    /// Wrap a key without checking it
    #[cfg(test)]
    pub(crate) fn new_unchecked(key: impl Into<String>) -> Self {
        StoreKey(key.into())
    }

    /// Whether the key is still a single safe path component
    pub fn is_valid(&self) -> bool {
        is_valid_key(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key != "."
        && key != ".."
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

// Keys read from proof documents go through the same check as keys typed by hand
impl<'de> Deserialize<'de> for StoreKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let key = String::deserialize(deserializer)?;
        StoreKey::parse(key.as_str())
            .ok_or_else(|| serde::de::Error::custom(format!("invalid store key: {:?}", key)))
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<std::path::Path> for StoreKey {
    fn as_ref(&self) -> &std::path::Path {
        std::path::Path::new(&self.0)
    }
}

/// A named file payload travelling between client and store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// File name (a single path component)
    pub name: String,
    /// Raw file contents
    pub content: Vec<u8>,
}

impl FileInfo {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}
