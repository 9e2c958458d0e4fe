//! Client side of proofstore
//!
//! The client uploads a directory, keeps the merkle root of what it sent,
//! and later accepts a single file from the store only if the store's
//! inclusion proof recomputes that root.

pub mod remote;
pub mod roots;
pub mod upload;

// Re-export commonly used items
pub use remote::Remote;
pub use roots::RootRegistry;
pub use upload::{UploadReceipt, UploadService, VerifiedFile};
