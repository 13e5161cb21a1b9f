//! # Storage Layer
//!
//! docvault keeps metadata and content in two independent backends, mirroring how the
//! tool has always stored things:
//!
//! - A **slot store** ([`SlotStore`]): synchronous, string-keyed, string-valued. The whole
//!   file index lives in one slot as a JSON array (see [`metadata::MetadataStore`]).
//! - A **blob store** ([`BlobStore`]): asynchronous, transactional, keyed by record id,
//!   holding raw file bytes.
//!
//! Nothing outside this module talks to either backend directly. The
//! [`repository::Repository`] wraps both and owns the write ordering that keeps them in
//! sync (blob first on upload and on removal, metadata persisted last).
//!
//! ## Implementations
//!
//! - [`slot::FileSlotStore`]: one `<key>.json` file per slot, written atomically
//! - [`slot::InMemorySlotStore`]: for tests
//! - [`blob::SqliteBlobStore`]: SQLite database, one `files` table, versioned schema
//! - [`memory::InMemoryBlobStore`]: for tests, with failure injection
//!
//! ## Storage Format
//!
//! ```text
//! <data-dir>/
//! ├── local-storage/
//! │   └── vaultTreinamentoDocs.json   # JSON array of file records
//! ├── vaultTreinamentoDB.sqlite       # blob content, PRAGMA user_version = 1
//! └── config.json
//! ```

use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

pub mod blob;
pub mod memory;
pub mod metadata;
pub mod repository;
pub mod slot;

/// Synchronous string key-value storage.
pub trait SlotStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the slot content in a single write.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// Asynchronous blob storage keyed by file record id.
///
/// Every call is self-contained; implementations must not rely on state carried
/// between calls.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store (or replace) the content for `id`.
    async fn put(&self, id: &Uuid, blob: &[u8]) -> Result<()>;

    /// Fetch the content for `id`, `None` if nothing is stored.
    async fn get(&self, id: &Uuid) -> Result<Option<Vec<u8>>>;

    /// Remove the content for `id`. Removing a missing id is not an error.
    async fn delete(&self, id: &Uuid) -> Result<()>;

    /// All ids currently holding content.
    async fn keys(&self) -> Result<Vec<Uuid>>;
}

/// Report from the `doctor` operation.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DoctorReport {
    pub dropped_records: usize,
    pub deleted_orphan_blobs: usize,
}
