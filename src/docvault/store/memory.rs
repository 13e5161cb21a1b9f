use super::BlobStore;
use crate::error::{Result, VaultError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory blob storage for testing and development.
/// Does NOT persist data.
///
/// Failures can be injected to exercise the rollback paths of the repository:
/// [`fail_puts_after`](Self::fail_puts_after) lets a number of puts succeed and
/// fails the rest, [`fail_deletes`](Self::fail_deletes) fails every delete.
#[derive(Default)]
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<Uuid, Vec<u8>>>,
    puts_left: Option<AtomicUsize>,
    fail_deletes: AtomicBool,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_puts_after(mut self, successful_puts: usize) -> Self {
        self.puts_left = Some(AtomicUsize::new(successful_puts));
        self
    }

    pub fn fail_deletes(self) -> Self {
        self.fail_deletes.store(true, Ordering::SeqCst);
        self
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(&self, id: &Uuid, blob: &[u8]) -> Result<()> {
        if let Some(left) = &self.puts_left {
            let allowed = left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if !allowed {
                return Err(VaultError::Store("simulated put failure".into()));
            }
        }
        self.blobs.write().await.insert(*id, blob.to_vec());
        Ok(())
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Vec<u8>>> {
        Ok(self.blobs.read().await.get(id).cloned())
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(VaultError::Store("simulated delete failure".into()));
        }
        self.blobs.write().await.remove(id);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<Uuid>> {
        Ok(self.blobs.read().await.keys().copied().collect())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use crate::error::Result;
    use crate::model::UploadFile;
    use crate::store::repository::Repository;
    use crate::store::slot::InMemorySlotStore;

    use super::InMemoryBlobStore;

    pub type MemoryRepository = Repository<InMemorySlotStore, InMemoryBlobStore>;

    pub fn upload(name: &str, size: usize) -> UploadFile {
        let mime = mime_guess::from_path(name)
            .first()
            .map(|m| m.to_string())
            .unwrap_or_default();
        UploadFile::new(name, mime, vec![b'x'; size])
    }

    pub struct RepoFixture {
        pub repo: MemoryRepository,
    }

    impl RepoFixture {
        pub fn new() -> Self {
            Self::with_blobs(InMemoryBlobStore::new())
        }

        pub fn with_blobs(blobs: InMemoryBlobStore) -> Self {
            Self {
                repo: Repository::open(InMemorySlotStore::new(), blobs)
                    .expect("in-memory repository opens"),
            }
        }

        /// Uploads one file per name into `day_id`, as a single batch.
        pub async fn with_files(mut self, day_id: &str, names: &[&str]) -> Result<Self> {
            let files = names.iter().map(|n| upload(n, 16)).collect();
            self.repo.add_records(day_id, files, "01/01/2026, 09:00:00").await?;
            Ok(self)
        }
    }

    impl Default for RepoFixture {
        fn default() -> Self {
            Self::new()
        }
    }
}
