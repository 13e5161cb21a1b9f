use super::SlotStore;
use crate::error::{Result, VaultError};
use crate::model::FileRecord;
use uuid::Uuid;

/// Slot that holds the serialized file index.
pub const STORAGE_KEY: &str = "vaultTreinamentoDocs";

/// The ordered list of file records, newest first, persisted as one JSON array.
///
/// `add` and `remove` only touch the in-memory list; `save` writes the full list
/// back to the slot.
pub struct MetadataStore<K: SlotStore> {
    slots: K,
    records: Vec<FileRecord>,
}

impl<K: SlotStore> MetadataStore<K> {
    /// Opens the store and loads whatever the slot currently holds.
    pub fn open(slots: K) -> Result<Self> {
        let mut store = Self {
            slots,
            records: Vec::new(),
        };
        store.records = store.load()?;
        Ok(store)
    }

    /// Reads the slot. Absent or malformed content yields an empty list.
    pub fn load(&self) -> Result<Vec<FileRecord>> {
        let Some(raw) = self.slots.get_item(STORAGE_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(err) => {
                tracing::warn!(%err, "file index is malformed, starting with an empty index");
                Ok(Vec::new())
            }
        }
    }

    pub fn save(&mut self) -> Result<()> {
        let content = serde_json::to_string(&self.records).map_err(VaultError::Serialization)?;
        self.slots.set_item(STORAGE_KEY, &content)
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    /// Prepends `new_records`, keeping their relative order.
    pub fn add(&mut self, new_records: Vec<FileRecord>) {
        self.records.splice(0..0, new_records);
    }

    /// Drops the record with `id`, returning it. Missing ids are a no-op.
    pub fn remove(&mut self, id: &Uuid) -> Option<FileRecord> {
        let pos = self.position(id)?;
        Some(self.remove_at(pos))
    }

    pub fn position(&self, id: &Uuid) -> Option<usize> {
        self.records.iter().position(|r| &r.id == id)
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> FileRecord {
        self.records.remove(index)
    }

    pub(crate) fn insert(&mut self, index: usize, record: FileRecord) {
        self.records.insert(index, record);
    }

    pub fn slots(&self) -> &K {
        &self.slots
    }
}
