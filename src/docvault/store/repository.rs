//! One interface over the metadata slot and the blob store.
//!
//! Write ordering:
//! - upload: blobs are stored first, one at a time; metadata is persisted only once
//!   every blob of the batch is in. A failure at any step undoes the batch.
//! - removal: the blob is deleted first; the record is dropped (and metadata
//!   persisted) only once the blob is gone. A failed blob delete leaves both intact.

use super::metadata::MetadataStore;
use super::{BlobStore, DoctorReport, SlotStore};
use crate::error::Result;
use crate::model::{FileRecord, UploadFile};
use std::collections::HashSet;
use uuid::Uuid;

pub struct Repository<K: SlotStore, B: BlobStore> {
    metadata: MetadataStore<K>,
    blobs: B,
}

impl<K: SlotStore, B: BlobStore> Repository<K, B> {
    pub fn open(slots: K, blobs: B) -> Result<Self> {
        Ok(Self {
            metadata: MetadataStore::open(slots)?,
            blobs,
        })
    }

    /// All records, newest first.
    pub fn list_records(&self) -> &[FileRecord] {
        self.metadata.records()
    }

    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    pub fn metadata(&self) -> &MetadataStore<K> {
        &self.metadata
    }

    /// Stores each file's content, then prepends the new records and persists them.
    ///
    /// Files are written sequentially in the given order and end up listed in that
    /// order ahead of everything already stored. Returns the new records.
    pub async fn add_records(
        &mut self,
        day_id: &str,
        files: Vec<UploadFile>,
        uploaded_at: &str,
    ) -> Result<Vec<FileRecord>> {
        let mut prepared = Vec::with_capacity(files.len());

        for file in &files {
            let record = FileRecord::new(day_id, file, uploaded_at);
            if let Err(err) = self.blobs.put(&record.id, &file.content).await {
                self.discard_blobs(&prepared).await;
                return Err(err);
            }
            prepared.push(record);
        }

        self.metadata.add(prepared.clone());
        if let Err(err) = self.metadata.save() {
            for record in &prepared {
                self.metadata.remove(&record.id);
            }
            self.discard_blobs(&prepared).await;
            return Err(err);
        }

        tracing::info!(day_id, count = prepared.len(), "files added");
        Ok(prepared)
    }

    /// Deletes the blob, then the record. Unknown ids are not an error.
    pub async fn remove_record(&mut self, id: &Uuid) -> Result<Option<FileRecord>> {
        self.blobs.delete(id).await?;

        let Some(index) = self.metadata.position(id) else {
            return Ok(None);
        };
        let record = self.metadata.remove_at(index);
        if let Err(err) = self.metadata.save() {
            // The blob is already gone; keep memory in line with what is on disk.
            self.metadata.insert(index, record);
            return Err(err);
        }
        tracing::info!(%id, name = %record.name, "file removed");
        Ok(Some(record))
    }

    pub async fn get_blob(&self, id: &Uuid) -> Result<Option<Vec<u8>>> {
        self.blobs.get(id).await
    }

    /// Drops records whose blob is missing and deletes blobs no record points to.
    pub async fn doctor(&mut self) -> Result<DoctorReport> {
        let stored: HashSet<Uuid> = self.blobs.keys().await?.into_iter().collect();
        let known: HashSet<Uuid> = self.metadata.records().iter().map(|r| r.id).collect();

        let mut report = DoctorReport::default();

        let mut dropped = Vec::new();
        for id in known.difference(&stored) {
            if let Some(index) = self.metadata.position(id) {
                dropped.push((index, self.metadata.remove_at(index)));
            }
        }
        if !dropped.is_empty() {
            if let Err(err) = self.metadata.save() {
                for (index, record) in dropped.into_iter().rev() {
                    self.metadata.insert(index, record);
                }
                return Err(err);
            }
            report.dropped_records = dropped.len();
        }

        for id in stored.difference(&known) {
            self.blobs.delete(id).await?;
            report.deleted_orphan_blobs += 1;
        }

        Ok(report)
    }

    async fn discard_blobs(&self, records: &[FileRecord]) {
        for record in records {
            if let Err(err) = self.blobs.delete(&record.id).await {
                tracing::warn!(id = %record.id, %err, "could not roll back stored blob");
            }
        }
    }
}
