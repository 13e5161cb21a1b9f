//! # API Facade
//!
//! [`VaultApi`] is the action dispatcher: every user gesture comes in as a [`Gesture`],
//! is routed to its command, and mutating gestures come back with a freshly projected
//! [`PageView`](crate::view::PageView).
//!
//! The API holds the only mutable application state ([`AppState`]) together with the
//! repository, the download sink and the temporary object-url registry. Gestures are
//! handled one at a time (`&mut self`), which is the whole concurrency story: each
//! gesture runs to completion, awaits included, before the next one is looked at.
//!
//! ## Generic Over Storage
//!
//! `VaultApi<K, B, D>` is generic over the slot store, blob store and download sink:
//! - Production: `VaultApi<FileSlotStore, SqliteBlobStore, FsDownloadSink>`
//! - Testing: `VaultApi<InMemorySlotStore, InMemoryBlobStore, RecordingSink>`

use crate::catalog::default_day;
use crate::commands;
use crate::config::VaultConfig;
use crate::download::{DownloadSink, ObjectUrls};
use crate::error::Result;
use crate::model::{AppState, UploadFile};
use crate::store::repository::Repository;
use crate::store::{BlobStore, SlotStore};
use crate::view::{self, PageView};
use std::path::PathBuf;
use uuid::Uuid;

/// Everything a user can do.
#[derive(Debug, Clone)]
pub enum Gesture {
    SelectDay(String),
    OpenDay(String),
    OpenFile(Uuid),
    RemoveFile(Uuid),
    Upload {
        day_id: String,
        files: Vec<UploadFile>,
    },
    Doctor,
}

impl Gesture {
    fn name(&self) -> &'static str {
        match self {
            Gesture::SelectDay(_) => "select-day",
            Gesture::OpenDay(_) => "open-day",
            Gesture::OpenFile(_) => "open-file",
            Gesture::RemoveFile(_) => "remove-file",
            Gesture::Upload { .. } => "upload",
            Gesture::Doctor => "doctor",
        }
    }

    /// Whether the gesture can change what the views show.
    fn rerenders(&self) -> bool {
        !matches!(self, Gesture::OpenDay(_) | Gesture::OpenFile(_))
    }
}

pub struct VaultApi<K: SlotStore, B: BlobStore, D: DownloadSink> {
    repo: Repository<K, B>,
    state: AppState,
    config: VaultConfig,
    config_dir: PathBuf,
    sink: D,
    urls: ObjectUrls,
}

impl<K: SlotStore, B: BlobStore, D: DownloadSink> VaultApi<K, B, D> {
    pub fn new(repo: Repository<K, B>, config: VaultConfig, config_dir: PathBuf, sink: D) -> Self {
        let state = AppState::new(default_day().id, repo.list_records().to_vec());
        Self {
            repo,
            state,
            config,
            config_dir,
            sink,
            urls: ObjectUrls::new(),
        }
    }

    pub async fn dispatch(&mut self, gesture: Gesture) -> Result<commands::CmdResult> {
        let name = gesture.name();
        let rerenders = gesture.rerenders();

        let result = match gesture {
            Gesture::SelectDay(day_id) => commands::select::run(&mut self.state, &day_id)?,
            Gesture::OpenDay(day_id) => {
                commands::open_day::run(&self.repo, &self.state, &mut self.sink, &self.urls, &day_id)
                    .await?
            }
            Gesture::OpenFile(id) => {
                commands::open_file::run(&self.repo, &self.state, &mut self.sink, &self.urls, &id)
                    .await?
            }
            Gesture::RemoveFile(id) => {
                commands::remove::run(&mut self.repo, &mut self.state, &id).await?
            }
            Gesture::Upload { day_id, files } => {
                commands::upload::run(&mut self.repo, &mut self.state, &self.config, &day_id, files)
                    .await?
            }
            Gesture::Doctor => commands::doctor::run(&mut self.repo, &mut self.state).await?,
        };

        tracing::info!(gesture = name, messages = result.messages.len(), "gesture handled");
        Ok(if rerenders {
            result.with_page(self.page())
        } else {
            result
        })
    }

    pub fn page(&self) -> PageView {
        view::project(&self.state, self.config.quota_mb)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Reads or updates the stored configuration; updates apply to later gestures.
    pub fn config(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        let result = commands::config::run(&self.config_dir, action)?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    pub fn repository(&self) -> &Repository<K, B> {
        &self.repo
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::open_day::NO_DOCUMENTS_NOTICE;
    use crate::commands::open_file::NOT_FOUND_NOTICE;
    use crate::download::{Delivery, RecordingSink};
    use crate::store::memory::fixtures::upload;
    use crate::store::memory::InMemoryBlobStore;
    use crate::store::slot::InMemorySlotStore;
    use crate::store::BlobStore;

    type TestApi = VaultApi<InMemorySlotStore, InMemoryBlobStore, RecordingSink>;

    fn api() -> (tempfile::TempDir, TestApi) {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::open(InMemorySlotStore::new(), InMemoryBlobStore::new()).unwrap();
        let api = VaultApi::new(
            repo,
            VaultConfig::default(),
            dir.path().to_path_buf(),
            RecordingSink::new(),
        );
        (dir, api)
    }

    #[tokio::test]
    async fn starts_on_the_first_day() {
        let (_dir, api) = api();
        assert_eq!(api.state().selected_day_id, "seg");
        assert_eq!(api.page().repository.title, "Dia 1 · Segunda-feira");
    }

    #[tokio::test]
    async fn select_and_upload_day_three() {
        let (_dir, mut api) = api();

        api.dispatch(Gesture::SelectDay("qua".into())).await.unwrap();
        let result = api
            .dispatch(Gesture::Upload {
                day_id: "qua".into(),
                files: vec![upload("plan.pdf", 2_097_152)],
            })
            .await
            .unwrap();

        let page = result.page.unwrap();
        let card = page.cards.iter().find(|c| c.id == "qua").unwrap();
        assert_eq!(card.document_count, 1);
        assert_eq!(page.summary.total_size, "2.00 MB");
        assert_eq!(page.repository.title, "Dia 3 · Quarta-feira");
        assert_eq!(page.repository.files[0].name, "plan.pdf");
    }

    #[tokio::test]
    async fn open_gestures_do_not_rerender() {
        let (_dir, mut api) = api();
        let result = api.dispatch(Gesture::OpenDay("qui".into())).await.unwrap();
        assert!(result.page.is_none());
        assert_eq!(result.messages, vec![CmdMessage::warning(NO_DOCUMENTS_NOTICE)]);
    }

    #[tokio::test]
    async fn open_file_after_upload_delivers_bytes() {
        let (_dir, mut api) = api();
        api.dispatch(Gesture::Upload {
            day_id: "sex".into(),
            files: vec![upload("final.docx", 10)],
        })
        .await
        .unwrap();
        let id = api.state().records[0].id;

        let result = api.dispatch(Gesture::OpenFile(id)).await.unwrap();

        assert_eq!(result.deliveries, vec![Delivery::Saved("final.docx".into())]);
        assert_eq!(api.sink().clicks[0].1.as_ref().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn desynced_record_reports_not_found() {
        let (_dir, mut api) = api();
        api.dispatch(Gesture::Upload {
            day_id: "qua".into(),
            files: vec![upload("plan.pdf", 8)],
        })
        .await
        .unwrap();
        let id = api.state().records[0].id;
        api.repository().blobs().delete(&id).await.unwrap();

        let result = api.dispatch(Gesture::OpenFile(id)).await.unwrap();

        assert_eq!(result.messages, vec![CmdMessage::warning(NOT_FOUND_NOTICE)]);
        assert!(api.sink().clicks.is_empty());
    }

    #[tokio::test]
    async fn remove_updates_counts_and_storage() {
        let (_dir, mut api) = api();
        api.dispatch(Gesture::Upload {
            day_id: "ter".into(),
            files: vec![upload("a.txt", 5), upload("b.txt", 7)],
        })
        .await
        .unwrap();
        let id = api.state().records[0].id;

        let result = api.dispatch(Gesture::RemoveFile(id)).await.unwrap();

        let page = result.page.unwrap();
        assert_eq!(page.summary.total_docs, 1);
        assert_eq!(page.summary.total_bytes, 7);
        assert_eq!(api.repository().get_blob(&id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn config_round_trips_through_the_api() {
        let (_dir, mut api) = api();
        api.config(ConfigAction::Set("quota-mb".into(), "300".into()))
            .unwrap();
        let shown = api.config(ConfigAction::ShowAll).unwrap();
        assert_eq!(shown.config.unwrap().quota_mb, 300);
        assert_eq!(api.page().summary.storage_text, "0.00 MB de 300 MB");
    }
}
