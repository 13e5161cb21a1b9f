use crate::catalog::{day_by_id, drive_download_url, EXTERNAL_DOWNLOAD_NAME};
use crate::commands::{open_file, CmdMessage, CmdResult};
use crate::download::{DownloadSink, Link, ObjectUrls};
use crate::error::{Result, VaultError};
use crate::model::AppState;
use crate::store::repository::Repository;
use crate::store::{BlobStore, SlotStore};

pub const NO_DOCUMENTS_NOTICE: &str = "Este dia ainda não possui documentos para abrir.";

/// Opens a day's primary material.
///
/// Days with an external slide deck download its pptx export. Other days download
/// their most recent upload, or raise a notice when they have none.
pub async fn run<K: SlotStore, B: BlobStore, D: DownloadSink>(
    repo: &Repository<K, B>,
    state: &AppState,
    sink: &mut D,
    urls: &ObjectUrls,
    day_id: &str,
) -> Result<CmdResult> {
    let day = day_by_id(day_id).ok_or_else(|| VaultError::UnknownDay(day_id.to_string()))?;

    if let Some(drive_url) = day.drive_url {
        let link = Link::new(drive_download_url(drive_url), EXTERNAL_DOWNLOAD_NAME);
        let delivery = sink.click(&link, urls)?;
        let mut result = CmdResult::default();
        result.deliveries.push(delivery);
        result.add_message(CmdMessage::success(format!(
            "{} material: {}",
            day.label, link.href
        )));
        return Ok(result);
    }

    let Some(latest) = state.latest_for_day(day.id) else {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::warning(NO_DOCUMENTS_NOTICE));
        return Ok(result);
    };

    open_file::download(repo, sink, urls, &latest.id, Some(&latest.name)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::{Delivery, RecordingSink};
    use crate::store::memory::fixtures::{upload, RepoFixture};

    #[tokio::test]
    async fn linked_day_follows_the_export_link() {
        let fx = RepoFixture::new();
        let state = AppState::new("ter", vec![]);
        let mut sink = RecordingSink::new();

        let result = run(&fx.repo, &state, &mut sink, &ObjectUrls::new(), "ter")
            .await
            .unwrap();

        let expected =
            "https://docs.google.com/presentation/d/16ZtCLSF5vaskonP92cXY8TlMX5tbRb4Y/export/pptx";
        assert_eq!(result.deliveries, vec![Delivery::Navigated(expected.into())]);
        let (link, bytes) = &sink.clicks[0];
        assert_eq!(link.file_name, EXTERNAL_DOWNLOAD_NAME);
        assert!(bytes.is_none());
    }

    #[tokio::test]
    async fn plain_day_downloads_latest_upload() {
        let mut fx = RepoFixture::new().with_files("qua", &["first.txt"]).await.unwrap();
        fx.repo
            .add_records("qua", vec![upload("second.txt", 3)], "t")
            .await
            .unwrap();
        let state = AppState::new("seg", fx.repo.list_records().to_vec());
        let mut sink = RecordingSink::new();

        run(&fx.repo, &state, &mut sink, &ObjectUrls::new(), "qua")
            .await
            .unwrap();

        assert_eq!(sink.clicks.len(), 1);
        assert_eq!(sink.clicks[0].0.file_name, "second.txt");
    }

    #[tokio::test]
    async fn empty_day_raises_notice() {
        let fx = RepoFixture::new();
        let state = AppState::new("qui", vec![]);
        let mut sink = RecordingSink::new();

        let result = run(&fx.repo, &state, &mut sink, &ObjectUrls::new(), "qui")
            .await
            .unwrap();

        assert_eq!(result.messages, vec![CmdMessage::warning(NO_DOCUMENTS_NOTICE)]);
        assert!(sink.clicks.is_empty());
    }

    #[tokio::test]
    async fn unknown_day_is_an_error() {
        let fx = RepoFixture::new();
        let state = AppState::new("seg", vec![]);
        let result = run(&fx.repo, &state, &mut RecordingSink::new(), &ObjectUrls::new(), "dom").await;
        assert!(matches!(result, Err(VaultError::UnknownDay(_))));
    }
}
