use crate::commands::{CmdMessage, CmdResult};
use crate::download::{DownloadSink, Link, ObjectUrls, FALLBACK_FILE_NAME, OBJECT_URL_LIFETIME};
use crate::error::Result;
use crate::model::AppState;
use crate::store::repository::Repository;
use crate::store::{BlobStore, SlotStore};
use uuid::Uuid;

pub const NOT_FOUND_NOTICE: &str = "Arquivo não encontrado no armazenamento local.";

/// Downloads the stored content of file `id`.
pub async fn run<K: SlotStore, B: BlobStore, D: DownloadSink>(
    repo: &Repository<K, B>,
    state: &AppState,
    sink: &mut D,
    urls: &ObjectUrls,
    id: &Uuid,
) -> Result<CmdResult> {
    let name = state.record(id).map(|r| r.name.as_str());
    download(repo, sink, urls, id, name).await
}

/// Hands the blob for `id` to the sink under `file_name`.
///
/// A missing blob is reported as a notice, not an error. The temporary reference is
/// released after [`OBJECT_URL_LIFETIME`] no matter how the click went.
pub async fn download<K: SlotStore, B: BlobStore, D: DownloadSink>(
    repo: &Repository<K, B>,
    sink: &mut D,
    urls: &ObjectUrls,
    id: &Uuid,
    file_name: Option<&str>,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let Some(blob) = repo.get_blob(id).await? else {
        tracing::warn!(%id, "download requested for a file without stored content");
        result.add_message(CmdMessage::warning(NOT_FOUND_NOTICE));
        return Ok(result);
    };

    let file_name = file_name
        .filter(|n| !n.is_empty())
        .unwrap_or(FALLBACK_FILE_NAME);
    let href = urls.create(blob);
    let clicked = sink.click(&Link::new(href.clone(), file_name), urls);
    urls.revoke_after(href, OBJECT_URL_LIFETIME);

    result.deliveries.push(clicked?);
    result.add_message(CmdMessage::success(format!("Downloaded {}", file_name)));
    Ok(result)
}
