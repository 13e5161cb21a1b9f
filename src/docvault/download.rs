//! Temporary blob references and the place downloads end up.
//!
//! A download is modelled as a [`Link`] being "clicked": the link's `href` is either a
//! temporary object reference minted by [`ObjectUrls`] (for stored content) or an
//! external URL (for slide decks hosted elsewhere). A [`DownloadSink`] decides what a
//! click means for the host: the CLI writes object references into a folder and
//! reports external URLs back to the user.

use crate::error::{Result, VaultError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// How long a temporary reference stays resolvable after it was handed out.
pub const OBJECT_URL_LIFETIME: Duration = Duration::from_secs(60);

/// Name used when a record carries no usable file name.
pub const FALLBACK_FILE_NAME: &str = "documento";

const OBJECT_URL_SCHEME: &str = "blob:docvault/";

/// Registry of temporary references to in-memory blobs.
///
/// Cloning shares the registry.
#[derive(Clone, Default)]
pub struct ObjectUrls {
    live: Arc<Mutex<HashMap<String, Arc<Vec<u8>>>>>,
}

impl ObjectUrls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, blob: Vec<u8>) -> String {
        let url = format!("{}{}", OBJECT_URL_SCHEME, Uuid::new_v4());
        self.lock().insert(url.clone(), Arc::new(blob));
        url
    }

    pub fn resolve(&self, url: &str) -> Option<Arc<Vec<u8>>> {
        self.lock().get(url).cloned()
    }

    pub fn revoke(&self, url: &str) -> bool {
        self.lock().remove(url).is_some()
    }

    /// Revokes `url` once `delay` has elapsed, whatever happened to the download.
    pub fn revoke_after(&self, url: String, delay: Duration) -> JoinHandle<()> {
        let urls = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if urls.revoke(&url) {
                tracing::debug!(%url, "object url released");
            }
        })
    }

    pub fn is_object_url(href: &str) -> bool {
        href.starts_with(OBJECT_URL_SCHEME)
    }

    pub fn live_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<Vec<u8>>>> {
        // A poisoned map still holds valid entries.
        self.live.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// An anchor with a `download` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub file_name: String,
}

impl Link {
    pub fn new(href: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            file_name: file_name.into(),
        }
    }
}

/// What a clicked link turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Content written to a local file.
    Saved(PathBuf),
    /// The host was sent to an external address.
    Navigated(String),
}

pub trait DownloadSink {
    fn click(&mut self, link: &Link, urls: &ObjectUrls) -> Result<Delivery>;
}

/// Writes object-url downloads into a directory; external links are handed back
/// untouched for the caller to show.
pub struct FsDownloadSink {
    dir: PathBuf,
}

impl FsDownloadSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn target_path(&self, file_name: &str) -> PathBuf {
        // Only the final component: stored names must never escape the folder.
        let name = Path::new(file_name)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| FALLBACK_FILE_NAME.into());
        self.dir.join(name)
    }
}

impl DownloadSink for FsDownloadSink {
    fn click(&mut self, link: &Link, urls: &ObjectUrls) -> Result<Delivery> {
        if !ObjectUrls::is_object_url(&link.href) {
            return Ok(Delivery::Navigated(link.href.clone()));
        }

        let blob = urls
            .resolve(&link.href)
            .ok_or_else(|| VaultError::Store(format!("Object url was revoked: {}", link.href)))?;

        std::fs::create_dir_all(&self.dir).map_err(VaultError::Io)?;
        let path = self.target_path(&link.file_name);
        std::fs::write(&path, blob.as_slice()).map_err(VaultError::Io)?;
        Ok(Delivery::Saved(path))
    }
}

/// Records clicks and the bytes behind them.
#[cfg(any(test, feature = "test_utils"))]
#[derive(Default)]
pub struct RecordingSink {
    pub clicks: Vec<(Link, Option<Vec<u8>>)>,
}

#[cfg(any(test, feature = "test_utils"))]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(any(test, feature = "test_utils"))]
impl DownloadSink for RecordingSink {
    fn click(&mut self, link: &Link, urls: &ObjectUrls) -> Result<Delivery> {
        let bytes = urls.resolve(&link.href).map(|b| b.as_ref().clone());
        let delivery = if bytes.is_some() {
            Delivery::Saved(PathBuf::from(&link.file_name))
        } else {
            Delivery::Navigated(link.href.clone())
        };
        self.clicks.push((link.clone(), bytes));
        Ok(delivery)
    }
}
