use crate::catalog::day_by_id;
use crate::commands::{CmdMessage, CmdResult};
use crate::config::VaultConfig;
use crate::error::{Result, VaultError};
use crate::model::{AppState, UploadFile};
use crate::store::repository::Repository;
use crate::store::{BlobStore, SlotStore};
use chrono::{DateTime, Local};
use std::fmt::Write;

/// Stores `files` under `day_id`, newest batch first in the listing.
///
/// Every file of the batch shares one timestamp. An empty batch changes nothing.
pub async fn run<K: SlotStore, B: BlobStore>(
    repo: &mut Repository<K, B>,
    state: &mut AppState,
    config: &VaultConfig,
    day_id: &str,
    files: Vec<UploadFile>,
) -> Result<CmdResult> {
    let day = day_by_id(day_id).ok_or_else(|| VaultError::UnknownDay(day_id.to_string()))?;
    let mut result = CmdResult::default();

    if files.is_empty() {
        result.add_message(CmdMessage::info("No files selected."));
        return Ok(result);
    }

    if config.enforce_quota {
        let used = state.total_bytes();
        let incoming: u64 = files.iter().map(UploadFile::size).sum();
        if used.saturating_add(incoming) > config.quota_bytes() {
            return Err(VaultError::QuotaExceeded {
                used,
                incoming,
                quota_mb: config.quota_mb,
            });
        }
    }

    let uploaded_at = format_timestamp(Local::now(), &config.timestamp_format);
    let added = repo.add_records(day.id, files, &uploaded_at).await?;
    state.records = repo.list_records().to_vec();

    for record in &added {
        result.add_message(CmdMessage::success(format!(
            "Uploaded to {}: {}",
            day.label, record.name
        )));
    }
    Ok(result.with_affected_records(added))
}

/// Formats `now` with a chrono format string, falling back to the default format
/// when the configured one is invalid.
pub fn format_timestamp(now: DateTime<Local>, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", now.format(format)).is_ok() {
        return out;
    }
    tracing::warn!(format, "invalid timestamp format, using the default");
    let fallback = VaultConfig::default().timestamp_format;
    now.format(&fallback).to_string()
}
