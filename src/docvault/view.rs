//! # View Projector
//!
//! Pure functions from [`AppState`] to serializable view models. Nothing here performs
//! I/O or touches a store; front ends (the CLI templates, or anything else) only ever
//! see these structures.
//!
//! Four regions are projected:
//! - the day navigation, highlighting the selected day
//! - one summary card per day with its document count
//! - the file list of the selected day
//! - the aggregate usage against the quota

use crate::catalog::{current_day, TRAINING_DAYS};
use crate::model::{AppState, FileRecord};
use serde::Serialize;

pub const UNKNOWN_TYPE_LABEL: &str = "Tipo não identificado";
pub const EXTERNAL_RESOURCE_LABEL: &str = "Material oficial no Google Drive";

const MIB: f64 = 1024.0 * 1024.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayNavItem {
    pub id: String,
    pub label: String,
    pub name: String,
    pub training: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCard {
    pub id: String,
    pub label: String,
    pub training: String,
    pub document_count: usize,
    pub has_external_resource: bool,
    /// A day with an external resource can always be opened.
    pub open_disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileEntry {
    pub id: String,
    pub name: String,
    pub type_label: String,
    pub size_label: String,
    pub uploaded_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryView {
    pub title: String,
    pub empty: bool,
    pub files: Vec<FileEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    pub total_docs: usize,
    pub total_bytes: u64,
    pub total_size: String,
    /// Share of the quota in use, capped at 100.
    pub percent: f64,
    pub storage_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub nav: Vec<DayNavItem>,
    pub cards: Vec<DayCard>,
    pub repository: RepositoryView,
    pub summary: SummaryView,
}

/// `bytes` as mebibytes with two decimals, e.g. `2.00 MB`.
pub fn format_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / MIB)
}

pub fn usage_percent(total_bytes: u64, quota_mb: u64) -> f64 {
    let quota = quota_mb as f64 * MIB;
    if quota <= 0.0 {
        return 100.0;
    }
    (total_bytes as f64 / quota * 100.0).min(100.0)
}

pub fn project_nav(state: &AppState) -> Vec<DayNavItem> {
    TRAINING_DAYS
        .iter()
        .map(|day| DayNavItem {
            id: day.id.to_string(),
            label: day.label.to_string(),
            name: day.name.to_string(),
            training: day.training.to_string(),
            active: day.id == state.selected_day_id,
        })
        .collect()
}

pub fn project_cards(state: &AppState) -> Vec<DayCard> {
    TRAINING_DAYS
        .iter()
        .map(|day| {
            let document_count = state.records_for_day(day.id).count();
            let has_external_resource = day.drive_url.is_some();
            DayCard {
                id: day.id.to_string(),
                label: day.label.to_string(),
                training: day.training.to_string(),
                document_count,
                has_external_resource,
                open_disabled: document_count == 0 && !has_external_resource,
            }
        })
        .collect()
}

pub fn file_entry(record: &FileRecord) -> FileEntry {
    let type_label = if record.mime_type.is_empty() {
        UNKNOWN_TYPE_LABEL.to_string()
    } else {
        record.mime_type.clone()
    };
    FileEntry {
        id: record.id.to_string(),
        name: record.name.clone(),
        type_label,
        size_label: format_size(record.size),
        uploaded_at: record.uploaded_at.clone(),
    }
}

pub fn project_repository(state: &AppState) -> RepositoryView {
    let day = current_day(state);
    let files: Vec<FileEntry> = state.records_for_day(day.id).map(file_entry).collect();
    RepositoryView {
        title: format!("{} · {}", day.label, day.name),
        empty: files.is_empty(),
        files,
    }
}

pub fn project_summary(state: &AppState, quota_mb: u64) -> SummaryView {
    let total_bytes = state.total_bytes();
    let total_size = format_size(total_bytes);
    SummaryView {
        total_docs: state.records.len(),
        total_bytes,
        percent: usage_percent(total_bytes, quota_mb),
        storage_text: format!("{} de {} MB", total_size, quota_mb),
        total_size,
    }
}

pub fn project(state: &AppState, quota_mb: u64) -> PageView {
    PageView {
        nav: project_nav(state),
        cards: project_cards(state),
        repository: project_repository(state),
        summary: project_summary(state, quota_mb),
    }
}
