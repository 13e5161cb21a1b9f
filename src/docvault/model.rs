use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One of the fixed training days. Built into the binary, never created at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayDescriptor {
    pub id: &'static str,
    pub label: &'static str,
    pub name: &'static str,
    pub training: &'static str,
    pub drive_url: Option<&'static str>,
}

/// Metadata for one uploaded document.
///
/// The serialized field names are part of the on-disk format of the metadata slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: Uuid,
    pub day_id: String,
    pub name: String,
    pub size: u64,
    #[serde(rename = "type", default)]
    pub mime_type: String,
    // Display only, never parsed back.
    pub uploaded_at: String,
}

impl FileRecord {
    pub fn new(
        day_id: impl Into<String>,
        upload: &UploadFile,
        uploaded_at: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            day_id: day_id.into(),
            name: upload.name.clone(),
            size: upload.size(),
            mime_type: upload.mime_type.clone(),
            uploaded_at: uploaded_at.into(),
        }
    }
}

/// A file handed over for upload: what a file picker reports plus its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            content,
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// Everything the views are projected from.
///
/// The selected day is ephemeral: it is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub selected_day_id: String,
    pub records: Vec<FileRecord>,
}

impl AppState {
    pub fn new(selected_day_id: impl Into<String>, records: Vec<FileRecord>) -> Self {
        Self {
            selected_day_id: selected_day_id.into(),
            records,
        }
    }

    pub fn records_for_day<'a>(&'a self, day_id: &'a str) -> impl Iterator<Item = &'a FileRecord> {
        self.records.iter().filter(move |r| r.day_id == day_id)
    }

    /// Records are kept newest first, so the first match is the latest upload.
    pub fn latest_for_day(&self, day_id: &str) -> Option<&FileRecord> {
        self.records.iter().find(|r| r.day_id == day_id)
    }

    pub fn record(&self, id: &Uuid) -> Option<&FileRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn total_bytes(&self) -> u64 {
        self.records.iter().map(|r| r.size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: &str, size: u64) -> FileRecord {
        FileRecord::new(day, &UploadFile::new("a.txt", "", vec![0; size as usize]), "now")
    }

    #[test]
    fn serializes_with_stored_field_names() {
        let rec = FileRecord {
            id: Uuid::nil(),
            day_id: "qua".into(),
            name: "plan.pdf".into(),
            size: 12,
            mime_type: "application/pdf".into(),
            uploaded_at: "16/10/2026, 10:00:00".into(),
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["dayId"], "qua");
        assert_eq!(json["type"], "application/pdf");
        assert_eq!(json["uploadedAt"], "16/10/2026, 10:00:00");
        assert_eq!(json["size"], 12);
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn missing_type_deserializes_as_empty() {
        let json = r#"{"id":"00000000-0000-0000-0000-000000000000","dayId":"seg","name":"x","size":1,"uploadedAt":"t"}"#;
        let rec: FileRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.mime_type, "");
    }

    #[test]
    fn latest_for_day_is_first_match() {
        let newer = record("seg", 1);
        let older = record("seg", 2);
        let state = AppState::new("seg", vec![newer.clone(), record("ter", 3), older]);
        assert_eq!(state.latest_for_day("seg"), Some(&newer));
        assert_eq!(state.records_for_day("seg").count(), 2);
        assert!(state.latest_for_day("sex").is_none());
    }

    #[test]
    fn total_bytes_sums_sizes() {
        let state = AppState::new("seg", vec![record("seg", 10), record("qui", 32)]);
        assert_eq!(state.total_bytes(), 42);
    }
}
