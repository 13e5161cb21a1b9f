//! # Command Layer
//!
//! One module per user gesture. Commands take the pieces of state they need as plain
//! arguments and return a [`CmdResult`]; they never print and never decide how their
//! result is shown. User-facing notices (a missing file, an empty day) are returned as
//! [`CmdMessage`]s, while storage failures come back as `Err`.

use crate::config::VaultConfig;
use crate::download::Delivery;
use crate::model::FileRecord;
use crate::view::PageView;

pub mod config;
pub mod doctor;
pub mod open_day;
pub mod open_file;
pub mod remove;
pub mod select;
pub mod upload;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<FileRecord>,
    pub deliveries: Vec<Delivery>,
    pub page: Option<PageView>,
    pub config: Option<VaultConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<FileRecord>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_page(mut self, page: PageView) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_config(mut self, config: VaultConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// True when a notice at warning level or above was raised.
    pub fn has_notice(&self) -> bool {
        self.messages
            .iter()
            .any(|m| matches!(m.level, MessageLevel::Warning | MessageLevel::Error))
    }
}
