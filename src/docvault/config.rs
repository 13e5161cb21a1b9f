use crate::error::{Result, VaultError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_QUOTA_MB: u64 = 150;
const DEFAULT_TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Configuration for docvault, stored in `<data-dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VaultConfig {
    /// Soft storage quota shown in the usage bar
    #[serde(default = "default_quota_mb")]
    pub quota_mb: u64,

    /// Reject uploads that would push usage past the quota
    #[serde(default)]
    pub enforce_quota: bool,

    /// Where downloads are written (current directory when unset)
    #[serde(default)]
    pub download_dir: Option<PathBuf>,

    /// chrono format string for the upload timestamp
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

fn default_quota_mb() -> u64 {
    DEFAULT_QUOTA_MB
}

fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            quota_mb: DEFAULT_QUOTA_MB,
            enforce_quota: false,
            download_dir: None,
            timestamp_format: default_timestamp_format(),
        }
    }
}

impl VaultConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(VaultError::Io)?;
        let config: VaultConfig =
            serde_json::from_str(&content).map_err(VaultError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(VaultError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(VaultError::Serialization)?;
        fs::write(config_path, content).map_err(VaultError::Io)?;
        Ok(())
    }

    pub fn quota_bytes(&self) -> u64 {
        self.quota_mb.saturating_mul(1024 * 1024)
    }

    /// Reads a key by its CLI name.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "quota-mb" => Some(self.quota_mb.to_string()),
            "enforce-quota" => Some(self.enforce_quota.to_string()),
            "download-dir" => Some(
                self.download_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            "timestamp-format" => Some(self.timestamp_format.clone()),
            _ => None,
        }
    }

    /// Sets a key by its CLI name, validating the value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "quota-mb" => {
                let quota: u64 = value
                    .parse()
                    .map_err(|_| VaultError::Api(format!("Invalid quota: {}", value)))?;
                if quota == 0 {
                    return Err(VaultError::Api("Quota must be greater than zero".into()));
                }
                self.quota_mb = quota;
            }
            "enforce-quota" => {
                self.enforce_quota = value
                    .parse()
                    .map_err(|_| VaultError::Api(format!("Expected true or false, got {}", value)))?;
            }
            "download-dir" => {
                self.download_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "timestamp-format" => {
                if value.is_empty() {
                    return Err(VaultError::Api("Timestamp format cannot be empty".into()));
                }
                self.timestamp_format = value.to_string();
            }
            other => return Err(VaultError::Api(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }

    pub const KEYS: [&'static str; 4] = ["quota-mb", "enforce-quota", "download-dir", "timestamp-format"];
}
