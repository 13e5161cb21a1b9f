use crate::commands::{CmdMessage, CmdResult};
use crate::config::VaultConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = VaultConfig::load(config_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {}
        ConfigAction::ShowKey(key) => {
            if config.get(&key).is_none() {
                result.add_message(CmdMessage::warning(format!("Unknown config key: {}", key)));
            }
        }
        ConfigAction::Set(key, value) => {
            config.set(&key, &value)?;
            config.save(config_dir)?;
            result.add_message(CmdMessage::success(format!("{} set to {}", key, value)));
        }
    }

    Ok(result.with_config(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_persists_value() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), ConfigAction::Set("quota-mb".into(), "300".into())).unwrap();

        let shown = run(dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(shown.config.unwrap().quota_mb, 300);
    }

    #[test]
    fn unknown_key_warns() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(dir.path(), ConfigAction::ShowKey("colour".into())).unwrap();
        assert!(result.has_notice());
    }

    #[test]
    fn invalid_value_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(dir.path(), ConfigAction::Set("quota-mb".into(), "x".into())).is_err());
        assert!(!dir.path().join("config.json").exists());
    }
}
