//! YAML configuration for the binary: store location and dialog geometry.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::store::{DEFAULT_NAMESPACE, FileStorage};
use crate::widgets::{
    ConfirmDialog, KeypadDialog, Selector, TextPrompt, confirm, keypad, prompt, selector,
};

pub const CONFIG_ENV: &str = "MODALPAD_CONFIG";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub dialogs: DialogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store file; falls back to the platform data directory.
    pub path: Option<PathBuf>,
    pub namespace: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path.clone().or_else(FileStorage::default_location)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    pub keypad_width: u16,
    pub prompt_width: u16,
    pub selector_width: u16,
    pub alert_width: u16,
    pub selector_rows: usize,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            keypad_width: keypad::DEFAULT_WIDTH,
            prompt_width: prompt::DEFAULT_WIDTH,
            selector_width: selector::DEFAULT_WIDTH,
            alert_width: confirm::DEFAULT_WIDTH,
            selector_rows: selector::DEFAULT_ROWS,
        }
    }
}

impl DialogConfig {
    pub fn keypad(&self) -> KeypadDialog {
        KeypadDialog::new().with_width(self.keypad_width)
    }

    pub fn prompt(&self) -> TextPrompt {
        TextPrompt::new().with_width(self.prompt_width)
    }

    pub fn selector(&self) -> Selector {
        Selector::new()
            .with_width(self.selector_width)
            .with_rows(self.selector_rows)
    }

    pub fn confirm(&self) -> ConfirmDialog {
        ConfirmDialog::new().with_width(self.alert_width)
    }
}

impl AppConfig {
    pub fn from_yaml(raw: &str, origin: &Path) -> Result<Self, ConfigError> {
        serde_yaml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// A missing file yields the defaults; an unreadable or malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("config {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        // An empty document deserializes to null rather than an empty map.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Self::from_yaml(&raw, path)
    }

    /// Explicit path first, then `MODALPAD_CONFIG`, then defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => match env::var_os(CONFIG_ENV) {
                Some(path) if !path.is_empty() => Self::load(Path::new(&path)),
                _ => Ok(Self::default()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dialog_widths() {
        let config = AppConfig::default();
        assert_eq!(config.dialogs.keypad_width, 30);
        assert_eq!(config.dialogs.prompt_width, 44);
        assert_eq!(config.dialogs.selector_width, 34);
        assert_eq!(config.dialogs.alert_width, 30);
        assert_eq!(config.dialogs.selector_rows, 5);
        assert_eq!(config.store.namespace, "modalpad");
        assert_eq!(config.store.path, None);
    }

    #[test]
    fn partial_yaml_keeps_remaining_defaults() {
        let raw = "dialogs:\n  keypad_width: 40\nstore:\n  namespace: course\n";
        let config = AppConfig::from_yaml(raw, Path::new("inline.yaml")).expect("parse");
        assert_eq!(config.dialogs.keypad_width, 40);
        assert_eq!(config.dialogs.prompt_width, 44);
        assert_eq!(config.store.namespace, "course");
    }

    #[test]
    fn malformed_yaml_reports_path() {
        let err = AppConfig::from_yaml("dialogs: [1, 2", Path::new("broken.yaml"))
            .expect_err("should fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn missing_and_empty_files_use_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("absent.yaml");
        assert_eq!(AppConfig::load(&missing).expect("load"), AppConfig::default());

        let empty = dir.path().join("empty.yaml");
        fs::write(&empty, "\n").expect("write");
        assert_eq!(AppConfig::load(&empty).expect("load"), AppConfig::default());
    }

    #[test]
    fn load_reads_store_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("modalpad.yaml");
        fs::write(&file, "store:\n  path: /tmp/answers.json\n").expect("write");
        let config = AppConfig::resolve(Some(&file)).expect("load");
        assert_eq!(
            config.store.resolved_path(),
            Some(PathBuf::from("/tmp/answers.json"))
        );
    }

    #[test]
    fn factories_apply_configured_geometry() {
        let dialogs = DialogConfig {
            keypad_width: 36,
            ..DialogConfig::default()
        };
        assert_eq!(dialogs.keypad().width(), 36);
        assert_eq!(dialogs.prompt().width(), 44);
        assert_eq!(dialogs.selector().width(), 34);
        assert_eq!(dialogs.confirm().width(), 30);
    }
}
