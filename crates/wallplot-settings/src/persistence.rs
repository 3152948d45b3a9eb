//! JSON persistence for host-side tooling.
//!
//! The machine itself speaks the `key value` format; host utilities
//! keep their state (calibration snapshots, saved configurations) as
//! pretty-printed JSON through these helpers.

use crate::error::SettingsError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load a value from a JSON file.
pub fn load_json_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, SettingsError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let value = serde_json::from_str(&contents)?;
    debug!(path = %path.display(), "loaded JSON file");
    Ok(value)
}

/// Save a value to a JSON file, creating parent directories as needed.
pub fn save_json_file<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<(), SettingsError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let contents = serde_json::to_string_pretty(value)?;
    fs::write(path, contents)?;
    debug!(path = %path.display(), "saved JSON file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlotterConfig;

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut config = PlotterConfig::default();
        config.drawing_file = "drawing.svg".to_string();
        config.frame.span = 1500.0;

        save_json_file(&path, &config).unwrap();
        let loaded: PlotterConfig = load_json_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result: Result<PlotterConfig, _> = load_json_file("/nonexistent/config.json");
        assert!(matches!(result, Err(SettingsError::Io(_))));
    }

    #[test]
    fn test_load_garbage_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();
        let result: Result<PlotterConfig, _> = load_json_file(&path);
        assert!(matches!(result, Err(SettingsError::Json(_))));
    }
}
