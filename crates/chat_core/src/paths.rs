use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

/// Config directory (~/.chat_branches)
pub fn app_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
        .join(".chat_branches")
}

/// Path of config.json inside the config directory
pub fn config_json_path() -> PathBuf {
    app_dir().join("config.json")
}

/// On-disk encoding of a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

/// Read `path` and deserialize it as `format`.
pub fn read_config<T: DeserializeOwned>(path: &Path, format: ConfigFormat) -> Result<T, String> {
    let raw = std::fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let parsed: Result<T, String> = match format {
        ConfigFormat::Json => serde_json::from_str(&raw).map_err(|e| e.to_string()),
        ConfigFormat::Toml => toml::from_str(&raw).map_err(|e| e.to_string()),
    };
    parsed.map_err(|e| format!("{} is not valid {format:?}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Limits {
        history_limit: usize,
    }

    #[test]
    fn test_config_dir_is_hidden_app_dir() {
        assert!(config_json_path().ends_with(".chat_branches/config.json"));
    }

    #[test]
    fn test_read_both_formats() {
        let dir = tempdir().unwrap();
        let json_path = dir.path().join("config.json");
        let toml_path = dir.path().join("config.toml");
        std::fs::write(&json_path, r#"{"history_limit": 3}"#).unwrap();
        std::fs::write(&toml_path, "history_limit = 4\n").unwrap();

        let from_json: Limits = read_config(&json_path, ConfigFormat::Json).unwrap();
        let from_toml: Limits = read_config(&toml_path, ConfigFormat::Toml).unwrap();
        assert_eq!(from_json, Limits { history_limit: 3 });
        assert_eq!(from_toml, Limits { history_limit: 4 });
    }

    #[test]
    fn test_read_errors_name_the_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("gone.json");
        let err = read_config::<Limits>(&missing, ConfigFormat::Json).unwrap_err();
        assert!(err.contains("gone.json"));

        // JSON text is not TOML
        let mismatched = dir.path().join("config.toml");
        std::fs::write(&mismatched, r#"{"history_limit": 3}"#).unwrap();
        let err = read_config::<Limits>(&mismatched, ConfigFormat::Toml).unwrap_err();
        assert!(err.contains("is not valid Toml"));
    }
}
