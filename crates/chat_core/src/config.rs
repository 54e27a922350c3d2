use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::paths::{config_json_path, read_config, ConfigFormat};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatConfig {
    /// Number of most recent active messages handed to the response source (0 = all)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Also render non-selected sibling branches
    #[serde(default)]
    pub show_inactive_branches: bool,
    /// Prefix used by the echo responder
    #[serde(default = "default_assistant_prefix")]
    pub assistant_prefix: String,
    /// Default tracing filter when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

const CONFIG_FILE_PATH: &str = "config.toml";

fn default_history_limit() -> usize {
    10
}

fn default_assistant_prefix() -> String {
    "echo: ".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// `Some` only for recognised switch spellings.
fn env_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            show_inactive_branches: false,
            assistant_prefix: default_assistant_prefix(),
            log_filter: default_log_filter(),
        }
    }
}

impl ChatConfig {
    /// Load from ~/.chat_branches/config.json, then ./config.toml, then env.
    pub fn load() -> Self {
        let mut config = Self::load_from(&config_json_path(), Path::new(CONFIG_FILE_PATH));
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Load from the given JSON path, falling back to the TOML path, then defaults.
    pub fn load_from(json_path: &Path, toml_path: &Path) -> Self {
        let candidates = [(json_path, ConfigFormat::Json), (toml_path, ConfigFormat::Toml)];
        for (path, format) in candidates {
            if !path.exists() {
                continue;
            }
            match read_config::<ChatConfig>(path, format) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(error = %e, "Ignoring config file"),
            }
        }
        Self::default()
    }

    /// Apply environment-style overrides using `lookup` to read variables.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(limit) = lookup("CHAT_HISTORY_LIMIT") {
            match limit.trim().parse::<usize>() {
                Ok(limit) => self.history_limit = limit,
                Err(_) => tracing::warn!(value = %limit, "CHAT_HISTORY_LIMIT is not a number"),
            }
        }
        if let Some(show) = lookup("CHAT_SHOW_INACTIVE") {
            match env_flag(&show) {
                Some(flag) => self.show_inactive_branches = flag,
                None => tracing::warn!(value = %show, "CHAT_SHOW_INACTIVE is not a switch"),
            }
        }
        if let Some(prefix) = lookup("CHAT_ASSISTANT_PREFIX") {
            self.assistant_prefix = prefix;
        }
        if let Some(filter) = lookup("CHAT_LOG_FILTER") {
            self.log_filter = filter;
        }
    }
}
