use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_LOCALE: &str = "en";

/// Contents of `config.json`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub locale: Option<String>,
    pub token: Option<String>,
}

/// Settings after merging flags, environment, file and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub locale: String,
    pub token: Option<String>,
}

/// Base directory: ~/.config/order-status-admin/
pub fn base_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("order-status-admin")
}

pub fn config_path() -> PathBuf {
    base_dir().join("config.json")
}

pub fn log_path() -> PathBuf {
    base_dir().join("order-status-admin.log")
}

/// A missing or unreadable file yields the empty config.
pub fn load_file_config() -> FileConfig {
    let path = config_path();
    if !path.exists() {
        return FileConfig::default();
    }
    match fs::read_to_string(&path).map(|s| serde_json::from_str::<FileConfig>(&s)) {
        Ok(Ok(config)) => config,
        Ok(Err(e)) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
            FileConfig::default()
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read config");
            FileConfig::default()
        }
    }
}

/// Flags (clap already folds environment variables into them) win over the
/// file, which wins over the defaults.
pub fn resolve(
    api_url: Option<String>,
    locale: Option<String>,
    token: Option<String>,
    file: FileConfig,
) -> Settings {
    Settings {
        api_url: api_url
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        locale: locale
            .or(file.locale)
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
        token: token.or(file.token).filter(|t| !t.is_empty()),
    }
}
