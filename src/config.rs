use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::manager::{FileProgramManager, ProgramManager};
use crate::persistence::{CsvFileImporter, JsonFileStore};

pub const CONFIG_PATH_ENV: &str = "STUDY_TRACKER_CONFIG";
pub const JSON_FILE_ENV: &str = "STUDY_TRACKER_JSON_FILE";
pub const CSV_FILE_ENV: &str = "STUDY_TRACKER_CSV_FILE";
pub const LOG_LEVEL_ENV: &str = "STUDY_TRACKER_LOG_LEVEL";
pub const HTTP_ADDR_ENV: &str = "STUDY_TRACKER_HTTP_ADDR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed reading config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed parsing TOML config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_json_file")]
    pub json_file: String,
    #[serde(default = "default_csv_file")]
    pub csv_file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Truncated at every start. Empty logs to stderr.
    #[serde(default = "default_log_file")]
    pub file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
}

impl AppConfig {
    pub fn default_path() -> PathBuf {
        PathBuf::from("study-tracker.toml")
    }

    /// Reads `path` (or the default path). A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_toml(&data).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn from_toml(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    /// Config file from the argument or `STUDY_TRACKER_CONFIG`, then
    /// environment overrides on top.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let from_env = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        let mut config = Self::load(path.or(from_env.as_deref()))?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(JSON_FILE_ENV) {
            self.paths.json_file = value;
        }
        if let Some(value) = lookup(CSV_FILE_ENV) {
            self.paths.csv_file = value;
        }
        if let Some(value) = lookup(LOG_LEVEL_ENV) {
            self.logging.level = value;
        }
        if let Some(value) = lookup(HTTP_ADDR_ENV) {
            self.server.addr = value;
        }
    }

    pub fn build_manager(&self) -> FileProgramManager {
        ProgramManager::new(
            JsonFileStore::new(&self.paths.json_file),
            CsvFileImporter::new(&self.paths.csv_file),
        )
    }

    pub fn default_template() -> String {
        let template = r#"[paths]
json_file = "studiengang.json"
csv_file = "studiengang.csv"

[logging]
level = "error"
file = "dashboard.log"

[server]
addr = "127.0.0.1:8080"
"#;
        template.to_string()
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            json_file: default_json_file(),
            csv_file: default_csv_file(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
        }
    }
}

fn default_json_file() -> String {
    "studiengang.json".to_string()
}

fn default_csv_file() -> String {
    "studiengang.csv".to_string()
}

fn default_log_level() -> String {
    "error".to_string()
}

fn default_log_file() -> String {
    "dashboard.log".to_string()
}

fn default_addr() -> String {
    "127.0.0.1:8080".to_string()
}
