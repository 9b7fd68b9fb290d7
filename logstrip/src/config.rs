//! Configuration loading.
//!
//! Settings come from a dedicated `.logstrip.toml` or from a `"logstrip"`
//! key in the nearest `package.json`, searched upward from the start path.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants::{CONFIG_FILENAME, PACKAGE_JSON_FILENAME};

/// Top-level configuration struct.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    /// The main configuration section for logstrip.
    #[serde(default)]
    pub logstrip: LogstripConfig,
    /// The path to the configuration file this was loaded from.
    /// Set during `load_from_path`, `None` if using defaults.
    #[serde(skip)]
    pub config_file_path: Option<std::path::PathBuf>,
}

/// Configuration options for logstrip.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct LogstripConfig {
    /// Tracked variable names.
    pub variables: Option<Vec<String>>,
    /// Tracked member property names.
    pub properties: Option<Vec<String>>,
    /// Tracked import module specifiers.
    pub packages: Option<Vec<String>>,
    /// List of folders to exclude from file discovery.
    pub exclude_folders: Option<Vec<String>>,
    /// List of folders to force-include.
    pub include_folders: Option<Vec<String>>,
    /// Source file extensions to process.
    pub extensions: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Clone)]
struct PackageJson {
    logstrip: LogstripConfig,
}

impl Config {
    /// Loads configuration from default locations in the current directory.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads configuration starting from a specific path and traversing up.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            // 1. Try CONFIG_FILENAME
            let logstrip_toml = current.join(CONFIG_FILENAME);
            if logstrip_toml.exists() {
                if let Ok(content) = fs::read_to_string(&logstrip_toml) {
                    if let Ok(mut config) = toml::from_str::<Config>(&content) {
                        config.config_file_path = Some(logstrip_toml);
                        return config;
                    }
                }
            }

            // 2. Try PACKAGE_JSON_FILENAME
            let package_json = current.join(PACKAGE_JSON_FILENAME);
            if package_json.exists() {
                if let Ok(content) = fs::read_to_string(&package_json) {
                    if let Ok(manifest) = serde_json::from_str::<PackageJson>(&content) {
                        return Config {
                            logstrip: manifest.logstrip,
                            config_file_path: Some(package_json),
                        };
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        Config::default()
    }
}
