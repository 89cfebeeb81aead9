//! Configuration loading
//!
//! Reads `config.toml` from the platform config directory (or an explicit
//! path). A missing file means defaults; an unreadable or invalid file also
//! means defaults, plus a warning for the UI to show.

use std::fs;
use std::path::{Path, PathBuf};

mod types;

pub use types::{
    ClipboardBackend, ClipboardConfig, Config, DEFAULT_BASE_URL, DEFAULT_DEBOUNCE_MS,
    DEFAULT_TIMEOUT_SECS, DialogConfig, ServiceConfig, SuggestionsConfig,
};

const APP_DIR: &str = "lessonplan";
const CONFIG_FILE: &str = "config.toml";

/// Result of loading configuration
#[derive(Debug)]
pub struct ConfigResult {
    pub config: Config,
    /// Set when a config file existed but could not be used
    pub warning: Option<String>,
}

/// Default config file location, e.g. `~/.config/lessonplan/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Load configuration from `path`, or from the default location
pub fn load_config(path: Option<&Path>) -> ConfigResult {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) => path,
            None => {
                return ConfigResult {
                    config: Config::default(),
                    warning: None,
                };
            }
        },
    };

    if !path.exists() {
        return ConfigResult {
            config: Config::default(),
            warning: None,
        };
    }

    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) => {
            return ConfigResult {
                config: Config::default(),
                warning: Some(format!("Failed to read {}: {}", path.display(), e)),
            };
        }
    };

    match toml::from_str::<Config>(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", path.display());
            ConfigResult {
                config,
                warning: None,
            }
        }
        Err(e) => ConfigResult {
            config: Config::default(),
            warning: Some(format!(
                "Invalid config {}: {}. Using defaults.",
                path.display(),
                e.message()
            )),
        },
    }
}
