// Configuration file handling

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub progress: ProgressConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the report file is written to
    #[serde(default = "default_output_dir")]
    pub dir: String,

    /// Report file name prefix, followed by a timestamp
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Pretty-print the JSON report
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            file_prefix: default_file_prefix(),
            pretty: default_pretty(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    /// Show a spinner and per-package lines while reducing
    #[serde(default = "default_progress")]
    pub enabled: bool,

    /// Enable colored output
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            enabled: default_progress(),
            color: default_color(),
        }
    }
}

pub const CONFIG_FILE_NAMES: [&str; 2] = [".testmonitorrc", ".testmonitorrc.toml"];

pub fn default_output_dir() -> String {
    String::from(".")
}

pub fn default_file_prefix() -> String {
    String::from("test-run")
}

fn default_pretty() -> bool {
    true
}

fn default_progress() -> bool {
    true
}

fn default_color() -> bool {
    true
}

impl Config {
    /// First existing config file in the search order
    pub fn discover() -> Option<PathBuf> {
        // Check locations in order:
        // 1. .testmonitorrc (current directory)
        // 2. ~/.testmonitorrc (home directory)
        // 3. .testmonitorrc.toml (current directory)
        // 4. ~/.testmonitorrc.toml (home directory)

        let cwd = std::env::current_dir().ok();
        let home = dirs::home_dir();

        CONFIG_FILE_NAMES
            .iter()
            .flat_map(|name| [cwd.as_ref(), home.as_ref()].map(|dir| dir.map(|d| d.join(name))))
            .flatten()
            .find(|path| path.exists())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Generate default configuration as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|_| String::new())
    }
}
