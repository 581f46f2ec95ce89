use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::aggregator::DEFAULT_MAX_ENTRY_CHARS;
use crate::errors::ConfigError;

/// Application configuration module
/// This module handles loading and validating the pipeline settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Working directories
    #[serde(default)]
    pub paths: PathsConfig,

    /// File name of the phase 1 table inside the intermediate directory
    #[serde(default = "default_intermediate_table")]
    pub intermediate_table: String,

    /// File name of the phase 2 table inside the final directory
    #[serde(default = "default_final_table")]
    pub final_table: String,

    /// Extension of the spreadsheet documents
    #[serde(default = "default_source_extension")]
    pub source_extension: String,

    /// Per-entry character limit of the bulk translator
    #[serde(default = "default_max_entry_chars")]
    pub max_entry_chars: usize,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Directories the two phases move documents through
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PathsConfig {
    // @field: Phase 1 input tree
    #[serde(default = "default_todo_dir")]
    pub todo_dir: PathBuf,

    // @field: Flat staging directory between the phases
    #[serde(default = "default_intermediate_dir")]
    pub intermediate_dir: PathBuf,

    // @field: Phase 2 output directory
    #[serde(default = "default_final_dir")]
    pub final_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            todo_dir: default_todo_dir(),
            intermediate_dir: default_intermediate_dir(),
            final_dir: default_final_dir(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_todo_dir() -> PathBuf {
    PathBuf::from("../todo")
}

fn default_intermediate_dir() -> PathBuf {
    PathBuf::from("../intermediate")
}

fn default_final_dir() -> PathBuf {
    PathBuf::from("../final")
}

fn default_intermediate_table() -> String {
    "intermediate.csv".to_string()
}

fn default_final_table() -> String {
    "final.csv".to_string()
}

fn default_source_extension() -> String {
    "xml".to_string()
}

fn default_max_entry_chars() -> usize {
    DEFAULT_MAX_ENTRY_CHARS
}

impl Config {
    /// Load the configuration file at `path`, or the defaults when it does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;
        let config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dirs = [
            ("todo_dir", &self.paths.todo_dir),
            ("intermediate_dir", &self.paths.intermediate_dir),
            ("final_dir", &self.paths.final_dir),
        ];
        for (name, dir) in dirs {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::Invalid(format!("{} must not be empty", name)));
            }
        }
        for (i, (name, dir)) in dirs.iter().enumerate() {
            if let Some((other, _)) = dirs[i + 1..].iter().find(|(_, d)| d == dir) {
                return Err(ConfigError::Invalid(format!(
                    "{} and {} point to the same directory {:?}",
                    name, other, dir
                )));
            }
        }

        for (name, table) in [
            ("intermediate_table", &self.intermediate_table),
            ("final_table", &self.final_table),
        ] {
            if table.is_empty() || table.contains(['/', '\\']) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a plain file name, got '{}'",
                    name, table
                )));
            }
        }

        if self.source_extension.trim_start_matches('.').is_empty() {
            return Err(ConfigError::Invalid("source_extension must not be empty".to_string()));
        }

        if self.max_entry_chars == 0 {
            return Err(ConfigError::Invalid("max_entry_chars must be positive".to_string()));
        }

        Ok(())
    }

    /// Location of the phase 1 table
    pub fn intermediate_table_path(&self) -> PathBuf {
        self.paths.intermediate_dir.join(&self.intermediate_table)
    }

    /// Location of the phase 2 table
    pub fn final_table_path(&self) -> PathBuf {
        self.paths.final_dir.join(&self.final_table)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            paths: PathsConfig::default(),
            intermediate_table: default_intermediate_table(),
            final_table: default_final_table(),
            source_extension: default_source_extension(),
            max_entry_chars: default_max_entry_chars(),
            log_level: LogLevel::default(),
        }
    }
}
