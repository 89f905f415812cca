//! Configuration loading for the simulator

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use crate::{grid::Grid, Result, SimError};

/// Default table top edge length
pub const DEFAULT_TABLE_SIZE: u32 = 5;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SimConfig {
    pub table: TableConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TableConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// How REPORT and HELP render their lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_TABLE_SIZE,
            height: DEFAULT_TABLE_SIZE,
        }
    }
}

impl SimConfig {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();
        let contents = fs::read_to_string(config_path).map_err(|e| {
            SimError::Config(format!("Failed to read {}: {}", config_path.display(), e))
        })?;

        Self::load_from_str(&contents)
    }

    pub fn load_from_str(contents: &str) -> Result<Self> {
        let config: SimConfig = serde_yaml::from_str(contents)?;
        config.grid()?;
        Ok(config)
    }

    /// Build the validated table top described by this configuration
    pub fn grid(&self) -> Result<Grid> {
        Grid::new(self.table.width, self.table.height)
    }
}

impl FromStr for OutputFormat {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(SimError::Config(format!("Unknown output format: {}", other))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}
