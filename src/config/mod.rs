//! Configuration module for vizprep
//!
//! This module holds the *static* half of a chart configuration: the
//! options that, when changed, require building a fresh [`ChartConfig`].
//! The dynamic half (time range and prepared data) travels separately in
//! a `PrepCfgCtx` and can be swapped without rebuilding anything.
//!
//! # Files
//!
//! Panel options and complete panel snapshots (options + time range +
//! frames) can be read from TOML or JSON. The file extension picks the
//! format; anything other than `.toml` is parsed as JSON.
//!
//! # Example
//!
//! ```ignore
//! use vizprep::config::PanelOptions;
//!
//! let opts = PanelOptions::from_toml_str(r#"
//!     time_zone = "UTC"
//!     mode = "scatter"
//!
//!     [[stacking]]
//!     series = [1, 2]
//!     dir = 1
//! "#)?;
//! ```
//!
//! [`ChartConfig`]: crate::chart::ChartConfig

pub mod settings;

pub use settings::*;

use crate::error::{Result, ResultExt, VizPrepError};
use crate::opts::SeriesOpts;
use crate::prep::StackingGroup;
use crate::types::{DataFrame, PanelMode, TimeRange};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default time zone for new panels
pub const DEFAULT_TIME_ZONE: &str = "UTC";

/// Extension that selects the TOML parser
pub const TOML_EXTENSION: &str = "toml";

// ==================== Panel Options ====================

/// Static options of a panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelOptions {
    /// Time zone used to format the time axis
    pub time_zone: String,

    /// Visualization mode
    pub mode: PanelMode,

    /// Series that are cumulatively stacked
    pub stacking: Vec<StackingGroup>,

    /// Per-series overrides, applied by position to the y series (index 1 first)
    pub series: Vec<SeriesOpts>,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            time_zone: DEFAULT_TIME_ZONE.to_string(),
            mode: PanelMode::default(),
            stacking: Vec::new(),
            series: Vec::new(),
        }
    }
}

impl PanelOptions {
    /// Create options for the given mode with all other settings defaulted
    pub fn new(mode: PanelMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Builder-style time zone setter
    pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = time_zone.into();
        self
    }

    /// Builder-style stacking group append
    pub fn with_stacking(mut self, group: StackingGroup) -> Self {
        self.stacking.push(group);
        self
    }

    /// Parse options from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse panel options")
    }

    /// Parse options from a JSON document
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse panel options")
    }

    /// Load options from a file, choosing the format by extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load_file(path.as_ref())
    }
}

// ==================== Panel File ====================

/// A complete panel snapshot: static options plus the dynamic inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelFile {
    /// Static options
    #[serde(default)]
    pub options: PanelOptions,

    /// Current time range
    #[serde(default)]
    pub time_range: TimeRange,

    /// Structure revision; callers re-run preparation when it changes
    #[serde(default)]
    pub structure_rev: u64,

    /// Raw frames
    #[serde(default)]
    pub frames: Vec<DataFrame>,
}

impl PanelFile {
    /// Load a panel snapshot, choosing the format by extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load_file(path.as_ref())
    }

    /// Save a panel snapshot as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))
    }
}

fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;

    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(TOML_EXTENSION));

    let parsed = if is_toml {
        toml::from_str(&content).map_err(VizPrepError::from)
    } else {
        serde_json::from_str(&content).map_err(VizPrepError::from)
    };

    let value = parsed.with_context(|| format!("Failed to parse {:?}", path))?;
    tracing::debug!("Loaded configuration from {:?}", path);
    Ok(value)
}
