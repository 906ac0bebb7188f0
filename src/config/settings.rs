//! Default scale settings merged into every options snapshot
//!
//! The plotting engine resolves every series against a named scale. The
//! options builder always starts from [`ScaleSettings::default`], which
//! declares a numeric (non-time) `x` scale with automatic ranging.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key of the shared x-axis scale
pub const X_SCALE: &str = "x";

/// Settings for a single named scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleOpts {
    /// Whether values on this scale are timestamps
    pub time: bool,

    /// Whether the engine derives the range from the data
    pub auto: bool,

    /// Fixed range (used when `auto` is false)
    pub range: Option<(f64, f64)>,
}

impl Default for ScaleOpts {
    fn default() -> Self {
        Self {
            time: false,
            auto: true,
            range: None,
        }
    }
}

/// Table of named scales
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScaleSettings {
    /// Scales keyed by name
    pub scales: BTreeMap<String, ScaleOpts>,
}

impl Default for ScaleSettings {
    fn default() -> Self {
        let mut scales = BTreeMap::new();
        scales.insert(X_SCALE.to_string(), ScaleOpts::default());
        Self { scales }
    }
}
