//! Series descriptors.

use crate::types::PanelMode;
use serde::{Deserialize, Serialize};

/// Point marker settings of a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PointsOpts {
    /// Whether markers are drawn
    pub show: bool,
    /// Marker diameter in pixels
    pub size: Option<f32>,
}

/// Descriptor of one series in the options snapshot
///
/// Every field is optional so that an empty descriptor (`SeriesOpts::default()`)
/// leaves all styling to the engine, which is what the x-axis slot uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SeriesOpts {
    /// Legend label
    pub label: Option<String>,
    /// Line color
    pub stroke: Option<String>,
    /// Fill color
    pub fill: Option<String>,
    /// Line width in pixels
    pub width: Option<f32>,
    /// Point markers
    pub points: Option<PointsOpts>,
    /// Whether connecting paths are drawn
    pub paths: Option<bool>,
    /// Scale this series is drawn against
    pub scale: Option<String>,
}

impl SeriesOpts {
    /// Placeholder descriptor for the shared x-axis (series 0)
    pub fn x_axis() -> Self {
        Self::default()
    }

    /// Descriptor for a y series drawn in the given panel mode
    pub fn for_mode(label: impl Into<String>, mode: PanelMode) -> Self {
        Self {
            label: Some(label.into()),
            points: Some(PointsOpts {
                show: true,
                size: Some(mode.point_size()),
            }),
            paths: Some(false),
            ..Default::default()
        }
    }

    /// Builder-style stroke setter
    pub fn with_stroke(mut self, stroke: impl Into<String>) -> Self {
        self.stroke = Some(stroke.into());
        self
    }

    /// Overlay the fields set in `other` onto this descriptor
    pub fn merge(mut self, other: &SeriesOpts) -> Self {
        if other.label.is_some() {
            self.label = other.label.clone();
        }
        if other.stroke.is_some() {
            self.stroke = other.stroke.clone();
        }
        if other.fill.is_some() {
            self.fill = other.fill.clone();
        }
        if other.width.is_some() {
            self.width = other.width;
        }
        if other.points.is_some() {
            self.points = other.points.clone();
        }
        if other.paths.is_some() {
            self.paths = other.paths;
        }
        if other.scale.is_some() {
            self.scale = other.scale.clone();
        }
        self
    }
}
