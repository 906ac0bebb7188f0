//! Core data types for vizprep
//!
//! This module contains the value types shared by every other part of the
//! crate: columnar frames coming from a data source, the time range of the
//! panel, and the aligned representation handed to the plotting engine.
//!
//! # Main Types
//!
//! - [`Field`] - A named, typed column of values
//! - [`DataFrame`] - A batch of fields sharing one length
//! - [`TimeRange`] - Inclusive `from..=to` bounds of the panel
//! - [`AlignedData`] - One value sequence per series, sequence 0 is the x-axis
//! - [`PanelMode`] - Visualization mode selected in the panel options
//!
//! # Missing Values
//!
//! Values are plain `f64`. Non-finite values (`NaN`, infinities) stand in
//! for missing samples; stacking treats them as contributing nothing.

use serde::{Deserialize, Serialize};

/// Aligned series data: one value sequence per series, all of equal length.
pub type AlignedData = Vec<Vec<f64>>;

/// Semantic type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Timestamps, used for the x-axis
    Time,
    /// Plain numeric values
    #[default]
    Number,
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::Time => write!(f, "time"),
            FieldType::Number => write!(f, "number"),
        }
    }
}

/// A named column of values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Display name of the field
    pub name: String,
    /// Semantic type
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    /// Column values
    pub values: Vec<f64>,
}

impl Field {
    /// Create a new field
    pub fn new(name: impl Into<String>, field_type: FieldType, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            field_type,
            values,
        }
    }

    /// Create a time field
    pub fn time(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(name, FieldType::Time, values)
    }

    /// Create a number field
    pub fn number(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(name, FieldType::Number, values)
    }

    /// Number of values in this field
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the field holds no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A columnar batch of fields sharing one length
///
/// The declared `length` is not enforced on construction; data preparation
/// validates it and reports a shape error for any field that disagrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFrame {
    /// Declared number of rows
    pub length: usize,
    /// Columns in order
    pub fields: Vec<Field>,
}

impl DataFrame {
    /// Create a frame with an explicit declared length
    pub fn new(length: usize, fields: Vec<Field>) -> Self {
        Self { length, fields }
    }

    /// Create a frame whose length is taken from its first field
    pub fn from_fields(fields: Vec<Field>) -> Self {
        let length = fields.first().map(Field::len).unwrap_or(0);
        Self { length, fields }
    }

    /// Find the first field whose length disagrees with the frame length
    pub fn mismatched_field(&self) -> Option<&Field> {
        self.fields.iter().find(|f| f.len() != self.length)
    }
}

/// Inclusive time range of the panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct TimeRange {
    /// Lower bound
    pub from: f64,
    /// Upper bound
    pub to: f64,
}

impl TimeRange {
    /// Create a time range, swapping the bounds if given in reverse
    pub fn new(from: f64, to: f64) -> Self {
        if from <= to {
            Self { from, to }
        } else {
            Self { from: to, to: from }
        }
    }
}

/// Visualization mode of the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PanelMode {
    /// Points sized by value
    Bubble,
    /// Plain points
    #[default]
    Scatter,
}

impl PanelMode {
    /// Marker size used for series drawn in this mode
    pub fn point_size(&self) -> f32 {
        match self {
            PanelMode::Bubble => 12.0,
            PanelMode::Scatter => 5.0,
        }
    }
}

impl std::fmt::Display for PanelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PanelMode::Bubble => write!(f, "bubble"),
            PanelMode::Scatter => write!(f, "scatter"),
        }
    }
}
