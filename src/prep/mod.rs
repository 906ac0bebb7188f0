//! Data preparation: raw frames to plot-ready aligned data.
//!
//! [`prepare`] is pure. It validates frame shapes and flattens every
//! frame's fields, in frame order then field order, into one
//! [`AlignedData`]. Shape problems are reported on
//! [`PreparedData::error`] rather than returned as `Err`, so a panel can
//! show a fallback and skip everything downstream.
//!
//! ```text
//! frames: [{Time, A}, {B}]  ──►  aligned: [Time, A, B]
//! ```

pub mod stacking;

pub use stacking::{
    apply_stacks, compute_stacks, validate_groups, StackDirection, StackSums, StackingGroup,
};

use crate::error::{Result, VizPrepError};
use crate::types::{AlignedData, DataFrame, PanelMode};

/// Options influencing preparation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrepOpts {
    /// Panel mode the data is prepared for
    pub mode: PanelMode,
}

impl PrepOpts {
    pub fn new(mode: PanelMode) -> Self {
        Self { mode }
    }
}

/// Output of [`prepare`]
///
/// When `error` is set, `aligned` is empty and nothing else may be relied on.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedData {
    /// The input frames
    pub frames: Vec<DataFrame>,
    /// Flattened series, one per field
    pub aligned: AlignedData,
    /// Mode the data was prepared for
    pub mode: PanelMode,
    /// Data-shape error, if any
    pub error: Option<String>,
}

impl PreparedData {
    /// Whether preparation succeeded
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Number of aligned series (including the x-axis)
    pub fn series_count(&self) -> usize {
        self.aligned.len()
    }

    /// Number of points per series
    pub fn point_count(&self) -> usize {
        self.aligned.first().map_or(0, Vec::len)
    }

    /// Names of the aligned series, in series-index order
    pub fn series_names(&self) -> Vec<&str> {
        self.frames
            .iter()
            .flat_map(|frame| frame.fields.iter().map(|f| f.name.as_str()))
            .collect()
    }
}

/// Prepare frames for plotting
pub fn prepare(frames: &[DataFrame], opts: &PrepOpts) -> PreparedData {
    match join_frames(frames) {
        Ok(aligned) => {
            tracing::debug!(
                "Prepared {} frames into {} series ({} mode)",
                frames.len(),
                aligned.len(),
                opts.mode
            );
            PreparedData {
                frames: frames.to_vec(),
                aligned,
                mode: opts.mode,
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!("Could not prepare data: {}", e);
            PreparedData {
                frames: frames.to_vec(),
                aligned: Vec::new(),
                mode: opts.mode,
                error: Some(e.to_string()),
            }
        }
    }
}

/// Validate frame shapes and flatten every field into one aligned sequence
pub fn join_frames(frames: &[DataFrame]) -> Result<AlignedData> {
    validate_frames(frames)?;

    Ok(frames
        .iter()
        .flat_map(|frame| frame.fields.iter().map(|field| field.values.clone()))
        .collect())
}

/// Check that every field matches its frame length and all frames agree
pub fn validate_frames(frames: &[DataFrame]) -> Result<()> {
    for (fi, frame) in frames.iter().enumerate() {
        if let Some(field) = frame.mismatched_field() {
            return Err(VizPrepError::DataShape(format!(
                "frame {} field \"{}\" has {} values, expected {}",
                fi,
                field.name,
                field.len(),
                frame.length
            )));
        }
    }

    // Flattened series must share one length
    let with_fields = || frames.iter().enumerate().filter(|(_, f)| !f.fields.is_empty());
    if let Some((_, first)) = with_fields().next() {
        if let Some((fi, frame)) = with_fields().find(|(_, f)| f.length != first.length) {
            return Err(VizPrepError::DataShape(format!(
                "frame {} has length {}, expected {}",
                fi, frame.length, first.length
            )));
        }
    }

    Ok(())
}
