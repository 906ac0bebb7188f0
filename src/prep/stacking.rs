//! Cumulative stacking of series groups.
//!
//! A [`StackingGroup`] names a set of series (by index into the aligned
//! data) that are drawn on top of each other. For every group the members
//! are visited in ascending index order and a running sum is kept per
//! x-index; each member's stacked values are the running sum after adding
//! its own values. Non-finite values contribute nothing and do not reset
//! the sum. A downward group negates every increment.
//!
//! Percent sums divide each stacked value by the group's total absolute
//! magnitude at that x-index (0 where the total is 0).

use crate::error::{Result, VizPrepError};
use crate::types::AlignedData;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Direction in which a group stacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "i8", into = "i8")]
pub enum StackDirection {
    /// `dir = 1`
    #[default]
    Up,
    /// `dir = -1`
    Down,
}

impl StackDirection {
    /// Multiplier applied to each increment
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            StackDirection::Up => 1.0,
            StackDirection::Down => -1.0,
        }
    }
}

impl TryFrom<i8> for StackDirection {
    type Error = String;

    fn try_from(value: i8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(StackDirection::Up),
            -1 => Ok(StackDirection::Down),
            other => Err(format!("stacking dir must be 1 or -1, got {}", other)),
        }
    }
}

impl From<StackDirection> for i8 {
    fn from(dir: StackDirection) -> Self {
        match dir {
            StackDirection::Up => 1,
            StackDirection::Down => -1,
        }
    }
}

/// A set of series stacked together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackingGroup {
    /// Member series indices (never 0, which is the x-axis)
    pub series: BTreeSet<usize>,
    /// Stacking direction
    #[serde(default)]
    pub dir: StackDirection,
}

impl StackingGroup {
    /// Create a group from any collection of series indices
    pub fn new(series: impl IntoIterator<Item = usize>, dir: StackDirection) -> Self {
        Self {
            series: series.into_iter().collect(),
            dir,
        }
    }
}

/// Stacked sums keyed by series index
///
/// Slot `i` is `Some` only when series `i` belongs to a stacking group;
/// slot 0 (the x-axis) is always `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StackSums {
    pub by_value: Vec<Option<Vec<f64>>>,
    pub by_percent: Vec<Option<Vec<f64>>>,
}

/// Check that groups only reference existing, non-x series and never share one
pub fn validate_groups(groups: &[StackingGroup], series_count: usize) -> Result<()> {
    let mut claimed = BTreeSet::new();

    for (gi, group) in groups.iter().enumerate() {
        for &idx in &group.series {
            if idx == 0 {
                return Err(VizPrepError::Config(format!(
                    "stacking group {} references series 0 (the x-axis)",
                    gi
                )));
            }
            if idx >= series_count {
                return Err(VizPrepError::Config(format!(
                    "stacking group {} references series {} but only {} series exist",
                    gi, idx, series_count
                )));
            }
            if !claimed.insert(idx) {
                return Err(VizPrepError::Config(format!(
                    "series {} belongs to more than one stacking group",
                    idx
                )));
            }
        }
    }

    Ok(())
}

/// Compute value and percent sums for every group
///
/// Indices outside `joined` are skipped; callers validate groups first.
pub fn compute_stacks(groups: &[StackingGroup], joined: &AlignedData) -> StackSums {
    let series_count = joined.len();
    let points = joined.first().map_or(0, Vec::len);

    let mut sums = StackSums {
        by_value: vec![None; series_count],
        by_percent: vec![None; series_count],
    };

    for group in groups {
        let sign = group.dir.sign();
        let mut running = vec![0.0; points];
        let mut magnitude = vec![0.0; points];
        let members: Vec<usize> = group
            .series
            .iter()
            .copied()
            .filter(|&idx| idx != 0 && idx < series_count)
            .collect();

        for &idx in &members {
            for (x, &value) in joined[idx].iter().enumerate().take(points) {
                if value.is_finite() {
                    running[x] += sign * value;
                    magnitude[x] += value.abs();
                }
            }
            sums.by_value[idx] = Some(running.clone());
        }

        for &idx in &members {
            let percent = sums.by_value[idx].as_ref().map(|values| {
                values
                    .iter()
                    .zip(&magnitude)
                    .map(|(&v, &total)| if total == 0.0 { 0.0 } else { v / total })
                    .collect()
            });
            sums.by_percent[idx] = percent;
        }
    }

    sums
}

/// Replace stacked series by their running sums; other series pass through
pub fn apply_stacks(joined: &AlignedData, sums: &StackSums) -> AlignedData {
    joined
        .iter()
        .enumerate()
        .map(|(idx, values)| match sums.by_value.get(idx) {
            Some(Some(stacked)) => stacked.clone(),
            _ => values.clone(),
        })
        .collect()
}
