//! Options builder for the plotting engine.
//!
//! The engine expects a fully-built options object before it is mounted.
//! [`OptsBuilder`] accumulates that object piece by piece:
//!
//! - hooks are appended per [`HookKind`]; registration order is the order
//!   in which the engine will invoke them,
//! - series descriptors are appended to one list whose position is the
//!   series index used everywhere else (cursor index arrays, stacking),
//! - [`OptsBuilder::get_opts`] synthesizes a [`PlotOpts`] snapshot from
//!   the default scale table and everything registered so far.
//!
//! Nothing can be removed. Starting over means constructing a new builder.

pub mod hooks;
pub mod series;

pub use hooks::{Cursor, HookArgs, HookFn, HookKind, PlotRect};
pub use series::{PointsOpts, SeriesOpts};

use crate::config::{ScaleOpts, ScaleSettings};
use std::collections::BTreeMap;
use std::rc::Rc;

/// Immutable options snapshot consumed by the plotting engine.
#[derive(Clone)]
pub struct PlotOpts {
    /// Scales keyed by name
    pub scales: BTreeMap<String, ScaleOpts>,
    /// Hook handlers grouped by kind, in registration order
    pub hooks: BTreeMap<HookKind, Vec<HookFn>>,
    /// Series descriptors; index 0 is the x-axis
    pub series: Vec<SeriesOpts>,
}

impl PlotOpts {
    /// Number of handlers registered under `kind`
    pub fn hook_count(&self, kind: HookKind) -> usize {
        self.hooks.get(&kind).map_or(0, Vec::len)
    }

    /// Invoke every handler registered under `kind`, in registration order
    pub fn run_hooks(&self, kind: HookKind, args: &HookArgs) {
        if let Some(handlers) = self.hooks.get(&kind) {
            for handler in handlers {
                handler(args);
            }
        }
    }
}

impl std::fmt::Debug for PlotOpts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hooks: BTreeMap<_, _> = self.hooks.iter().map(|(k, v)| (k.name(), v.len())).collect();
        f.debug_struct("PlotOpts")
            .field("scales", &self.scales)
            .field("hooks", &hooks)
            .field("series", &self.series)
            .finish()
    }
}

/// Append-only accumulator for [`PlotOpts`].
pub struct OptsBuilder {
    scales: ScaleSettings,
    hooks: BTreeMap<HookKind, Vec<HookFn>>,
    series: Vec<SeriesOpts>,
}

impl OptsBuilder {
    /// Create a builder holding the default scales and the x-axis series slot
    pub fn new() -> Self {
        Self {
            scales: ScaleSettings::default(),
            hooks: BTreeMap::new(),
            series: vec![SeriesOpts::x_axis()],
        }
    }

    /// Append a handler for `kind`
    pub fn add_hook(&mut self, kind: HookKind, handler: impl Fn(&HookArgs) + 'static) {
        self.hooks.entry(kind).or_default().push(Rc::new(handler));
        tracing::trace!("Registered {} hook ({} total)", kind, self.hook_count(kind));
    }

    /// Append a series descriptor, returning its series index
    pub fn add_series(&mut self, descriptor: SeriesOpts) -> usize {
        self.series.push(descriptor);
        self.series.len() - 1
    }

    /// Number of handlers registered under `kind`
    pub fn hook_count(&self, kind: HookKind) -> usize {
        self.hooks.get(&kind).map_or(0, Vec::len)
    }

    /// Number of series, including the x-axis slot
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Synthesize a fresh snapshot of everything registered so far
    pub fn get_opts(&self) -> PlotOpts {
        PlotOpts {
            scales: self.scales.scales.clone(),
            hooks: self.hooks.clone(),
            series: self.series.clone(),
        }
    }
}

impl Default for OptsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OptsBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptsBuilder")
            .field("series", &self.series.len())
            .field("hooks", &self.hooks.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}
