//! Reactive chart configuration.
//!
//! A [`ChartConfig`] is built once per set of static [`PanelOptions`] and
//! then fed new dynamic context ([`PrepCfgCtx`]) on every re-render. It
//! composes the options builder, the event multiplexer and a private cache
//! of derived [`VizData`]:
//!
//! ```text
//!            set_ctx(ctx) ──► [ConfigState] ◄── draw hook (hit index)
//!                               │   ctx, cache
//!  viz_data() ◄── cache hit? ───┘
//!                  └─ miss: join frames → stack → store (keyed by ctx.data)
//! ```
//!
//! # Cache identity
//!
//! The cache is keyed on the *identity* of the `Rc<PreparedData>` inside the
//! context, never on its contents. Handing in a new `Rc` (even one with
//! equal contents) invalidates it; handing in a clone of the same `Rc`
//! keeps it. Time range changes alone never invalidate it.

pub mod hit;

pub use hit::HitIndex;

use crate::config::PanelOptions;
use crate::error::{Result, VizPrepError};
use crate::events::{ChartEvent, EventKind, EventMux, Subscription};
use crate::opts::{HookArgs, HookKind, OptsBuilder, PlotOpts, PlotRect, SeriesOpts};
use crate::prep::{
    apply_stacks, compute_stacks, join_frames, validate_groups, PreparedData, StackSums,
    StackingGroup,
};
use crate::types::{AlignedData, PanelMode, TimeRange};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Dynamic part of a chart configuration
#[derive(Debug, Clone)]
pub struct PrepCfgCtx {
    /// Current time range
    pub time_range: TimeRange,
    /// Prepared data; its `Rc` identity keys the viz cache
    pub data: Rc<PreparedData>,
}

impl PrepCfgCtx {
    pub fn new(time_range: TimeRange, data: PreparedData) -> Self {
        Self {
            time_range,
            data: Rc::new(data),
        }
    }

    /// Same data reference, different time range
    pub fn with_time_range(&self, time_range: TimeRange) -> Self {
        Self {
            time_range,
            data: self.data.clone(),
        }
    }
}

/// Visualization data derived from the current context
#[derive(Debug, Clone, PartialEq)]
pub struct VizData {
    /// Final series handed to the engine (stacked series replaced by their sums)
    pub data: AlignedData,
    /// Aligned series before stacking
    pub joined: AlignedData,
    /// Stacked sums keyed by series index
    pub stack_sums: StackSums,
}

/// One tooltip line: a series and the value under the cursor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipRow {
    pub series_idx: usize,
    pub data_idx: Option<usize>,
    pub value: Option<f64>,
}

struct CachedViz {
    source: Rc<PreparedData>,
    viz: Rc<VizData>,
}

struct ConfigState {
    ctx: PrepCfgCtx,
    stacking: Vec<StackingGroup>,
    mode: PanelMode,
    /// Series count (x-axis included) the builder was configured for;
    /// `None` when the initial data carried a shape error
    layout: Option<usize>,
    error: Option<String>,
    cache: Option<CachedViz>,
    hit_index: Option<(Rc<VizData>, Rc<HitIndex>)>,
    plot_rect: Option<PlotRect>,
}

impl ConfigState {
    fn set_ctx(&mut self, ctx: PrepCfgCtx) {
        let changed = !Rc::ptr_eq(&self.ctx.data, &ctx.data);
        self.ctx = ctx;
        if changed {
            if self.cache.take().is_some() {
                tracing::debug!("Data reference changed, viz cache invalidated");
            }
            self.error = self.check_config();
        }
    }

    /// Check the static configuration against the held data.
    ///
    /// Shape errors stay on the data itself and are not repeated here.
    fn check_config(&self) -> Option<String> {
        let data = &self.ctx.data;
        if !data.is_ok() {
            return None;
        }
        if data.mode != self.mode {
            tracing::warn!(
                "Data was prepared for {} mode but the panel is in {} mode",
                data.mode,
                self.mode
            );
        }

        let result = match self.layout {
            None => Err(VizPrepError::Config(
                "config was built on invalid data; rebuild it".to_string(),
            )),
            Some(configured) => validate_groups(&self.stacking, data.series_count()).and_then(
                |()| {
                    if configured == data.series_count() {
                        Ok(())
                    } else {
                        Err(VizPrepError::Config(format!(
                            "series layout changed from {} to {} series; rebuild the config",
                            configured,
                            data.series_count()
                        )))
                    }
                },
            ),
        };

        result.err().map(|e| {
            tracing::warn!("Invalid chart configuration: {}", e);
            match e {
                VizPrepError::Config(msg) => msg,
                other => other.to_string(),
            }
        })
    }

    fn viz_data(&mut self) -> Result<Rc<VizData>> {
        if let Some(error) = &self.error {
            return Err(VizPrepError::Config(error.clone()));
        }

        if let Some(cached) = &self.cache {
            if Rc::ptr_eq(&cached.source, &self.ctx.data) {
                return Ok(cached.viz.clone());
            }
        }

        if let Some(error) = &self.ctx.data.error {
            return Err(VizPrepError::DataShape(error.clone()));
        }

        let joined = join_frames(&self.ctx.data.frames)?;
        let stack_sums = compute_stacks(&self.stacking, &joined);
        let data = apply_stacks(&joined, &stack_sums);

        let viz = Rc::new(VizData {
            data,
            joined,
            stack_sums,
        });
        tracing::debug!(
            "Recomputed viz data: {} series, {} stacking groups",
            viz.joined.len(),
            self.stacking.len()
        );

        self.cache = Some(CachedViz {
            source: self.ctx.data.clone(),
            viz: viz.clone(),
        });
        Ok(viz)
    }

    fn refresh_hit_index(&mut self) {
        let viz = match self.viz_data() {
            Ok(viz) => viz,
            Err(e) => {
                tracing::trace!("Skipping hit index on draw: {}", e);
                return;
            }
        };

        if let Some((built_from, _)) = &self.hit_index {
            if Rc::ptr_eq(built_from, &viz) {
                return;
            }
        }

        let xs = viz.data.first().map(Vec::as_slice).unwrap_or(&[]);
        let index = HitIndex::build(xs);
        tracing::trace!("Rebuilt hit index over {} points", index.len());
        self.hit_index = Some((viz, Rc::new(index)));
    }
}

/// Reactive chart configuration
pub struct ChartConfig {
    options: PanelOptions,
    builder: OptsBuilder,
    events: EventMux,
    state: Rc<RefCell<ConfigState>>,
    rect_tracked: bool,
}

impl ChartConfig {
    /// Build a configuration with a fresh options builder
    pub fn new(options: PanelOptions, ctx: PrepCfgCtx) -> Self {
        Self::with_builder(options, ctx, OptsBuilder::new())
    }

    /// Build a configuration on top of an existing builder
    ///
    /// One series descriptor is appended per y series of the initial data,
    /// styled for the panel mode and overlaid with `options.series`.
    pub fn with_builder(options: PanelOptions, ctx: PrepCfgCtx, mut builder: OptsBuilder) -> Self {
        let mut layout = None;

        if ctx.data.is_ok() {
            for (i, name) in ctx.data.series_names().into_iter().enumerate().skip(1) {
                let mut series = SeriesOpts::for_mode(name, options.mode);
                if let Some(overrides) = options.series.get(i - 1) {
                    series = series.merge(overrides);
                }
                builder.add_series(series);
            }
            layout = Some(ctx.data.series_count());
        }

        let mut state = ConfigState {
            ctx,
            stacking: options.stacking.clone(),
            mode: options.mode,
            layout,
            error: None,
            cache: None,
            hit_index: None,
            plot_rect: None,
        };
        state.error = state.check_config();
        let state = Rc::new(RefCell::new(state));

        let weak: Weak<RefCell<ConfigState>> = Rc::downgrade(&state);
        builder.add_hook(HookKind::Draw, move |_: &HookArgs| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            match state.try_borrow_mut() {
                Ok(mut state) => state.refresh_hit_index(),
                Err(_) => tracing::warn!("Draw hook re-entered while config state was borrowed"),
            };
        });

        tracing::debug!(
            "Created chart config: mode={}, tz={}, {} series",
            options.mode,
            options.time_zone,
            builder.series_count()
        );

        Self {
            options,
            builder,
            events: EventMux::new(),
            state,
            rect_tracked: false,
        }
    }

    /// Static options this config was built from
    pub fn options(&self) -> &PanelOptions {
        &self.options
    }

    /// Configuration error for the held context, if any
    ///
    /// Re-evaluated whenever [`set_ctx`](Self::set_ctx) hands in a new data
    /// reference. When set, [`viz_data`](Self::viz_data) fails with the
    /// same message.
    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Builder backing this config
    pub fn builder(&self) -> &OptsBuilder {
        &self.builder
    }

    /// Builder access for augmentation before the options are consumed
    pub fn builder_mut(&mut self) -> &mut OptsBuilder {
        &mut self.builder
    }

    /// Options snapshot for the engine
    pub fn get_opts(&self) -> PlotOpts {
        self.builder.get_opts()
    }

    /// Replace the dynamic context
    pub fn set_ctx(&mut self, ctx: PrepCfgCtx) {
        self.state.borrow_mut().set_ctx(ctx);
    }

    /// Currently held context
    pub fn ctx(&self) -> PrepCfgCtx {
        self.state.borrow().ctx.clone()
    }

    /// Time range of the currently held context
    pub fn time_range(&self) -> TimeRange {
        self.state.borrow().ctx.time_range
    }

    /// Cached or freshly computed visualization data
    ///
    /// Fails when the held data carries a shape error or when
    /// [`error`](Self::error) is set.
    pub fn viz_data(&self) -> Result<Rc<VizData>> {
        self.state.borrow_mut().viz_data()
    }

    /// Subscribe to a domain event
    pub fn on(
        &mut self,
        kind: EventKind,
        handler: impl Fn(&ChartEvent) + 'static,
    ) -> Subscription {
        self.events.on(&mut self.builder, kind, handler)
    }

    /// Event multiplexer (for inspection)
    pub fn events(&self) -> &EventMux {
        &self.events
    }

    /// Start recording the plot rectangle reported by `syncRect`
    pub fn track_rect(&mut self) {
        if self.rect_tracked {
            return;
        }
        let weak = Rc::downgrade(&self.state);
        self.builder.add_hook(HookKind::SyncRect, move |args: &HookArgs| {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().plot_rect = Some(args.rect);
            }
        });
        self.rect_tracked = true;
    }

    /// Last plot rectangle seen by `syncRect`
    pub fn plot_rect(&self) -> Option<PlotRect> {
        self.state.borrow().plot_rect
    }

    /// Hit index built by the most recent draw
    pub fn hit_index(&self) -> Option<Rc<HitIndex>> {
        self.state
            .borrow()
            .hit_index
            .as_ref()
            .map(|(_, index)| index.clone())
    }

    /// Values under the cursor for each series of `event`
    pub fn tooltip_rows(&self, event: &ChartEvent) -> Result<Vec<TooltipRow>> {
        let viz = self.viz_data()?;
        Ok(event
            .data_idxs
            .iter()
            .enumerate()
            .map(|(series_idx, &data_idx)| TooltipRow {
                series_idx,
                data_idx,
                value: data_idx.and_then(|idx| {
                    viz.joined
                        .get(series_idx)
                        .and_then(|values| values.get(idx))
                        .copied()
                }),
            })
            .collect())
    }
}

impl std::fmt::Debug for ChartConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartConfig")
            .field("options", &self.options)
            .field("builder", &self.builder)
            .field("events", &self.events)
            .field("error", &self.state.borrow().error)
            .finish()
    }
}
