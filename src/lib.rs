//! # vizprep: reactive plot configuration and data preparation
//!
//! vizprep sits between a panel that supplies frequently-changing state
//! (time-series frames, a time range, a display mode) and an imperative
//! plotting engine that expects a fully-built options object plus an
//! aligned data array.
//!
//! ## Architecture
//!
//! - **Data preparation** ([`prep`]): pure transform from raw frames to
//!   aligned series, with shape errors reported as data
//! - **Options builder** ([`opts`]): append-only accumulation of hooks and
//!   series descriptors, synthesized into an options snapshot
//! - **Events** ([`events`]): domain events (`move`, `hover`, `leave`)
//!   multiplexed onto one engine hook per kind
//! - **Chart config** ([`chart`]): composes the above behind one handle and
//!   caches derived viz data keyed on the identity of the prepared data
//!
//! Everything is single-threaded and synchronous. Shared state uses
//! `Rc`/`RefCell` and never crosses threads.
//!
//! ## Example
//!
//! ```ignore
//! use vizprep::{prepare, ChartConfig, EventKind, PanelOptions, PrepCfgCtx, PrepOpts, TimeRange};
//!
//! let options = PanelOptions::default();
//! let data = prepare(&frames, &PrepOpts::new(options.mode));
//! let mut config = ChartConfig::new(options, PrepCfgCtx::new(TimeRange::new(123.0, 456.0), data));
//!
//! config.on(EventKind::Move, |evt| println!("cursor at {}, {}", evt.x, evt.y));
//!
//! let opts = config.get_opts();
//! let viz = config.viz_data()?;
//! // hand `opts` and `viz.data` to the plotting engine
//! ```

pub mod chart;
pub mod config;
pub mod error;
pub mod events;
pub mod opts;
pub mod prep;
pub mod types;

// Re-export commonly used types
pub use chart::{ChartConfig, HitIndex, PrepCfgCtx, TooltipRow, VizData};
pub use config::{PanelFile, PanelOptions};
pub use error::{Result, VizPrepError};
pub use events::{ChartEvent, EventKind, EventMux, Subscription};
pub use opts::{Cursor, HookArgs, HookKind, OptsBuilder, PlotOpts, PlotRect, SeriesOpts};
pub use prep::{prepare, PrepOpts, PreparedData, StackDirection, StackSums, StackingGroup};
pub use types::{AlignedData, DataFrame, Field, FieldType, PanelMode, TimeRange};
