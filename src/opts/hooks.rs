//! Hook kinds and the engine context passed to hook handlers.
//!
//! Hooks are the plotting engine's extension points. The engine fires them
//! at defined lifecycle moments and hands each handler a [`HookArgs`]
//! describing its current state (cursor position, nearest point per series,
//! plot rectangle).

use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Handler registered under a hook kind.
pub type HookFn = Rc<dyn Fn(&HookArgs)>;

/// Lifecycle moments at which the plotting engine fires hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HookKind {
    /// Engine instance constructed.
    Init,
    /// A frame was drawn.
    Draw,
    /// Cursor moved.
    SetCursor,
    /// Data array replaced.
    SetData,
    /// A scale range changed.
    SetScale,
    /// Plot rectangle re-measured.
    SyncRect,
    /// Engine instance destroyed.
    Destroy,
}

impl HookKind {
    /// All hook kinds, in firing-table order
    pub fn all() -> &'static [HookKind] {
        &[
            HookKind::Init,
            HookKind::Draw,
            HookKind::SetCursor,
            HookKind::SetData,
            HookKind::SetScale,
            HookKind::SyncRect,
            HookKind::Destroy,
        ]
    }

    /// Engine-side name of this hook
    pub fn name(&self) -> &'static str {
        match self {
            HookKind::Init => "init",
            HookKind::Draw => "draw",
            HookKind::SetCursor => "setCursor",
            HookKind::SetData => "setData",
            HookKind::SetScale => "setScale",
            HookKind::SyncRect => "syncRect",
            HookKind::Destroy => "destroy",
        }
    }
}

impl std::fmt::Display for HookKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Engine cursor state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cursor {
    /// Horizontal offset in plot space; negative when outside the plot.
    pub left: f64,
    /// Vertical offset in plot space; negative when outside the plot.
    pub top: f64,
    /// Nearest data index per series, `None` where no point is near.
    pub idxs: Vec<Option<usize>>,
}

impl Cursor {
    /// Cursor parked outside the plot, as engines report before the first move
    pub fn outside(series_count: usize) -> Self {
        Self {
            left: -10.0,
            top: -10.0,
            idxs: vec![None; series_count],
        }
    }

    /// Whether the cursor lies over the plot area
    pub fn is_inside(&self) -> bool {
        self.left >= 0.0 && self.top >= 0.0
    }
}

/// Plot rectangle in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlotRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Engine context handed to every hook handler.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HookArgs {
    pub cursor: Cursor,
    pub rect: PlotRect,
}

impl HookArgs {
    /// Arguments carrying only a cursor
    pub fn with_cursor(cursor: Cursor) -> Self {
        Self {
            cursor,
            rect: PlotRect::default(),
        }
    }

    /// Arguments carrying only a plot rect
    pub fn with_rect(rect: PlotRect) -> Self {
        Self {
            cursor: Cursor::default(),
            rect,
        }
    }
}
