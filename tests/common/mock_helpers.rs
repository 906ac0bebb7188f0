//! Mock construction helpers

use vizprep::{Cursor, HookArgs, HookKind, PlotOpts, PlotRect};

/// Minimal stand-in for the plotting engine: owns an options snapshot and
/// fires its hooks the way a mounted plot would.
pub struct MockEngine {
    pub opts: PlotOpts,
    pub data: Vec<Vec<f64>>,
}

impl MockEngine {
    /// Mount: fire `init`, `syncRect` and a first `draw`
    pub fn mount(opts: PlotOpts, data: Vec<Vec<f64>>) -> Self {
        let engine = Self { opts, data };
        engine.opts.run_hooks(HookKind::Init, &HookArgs::default());
        engine.opts.run_hooks(
            HookKind::SyncRect,
            &HookArgs::with_rect(PlotRect {
                left: 10.0,
                top: 20.0,
                width: 800.0,
                height: 400.0,
            }),
        );
        engine.draw();
        engine
    }

    pub fn series_count(&self) -> usize {
        self.opts.series.len()
    }

    pub fn draw(&self) {
        self.opts.run_hooks(HookKind::Draw, &HookArgs::default());
    }

    /// Replace the data and redraw
    pub fn set_data(&mut self, data: Vec<Vec<f64>>) {
        self.data = data;
        self.opts.run_hooks(HookKind::SetData, &HookArgs::default());
        self.draw();
    }

    /// Move the cursor, pointing every series at `idx`
    pub fn move_cursor(&self, left: f64, top: f64, idx: Option<usize>) {
        let cursor = Cursor {
            left,
            top,
            idxs: vec![idx; self.series_count()],
        };
        self.opts
            .run_hooks(HookKind::SetCursor, &HookArgs::with_cursor(cursor));
    }

    /// Move the cursor out of the plot
    pub fn leave(&self) {
        self.opts.run_hooks(
            HookKind::SetCursor,
            &HookArgs::with_cursor(Cursor::outside(self.series_count())),
        );
    }
}
