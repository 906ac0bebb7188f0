//! vizprep demo driver
//!
//! Builds a chart config for a panel snapshot (the built-in sample panel or
//! a JSON/TOML file given as the first argument), mounts it on a minimal
//! simulated engine and sweeps the cursor across the plot, logging the
//! tooltip rows produced for every `move` event.

use anyhow::Context;
use std::cell::RefCell;
use std::rc::Rc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vizprep::{
    prepare, ChartConfig, ChartEvent, Cursor, DataFrame, EventKind, Field, HookArgs, HookKind,
    PanelFile, PanelMode, PanelOptions, PlotRect, PrepCfgCtx, PrepOpts, TimeRange,
};

const PLOT_RECT: PlotRect = PlotRect {
    left: 0.0,
    top: 0.0,
    width: 800.0,
    height: 400.0,
};

fn sample_panel() -> PanelFile {
    PanelFile {
        options: PanelOptions::new(PanelMode::Scatter).with_time_zone("UTC"),
        time_range: TimeRange::new(123.0, 456.0),
        structure_rev: 1000,
        frames: vec![DataFrame::new(
            5,
            vec![
                Field::time("Time", vec![1.0, 2.0, 3.0, 7.0, 9.0]),
                Field::number("Value", vec![0.0, 10.0, 35.0, 20.0, 25.0]),
            ],
        )],
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,vizprep=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let panel = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!("Loading panel from {}", path);
            PanelFile::load(&path).with_context(|| format!("loading panel {}", path))?
        }
        None => sample_panel(),
    };

    let data = prepare(&panel.frames, &PrepOpts::new(panel.options.mode));
    if let Some(error) = &data.error {
        anyhow::bail!("Could not prepare data: {}", error);
    }

    let mut config = ChartConfig::new(panel.options.clone(), PrepCfgCtx::new(panel.time_range, data));
    if let Some(error) = config.error() {
        anyhow::bail!("Could not prepare config: {}", error);
    }

    let last_event: Rc<RefCell<Option<ChartEvent>>> = Rc::new(RefCell::new(None));
    let sink = last_event.clone();
    config.on(EventKind::Move, move |evt| *sink.borrow_mut() = Some(evt.clone()));
    config.on(EventKind::Leave, |_| tracing::info!("Cursor left the plot"));
    config.track_rect();

    let opts = config.get_opts();
    let viz = config.viz_data()?;
    tracing::info!(
        "Mounting plot: {} series, {} points, hooks {:?}",
        opts.series.len(),
        viz.data.first().map_or(0, Vec::len),
        opts.hooks.iter().map(|(k, v)| (k.name(), v.len())).collect::<Vec<_>>()
    );

    opts.run_hooks(HookKind::Init, &HookArgs::default());
    opts.run_hooks(HookKind::SyncRect, &HookArgs::with_rect(PLOT_RECT));
    opts.run_hooks(HookKind::Draw, &HookArgs::default());

    let index = config.hit_index().context("draw did not build a hit index")?;
    let xs = viz.data.first().cloned().unwrap_or_default();
    let (min, max) = xs
        .iter()
        .filter(|x| x.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)));
    let span = if max > min { max - min } else { 1.0 };

    let steps = 8;
    for step in 0..=steps {
        let x = min + span * step as f64 / steps as f64;
        let idx = index.nearest(x);
        let cursor = Cursor {
            left: (x - min) / span * PLOT_RECT.width,
            top: PLOT_RECT.height / 2.0,
            idxs: vec![idx; opts.series.len()],
        };
        opts.run_hooks(HookKind::SetCursor, &HookArgs::with_cursor(cursor));

        if let Some(evt) = last_event.borrow().as_ref() {
            let rows = config.tooltip_rows(evt)?;
            let cells: Vec<String> = rows
                .iter()
                .map(|row| match row.value {
                    Some(v) => format!("{}={}", row.series_idx, v),
                    None => format!("{}=--", row.series_idx),
                })
                .collect();
            tracing::info!("move x={:.1} y={:.1}: {}", evt.x, evt.y, cells.join(" "));
        }
    }

    opts.run_hooks(
        HookKind::SetCursor,
        &HookArgs::with_cursor(Cursor::outside(opts.series.len())),
    );
    opts.run_hooks(HookKind::Destroy, &HookArgs::default());

    if let Some(rect) = config.plot_rect() {
        tracing::debug!("Final plot rect: {:?}", rect);
    }

    Ok(())
}
