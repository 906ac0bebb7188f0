//! Integration tests for the chart configuration workflow
//!
//! These tests drive a `ChartConfig` the way a panel does across
//! re-renders: prepare once per structure change, push context on every
//! render, pull options and viz data, and mount on an engine.

mod common;

use common::builders::{sample_frame, FrameBuilder};
use common::mock_helpers::MockEngine;
use std::cell::RefCell;
use std::rc::Rc;
use vizprep::{
    prepare, ChartConfig, ChartEvent, EventKind, HookKind, PanelMode, PanelOptions, PrepCfgCtx,
    PrepOpts, SeriesOpts, StackDirection, StackingGroup, TimeRange, VizPrepError,
};

fn sample_options() -> PanelOptions {
    PanelOptions::new(PanelMode::Scatter).with_time_zone("UTC")
}

fn sample_ctx() -> PrepCfgCtx {
    let data = prepare(&[sample_frame()], &PrepOpts::new(PanelMode::Scatter));
    PrepCfgCtx::new(TimeRange::new(123.0, 456.0), data)
}

#[test]
fn test_end_to_end_scatter_panel() {
    let mut config = ChartConfig::new(sample_options(), sample_ctx());
    assert!(config.error().is_none());

    let events: Rc<RefCell<Vec<ChartEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    config.on(EventKind::Move, move |evt| sink.borrow_mut().push(evt.clone()));

    let opts = config.get_opts();
    assert_eq!(opts.hook_count(HookKind::Draw), 1);
    assert_eq!(opts.series.len(), 2);

    let viz = config.viz_data().unwrap();
    assert_eq!(
        viz.data,
        vec![
            vec![1.0, 2.0, 3.0, 7.0, 9.0],
            vec![0.0, 10.0, 35.0, 20.0, 25.0]
        ]
    );
    assert_eq!(viz.joined, viz.data);

    let engine = MockEngine::mount(opts, viz.data.clone());
    engine.move_cursor(100.0, 50.0, Some(2));
    engine.move_cursor(200.0, 50.0, Some(3));

    let events = events.borrow();
    assert_eq!(events.len(), 2);
    for evt in events.iter() {
        assert_eq!(evt.data_idxs.len(), engine.series_count());
    }
    assert_eq!(events[0].x, 100.0);
    assert_eq!(events[1].data_idxs, vec![Some(3), Some(3)]);

    let rows = config.tooltip_rows(&events[0]).unwrap();
    assert_eq!(rows[1].value, Some(35.0));
}

#[test]
fn test_rerender_cycle_respects_data_identity() {
    let mut config = ChartConfig::new(sample_options(), sample_ctx());
    let ctx = config.ctx();
    let first = config.viz_data().unwrap();

    // Re-render with the same prepared data and a new time range
    for to in [500.0, 600.0, 700.0] {
        config.set_ctx(ctx.with_time_range(TimeRange::new(123.0, to)));
        assert!(Rc::ptr_eq(&first, &config.viz_data().unwrap()));
    }
    assert_eq!(config.time_range().to, 700.0);

    // Structure change: caller prepares again
    let frame = FrameBuilder::new()
        .time("Time", &[1.0, 2.0])
        .number("Value", &[5.0, 6.0])
        .build();
    let data = prepare(&[frame], &PrepOpts::default());
    config.set_ctx(PrepCfgCtx::new(TimeRange::new(0.0, 10.0), data));

    let second = config.viz_data().unwrap();
    assert!(!Rc::ptr_eq(&first, &second));
    assert_eq!(second.data[1], vec![5.0, 6.0]);
    assert!(Rc::ptr_eq(&second, &config.viz_data().unwrap()));
}

#[test]
fn test_augmenting_builder_before_mount() {
    let mut config = ChartConfig::new(sample_options(), sample_ctx());
    let idx = config
        .builder_mut()
        .add_series(SeriesOpts::default().with_stroke("red"));

    assert_eq!(idx, 2);
    let opts = config.get_opts();
    assert_eq!(opts.series.len(), 3);
    assert_eq!(opts.series[2].stroke.as_deref(), Some("red"));
}

#[test]
fn test_stacked_panel() {
    let frame = FrameBuilder::new()
        .time("Time", &[1.0, 2.0])
        .number("A", &[1.0, 2.0])
        .number("B", &[3.0, 4.0])
        .build();
    let options = sample_options().with_stacking(StackingGroup::new([1, 2], StackDirection::Up));
    let ctx = PrepCfgCtx::new(TimeRange::default(), prepare(&[frame], &PrepOpts::default()));
    let config = ChartConfig::new(options, ctx);

    let viz = config.viz_data().unwrap();
    assert_eq!(
        viz.stack_sums.by_value,
        vec![None, Some(vec![1.0, 2.0]), Some(vec![4.0, 6.0])]
    );
    assert_eq!(viz.data[2], vec![4.0, 6.0]);
    assert_eq!(viz.joined[2], vec![3.0, 4.0]);
    common::assert_float_eq(viz.stack_sums.by_percent[1].as_ref().unwrap()[0], 0.25, 1e-12);
}

#[test]
fn test_stacking_that_no_longer_fits_new_data() {
    let frame = FrameBuilder::new()
        .time("Time", &[1.0])
        .number("A", &[1.0])
        .number("B", &[2.0])
        .build();
    let options = sample_options().with_stacking(StackingGroup::new([1, 2], StackDirection::Down));
    let mut config = ChartConfig::new(
        options,
        PrepCfgCtx::new(TimeRange::default(), prepare(&[frame], &PrepOpts::default())),
    );
    assert_eq!(config.viz_data().unwrap().data[2], vec![-3.0]);

    // New data has only one y series
    config.set_ctx(sample_ctx());
    assert!(config.error().is_some());
    assert!(matches!(config.viz_data(), Err(VizPrepError::Config(_))));
}

#[test]
fn test_shape_error_then_good_data_requires_rebuild() {
    let bad = FrameBuilder::new()
        .length(5)
        .time("Time", &[1.0, 2.0, 3.0, 7.0, 9.0])
        .number("Value", &[0.0, 10.0])
        .build();
    let data = prepare(&[bad], &PrepOpts::default());
    let mut config = ChartConfig::new(sample_options(), PrepCfgCtx::new(TimeRange::default(), data));
    assert!(matches!(config.viz_data(), Err(VizPrepError::DataShape(_))));

    config.set_ctx(sample_ctx());
    assert!(config.error().is_some());
    assert!(config.viz_data().is_err());

    // A config built on the good data agrees with it
    let config = ChartConfig::new(sample_options(), sample_ctx());
    assert!(config.error().is_none());
    assert_eq!(config.get_opts().series.len(), config.viz_data().unwrap().data.len());
}

#[test]
fn test_shape_error_panel_renders_fallback() {
    let frame = FrameBuilder::new()
        .length(5)
        .time("Time", &[1.0, 2.0, 3.0, 7.0, 9.0])
        .number("Value", &[0.0, 10.0])
        .build();
    let data = prepare(&[frame], &PrepOpts::default());
    assert!(data.error.is_some());

    let config = ChartConfig::new(sample_options(), PrepCfgCtx::new(TimeRange::default(), data));
    assert!(config.viz_data().is_err());
}

#[test]
fn test_draw_indexes_current_data() {
    let mut config = ChartConfig::new(sample_options(), sample_ctx());
    let opts = config.get_opts();
    let mut engine = MockEngine::mount(opts, config.viz_data().unwrap().data.clone());

    let index = config.hit_index().expect("index after first draw");
    assert_eq!(index.nearest(6.0), Some(3));

    let frame = FrameBuilder::new()
        .time("Time", &[100.0, 200.0])
        .number("Value", &[1.0, 2.0])
        .build();
    config.set_ctx(PrepCfgCtx::new(
        TimeRange::default(),
        prepare(&[frame], &PrepOpts::default()),
    ));
    engine.set_data(config.viz_data().unwrap().data.clone());

    let index = config.hit_index().unwrap();
    assert_eq!(index.len(), 2);
    assert_eq!(index.nearest(180.0), Some(1));
}

#[test]
fn test_panel_options_from_toml_drive_config() {
    let options = PanelOptions::from_toml_str(
        r#"
        mode = "bubble"

        [[series]]
        stroke = "green"
        width = 3.0
        "#,
    )
    .unwrap();
    let config = ChartConfig::new(options, sample_ctx());

    let series = &config.get_opts().series[1];
    assert_eq!(series.stroke.as_deref(), Some("green"));
    assert_eq!(series.width, Some(3.0));
    assert_eq!(series.label.as_deref(), Some("Value"));
}
