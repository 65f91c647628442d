use signal_scope::api::{RenderStyle, ScopeEngine, ScopeEngineConfig, ViewportStore};
use signal_scope::channel::FrameChannel;
use signal_scope::core::{Axis, BinRange, Frame, SurfaceSize};
use signal_scope::render::{Color, NullRenderer};

const SPECTRUM_Y: f64 = 400.0;

fn config() -> ScopeEngineConfig {
    ScopeEngineConfig::new(SurfaceSize::new(880, 460))
}

fn build_engine() -> ScopeEngine<NullRenderer> {
    ScopeEngine::new(NullRenderer::default(), config()).expect("engine init")
}

#[test]
fn display_tick_renders_once_per_change() {
    let mut engine = build_engine();
    engine.set_frame(Frame::new(1, Vec::new(), vec![0.0; 2048]));
    assert!(engine.display_tick().expect("first tick"));
    assert!(!engine.display_tick().expect("idle tick"));

    engine.wheel(-1.0, 400.0, SPECTRUM_Y).expect("wheel");
    engine.wheel(-1.0, 400.0, SPECTRUM_Y).expect("wheel");
    assert!(engine.display_tick().expect("tick after wheel"));
    assert!(!engine.display_tick().expect("idle tick"));
    assert_eq!(engine.render_count(), 2);
}

#[test]
fn attached_channel_feeds_newest_frame_into_the_next_tick() {
    let channel = FrameChannel::new();
    let mut engine = build_engine();
    engine.attach_channel(&channel);
    engine.display_tick().expect("initial tick");

    channel.push(Frame::new(1, vec![1.0; 10], vec![1.0; 10]));
    channel.push(Frame::new(2, vec![2.0; 10], vec![2.0; 10]));
    assert_eq!(channel.drain(), 1);

    assert!(engine.display_tick().expect("tick with frame"));
    assert_eq!(engine.frame().sequence_id, 2);
    assert!(!engine.display_tick().expect("no new frame"));

    engine.detach_channel();
    assert_eq!(channel.subscriber_count(), 0);
    channel.push(Frame::new(3, Vec::new(), Vec::new()));
    channel.drain();
    assert!(!engine.display_tick().expect("detached tick"));
    assert_eq!(engine.frame().sequence_id, 2);
}

#[test]
fn new_frames_keep_the_current_viewports_and_analysis_mode() {
    let mut engine = build_engine();
    let frame = |id| {
        Frame::new(id, Vec::new(), vec![10.0; 2048]).with_highlight_range(BinRange::new(330, 500))
    };
    engine.set_frame(frame(1));
    assert!(engine.double_click(60.0 + 400.5, SPECTRUM_Y).expect("enter"));
    let zoomed = engine.viewport(Axis::Frequency);

    engine.set_frame(frame(2));
    assert!(engine.is_analysis_active());
    assert_eq!(engine.viewport(Axis::Frequency), zoomed);
}

#[test]
fn viewport_store_carries_viewports_across_engine_recreation() {
    let store = ViewportStore::new();
    let mut first = build_engine().with_viewport_store(store.clone());
    first.set_frame(Frame::new(1, vec![0.0; 4000], vec![0.0; 2048]));
    first.wheel(-1.0, 300.0, 100.0).expect("zoom time");
    first.wheel(-1.0, 300.0, SPECTRUM_Y).expect("zoom spectrum");
    assert!(first.persist_viewports());
    let time = first.viewport(Axis::Time);
    let frequency = first.viewport(Axis::Frequency);
    drop(first);

    let second = build_engine().with_viewport_store(store);
    assert_eq!(second.viewport(Axis::Time), time);
    assert_eq!(second.viewport(Axis::Frequency), frequency);
}

#[test]
fn persisting_during_analysis_stores_the_pre_analysis_view() {
    let store = ViewportStore::new();
    let mut engine = build_engine().with_viewport_store(store.clone());
    engine.set_frame(
        Frame::new(1, Vec::new(), vec![10.0; 2048]).with_highlight_range(BinRange::new(330, 500)),
    );
    let before = engine.viewport(Axis::Frequency).snapshot();
    assert!(engine.double_click(60.0 + 400.5, SPECTRUM_Y).expect("enter"));

    assert!(engine.persist_viewports());
    assert_eq!(store.load().expect("stored").frequency, before);
}

#[test]
fn engine_without_store_does_not_persist() {
    let engine = build_engine();
    assert!(!engine.persist_viewports());
}

#[test]
fn config_round_trips_through_json_and_is_validated() {
    let config = config()
        .with_show_time_axis(false)
        .with_selection_radius(4)
        .with_label_policy(80.0, 10);
    let json = config.to_json_pretty().expect("serialize");
    assert_eq!(ScopeEngineConfig::from_json_str(&json).expect("parse"), config);

    let invalid = config.with_label_policy(80.0, 0);
    assert!(ScopeEngine::new(NullRenderer::default(), invalid).is_err());
    let invalid = ScopeEngineConfig::new(SurfaceSize::new(0, 0));
    assert!(ScopeEngine::new(NullRenderer::default(), invalid).is_err());
}

#[test]
fn selection_radius_from_config_drives_fallback_window() {
    let mut engine =
        ScopeEngine::new(NullRenderer::default(), config().with_selection_radius(3)).expect("init");
    engine.set_frame(
        Frame::new(1, Vec::new(), vec![10.0; 2048]).with_highlight_range(BinRange::new(330, 500)),
    );
    assert!(engine.double_click(60.0 + 400.5, SPECTRUM_Y).expect("enter"));
    let viewport = engine.viewport(Axis::Frequency);
    let x = engine
        .layout()
        .surface_x(signal_scope::core::domain_to_pixel(412.5, viewport));
    assert!(engine.click(x, SPECTRUM_Y).expect("click"));
    assert_eq!(engine.selection().expect("selection").bins.len(), 6);
}

#[test]
fn invalid_render_style_is_rejected_and_valid_one_invalidates() {
    let mut engine = build_engine();
    engine.display_tick().expect("tick");

    let bad = RenderStyle {
        bar_width_ratio: 1.5,
        ..RenderStyle::default()
    };
    assert!(engine.set_render_style(bad).is_err());
    assert!(!engine.needs_redraw());

    let style = RenderStyle {
        trace_color: Color::rgb(0.0, 1.0, 0.0),
        ..RenderStyle::default()
    };
    engine.set_render_style(style).expect("valid style");
    assert_eq!(engine.render_style(), style);
    assert!(engine.needs_redraw());
}

#[test]
fn snapshot_json_reflects_engine_state() {
    let mut engine = build_engine();
    engine.set_frame(Frame::new(7, vec![1.0; 3], vec![2.0; 5]));
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.sequence_id, 7);
    assert_eq!(snapshot.sample_count, 3);
    assert_eq!(snapshot.bin_count, 5);

    let json = engine.snapshot_json_pretty().expect("snapshot json");
    assert!(json.contains("\"sequence_id\": 7"));
    assert!(json.contains("\"mode\": \"Idle\""));
}
