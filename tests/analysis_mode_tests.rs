use std::collections::BTreeSet;

use approx::assert_relative_eq;
use signal_scope::api::{ScopeEngine, ScopeEngineConfig};
use signal_scope::core::{Axis, BinRange, Frame, SurfaceSize, domain_to_pixel};
use signal_scope::interaction::{InteractionMode, ScopeKey};
use signal_scope::render::NullRenderer;

const SPECTRUM_Y: f64 = 400.0;
const PLOT_WIDTH: f64 = 800.0;

fn build_engine() -> ScopeEngine<NullRenderer> {
    let config = ScopeEngineConfig::new(SurfaceSize::new(880, 460));
    ScopeEngine::new(NullRenderer::default(), config).expect("engine init")
}

fn highlighted_frame() -> Frame {
    Frame::new(1, vec![0.0; 1024], vec![64.0; 2048])
        .with_threshold(100.0)
        .with_highlight_range(BinRange::new(330, 500))
}

fn bin_x(engine: &ScopeEngine<NullRenderer>, bin: usize) -> f64 {
    let viewport = engine.viewport(Axis::Frequency);
    engine
        .layout()
        .surface_x(domain_to_pixel(bin as f64 + 0.5, viewport))
}

fn enter_analysis(engine: &mut ScopeEngine<NullRenderer>) {
    let x = bin_x(engine, 400);
    assert!(engine.double_click(x, SPECTRUM_Y).expect("double click"));
    assert_eq!(engine.interaction_mode(), InteractionMode::AnalysisLocked);
}

#[test]
fn double_click_inside_highlight_zooms_to_the_highlight_range() {
    let mut engine = build_engine();
    engine.set_frame(highlighted_frame());
    enter_analysis(&mut engine);

    let viewport = engine.viewport(Axis::Frequency);
    assert_relative_eq!(viewport.scale(), PLOT_WIDTH / 170.0, epsilon = 1e-12);
    assert_relative_eq!(viewport.offset(), 330.0, epsilon = 1e-12);
    assert!(engine.is_analysis_active());
}

#[test]
fn double_click_outside_highlight_or_without_one_does_nothing() {
    let mut engine = build_engine();
    engine.set_frame(highlighted_frame());
    let x = bin_x(&engine, 100);
    assert!(!engine.double_click(x, SPECTRUM_Y).expect("double click"));
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);

    engine.set_frame(Frame::new(2, Vec::new(), vec![64.0; 2048]));
    let x = bin_x(&engine, 400);
    assert!(!engine.double_click(x, SPECTRUM_Y).expect("double click"));

    engine.set_frame(
        Frame::new(3, Vec::new(), vec![64.0; 2048]).with_highlight_range(BinRange::new(500, 400)),
    );
    assert!(!engine.double_click(x, SPECTRUM_Y).expect("degenerate highlight"));
}

#[test]
fn leaving_analysis_restores_the_exact_pre_entry_viewport() {
    let mut engine = build_engine();
    engine.set_frame(highlighted_frame());
    engine.wheel(-1.0, 333.0, SPECTRUM_Y).expect("wheel");
    engine.wheel(-1.0, 517.0, SPECTRUM_Y).expect("wheel");
    let before = engine.viewport(Axis::Frequency);

    enter_analysis(&mut engine);
    // Analysis mode is sticky: wheel and drag still act on the zoomed view.
    engine.wheel(-1.0, 400.0, SPECTRUM_Y).expect("wheel in analysis");
    engine.pointer_down(400.0, SPECTRUM_Y);
    engine.pointer_move(380.0, SPECTRUM_Y).expect("drag in analysis");
    engine.pointer_up();
    assert_eq!(engine.interaction_mode(), InteractionMode::AnalysisLocked);

    assert!(engine.key(ScopeKey::Escape).expect("escape"));
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
    assert_eq!(engine.viewport(Axis::Frequency), before);
}

#[test]
fn second_double_click_leaves_analysis_and_clears_selection() {
    let mut engine = build_engine();
    engine.set_frame(highlighted_frame());
    let before = engine.viewport(Axis::Frequency);
    enter_analysis(&mut engine);

    let x = bin_x(&engine, 412);
    assert!(engine.click(x, SPECTRUM_Y).expect("click"));
    assert!(engine.selection().is_some());

    assert!(engine.double_click(x, SPECTRUM_Y).expect("double click"));
    assert!(engine.selection().is_none());
    assert!(!engine.is_analysis_active());
    assert_eq!(engine.viewport(Axis::Frequency), before);
}

#[test]
fn click_without_overlay_selects_ten_bins_each_side() {
    let mut engine = build_engine();
    engine.set_frame(highlighted_frame());
    enter_analysis(&mut engine);

    let x = bin_x(&engine, 412);
    assert!(engine.click(x, SPECTRUM_Y).expect("click"));
    let selection = engine.selection().expect("selection");
    assert_eq!(selection.center_bin, 412);
    assert_eq!(selection.bins, (402..422).collect::<BTreeSet<_>>());
}

#[test]
fn click_uses_overlay_bins_when_the_frame_provides_them() {
    let mut engine = build_engine();
    engine.set_frame(highlighted_frame().with_overlay_bins(412, [410, 412, 415]));
    enter_analysis(&mut engine);

    let x = bin_x(&engine, 412);
    assert!(engine.click(x, SPECTRUM_Y).expect("click"));
    let selection = engine.selection().expect("selection");
    assert_eq!(selection.center_bin, 412);
    assert_eq!(selection.bins, BTreeSet::from([410, 412, 415]));
}

#[test]
fn click_outside_analysis_bins_is_rejected() {
    let mut engine = build_engine();
    engine.set_frame(highlighted_frame().with_analysis_bins(400..410));
    enter_analysis(&mut engine);

    let x = bin_x(&engine, 412);
    assert!(!engine.click(x, SPECTRUM_Y).expect("click"));
    assert!(engine.selection().is_none());

    let x = bin_x(&engine, 405);
    assert!(engine.click(x, SPECTRUM_Y).expect("click"));
    assert_eq!(engine.selection().expect("selection").center_bin, 405);
}

#[test]
fn fallback_selection_is_clipped_to_the_spectrum() {
    let mut engine = build_engine();
    engine.set_frame(
        Frame::new(1, Vec::new(), vec![64.0; 40]).with_highlight_range(BinRange::new(0, 40)),
    );
    let x = bin_x(&engine, 20);
    assert!(engine.double_click(x, SPECTRUM_Y).expect("enter"));

    let x = bin_x(&engine, 2);
    assert!(engine.click(x, SPECTRUM_Y).expect("click near start"));
    assert_eq!(
        engine.selection().expect("selection").bins,
        (0..12).collect::<BTreeSet<_>>()
    );

    let x = bin_x(&engine, 37);
    assert!(engine.click(x, SPECTRUM_Y).expect("click near end"));
    assert_eq!(
        engine.selection().expect("selection").bins,
        (27..40).collect::<BTreeSet<_>>()
    );
}

#[test]
fn single_click_outside_analysis_is_ignored() {
    let mut engine = build_engine();
    engine.set_frame(highlighted_frame());
    let x = bin_x(&engine, 412);
    assert!(!engine.click(x, SPECTRUM_Y).expect("click"));
    assert!(engine.selection().is_none());
}

#[test]
fn hover_on_selected_bin_lists_the_whole_selection() {
    let mut engine = build_engine();
    engine.set_frame(highlighted_frame().with_overlay_bins(412, [411, 412, 413]));
    enter_analysis(&mut engine);
    let x = bin_x(&engine, 412);
    engine.click(x, SPECTRUM_Y).expect("click");

    engine.pointer_move(x, 410.0).expect("hover");
    let tooltip = engine.tooltip().expect("tooltip");
    let bins: Vec<usize> = tooltip.entries.iter().map(|entry| entry.index).collect();
    assert_eq!(bins, vec![411, 412, 413]);

    let x = bin_x(&engine, 450);
    engine.pointer_move(x, 410.0).expect("hover unselected");
    assert_eq!(engine.tooltip().expect("tooltip").entries.len(), 1);
}

#[test]
fn escape_outside_analysis_is_not_handled() {
    let mut engine = build_engine();
    engine.set_frame(highlighted_frame());
    assert!(!engine.key(ScopeKey::Escape).expect("escape"));
    assert!(!engine.key(ScopeKey::Other).expect("other key"));
}

#[test]
fn detail_scene_covers_the_selection_while_analysing() {
    let mut engine = build_engine();
    engine.set_frame(highlighted_frame());
    let surface = SurfaceSize::new(640, 640);
    assert!(engine.analysis_detail_scene(surface).expect("detail").is_none());

    enter_analysis(&mut engine);
    let scene = engine
        .analysis_detail_scene(surface)
        .expect("detail")
        .expect("highlight detail");
    assert_eq!(scene.rect_count(), 1 + 170);

    let x = bin_x(&engine, 412);
    engine.click(x, SPECTRUM_Y).expect("click");
    let scene = engine
        .analysis_detail_scene(surface)
        .expect("detail")
        .expect("selection detail");
    assert_eq!(scene.rect_count(), 1 + 20);
}

#[test]
fn double_click_enters_analysis_while_the_second_press_is_held() {
    let mut engine = build_engine();
    engine.set_frame(highlighted_frame());
    let x = bin_x(&engine, 400);

    engine.pointer_down(x, SPECTRUM_Y);
    engine.pointer_up();
    engine.pointer_down(x, SPECTRUM_Y);
    assert_eq!(engine.interaction_mode(), InteractionMode::Dragging);

    assert!(engine.double_click(x, SPECTRUM_Y).expect("double click"));
    assert_eq!(engine.interaction_mode(), InteractionMode::AnalysisLocked);
    assert_relative_eq!(engine.viewport(Axis::Frequency).offset(), 330.0, epsilon = 1e-12);

    // The release that follows ends nothing and leaves the zoom in place.
    engine.pointer_up();
    engine.pointer_move(x + 40.0, SPECTRUM_Y).expect("hover");
    assert_relative_eq!(engine.viewport(Axis::Frequency).offset(), 330.0, epsilon = 1e-12);
}

#[test]
fn double_click_during_a_real_drag_is_ignored() {
    let mut engine = build_engine();
    engine.set_frame(highlighted_frame());
    let x = bin_x(&engine, 400);

    engine.pointer_down(x, SPECTRUM_Y);
    engine.pointer_move(x - 30.0, SPECTRUM_Y).expect("drag");
    let x = bin_x(&engine, 400);
    assert!(!engine.double_click(x, SPECTRUM_Y).expect("double click"));
    assert_eq!(engine.interaction_mode(), InteractionMode::Dragging);
}

#[test]
fn released_click_selects_only_when_the_press_did_not_pan() {
    let mut engine = build_engine();
    engine.set_frame(highlighted_frame());
    enter_analysis(&mut engine);

    let x = bin_x(&engine, 412);
    engine.pointer_down(x, SPECTRUM_Y);
    engine.pointer_move(x + 1.0, SPECTRUM_Y).expect("jitter");
    assert!(engine.click_released(1, x, SPECTRUM_Y).expect("release"));
    assert_eq!(engine.selection().expect("selection").center_bin, 412);

    let x = bin_x(&engine, 450);
    engine.pointer_down(x, SPECTRUM_Y);
    engine.pointer_move(x - 60.0, SPECTRUM_Y).expect("pan");
    engine.pointer_up();
    assert!(!engine.click_released(1, x - 60.0, SPECTRUM_Y).expect("release after pan"));
    assert_eq!(engine.selection().expect("selection kept").center_bin, 412);
    assert_eq!(engine.interaction_mode(), InteractionMode::AnalysisLocked);
}

#[test]
fn released_double_click_toggles_analysis_mode() {
    let mut engine = build_engine();
    engine.set_frame(highlighted_frame());
    let before = engine.viewport(Axis::Frequency);
    let x = bin_x(&engine, 400);

    for n_press in 1..=2 {
        engine.pointer_down(x, SPECTRUM_Y);
        engine.click_released(n_press, x, SPECTRUM_Y).expect("release");
    }
    assert_eq!(engine.interaction_mode(), InteractionMode::AnalysisLocked);

    let x = bin_x(&engine, 400);
    for n_press in 1..=2 {
        engine.pointer_down(x, SPECTRUM_Y);
        engine.click_released(n_press, x, SPECTRUM_Y).expect("release");
    }
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
    assert!(engine.selection().is_none());
    assert_eq!(engine.viewport(Axis::Frequency), before);
}
