mod analysis_controller;
mod analysis_detail_builder;
mod axis_label_scene_builder;
mod axis_ticks;
mod engine;
mod engine_config;
mod engine_init;
mod engine_snapshot;
mod frame_controller;
mod frame_feed;
mod grid_scene_builder;
mod hover_resolver;
mod interaction_controller;
mod layout;
mod render_style;
mod scope_scene_builder;
mod spectrum_scene_builder;
mod trace_scene_builder;
mod viewport_controller;
mod viewport_store;

pub use analysis_detail_builder::build_analysis_detail_scene;
pub use axis_ticks::AxisLabelPolicy;
pub use engine::ScopeEngine;
pub use engine_config::ScopeEngineConfig;
pub use engine_snapshot::EngineSnapshot;
pub use layout::{PLOT_MARGINS, PlotLayout, PlotMargins, PlotRegion};
pub use render_style::RenderStyle;
pub use scope_scene_builder::{SceneInputs, build_scope_scene};
pub use viewport_store::{StoredViewports, ViewportStore};
