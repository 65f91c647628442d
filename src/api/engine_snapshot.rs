use serde::{Deserialize, Serialize};

use crate::core::{Axis, SurfaceSize, ViewportSnapshot};
use crate::error::{ScopeError, ScopeResult};
use crate::interaction::{AnalysisState, InteractionMode, Selection, Tooltip};
use crate::render::Renderer;

use super::ScopeEngine;

/// Serializable deterministic state dump used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub surface: SurfaceSize,
    pub show_time_axis: bool,
    pub sequence_id: u64,
    pub sample_count: usize,
    pub bin_count: usize,
    pub time_viewport: ViewportSnapshot,
    pub frequency_viewport: ViewportSnapshot,
    pub mode: InteractionMode,
    pub analysis: AnalysisState,
    pub selection: Option<Selection>,
    pub tooltip: Option<Tooltip>,
    pub redraw_pending: bool,
    pub render_count: u64,
}

impl<R: Renderer> ScopeEngine<R> {
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            surface: self.config.surface,
            show_time_axis: self.config.show_time_axis,
            sequence_id: self.frame.sequence_id,
            sample_count: self.domain_len(Axis::Time),
            bin_count: self.domain_len(Axis::Frequency),
            time_viewport: self.time_viewport.snapshot(),
            frequency_viewport: self.frequency_viewport.snapshot(),
            mode: self.interaction.mode(),
            analysis: self.interaction.analysis(),
            selection: self.interaction.selection().cloned(),
            tooltip: self.interaction.tooltip().cloned(),
            redraw_pending: self.redraw_pending,
            render_count: self.render_count,
        }
    }

    /// Serializes the snapshot as pretty JSON for fixture-based checks.
    pub fn snapshot_json_pretty(&self) -> ScopeResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| ScopeError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
