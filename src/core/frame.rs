use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ScopeError, ScopeResult};

/// Half-open bin interval `[start, end)` declared by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinRange {
    pub start: usize,
    pub end: usize,
}

impl BinRange {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.end <= self.start
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn contains(self, bin: usize) -> bool {
        bin >= self.start && bin < self.end
    }
}

/// One push of time-domain samples plus spectrum from the backend.
///
/// Every field besides `sequence_id`, `samples` and `spectrum` is optional;
/// an absent field disables the matching feature for this frame only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(alias = "frame_number", default)]
    pub sequence_id: u64,
    #[serde(default)]
    pub samples: Vec<f64>,
    #[serde(default)]
    pub spectrum: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_range: Option<BinRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_bins: Option<BTreeSet<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_bins_by_center: Option<IndexMap<usize, BTreeSet<usize>>>,
}

impl Frame {
    #[must_use]
    pub fn new(sequence_id: u64, samples: Vec<f64>, spectrum: Vec<f64>) -> Self {
        Self {
            sequence_id,
            samples,
            spectrum,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    #[must_use]
    pub fn with_highlight_range(mut self, range: BinRange) -> Self {
        self.highlight_range = Some(range);
        self
    }

    #[must_use]
    pub fn with_analysis_bins(mut self, bins: impl IntoIterator<Item = usize>) -> Self {
        self.analysis_bins = Some(bins.into_iter().collect());
        self
    }

    #[must_use]
    pub fn with_overlay_bins(
        mut self,
        center: usize,
        bins: impl IntoIterator<Item = usize>,
    ) -> Self {
        self.overlay_bins_by_center
            .get_or_insert_with(IndexMap::new)
            .insert(center, bins.into_iter().collect());
        self
    }

    /// Decodes the backend's frame payload.
    pub fn from_json_str(input: &str) -> ScopeResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ScopeError::InvalidData(format!("failed to parse frame payload: {e}")))
    }

    pub fn to_json_string(&self) -> ScopeResult<String> {
        serde_json::to_string(self)
            .map_err(|e| ScopeError::InvalidData(format!("failed to serialize frame: {e}")))
    }

    /// Highlight range usable for drawing and hit-testing.
    ///
    /// Degenerate ranges (`end <= start`) count as absent.
    #[must_use]
    pub fn active_highlight_range(&self) -> Option<BinRange> {
        self.highlight_range.filter(|range| !range.is_empty())
    }

    /// Threshold usable for drawing; non-finite values count as absent.
    #[must_use]
    pub fn active_threshold(&self) -> Option<f64> {
        self.threshold.filter(|value| value.is_finite())
    }

    #[must_use]
    pub fn is_analysis_bin(&self, bin: usize) -> bool {
        self.analysis_bins
            .as_ref()
            .is_some_and(|bins| bins.contains(&bin))
    }

    #[must_use]
    pub fn overlay_bins_for(&self, center: usize) -> Option<&BTreeSet<usize>> {
        self.overlay_bins_by_center
            .as_ref()
            .and_then(|map| map.get(&center))
    }

    #[must_use]
    pub fn spectrum_value(&self, bin: usize) -> Option<f64> {
        self.spectrum.get(bin).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{BinRange, Frame};

    #[test]
    fn decodes_minimal_payload_with_optional_fields_absent() {
        let frame = Frame::from_json_str(r#"{"sequence_id":7,"samples":[1.0],"spectrum":[]}"#)
            .expect("minimal payload");
        assert_eq!(frame.sequence_id, 7);
        assert_eq!(frame.samples, vec![1.0]);
        assert!(frame.spectrum.is_empty());
        assert!(frame.threshold.is_none());
        assert!(frame.highlight_range.is_none());
        assert!(frame.analysis_bins.is_none());
        assert!(frame.overlay_bins_by_center.is_none());
    }

    #[test]
    fn decodes_full_payload_with_legacy_frame_number() {
        let payload = r#"{
            "frame_number": 3,
            "samples": [0.0, 1.0],
            "spectrum": [4.0, 5.0, 6.0],
            "threshold": 5.5,
            "highlight_range": {"start": 1, "end": 3},
            "analysis_bins": [2],
            "overlay_bins_by_center": {"2": [1, 2]}
        }"#;
        let frame = Frame::from_json_str(payload).expect("full payload");
        assert_eq!(frame.sequence_id, 3);
        assert_eq!(frame.active_highlight_range(), Some(BinRange::new(1, 3)));
        assert!(frame.is_analysis_bin(2));
        assert!(!frame.is_analysis_bin(1));
        let overlay = frame.overlay_bins_for(2).expect("overlay entry");
        assert_eq!(overlay.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn degenerate_highlight_range_is_treated_as_absent() {
        let frame = Frame::new(1, Vec::new(), Vec::new()).with_highlight_range(BinRange::new(9, 9));
        assert!(frame.active_highlight_range().is_none());
    }

    #[test]
    fn malformed_payload_is_rejected() {
        assert!(Frame::from_json_str("{\"samples\": 3}").is_err());
    }
}
