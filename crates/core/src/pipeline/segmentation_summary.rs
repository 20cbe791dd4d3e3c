use serde::Serialize;

use crate::shared::constants::SUMMARY_PREVIEW_LEN;
use crate::transcript::domain::phrase_segment::PhraseSegment;

/// Stage-complete payload: the phrase count and the first few phrases.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SegmentationSummary {
    pub n_segments: usize,
    pub preview: Vec<PhraseSegment>,
}

impl SegmentationSummary {
    pub fn from_phrases(phrases: &[PhraseSegment]) -> Self {
        Self {
            n_segments: phrases.len(),
            preview: phrases.iter().take(SUMMARY_PREVIEW_LEN).cloned().collect(),
        }
    }
}
