use super::aligned_segment::AlignedSegment;
use crate::shared::constants::{
    VALIDATOR_CLAMPED_SEGMENT_DURATION, VALIDATOR_MAX_SEGMENT_DURATION,
    VALIDATOR_MIN_SEGMENT_DURATION,
};

/// Repairs implausible segment-level timestamps before flattening.
///
/// Inverted or empty segments get a short positive duration; segments
/// longer than 30 s are clamped to 8 s. Word timings are not touched.
pub struct SegmentValidator;

impl SegmentValidator {
    pub fn validate(segments: &[AlignedSegment]) -> Vec<AlignedSegment> {
        let mut repaired = 0usize;
        let out = segments
            .iter()
            .map(|seg| {
                let mut seg = seg.clone();
                if seg.end <= seg.start {
                    seg.end = seg.start + VALIDATOR_MIN_SEGMENT_DURATION;
                    repaired += 1;
                } else if seg.end - seg.start > VALIDATOR_MAX_SEGMENT_DURATION {
                    seg.end = seg.start + VALIDATOR_CLAMPED_SEGMENT_DURATION;
                    repaired += 1;
                }
                seg
            })
            .collect();
        if repaired > 0 {
            log::debug!("segment validator: repaired {repaired} segment time windows");
        }
        out
    }
}
