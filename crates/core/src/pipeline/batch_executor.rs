use thiserror::Error;

use crate::segmentation::domain::segment_config::SegmentConfig;
use crate::transcript::domain::aligned_segment::AlignedSegment;
use crate::transcript::domain::phrase_segment::PhraseSegment;

/// Called after each finished job with `(completed, total)`.
/// Returning `false` stops dispatching further jobs.
pub type ProgressCallback = Box<dyn Fn(usize, usize) -> bool + Send>;

/// One transcript to segment, tagged with a caller-chosen name.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentationJob {
    pub name: String,
    pub segments: Vec<AlignedSegment>,
}

impl SegmentationJob {
    pub fn new(name: impl Into<String>, segments: Vec<AlignedSegment>) -> Self {
        Self {
            name: name.into(),
            segments,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SegmentationOutcome {
    pub name: String,
    pub phrases: Vec<PhraseSegment>,
}

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("segmentation worker panicked")]
    WorkerPanicked,
    #[error("result channel closed before all jobs finished ({received} of {expected})")]
    ChannelClosed { received: usize, expected: usize },
}

/// Abstracts how a batch of transcripts is segmented.
///
/// Outcomes come back in job order. When the progress callback stops the
/// batch, only the jobs that finished are returned.
pub trait BatchExecutor: Send {
    fn execute(
        &self,
        jobs: Vec<SegmentationJob>,
        config: &SegmentConfig,
        on_progress: Option<ProgressCallback>,
    ) -> Result<Vec<SegmentationOutcome>, BatchError>;
}
