//! Word-timed transcript to subtitle phrase segmentation.
//!
//! The engine is a pure transform from aligner output to non-overlapping,
//! time-bounded phrase segments. File formats, configuration files and
//! batch execution live in the `infrastructure` modules around it.

pub mod shared {
    pub mod constants;
    pub mod float_parse;
}

pub mod transcript {
    pub mod domain {
        pub mod aligned_segment;
        pub mod phrase_segment;
        pub mod segment_validator;
        pub mod word;
    }
    pub mod infrastructure;
}

pub mod segmentation {
    pub mod domain {
        pub mod candidate;
        pub mod flattener;
        pub mod oversize_splitter;
        pub mod overlap_repairer;
        pub mod phrase_builder;
        pub mod phrase_merger;
        pub mod segment_config;
        pub mod silence_splitter;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod batch_executor;
    pub mod segment_phrases_use_case;
    pub mod segmentation_summary;
    pub mod infrastructure {
        pub mod threaded_batch_executor;
    }
}

pub use pipeline::segment_phrases_use_case::{segment_phrases, SegmentPhrasesUseCase};
pub use segmentation::domain::segment_config::SegmentConfig;
pub use transcript::domain::aligned_segment::{AlignedSegment, AlignedWord};
pub use transcript::domain::phrase_segment::PhraseSegment;
pub use transcript::domain::word::Word;
