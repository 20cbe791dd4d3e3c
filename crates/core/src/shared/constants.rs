/// Default gap (seconds) at or above which two words land in different chunks.
pub const DEFAULT_SILENCE_THRESHOLD: f64 = 0.6;

pub const DEFAULT_MIN_WORDS: usize = 2;
pub const DEFAULT_MAX_WORDS: usize = 14;
pub const DEFAULT_MAX_DURATION: f64 = 8.0;
pub const DEFAULT_MAX_CHARS: usize = 80;

pub const DEFAULT_STRONG_PUNCT: &str = ".!?…";
pub const DEFAULT_SOFT_PUNCT: &str = ",;:";

/// Fraction of `max_duration` that counts as a breath pause inside a chunk.
pub const DEFAULT_INTRA_CHUNK_GAP_FACTOR: f64 = 0.25;

/// Lower bound for the intra-chunk pause threshold, in seconds.
pub const MIN_INTRA_CHUNK_PAUSE: f64 = 0.18;

pub const DEFAULT_MIN_DURATION: f64 = 0.8;
pub const DEFAULT_MERGE_GAP_LIMIT: f64 = 1.5;

/// Nudge applied when a segment starts at or before its predecessor's end.
pub const OVERLAP_EPSILON: f64 = 0.001;

/// Duration given to a word that has a start time but no end time.
pub const FALLBACK_WORD_DURATION: f64 = 0.05;

/// Minimum window used when reallocating time across proportional blocks.
pub const MIN_ALLOCATION_SPAN: f64 = 1e-6;

/// Inter-word gaps at or below this are treated as "no gap".
pub const GAP_NOISE_FLOOR: f64 = 1e-6;

/// Number of segments carried in a segmentation summary preview.
pub const SUMMARY_PREVIEW_LEN: usize = 3;

/// Aligned segments shorter than or equal to zero get this duration.
pub const VALIDATOR_MIN_SEGMENT_DURATION: f64 = 0.1;
/// Aligned segments longer than this are considered broken.
pub const VALIDATOR_MAX_SEGMENT_DURATION: f64 = 30.0;
/// Duration a broken over-long aligned segment is clamped to.
pub const VALIDATOR_CLAMPED_SEGMENT_DURATION: f64 = 8.0;

pub const CONFIG_DIR_NAME: &str = "phrase-segmenter";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const PHRASES_FILE_SUFFIX: &str = "phrases.json";
