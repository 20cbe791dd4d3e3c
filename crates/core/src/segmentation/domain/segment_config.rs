use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::constants::{
    DEFAULT_INTRA_CHUNK_GAP_FACTOR, DEFAULT_MAX_CHARS, DEFAULT_MAX_DURATION, DEFAULT_MAX_WORDS,
    DEFAULT_MERGE_GAP_LIMIT, DEFAULT_MIN_DURATION, DEFAULT_MIN_WORDS, DEFAULT_SILENCE_THRESHOLD,
    DEFAULT_SOFT_PUNCT, DEFAULT_STRONG_PUNCT, MIN_INTRA_CHUNK_PAUSE,
};

#[derive(Error, Debug, PartialEq)]
#[error("invalid value for {key}: {message}")]
pub struct InvalidConfigValue {
    pub key: &'static str,
    pub message: String,
}

/// Thresholds that drive phrase segmentation.
///
/// Durations are in seconds. Missing keys in a serialized config fall back
/// to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentConfig {
    pub silence_threshold: f64,
    pub min_words: usize,
    pub max_words: usize,
    pub max_duration: f64,
    pub max_chars: usize,
    pub strong_punct: String,
    pub soft_punct: String,
    pub intra_chunk_gap_factor: f64,
    pub min_duration: f64,
    pub merge_gap_limit: f64,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            silence_threshold: DEFAULT_SILENCE_THRESHOLD,
            min_words: DEFAULT_MIN_WORDS,
            max_words: DEFAULT_MAX_WORDS,
            max_duration: DEFAULT_MAX_DURATION,
            max_chars: DEFAULT_MAX_CHARS,
            strong_punct: DEFAULT_STRONG_PUNCT.to_string(),
            soft_punct: DEFAULT_SOFT_PUNCT.to_string(),
            intra_chunk_gap_factor: DEFAULT_INTRA_CHUNK_GAP_FACTOR,
            min_duration: DEFAULT_MIN_DURATION,
            merge_gap_limit: DEFAULT_MERGE_GAP_LIMIT,
        }
    }
}

impl SegmentConfig {
    /// Gap inside a chunk that closes a phrase once `min_words` is reached.
    pub fn intra_chunk_pause(&self) -> f64 {
        (self.intra_chunk_gap_factor * self.max_duration).max(MIN_INTRA_CHUNK_PAUSE)
    }

    /// Strict check used at the configuration boundary.
    pub fn validate(&self) -> Result<(), InvalidConfigValue> {
        let seconds = [
            ("silence_threshold", self.silence_threshold),
            ("max_duration", self.max_duration),
            ("intra_chunk_gap_factor", self.intra_chunk_gap_factor),
            ("min_duration", self.min_duration),
            ("merge_gap_limit", self.merge_gap_limit),
        ];
        for (key, value) in seconds {
            if !value.is_finite() || value < 0.0 {
                return Err(InvalidConfigValue {
                    key,
                    message: format!("must be a finite non-negative number, got {value}"),
                });
            }
        }
        if self.max_words == 0 {
            return Err(InvalidConfigValue {
                key: "max_words",
                message: "must be at least 1".to_string(),
            });
        }
        if self.min_words > self.max_words {
            return Err(InvalidConfigValue {
                key: "min_words",
                message: format!(
                    "must not exceed max_words ({} > {})",
                    self.min_words, self.max_words
                ),
            });
        }
        if self.max_chars == 0 {
            return Err(InvalidConfigValue {
                key: "max_chars",
                message: "must be at least 1".to_string(),
            });
        }
        if self.strong_punct.is_empty() {
            return Err(InvalidConfigValue {
                key: "strong_punct",
                message: "must contain at least one character".to_string(),
            });
        }
        Ok(())
    }

    /// Clamps every value into a range the engine can run on.
    ///
    /// Non-finite or negative durations fall back to their defaults.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let seconds = |value: f64, fallback: f64| {
            if value.is_finite() && value >= 0.0 {
                value
            } else {
                fallback
            }
        };
        let max_words = self.max_words.max(1);
        Self {
            silence_threshold: seconds(self.silence_threshold, defaults.silence_threshold),
            min_words: self.min_words.clamp(1, max_words),
            max_words,
            max_duration: seconds(self.max_duration, defaults.max_duration),
            max_chars: self.max_chars.max(1),
            strong_punct: self.strong_punct.clone(),
            soft_punct: self.soft_punct.clone(),
            intra_chunk_gap_factor: seconds(
                self.intra_chunk_gap_factor,
                defaults.intra_chunk_gap_factor,
            ),
            min_duration: seconds(self.min_duration, defaults.min_duration),
            merge_gap_limit: seconds(self.merge_gap_limit, defaults.merge_gap_limit),
        }
    }
}
