use serde::{Deserialize, Serialize};

/// A subtitle-ready span of text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhraseSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl PhraseSegment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
