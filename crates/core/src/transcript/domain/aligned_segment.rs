/// A word as emitted by the aligner, before time resolution.
///
/// Times are optional: aligners regularly drop timestamps for numerals,
/// symbols and words they could not place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AlignedWord {
    pub text: String,
    pub start: Option<f64>,
    pub end: Option<f64>,
}

impl AlignedWord {
    pub fn new(text: impl Into<String>, start: Option<f64>, end: Option<f64>) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    pub fn timed(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self::new(text, Some(start), Some(end))
    }
}

/// A coarse recognizer segment with optional word-level detail.
///
/// When `words` is empty, `text` is the only source of content.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AlignedSegment {
    pub start: f64,
    pub end: f64,
    pub words: Vec<AlignedWord>,
    pub text: Option<String>,
}

impl AlignedSegment {
    pub fn with_words(start: f64, end: f64, words: Vec<AlignedWord>) -> Self {
        Self {
            start,
            end,
            words,
            text: None,
        }
    }

    pub fn with_text(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            words: Vec::new(),
            text: Some(text.into()),
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}
