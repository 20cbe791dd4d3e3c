/// A single timed token with resolved start and end, in seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct Word {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl Word {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Silence between this word's end and `next`'s start, never negative.
    pub fn gap_to(&self, next: &Word) -> f64 {
        (next.start - self.end).max(0.0)
    }

    pub fn ends_with_any(&self, chars: &str) -> bool {
        self.text.chars().last().is_some_and(|c| chars.contains(c))
    }
}

/// Joins word texts with single spaces.
pub fn joined_text(words: &[Word]) -> String {
    let mut text = String::new();
    for w in words {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&w.text);
    }
    text
}

/// Character count of [`joined_text`] without building the string.
pub fn joined_len(words: &[Word]) -> usize {
    let chars: usize = words.iter().map(|w| w.text.chars().count()).sum();
    chars + words.len().saturating_sub(1)
}
