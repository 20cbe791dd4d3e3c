use crate::transcript::domain::phrase_segment::PhraseSegment;
use crate::transcript::domain::word::{joined_len, joined_text, Word};

use super::segment_config::SegmentConfig;

/// A provisional phrase: words plus the time window it will occupy.
///
/// The window normally spans the first word's start to the last word's
/// end, but proportional reallocation can assign a different one.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub start: f64,
    pub end: f64,
    pub words: Vec<Word>,
}

impl Candidate {
    /// Candidate spanning its words' own timestamps. `words` must be non-empty.
    pub fn from_words(words: Vec<Word>) -> Self {
        let start = words.first().map_or(0.0, |w| w.start);
        let end = words.last().map_or(start, |w| w.end);
        Self { start, end, words }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn char_len(&self) -> usize {
        joined_len(&self.words)
    }

    pub fn text(&self) -> String {
        joined_text(&self.words)
    }

    pub fn is_short(&self, config: &SegmentConfig) -> bool {
        self.word_count() < config.min_words || self.duration() < config.min_duration
    }

    /// True when the candidate breaks any hard limit (strictly above it).
    pub fn exceeds_limits(&self, config: &SegmentConfig) -> bool {
        self.word_count() > config.max_words
            || self.duration() > config.max_duration
            || self.char_len() > config.max_chars
    }

    /// Appends `other`'s words and widens the window to cover both.
    pub fn absorb(&mut self, other: Candidate) {
        self.start = self.start.min(other.start);
        self.end = self.end.max(other.end);
        self.words.extend(other.words);
    }

    pub fn into_phrase(self) -> PhraseSegment {
        let text = self.text();
        PhraseSegment::new(self.start, self.end, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn words(timings: &[(&str, f64, f64)]) -> Vec<Word> {
        timings.iter().map(|(t, s, e)| Word::new(*t, *s, *e)).collect()
    }

    #[test]
    fn test_from_words_spans_first_to_last() {
        let c = Candidate::from_words(words(&[("a", 1.0, 1.2), ("b", 1.3, 1.9)]));
        assert_relative_eq!(c.start, 1.0);
        assert_relative_eq!(c.end, 1.9);
        assert_eq!(c.text(), "a b");
        assert_eq!(c.char_len(), 3);
    }

    #[test]
    fn test_is_short_by_words_or_duration() {
        let config = SegmentConfig::default();
        let one_word = Candidate::from_words(words(&[("Ok", 0.0, 2.0)]));
        assert!(one_word.is_short(&config));

        let quick = Candidate::from_words(words(&[("a", 0.0, 0.2), ("b", 0.2, 0.4)]));
        assert!(quick.is_short(&config));

        let fine = Candidate::from_words(words(&[("a", 0.0, 0.5), ("b", 0.5, 1.0)]));
        assert!(!fine.is_short(&config));
    }

    #[test]
    fn test_exceeds_limits_is_strict() {
        let config = SegmentConfig {
            max_words: 2,
            ..Default::default()
        };
        let at_limit = Candidate::from_words(words(&[("a", 0.0, 0.5), ("b", 0.5, 1.0)]));
        assert!(!at_limit.exceeds_limits(&config));

        let over = Candidate::from_words(words(&[("a", 0.0, 0.5), ("b", 0.5, 1.0), ("c", 1.0, 1.5)]));
        assert!(over.exceeds_limits(&config));
    }

    #[test]
    fn test_absorb_extends_window_and_words() {
        let mut a = Candidate::from_words(words(&[("This", 0.0, 0.3), ("works.", 0.3, 0.8)]));
        let b = Candidate::from_words(words(&[("Ok", 1.0, 1.2)]));
        a.absorb(b);
        assert_relative_eq!(a.start, 0.0);
        assert_relative_eq!(a.end, 1.2);
        assert_eq!(a.text(), "This works. Ok");
    }

    #[test]
    fn test_into_phrase() {
        let p = Candidate::from_words(words(&[("Hello", 0.0, 0.3), ("world.", 0.3, 0.7)])).into_phrase();
        assert_eq!(p.text, "Hello world.");
        assert_relative_eq!(p.end, 0.7);
    }
}
