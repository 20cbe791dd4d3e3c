use crate::transcript::domain::word::{joined_len, Word};

use super::candidate::Candidate;
use super::oversize_splitter::{fitting_candidates, separate_overlapping, split_oversize};
use super::segment_config::SegmentConfig;

/// Greedily groups one silence chunk into candidate phrases.
///
/// A running group closes on strong punctuation or on a breath pause once
/// it holds `min_words`; when it reaches a word, duration or character
/// limit first, the oversize splitter decides where to cut. Short groups
/// are never closed early: the leftover at the end of the chunk is flushed
/// as-is and left to the merger. Candidates whose windows overlap (words
/// sharing one segment window) get disjoint windows by word count.
pub fn build_phrases(chunk: &[Word], config: &SegmentConfig) -> Vec<Candidate> {
    let pause = config.intra_chunk_pause();
    let mut phrases = Vec::new();
    let mut current: Vec<Word> = Vec::new();

    for (idx, word) in chunk.iter().enumerate() {
        current.push(word.clone());
        let n_words = current.len();
        let long_enough = n_words >= config.min_words;

        if long_enough && word.ends_with_any(&config.strong_punct) {
            phrases.push(Candidate::from_words(std::mem::take(&mut current)));
            continue;
        }

        let pause_follows = chunk
            .get(idx + 1)
            .is_some_and(|next| word.gap_to(next) > pause);
        if long_enough && pause_follows {
            phrases.push(Candidate::from_words(std::mem::take(&mut current)));
            continue;
        }

        if reaches_limit(&current, config) {
            let split = split_oversize(std::mem::take(&mut current), config);
            phrases.extend(split.candidates);
            current = split.remainder;
        }
    }

    if !current.is_empty() {
        phrases.extend(fitting_candidates(current, config));
    }
    separate_overlapping(phrases)
}

fn reaches_limit(group: &[Word], config: &SegmentConfig) -> bool {
    let (Some(first), Some(last)) = (group.first(), group.last()) else {
        return false;
    };
    group.len() >= config.max_words
        || last.end - first.start >= config.max_duration
        || joined_len(group) >= config.max_chars
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn w(text: &str, start: f64, end: f64) -> Word {
        Word::new(text, start, end)
    }

    fn contiguous(texts: &[&str], step: f64) -> Vec<Word> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| w(t, i as f64 * step, (i + 1) as f64 * step))
            .collect()
    }

    fn phrase_texts(phrases: &[Candidate]) -> Vec<String> {
        phrases.iter().map(Candidate::text).collect()
    }

    #[test]
    fn test_empty_chunk() {
        assert!(build_phrases(&[], &SegmentConfig::default()).is_empty());
    }

    #[test]
    fn test_closes_on_strong_punctuation() {
        let chunk = contiguous(&["This", "is", "it.", "Next", "one!"], 0.3);
        let phrases = build_phrases(&chunk, &SegmentConfig::default());
        assert_eq!(phrase_texts(&phrases), vec!["This is it.", "Next one!"]);
    }

    #[test]
    fn test_strong_punctuation_below_min_words_keeps_accumulating() {
        let chunk = contiguous(&["No.", "I", "refuse."], 0.3);
        let phrases = build_phrases(&chunk, &SegmentConfig::default());
        assert_eq!(phrase_texts(&phrases), vec!["No. I refuse."]);
    }

    #[test]
    fn test_soft_punctuation_alone_does_not_close() {
        let chunk = contiguous(&["Well,", "I", "think", "so."], 0.3);
        let phrases = build_phrases(&chunk, &SegmentConfig::default());
        assert_eq!(phrases.len(), 1);
    }

    #[test]
    fn test_closes_on_breath_pause() {
        let config = SegmentConfig {
            silence_threshold: 5.0,
            ..Default::default()
        };
        // Pause threshold is max(0.18, 0.25 * 8.0) = 2.0 s.
        let chunk = vec![
            w("first", 0.0, 0.3),
            w("part", 0.3, 0.6),
            w("second", 2.7, 3.0),
            w("part", 3.0, 3.3),
        ];
        let phrases = build_phrases(&chunk, &config);
        assert_eq!(phrase_texts(&phrases), vec!["first part", "second part"]);
    }

    #[test]
    fn test_breath_pause_needs_min_words() {
        let chunk = vec![w("lonely", 0.0, 0.3), w("then", 2.6, 2.9), w("more.", 2.9, 3.2)];
        let phrases = build_phrases(&chunk, &SegmentConfig::default());
        assert_eq!(phrase_texts(&phrases), vec!["lonely then more."]);
    }

    #[test]
    fn test_words_sharing_a_window_get_disjoint_phrases() {
        let chunk: Vec<Word> = (0..20).map(|i| w(&format!("t{i}"), 0.0, 2.0)).collect();
        let phrases = build_phrases(&chunk, &SegmentConfig::default());

        assert_eq!(phrases.len(), 2);
        assert_eq!(phrases[0].word_count(), 14);
        assert_eq!(phrases[1].word_count(), 6);
        assert_relative_eq!(phrases[0].start, 0.0);
        assert_relative_eq!(phrases[0].end, 1.4, epsilon = 1e-9);
        assert_relative_eq!(phrases[1].start, phrases[0].end);
        assert_relative_eq!(phrases[1].end, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_max_words_without_punctuation() {
        let texts: Vec<String> = (0..10).map(|i| format!("w{i}")).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let chunk = contiguous(&refs, 0.5);
        let config = SegmentConfig {
            max_words: 5,
            ..Default::default()
        };
        let phrases = build_phrases(&chunk, &config);
        assert_eq!(phrases.len(), 2);
        assert!(phrases.iter().all(|p| p.word_count() == 5));
        assert_relative_eq!(phrases[0].start, 0.0);
        assert_relative_eq!(phrases[1].end, 5.0);
    }

    #[test]
    fn test_limit_cut_at_comma_carries_remainder() {
        let chunk = contiguous(&["one", "two", "three,", "four", "five", "six", "seven."], 0.3);
        let config = SegmentConfig {
            max_words: 5,
            ..Default::default()
        };
        let phrases = build_phrases(&chunk, &config);
        assert_eq!(
            phrase_texts(&phrases),
            vec!["one two three,", "four five six seven."]
        );
    }

    #[test]
    fn test_max_duration_triggers_split() {
        let chunk = contiguous(&["a", "b", "c", "d", "e", "f"], 1.5);
        let config = SegmentConfig {
            silence_threshold: 10.0,
            ..Default::default()
        };
        let phrases = build_phrases(&chunk, &config);
        assert!(phrases.iter().all(|p| p.duration() <= config.max_duration));
        assert_eq!(phrases.iter().map(Candidate::word_count).sum::<usize>(), 6);
    }

    #[test]
    fn test_max_chars_triggers_split() {
        let chunk = contiguous(&["abcdefghij", "klmnopqrst", "uvwxyzabcd", "efghijklmn"], 0.3);
        let config = SegmentConfig {
            max_chars: 25,
            ..Default::default()
        };
        let phrases = build_phrases(&chunk, &config);
        assert!(phrases.iter().all(|p| p.char_len() <= 25));
        assert_eq!(phrases.iter().map(Candidate::word_count).sum::<usize>(), 4);
    }

    #[test]
    fn test_trailing_short_group_is_flushed() {
        let chunk = contiguous(&["This", "is", "a", "test", "of", "segmentation.", "Ok"], 0.3);
        let phrases = build_phrases(&chunk, &SegmentConfig::default());
        assert_eq!(
            phrase_texts(&phrases),
            vec!["This is a test of segmentation.", "Ok"]
        );
    }
}
