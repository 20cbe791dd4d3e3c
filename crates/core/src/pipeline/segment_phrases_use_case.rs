use crate::segmentation::domain::flattener::flatten;
use crate::segmentation::domain::phrase_builder::build_phrases;
use crate::segmentation::domain::phrase_merger::merge_and_finalize;
use crate::segmentation::domain::segment_config::SegmentConfig;
use crate::segmentation::domain::silence_splitter::split_on_silence;
use crate::transcript::domain::aligned_segment::AlignedSegment;
use crate::transcript::domain::phrase_segment::PhraseSegment;

/// Runs flatten → silence split → phrase building → merge and finalize.
///
/// The config is sanitized on construction so any input, however
/// malformed, produces a (possibly empty) list of valid phrases.
pub struct SegmentPhrasesUseCase {
    config: SegmentConfig,
}

impl SegmentPhrasesUseCase {
    pub fn new(config: SegmentConfig) -> Self {
        Self {
            config: config.sanitized(),
        }
    }

    pub fn config(&self) -> &SegmentConfig {
        &self.config
    }

    pub fn execute(&self, segments: &[AlignedSegment]) -> Vec<PhraseSegment> {
        let words = flatten(segments);
        if words.is_empty() {
            return Vec::new();
        }

        let chunks = split_on_silence(&words, self.config.silence_threshold);
        let n_chunks = chunks.len();
        let candidates: Vec<_> = chunks
            .iter()
            .map(|chunk| build_phrases(chunk, &self.config))
            .collect();

        let phrases = merge_and_finalize(candidates, &self.config);
        log::info!(
            "Segmented {} words in {n_chunks} chunks into {} phrases",
            words.len(),
            phrases.len()
        );
        phrases
    }
}

impl Default for SegmentPhrasesUseCase {
    fn default() -> Self {
        Self::new(SegmentConfig::default())
    }
}

pub fn segment_phrases(segments: &[AlignedSegment], config: &SegmentConfig) -> Vec<PhraseSegment> {
    SegmentPhrasesUseCase::new(config.clone()).execute(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmentation::domain::flattener::flatten;
    use crate::segmentation::domain::overlap_repairer::repair_overlaps;
    use crate::transcript::domain::aligned_segment::AlignedWord;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn segment(timings: &[(&str, f64, f64)]) -> AlignedSegment {
        let words: Vec<AlignedWord> = timings
            .iter()
            .map(|(t, s, e)| AlignedWord::timed(*t, *s, *e))
            .collect();
        let start = timings.first().map_or(0.0, |w| w.1);
        let end = timings.last().map_or(0.0, |w| w.2);
        AlignedSegment::with_words(start, end, words)
    }

    fn uniform(n: usize, step: f64) -> AlignedSegment {
        let words = (0..n)
            .map(|i| {
                let start = i as f64 * step;
                AlignedWord::timed(format!("w{i}"), start, start + step)
            })
            .collect();
        AlignedSegment::with_words(0.0, n as f64 * step, words)
    }

    fn text_only(n: usize, start: f64, end: f64) -> AlignedSegment {
        let text = (0..n).map(|i| format!("t{i}")).collect::<Vec<_>>().join(" ");
        AlignedSegment::with_text(start, end, text)
    }

    /// A clause, a run that nearly fills `max_duration`, then a short tail
    /// that can only be merged backward.
    fn run_with_short_tail() -> AlignedSegment {
        let mut words = vec![
            AlignedWord::timed("a", 0.0, 0.05),
            AlignedWord::timed("b,", 0.05, 0.1),
        ];
        words.extend((0..8).map(|i| {
            let start = 0.1 + i as f64 * 0.975;
            AlignedWord::timed(format!("w{i}"), start, 0.1 + (i + 1) as f64 * 0.975)
        }));
        words.push(AlignedWord::timed("ok", 8.4, 8.6));
        AlignedSegment::with_words(0.0, 8.6, words)
    }

    fn assert_well_formed(phrases: &[PhraseSegment]) {
        for p in phrases {
            assert!(p.end > p.start, "non-positive duration: {p:?}");
            assert!(!p.text.trim().is_empty());
        }
        for pair in phrases.windows(2) {
            assert!(pair[0].start <= pair[1].start);
            assert!(pair[0].end < pair[1].start, "overlap: {pair:?}");
        }
    }

    #[test]
    fn test_two_sentences_separated_by_silence() {
        let input = segment(&[
            ("Hello", 0.0, 0.3),
            ("world.", 0.3, 0.7),
            ("How", 1.5, 1.7),
            ("are", 1.7, 1.9),
            ("you?", 1.9, 2.3),
        ]);
        let out = segment_phrases(&[input], &SegmentConfig::default());

        assert_eq!(out.len(), 2);
        assert_relative_eq!(out[0].start, 0.0);
        assert_relative_eq!(out[0].end, 0.7);
        assert_eq!(out[0].text, "Hello world.");
        assert_relative_eq!(out[1].start, 1.5);
        assert_relative_eq!(out[1].end, 2.3);
        assert_eq!(out[1].text, "How are you?");
    }

    #[test]
    fn test_unpunctuated_run_splits_at_max_words() {
        let config = SegmentConfig {
            max_words: 5,
            ..Default::default()
        };
        let out = segment_phrases(&[uniform(10, 0.5)], &config);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].word_count(), 5);
        assert_eq!(out[1].word_count(), 5);
        assert_relative_eq!(out[0].start, 0.0);
        assert_relative_eq!(out[1].end, 5.0);
        assert!(out[0].end <= out[1].start);
    }

    #[test]
    fn test_short_tail_joins_previous_phrase() {
        let input = segment(&[
            ("This", 0.0, 0.3),
            ("is", 0.3, 0.5),
            ("a", 0.5, 0.6),
            ("test", 0.6, 0.9),
            ("of", 0.9, 1.0),
            ("segmentation.", 1.0, 1.8),
            ("Ok", 2.0, 2.3),
        ]);
        let out = segment_phrases(&[input], &SegmentConfig::default());

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "This is a test of segmentation. Ok");
        assert_relative_eq!(out[0].start, 0.0);
        assert_relative_eq!(out[0].end, 2.3);
    }

    #[test]
    fn test_empty_input() {
        assert!(segment_phrases(&[], &SegmentConfig::default()).is_empty());
    }

    #[test]
    fn test_finalizer_shifts_overlapping_phrase() {
        let out = repair_overlaps(vec![
            PhraseSegment::new(1.0, 2.0, "a"),
            PhraseSegment::new(1.8, 2.5, "b"),
        ]);
        assert_eq!(out.len(), 2);
        assert_relative_eq!(out[0].end, 2.0);
        assert_relative_eq!(out[1].start, 2.001, epsilon = 1e-9);
        assert_relative_eq!(out[1].end, 2.5);
    }

    #[rstest]
    #[case::gap_equal_to_threshold(0.6, 2)]
    #[case::gap_just_below_threshold(0.599, 1)]
    fn test_silence_threshold_boundary(#[case] gap: f64, #[case] expected: usize) {
        let config = SegmentConfig {
            min_words: 1,
            min_duration: 0.0,
            ..Default::default()
        };
        let input = segment(&[
            ("one", 0.0, 0.5),
            ("two", 0.5, 1.0),
            ("three", 1.0 + gap, 1.5 + gap),
            ("four", 1.5 + gap, 2.0 + gap),
        ]);
        assert_eq!(segment_phrases(&[input], &config).len(), expected);
    }

    #[test]
    fn test_output_is_deterministic() {
        let input = vec![
            uniform(40, 0.3),
            segment(&[("Then,", 13.0, 13.4), ("silence.", 13.4, 14.0)]),
        ];
        let config = SegmentConfig::default();
        assert_eq!(
            segment_phrases(&input, &config),
            segment_phrases(&input, &config)
        );
    }

    #[test]
    fn test_text_is_conserved_in_order() {
        let mut tail = uniform(30, 0.25);
        for w in &mut tail.words {
            w.start = w.start.map(|s| s + 2.0);
            w.end = w.end.map(|e| e + 2.0);
        }
        let input = vec![
            segment(&[
                ("Well,", 0.0, 0.4),
                ("I", 0.5, 0.6),
                ("think", 0.6, 0.9),
                ("so.", 0.9, 1.3),
            ]),
            tail,
        ];
        let out = segment_phrases(&input, &SegmentConfig::default());
        assert_well_formed(&out);

        let tokens: Vec<String> = out
            .iter()
            .flat_map(|p| p.text.split_whitespace().map(str::to_string))
            .collect();
        let mut expected: Vec<String> = ["Well,", "I", "think", "so."]
            .iter()
            .map(|t| t.to_string())
            .collect();
        expected.extend((0..30).map(|i| format!("w{i}")));
        assert_eq!(tokens, expected);
    }

    #[rstest]
    #[case::text_only_over_max_words(vec![text_only(20, 0.0, 2.0)], SegmentConfig::default())]
    #[case::text_only_many_blocks(vec![text_only(40, 0.0, 2.0)], SegmentConfig::default())]
    #[case::text_only_overlapping_timed_words(
        vec![text_only(30, 0.0, 3.0), uniform(4, 0.5)],
        SegmentConfig::default()
    )]
    #[case::merge_resplit_with_long_remainder(
        vec![run_with_short_tail()],
        SegmentConfig { intra_chunk_gap_factor: 0.0, ..Default::default() }
    )]
    fn test_every_word_survives_within_limits(
        #[case] input: Vec<AlignedSegment>,
        #[case] config: SegmentConfig,
    ) {
        let out = segment_phrases(&input, &config);
        assert_well_formed(&out);

        let tokens: Vec<String> = out
            .iter()
            .flat_map(|p| p.text.split_whitespace().map(str::to_string))
            .collect();
        let expected: Vec<String> = flatten(&input).into_iter().map(|w| w.text).collect();
        assert_eq!(tokens, expected);

        for p in &out {
            assert!(p.word_count() <= config.max_words, "{p:?}");
            assert!(p.duration() <= config.max_duration + 1e-9, "{p:?}");
        }
    }

    #[test]
    fn test_phrases_respect_hard_limits() {
        let config = SegmentConfig::default();
        let out = segment_phrases(&[uniform(200, 0.2)], &config);
        assert_well_formed(&out);
        for p in &out {
            assert!(p.word_count() <= config.max_words);
            assert!(p.duration() <= config.max_duration + 1e-9);
            assert!(p.text.chars().count() <= config.max_chars);
        }
        assert_relative_eq!(out[0].start, 0.0);
        assert_relative_eq!(out[out.len() - 1].end, 40.0, epsilon = 1e-9);
    }

    #[test]
    fn test_text_only_segments() {
        let input = vec![
            AlignedSegment::with_text(0.0, 2.0, "hello  there friend"),
            AlignedSegment::with_text(5.0, 7.0, "see you later"),
        ];
        let out = segment_phrases(&input, &SegmentConfig::default());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].text, "hello there friend");
        assert_relative_eq!(out[0].end, 2.0);
        assert_eq!(out[1].text, "see you later");
        assert_relative_eq!(out[1].start, 5.0);
    }

    #[test]
    fn test_malformed_input_is_tolerated() {
        let input = vec![
            AlignedSegment::with_words(
                f64::NAN,
                3.0,
                vec![
                    AlignedWord::new("", Some(0.0), Some(0.2)),
                    AlignedWord::new("untimed", None, None),
                    AlignedWord::new("backwards", Some(2.0), Some(1.0)),
                ],
            ),
            AlignedSegment::with_text(4.0, 4.0, "   "),
        ];
        let out = segment_phrases(&input, &SegmentConfig::default());
        assert_well_formed(&out);
    }

    #[test]
    fn test_nonsense_config_is_sanitized() {
        let config = SegmentConfig {
            max_words: 0,
            min_words: 9,
            max_duration: f64::NAN,
            min_duration: 0.0,
            ..Default::default()
        };
        let use_case = SegmentPhrasesUseCase::new(config);
        assert_eq!(use_case.config().max_words, 1);
        assert_eq!(use_case.config().min_words, 1);

        let out = use_case.execute(&[uniform(6, 0.5)]);
        assert_eq!(out.len(), 6);
        assert_well_formed(&out);
    }
}
