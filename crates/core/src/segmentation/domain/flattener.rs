use crate::shared::constants::FALLBACK_WORD_DURATION;
use crate::shared::float_parse::finite_or_zero;
use crate::transcript::domain::aligned_segment::{AlignedSegment, AlignedWord};
use crate::transcript::domain::word::Word;

/// Concatenates all segments' words in input order, resolving missing
/// times from the enclosing segment.
///
/// Segments without word data fall back to one pseudo-word per
/// whitespace token of their text, all sharing the segment window.
pub fn flatten(segments: &[AlignedSegment]) -> Vec<Word> {
    let mut words = Vec::new();
    for seg in segments {
        let seg_start = finite_or_zero(seg.start);
        let seg_end = finite_or_zero(seg.end);

        if seg.words.is_empty() {
            let text = seg.text.as_deref().unwrap_or("");
            words.extend(
                text.split_whitespace()
                    .map(|token| Word::new(token, seg_start, seg_end.max(seg_start))),
            );
            continue;
        }

        words.extend(
            seg.words
                .iter()
                .filter_map(|w| resolve_word(w, seg_start, seg_end)),
        );
    }
    log::debug!(
        "flattener: {} segments -> {} words",
        segments.len(),
        words.len()
    );
    words
}

fn resolve_word(word: &AlignedWord, seg_start: f64, seg_end: f64) -> Option<Word> {
    let text = word.text.trim();
    if text.is_empty() {
        return None;
    }
    let own_start = word.start.map(finite_or_zero);
    let start = own_start.unwrap_or(seg_start);
    let end = match (word.end.map(finite_or_zero), own_start) {
        (Some(end), _) => end,
        (None, Some(s)) => s + FALLBACK_WORD_DURATION,
        (None, None) => seg_end,
    };
    Some(Word::new(text, start, end.max(start)))
}
