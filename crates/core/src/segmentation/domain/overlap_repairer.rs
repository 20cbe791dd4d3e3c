use crate::shared::constants::OVERLAP_EPSILON;
use crate::transcript::domain::phrase_segment::PhraseSegment;

/// Sorts phrases by start and makes them strictly sequential.
///
/// A phrase starting at or before its predecessor's end is pushed to
/// `prev.end + OVERLAP_EPSILON`; phrases left with no positive duration,
/// blank text or non-finite times are dropped. Text is whitespace-normalized.
pub fn repair_overlaps(phrases: Vec<PhraseSegment>) -> Vec<PhraseSegment> {
    let total = phrases.len();
    let mut sorted: Vec<PhraseSegment> = phrases
        .into_iter()
        .filter(|p| p.start.is_finite() && p.end.is_finite())
        .filter_map(normalize_text)
        .collect();
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut out: Vec<PhraseSegment> = Vec::with_capacity(sorted.len());
    let mut shifted = 0usize;
    for mut phrase in sorted {
        if let Some(prev) = out.last() {
            if phrase.start <= prev.end {
                phrase.start = prev.end + OVERLAP_EPSILON;
                shifted += 1;
            }
        }
        if phrase.start >= phrase.end {
            continue;
        }
        out.push(phrase);
    }

    log::debug!(
        "overlap repair: {total} phrases in, {} out, {shifted} shifted",
        out.len()
    );
    out
}

fn normalize_text(mut phrase: PhraseSegment) -> Option<PhraseSegment> {
    let normalized = phrase.text.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        return None;
    }
    phrase.text = normalized;
    Some(phrase)
}
