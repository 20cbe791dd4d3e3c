use crate::transcript::domain::phrase_segment::PhraseSegment;

use super::candidate::Candidate;
use super::oversize_splitter::{fit_within, fitting_candidates, split_oversize};
use super::overlap_repairer::repair_overlaps;
use super::segment_config::SegmentConfig;

/// Folds short candidates of one chunk into a neighbour.
///
/// A candidate with fewer than `min_words` words or shorter than
/// `min_duration` joins the previous candidate when the gap between them
/// is below `merge_gap_limit`; with no such predecessor it is carried
/// forward into the next one under the same gap rule. A merge that pushes
/// the result past a hard limit goes through the oversize splitter once.
pub fn merge_short_candidates(candidates: Vec<Candidate>, config: &SegmentConfig) -> Vec<Candidate> {
    let mut merged: Vec<Candidate> = Vec::with_capacity(candidates.len());
    let mut carried: Option<Candidate> = None;
    let mut merges = 0usize;

    for candidate in candidates {
        let candidate = match carried.take() {
            Some(mut short) if candidate.start - short.end < config.merge_gap_limit => {
                short.absorb(candidate);
                merges += 1;
                if short.exceeds_limits(config) {
                    merged.extend(resplit(short, config));
                    continue;
                }
                short
            }
            Some(short) => {
                merged.push(short);
                candidate
            }
            None => candidate,
        };

        if !candidate.is_short(config) {
            merged.push(candidate);
            continue;
        }

        match merged.last_mut() {
            Some(prev) if candidate.start - prev.end < config.merge_gap_limit => {
                prev.absorb(candidate);
                merges += 1;
                if prev.exceeds_limits(config) {
                    if let Some(over) = merged.pop() {
                        merged.extend(resplit(over, config));
                    }
                }
            }
            _ => carried = Some(candidate),
        }
    }

    if let Some(short) = carried {
        merged.push(short);
    }
    if merges > 0 {
        log::debug!("phrase merger: {merges} short candidates merged");
    }
    merged
}

/// Merges each chunk independently, then repairs ordering and overlaps
/// across the whole output.
pub fn merge_and_finalize(chunks: Vec<Vec<Candidate>>, config: &SegmentConfig) -> Vec<PhraseSegment> {
    let phrases = chunks
        .into_iter()
        .flat_map(|chunk| merge_short_candidates(chunk, config))
        .map(Candidate::into_phrase)
        .collect();
    repair_overlaps(phrases)
}

fn resplit(candidate: Candidate, config: &SegmentConfig) -> Vec<Candidate> {
    let (start, end) = (candidate.start, candidate.end);
    let split = split_oversize(candidate.words, config);
    let mut pieces = split.candidates;
    pieces.extend(fitting_candidates(split.remainder, config));
    fit_within(pieces, start, end)
}
