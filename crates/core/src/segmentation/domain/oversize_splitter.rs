use crate::shared::constants::{FALLBACK_WORD_DURATION, GAP_NOISE_FLOOR, MIN_ALLOCATION_SPAN};
use crate::transcript::domain::word::Word;

use super::candidate::Candidate;
use super::segment_config::SegmentConfig;

/// Result of splitting a group that hit a limit.
///
/// `remainder` holds words after a punctuation cut; the phrase builder
/// keeps accumulating from them.
#[derive(Debug, Default, PartialEq)]
pub struct OversizeSplit {
    pub candidates: Vec<Candidate>,
    pub remainder: Vec<Word>,
}

/// Splits a group that reached a soft limit.
///
/// Rules, first match wins:
/// 1. cut after the last strong punctuation mark, if that leaves
///    `min_words` on the left;
/// 2. same with soft punctuation;
/// 3. otherwise keep the group whole when it is within the hard limits,
///    or break it with [`split_to_fit`].
pub fn split_oversize(words: Vec<Word>, config: &SegmentConfig) -> OversizeSplit {
    if words.is_empty() {
        return OversizeSplit::default();
    }

    let cut = punctuation_cut(&words, &config.strong_punct, config.min_words)
        .or_else(|| punctuation_cut(&words, &config.soft_punct, config.min_words));

    match cut {
        Some(cut) => {
            let mut left = words;
            let remainder = left.split_off(cut);
            log::debug!(
                "oversize splitter: punctuation cut after {} words, {} remain",
                left.len(),
                remainder.len()
            );
            OversizeSplit {
                candidates: fitting_candidates(left, config),
                remainder,
            }
        }
        None => OversizeSplit {
            candidates: fitting_candidates(words, config),
            remainder: Vec::new(),
        },
    }
}

/// One candidate when the words fit the hard limits, several otherwise.
pub fn fitting_candidates(words: Vec<Word>, config: &SegmentConfig) -> Vec<Candidate> {
    if words.is_empty() {
        return Vec::new();
    }
    let candidate = Candidate::from_words(words);
    if candidate.exceeds_limits(config) && candidate.word_count() > 1 {
        split_to_fit(candidate.words, config)
    } else {
        vec![candidate]
    }
}

/// Breaks a punctuation-free group until every piece fits.
///
/// Groups larger than two full phrases are cut into balanced blocks of at
/// most `max_words` with the group's window shared out by word count.
/// Smaller groups are cut once at the widest pause near the middle (or
/// evenly when there is no pause) and each side is checked again.
pub fn split_to_fit(words: Vec<Word>, config: &SegmentConfig) -> Vec<Candidate> {
    let n = words.len();
    if n <= 1 {
        return words.into_iter().map(|w| Candidate::from_words(vec![w])).collect();
    }

    let max_words = config.max_words.max(1);
    if n > 2 * max_words {
        let blocks = balanced_blocks(words.clone(), max_words);
        log::debug!(
            "oversize splitter: {n} words -> {} proportional blocks",
            blocks.len()
        );
        return allocate_proportionally(&words, blocks);
    }

    let cut = widest_gap_cut(&words).unwrap_or_else(|| even_cut(n, config.min_words));
    let mut left = words;
    let right = left.split_off(cut);
    let mut out = fitting_candidates(left, config);
    out.extend(fitting_candidates(right, config));
    out
}

/// Shares the window `[first.start, last.end]` of `group` across `blocks`
/// in proportion to each block's word count.
pub fn allocate_proportionally(group: &[Word], blocks: Vec<Vec<Word>>) -> Vec<Candidate> {
    let (Some(first), Some(last)) = (group.first(), group.last()) else {
        return Vec::new();
    };
    allocate_window(first.start, last.end, blocks)
}

/// Shares `[window_start, window_end]` across `blocks` by word count.
pub fn allocate_window(window_start: f64, window_end: f64, blocks: Vec<Vec<Word>>) -> Vec<Candidate> {
    let span = (window_end - window_start).max(MIN_ALLOCATION_SPAN);
    let total_words = blocks.iter().map(Vec::len).sum::<usize>().max(1) as f64;

    let mut consumed = 0usize;
    blocks
        .into_iter()
        .filter(|b| !b.is_empty())
        .map(|block| {
            let start = window_start + span * (consumed as f64 / total_words);
            consumed += block.len();
            let mut end = window_start + span * (consumed as f64 / total_words);
            if end <= start {
                end = start + FALLBACK_WORD_DURATION;
            }
            Candidate {
                start,
                end,
                words: block,
            }
        })
        .collect()
}

/// Gives overlapping neighbours disjoint windows.
///
/// Every run of candidates that start before the run's current end (words
/// sharing one segment window, or overlapping aligner timestamps) has the
/// run's combined window reallocated by word count. Runs of one are kept.
pub fn separate_overlapping(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut out = Vec::with_capacity(candidates.len());
    let mut run: Vec<Candidate> = Vec::new();
    let mut run_end = f64::NEG_INFINITY;

    for candidate in candidates {
        if !run.is_empty() && candidate.start >= run_end {
            out.extend(flush_run(std::mem::take(&mut run)));
        }
        run_end = if run.is_empty() {
            candidate.end
        } else {
            run_end.max(candidate.end)
        };
        run.push(candidate);
    }
    out.extend(flush_run(run));
    out
}

/// Keeps `pieces` as they are when they are ordered, disjoint and inside
/// `[start, end]`; otherwise reallocates that window across them.
pub fn fit_within(pieces: Vec<Candidate>, start: f64, end: f64) -> Vec<Candidate> {
    let inside = pieces
        .iter()
        .all(|p| p.start >= start && p.end <= end && p.start < p.end);
    let disjoint = pieces.windows(2).all(|pair| pair[1].start >= pair[0].end);
    if inside && disjoint {
        return pieces;
    }
    log::debug!(
        "oversize splitter: reallocating {} pieces over [{start:.3}, {end:.3}]",
        pieces.len()
    );
    allocate_window(start, end, pieces.into_iter().map(|p| p.words).collect())
}

fn flush_run(run: Vec<Candidate>) -> Vec<Candidate> {
    if run.len() < 2 {
        return run;
    }
    let start = run.iter().map(|c| c.start).fold(f64::INFINITY, f64::min);
    let end = run.iter().map(|c| c.end).fold(f64::NEG_INFINITY, f64::max);
    log::debug!(
        "oversize splitter: {} overlapping candidates share [{start:.3}, {end:.3}]",
        run.len()
    );
    allocate_window(start, end, run.into_iter().map(|c| c.words).collect())
}

/// Index just after the last word ending in one of `chars`, provided the
/// left side keeps at least `min_words`.
fn punctuation_cut(words: &[Word], chars: &str, min_words: usize) -> Option<usize> {
    if chars.is_empty() {
        return None;
    }
    let idx = words.iter().rposition(|w| w.ends_with_any(chars))?;
    let cut = idx + 1;
    (cut >= min_words.max(1)).then_some(cut)
}

/// Cut index (words before it go left) at the widest inter-word pause in a
/// window of radius `max(1, n/4)` around the middle. Ties go to the index
/// nearest the middle, then the earlier one. `None` when every pause in
/// the window is negligible.
fn widest_gap_cut(words: &[Word]) -> Option<usize> {
    let n = words.len();
    if n < 2 {
        return None;
    }
    let mid = n / 2;
    let radius = (n / 4).max(1);
    let lo = mid.saturating_sub(radius).max(1);
    let hi = (mid + radius).min(n - 1);

    let mut best: Option<(usize, f64)> = None;
    for idx in lo..=hi {
        let gap = words[idx - 1].gap_to(&words[idx]);
        let better = match best {
            None => true,
            Some((best_idx, best_gap)) => {
                gap > best_gap || (gap == best_gap && idx.abs_diff(mid) < best_idx.abs_diff(mid))
            }
        };
        if better {
            best = Some((idx, gap));
        }
    }

    best.filter(|&(_, gap)| gap > GAP_NOISE_FLOOR)
        .map(|(idx, _)| idx)
}

fn even_cut(n: usize, min_words: usize) -> usize {
    min_words.max(n / 2).clamp(1, n - 1)
}

/// Splits into `ceil(n / max_words)` blocks whose sizes differ by at most one.
fn balanced_blocks(words: Vec<Word>, max_words: usize) -> Vec<Vec<Word>> {
    let n = words.len();
    let count = n.div_ceil(max_words);
    let base = n / count;
    let extra = n % count;

    let mut blocks = Vec::with_capacity(count);
    let mut rest = words.into_iter();
    for i in 0..count {
        let size = if i < extra { base + 1 } else { base };
        blocks.push(rest.by_ref().take(size).collect());
    }
    blocks
}
