use crate::transcript::domain::word::Word;

/// Partitions words into chunks wherever the silence between two
/// consecutive words reaches `silence_threshold` (inclusive).
///
/// Chunks are never empty and keep word order.
pub fn split_on_silence(words: &[Word], silence_threshold: f64) -> Vec<Vec<Word>> {
    let mut chunks: Vec<Vec<Word>> = Vec::new();
    let mut current: Vec<Word> = Vec::new();

    for word in words {
        if let Some(prev) = current.last() {
            if prev.gap_to(word) >= silence_threshold {
                chunks.push(std::mem::take(&mut current));
            }
        }
        current.push(word.clone());
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    log::debug!(
        "silence splitter: {} words -> {} chunks (threshold {silence_threshold}s)",
        words.len(),
        chunks.len()
    );
    chunks
}
