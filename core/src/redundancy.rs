//! Coarse, string-level redundancy filter.
//!
//! Each pool phrase is read off the sequence with a cursor that always jumps
//! to the next occurrence of the wanted word at or after it. Indices that no
//! phrase ever lands on are dropped. The element-level fine filter lives on
//! [`crate::SuperSequence::eliminate_redundancies`].

use crate::error::SequenceError;

/// Marks, for each sequence index, whether some pool phrase lands on it.
pub fn used_positions<S: AsRef<str>>(
    sequence: &[S],
    pool: &[String],
) -> Result<Vec<bool>, SequenceError> {
    let mut used = vec![false; sequence.len()];
    for phrase in pool {
        let mut cursor = 0usize;
        for word in phrase.split_whitespace() {
            let offset = sequence[cursor..]
                .iter()
                .position(|candidate| candidate.as_ref() == word)
                .ok_or_else(|| SequenceError::UngenerablePhrase {
                    phrase: phrase.clone(),
                })?;
            cursor += offset;
            used[cursor] = true;
            cursor += 1;
        }
    }
    Ok(used)
}

/// One pass of the coarse filter.
pub fn coarse_filter<S: AsRef<str>>(
    sequence: &[S],
    pool: &[String],
) -> Result<Vec<String>, SequenceError> {
    let used = used_positions(sequence, pool)?;
    Ok(sequence
        .iter()
        .zip(used)
        .filter(|(_, used)| *used)
        .map(|(word, _)| word.as_ref().to_string())
        .collect())
}

/// Repeats [`coarse_filter`] until the length stops shrinking or
/// `max_passes` is reached.
pub fn coarse_filter_to_fixpoint<S: AsRef<str>>(
    sequence: &[S],
    pool: &[String],
    max_passes: u32,
) -> Result<Vec<String>, SequenceError> {
    let mut current = coarse_filter(sequence, pool)?;
    for pass in 1..max_passes {
        let next = coarse_filter(&current, pool)?;
        if next.len() >= current.len() {
            tracing::debug!(passes = pass, len = current.len(), "coarse filter converged");
            break;
        }
        current = next;
    }
    Ok(current)
}
