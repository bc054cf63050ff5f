//! Greedy pair merging.
//!
//! While more than one phrase is left, the two most similar ones are fused
//! by splicing the spans of one into the other. Opcodes are recomputed from
//! scratch after every single insertion: an edit invalidates every opcode
//! after it.

use crate::alignment::{OpTag, SequenceMatcher};
use crate::control::RunControl;
use crate::error::SequenceError;
use crate::word_pool::{WordId, WordPool};
use rustc_hash::FxHashSet;
use std::hash::Hash;

/// Drops repeated items, keeping the first occurrence of each.
pub fn unique_in_order<T: Clone + Eq + Hash>(items: Vec<T>) -> Vec<T> {
    let mut seen: FxHashSet<T> = FxHashSet::default();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Inserts into `base` every span of `other` that the alignment reports as
/// missing, one span at a time, until `other` is a subsequence of `base`.
pub fn splice_into(base: &mut Vec<WordId>, other: &[WordId]) -> Result<(), SequenceError> {
    let limit = 4 * (base.len() + other.len()) + 16;
    for _ in 0..limit {
        let next = SequenceMatcher::new(base.as_slice(), other)
            .opcodes()
            .into_iter()
            .find(|op| matches!(op.tag, OpTag::Insert | OpTag::Replace));
        let Some(op) = next else {
            return Ok(());
        };
        let at = op.a.end;
        base.splice(at..at, other[op.b].iter().copied());
    }
    Err(SequenceError::Internal {
        message: format!(
            "splicing did not converge after {limit} insertions (base length {})",
            base.len()
        ),
    })
}

/// Merges two phrases left-as-base then right-as-base and checks that both
/// directions agree.
pub fn merge_pair(
    left: &[WordId],
    right: &[WordId],
    pool: &WordPool,
) -> Result<Vec<WordId>, SequenceError> {
    let mut left = left.to_vec();
    let mut right = right.to_vec();
    splice_into(&mut left, &right)?;
    splice_into(&mut right, &left)?;

    if left != right {
        let left = pool.join(&left);
        let right = pool.join(&right);
        tracing::error!(%left, %right, "merge directions disagree");
        return Err(SequenceError::AsymmetricMerge { left, right });
    }
    Ok(left)
}

/// Index pair with the strictly highest ratio, scanning pairs in index order.
pub fn closest_pair(
    phrases: &[Vec<WordId>],
    control: &mut RunControl<'_>,
) -> Result<Option<(usize, usize, f64)>, SequenceError> {
    let mut best: Option<(usize, usize, f64)> = None;
    for i in 0..phrases.len() {
        for j in (i + 1)..phrases.len() {
            control.checkpoint()?;
            let ratio = SequenceMatcher::new(&phrases[i], &phrases[j]).ratio();
            if best.map_or(true, |(_, _, r)| ratio > r) {
                best = Some((i, j, ratio));
            }
        }
    }
    Ok(best)
}

/// Replaces the closest pair in `phrases` by its merge. The merged phrase
/// takes the slot of the left member.
pub fn merge_closest_pair(
    phrases: &mut Vec<Vec<WordId>>,
    pool: &WordPool,
    control: &mut RunControl<'_>,
) -> Result<(), SequenceError> {
    *phrases = unique_in_order(std::mem::take(phrases));
    let Some((i, j, ratio)) = closest_pair(phrases, control)? else {
        return Ok(());
    };
    let merged = merge_pair(&phrases[i], &phrases[j], pool)?;
    tracing::trace!(left = i, right = j, ratio, len = merged.len(), "merged closest pair");
    phrases[i] = merged;
    phrases.remove(j);
    Ok(())
}

/// Merges the whole pool down to one phrase.
pub fn merge_all(
    phrases: Vec<Vec<WordId>>,
    pool: &WordPool,
    control: &mut RunControl<'_>,
) -> Result<Vec<WordId>, SequenceError> {
    let mut phrases = unique_in_order(phrases);
    while phrases.len() > 1 {
        control.check_now()?;
        control.pulse();
        merge_closest_pair(&mut phrases, pool, control)?;
    }
    phrases.pop().ok_or(SequenceError::EmptyPool)
}
