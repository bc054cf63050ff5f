//! End-to-end supersequence construction.
//!
//! Isomorphic grouping and family collapsing repeat until no family is left,
//! the greedy merger then fuses the pool into one phrase, the coarse filter
//! strips unused words and the result is wrapped into a [`SuperSequence`]
//! for the element-level passes.

use crate::config::SequenceConfig;
use crate::control::RunControl;
use crate::error::SequenceError;
use crate::family::family_supersequence;
use crate::isomorphism::{group_isomorphic, orphans};
use crate::merger::{merge_all, unique_in_order};
use crate::redundancy::coarse_filter_to_fixpoint;
use crate::supseq::SuperSequence;
use crate::word_pool::{WordId, WordPool};

pub const PHASE_SHRINK: &str = "Shrink by similarity";
pub const PHASE_COARSE: &str = "Coarse redundancy loop";
pub const PHASE_FINE: &str = "Fine redundancy loop";
pub const PHASE_SUBSTRINGS: &str = "Substring merging";

pub fn grouping_phase(pass: u32) -> String {
    format!("Isomorphic grouping, pass {pass}")
}

/// Builds a supersequence able to generate every phrase in `phrases`.
///
/// `phrases` doubles as the sanity pool. Duplicates are allowed and
/// collapsed for the heavy passes.
pub fn build_supersequence(
    phrases: &[String],
    config: &SequenceConfig,
    control: &mut RunControl<'_>,
) -> Result<SuperSequence, SequenceError> {
    config.validate()?;

    let mut words = WordPool::new();
    let tokenized: Vec<Vec<WordId>> = phrases
        .iter()
        .map(|phrase| words.tokenize(phrase))
        .filter(|tokens| !tokens.is_empty())
        .collect();
    let mut pool = unique_in_order(tokenized);
    if pool.is_empty() {
        return Err(SequenceError::EmptyPool);
    }
    tracing::info!(
        phrases = phrases.len(),
        unique = pool.len(),
        words = words.len(),
        "building supersequence"
    );

    let mut pass = 0u32;
    loop {
        pass += 1;
        control.begin_phase(grouping_phase(pass), Some(0.0), None);
        let families = group_isomorphic(&pool, config, control)?;
        if families.is_empty() {
            break;
        }

        let mut next: Vec<Vec<WordId>> = families
            .iter()
            .map(|family| {
                let members: Vec<&[WordId]> = family
                    .members
                    .iter()
                    .map(|&i| pool[i].as_slice())
                    .collect();
                family_supersequence(&members, &words)
            })
            .collect();
        next.extend(orphans(pool.len(), &families).into_iter().map(|i| pool[i].clone()));
        pool = unique_in_order(next);
        tracing::info!(pass, families = families.len(), remaining = pool.len(), "grouping pass done");
    }

    control.begin_phase(PHASE_SHRINK, None, Some("Not much..."));
    let merged = merge_all(pool, &words, control)?;
    let merged: Vec<&str> = merged.iter().map(|&id| words.resolve(id)).collect();
    tracing::debug!(len = merged.len(), "greedy merge finished");

    control.begin_phase(PHASE_COARSE, None, Some("Short!"));
    control.check_now()?;
    let coarse = coarse_filter_to_fixpoint(&merged, phrases, config.max_coarse_passes)?;
    tracing::debug!(before = merged.len(), after = coarse.len(), "coarse filter finished");

    let mut sequence = SuperSequence::new(&coarse.join(" "), phrases);
    ensure_sane(&sequence, "after coarse filtering")?;

    if config.enable_fine_redundancy {
        control.begin_phase(PHASE_FINE, None, Some("This is the last step!"));
        let removed = sequence.eliminate_redundancies(control)?;
        ensure_sane(&sequence, "after fine filtering")?;
        tracing::debug!(removed, "fine filter finished");
    }

    if config.enable_substring_merging {
        control.begin_phase(PHASE_SUBSTRINGS, None, None);
        let merged = sequence.merge_substrings(control)?;
        ensure_sane(&sequence, "after substring merging")?;
        tracing::debug!(merged, "substring merging finished");
    }

    tracing::info!(
        elements = sequence.len(),
        chars = sequence.char_length(),
        elapsed_ms = control.elapsed().as_millis() as u64,
        "supersequence ready"
    );
    Ok(sequence)
}

fn ensure_sane(sequence: &SuperSequence, stage: &str) -> Result<(), SequenceError> {
    match sequence.failing_phrase() {
        None => Ok(()),
        Some(phrase) => {
            tracing::error!(stage, phrase, "supersequence lost a phrase");
            Err(SequenceError::Internal {
                message: format!("phrase '{phrase}' is no longer generated {stage}"),
            })
        }
    }
}
