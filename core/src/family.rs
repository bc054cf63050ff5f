use crate::alignment::SequenceMatcher;
use crate::word_pool::{WordId, WordPool};
use std::collections::BTreeSet;

/// Collapses one isomorphic family into a single supersequence.
///
/// Positions covered by the matching blocks of the first two members are
/// fixed and copied once. Every other position expands into all distinct
/// words found there across the family, sorted by text.
pub fn family_supersequence(members: &[&[WordId]], pool: &WordPool) -> Vec<WordId> {
    let Some(&first) = members.first() else {
        return Vec::new();
    };
    let second = members.get(1).copied().unwrap_or(first);

    let matcher = SequenceMatcher::new(first, second);
    let fixed: BTreeSet<usize> = matcher
        .matching_blocks()
        .iter()
        .flat_map(|block| block.a_start..block.a_start + block.len)
        .collect();

    let mut out = Vec::with_capacity(first.len() + members.len());
    for (position, &word) in first.iter().enumerate() {
        if fixed.contains(&position) {
            out.push(word);
            continue;
        }
        let mut alternatives: Vec<WordId> = members
            .iter()
            .filter_map(|member| member.get(position).copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        alternatives.sort_by(|x, y| pool.resolve(*x).cmp(pool.resolve(*y)));
        out.extend(alternatives);
    }
    out
}
