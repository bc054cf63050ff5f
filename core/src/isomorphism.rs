//! Grouping of structurally identical phrases.
//!
//! Two phrases are isomorphic when they have the same length and the edit
//! script between them only substitutes tokens in place. Every isomorphic
//! pair produces a key made of its rounded ratio and the position and content
//! of its equal runs; pairs sharing a key are unioned into one class. Classes
//! are then made disjoint by priority (higher ratio first, then larger class,
//! then discovery order).

use crate::alignment::{OpTag, SequenceMatcher};
use crate::config::SequenceConfig;
use crate::control::RunControl;
use crate::error::SequenceError;
use crate::word_pool::WordId;
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use std::hash::Hash;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IsomorphismKey<T> {
    /// Similarity ratio scaled by `ratio_key_scale` and rounded.
    pub ratio: u64,
    pub spans: Vec<Range<usize>>,
    pub content: Vec<Vec<T>>,
}

/// One disjoint isomorphism class, as ascending indices into the input pool.
#[derive(Debug, Clone, PartialEq)]
pub struct Family {
    pub ratio: f64,
    pub members: Vec<usize>,
}

impl Family {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Returns the class key for a pair, or `None` when the pair is not
/// isomorphic or falls below `threshold`.
///
/// Greedy alignment breaks ties by scan order, so `a` against `b` can find
/// a different block layout than `b` against `a`. A pair only counts when
/// both directions agree on the key.
pub fn isomorphism_key<T: Eq + Hash + Clone>(
    a: &[T],
    b: &[T],
    threshold: f64,
    scale: u32,
) -> Option<IsomorphismKey<T>> {
    if a.len() != b.len() {
        return None;
    }
    let forward = directed_key(&SequenceMatcher::new(a, b), threshold, scale)?;
    let backward = directed_key(&SequenceMatcher::new(b, a), threshold, scale)?;
    (forward == backward).then_some(forward)
}

fn directed_key<T: Eq + Hash + Clone>(
    matcher: &SequenceMatcher<'_, T>,
    threshold: f64,
    scale: u32,
) -> Option<IsomorphismKey<T>> {
    let a = matcher.a();
    let ratio = matcher.ratio();
    if ratio < threshold {
        return None;
    }

    let mut spans = Vec::new();
    let mut content = Vec::new();
    for op in matcher.opcodes() {
        if !matches!(op.tag, OpTag::Equal | OpTag::Replace) {
            return None;
        }
        if op.a != op.b {
            return None;
        }
        if op.tag == OpTag::Equal {
            content.push(a[op.a.clone()].to_vec());
            spans.push(op.a);
        }
    }

    Some(IsomorphismKey {
        ratio: (ratio * scale as f64).round() as u64,
        spans,
        content,
    })
}

struct Class {
    ratio: u64,
    members: BTreeSet<usize>,
}

/// Partitions `phrases` into disjoint isomorphic families of two or more
/// members. Runs over every unordered pair, so it reports progress and
/// honours cancellation through `control`.
pub fn group_isomorphic(
    phrases: &[Vec<WordId>],
    config: &SequenceConfig,
    control: &mut RunControl<'_>,
) -> Result<Vec<Family>, SequenceError> {
    let n = phrases.len();
    let total = (n as u64).saturating_mul(n.saturating_sub(1) as u64) / 2;
    let every = config.progress_every_pairs.max(1) as u64;

    let mut classes: Vec<Class> = Vec::new();
    let mut by_key: FxHashMap<IsomorphismKey<WordId>, usize> = FxHashMap::default();
    let mut done = 0u64;

    for i in 0..n {
        for j in (i + 1)..n {
            done += 1;
            control.checkpoint()?;

            if phrases[i].len() == phrases[j].len() {
                if let Some(key) = isomorphism_key(
                    &phrases[i],
                    &phrases[j],
                    config.isomorphism_ratio_threshold,
                    config.ratio_key_scale,
                ) {
                    let slot = match by_key.get(&key) {
                        Some(&slot) => slot,
                        None => {
                            classes.push(Class {
                                ratio: key.ratio,
                                members: BTreeSet::new(),
                            });
                            by_key.insert(key, classes.len() - 1);
                            classes.len() - 1
                        }
                    };
                    classes[slot].members.insert(i);
                    classes[slot].members.insert(j);
                }
            }

            if done % every == 0 {
                control.report_fraction(done, total);
            }
        }
    }
    control.report_fraction(total, total);

    let mut priority: Vec<usize> = (0..classes.len()).collect();
    priority.sort_by(|&x, &y| {
        classes[y]
            .ratio
            .cmp(&classes[x].ratio)
            .then_with(|| classes[y].members.len().cmp(&classes[x].members.len()))
            .then_with(|| x.cmp(&y))
    });

    let scale = config.ratio_key_scale.max(1) as f64;
    let mut assigned: BTreeSet<usize> = BTreeSet::new();
    let mut families = Vec::new();
    for slot in priority {
        let class = &classes[slot];
        let members: Vec<usize> = class
            .members
            .iter()
            .copied()
            .filter(|m| !assigned.contains(m))
            .collect();
        assigned.extend(members.iter().copied());
        if members.len() > 1 {
            families.push(Family {
                ratio: class.ratio as f64 / scale,
                members,
            });
        }
    }

    tracing::debug!(
        phrases = n,
        classes = classes.len(),
        families = families.len(),
        "isomorphism grouping finished"
    );
    Ok(families)
}

/// Indices in `0..count` not claimed by any family.
pub fn orphans(count: usize, families: &[Family]) -> Vec<usize> {
    let claimed: BTreeSet<usize> = families
        .iter()
        .flat_map(|f| f.members.iter().copied())
        .collect();
    (0..count).filter(|i| !claimed.contains(i)).collect()
}
