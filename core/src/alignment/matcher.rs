use rustc_hash::FxHashMap;
use std::hash::Hash;
use std::ops::Range;

/// A run of equal tokens: `a[a_start..a_start + len] == b[b_start..b_start + len]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchingBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpTag {
    Equal,
    Replace,
    Insert,
    Delete,
}

/// One edit step turning `a[a]` into `b[b]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Opcode {
    pub tag: OpTag,
    pub a: Range<usize>,
    pub b: Range<usize>,
}

/// Greedy longest-matching-block aligner over two token slices.
///
/// Results are computed once at construction; the matcher never mutates or
/// caches anything across different inputs, so callers re-align after every
/// edit by building a fresh matcher.
pub struct SequenceMatcher<'a, T> {
    a: &'a [T],
    b: &'a [T],
    blocks: Vec<MatchingBlock>,
}

impl<'a, T: Eq + Hash> SequenceMatcher<'a, T> {
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        let blocks = matching_blocks(a, b);
        Self { a, b, blocks }
    }

    pub fn a(&self) -> &'a [T] {
        self.a
    }

    pub fn b(&self) -> &'a [T] {
        self.b
    }

    /// Ordered, collapsed matching blocks. No zero-length sentinel is included.
    pub fn matching_blocks(&self) -> &[MatchingBlock] {
        &self.blocks
    }

    pub fn matched_len(&self) -> usize {
        self.blocks.iter().map(|b| b.len).sum()
    }

    /// `2 * M / (|a| + |b|)`, or `1.0` when both sequences are empty.
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        2.0 * self.matched_len() as f64 / total as f64
    }

    /// Edit script covering both sequences end to end.
    pub fn opcodes(&self) -> Vec<Opcode> {
        let mut ops = Vec::with_capacity(self.blocks.len() * 2 + 1);
        let mut i = 0usize;
        let mut j = 0usize;
        let sentinel = MatchingBlock {
            a_start: self.a.len(),
            b_start: self.b.len(),
            len: 0,
        };

        for block in self.blocks.iter().chain(std::iter::once(&sentinel)) {
            let tag = match (i < block.a_start, j < block.b_start) {
                (true, true) => Some(OpTag::Replace),
                (true, false) => Some(OpTag::Delete),
                (false, true) => Some(OpTag::Insert),
                (false, false) => None,
            };
            if let Some(tag) = tag {
                ops.push(Opcode {
                    tag,
                    a: i..block.a_start,
                    b: j..block.b_start,
                });
            }
            i = block.a_start + block.len;
            j = block.b_start + block.len;
            if block.len > 0 {
                ops.push(Opcode {
                    tag: OpTag::Equal,
                    a: block.a_start..i,
                    b: block.b_start..j,
                });
            }
        }

        ops
    }
}

fn matching_blocks<T: Eq + Hash>(a: &[T], b: &[T]) -> Vec<MatchingBlock> {
    let mut b2j: FxHashMap<&T, Vec<usize>> = FxHashMap::default();
    for (j, item) in b.iter().enumerate() {
        b2j.entry(item).or_default().push(j);
    }

    let mut queue = vec![(0usize, a.len(), 0usize, b.len())];
    let mut found = Vec::new();
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let block = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if block.len == 0 {
            continue;
        }
        if alo < block.a_start && blo < block.b_start {
            queue.push((alo, block.a_start, blo, block.b_start));
        }
        let a_end = block.a_start + block.len;
        let b_end = block.b_start + block.len;
        if a_end < ahi && b_end < bhi {
            queue.push((a_end, ahi, b_end, bhi));
        }
        found.push(block);
    }
    found.sort_unstable();

    let mut collapsed: Vec<MatchingBlock> = Vec::with_capacity(found.len());
    for block in found {
        match collapsed.last_mut() {
            Some(prev)
                if prev.a_start + prev.len == block.a_start
                    && prev.b_start + prev.len == block.b_start =>
            {
                prev.len += block.len;
            }
            _ => collapsed.push(block),
        }
    }
    collapsed
}

/// Longest block inside `a[alo..ahi]` x `b[blo..bhi]`; earliest `a` start wins
/// ties, then earliest `b` start.
fn longest_match<T: Eq + Hash>(
    a: &[T],
    b2j: &FxHashMap<&T, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> MatchingBlock {
    let mut best = MatchingBlock {
        a_start: alo,
        b_start: blo,
        len: 0,
    };
    let mut j2len: FxHashMap<usize, usize> = FxHashMap::default();
    let mut next: FxHashMap<usize, usize> = FxHashMap::default();

    for (i, item) in a.iter().enumerate().take(ahi).skip(alo) {
        next.clear();
        if let Some(positions) = b2j.get(item) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let prev = if j > 0 {
                    j2len.get(&(j - 1)).copied().unwrap_or(0)
                } else {
                    0
                };
                let k = prev + 1;
                next.insert(j, k);
                if k > best.len {
                    best = MatchingBlock {
                        a_start: i + 1 - k,
                        b_start: j + 1 - k,
                        len: k,
                    };
                }
            }
        }
        std::mem::swap(&mut j2len, &mut next);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<&str> {
        s.split_whitespace().collect()
    }

    #[test]
    fn identical_sequences_have_ratio_one() {
        let a = words("it is one o'clock");
        let m = SequenceMatcher::new(&a, &a);
        assert_eq!(m.ratio(), 1.0);
        assert_eq!(m.opcodes().len(), 1);
        assert_eq!(m.opcodes()[0].tag, OpTag::Equal);
    }

    #[test]
    fn empty_sequences_have_ratio_one() {
        let a: Vec<&str> = Vec::new();
        let m = SequenceMatcher::new(&a, &a);
        assert_eq!(m.ratio(), 1.0);
        assert!(m.opcodes().is_empty());
    }

    #[test]
    fn single_substitution_yields_replace() {
        let a = words("it is one o'clock");
        let b = words("it is two o'clock");
        let m = SequenceMatcher::new(&a, &b);
        assert!((m.ratio() - 0.75).abs() < 1e-12);
        let ops = m.opcodes();
        assert_eq!(
            ops,
            vec![
                Opcode { tag: OpTag::Equal, a: 0..2, b: 0..2 },
                Opcode { tag: OpTag::Replace, a: 2..3, b: 2..3 },
                Opcode { tag: OpTag::Equal, a: 3..4, b: 3..4 },
            ]
        );
    }

    #[test]
    fn insert_and_delete_are_reported() {
        let a = words("red green blue");
        let b = words("red blue yellow");
        let m = SequenceMatcher::new(&a, &b);
        let tags: Vec<OpTag> = m.opcodes().iter().map(|op| op.tag).collect();
        assert_eq!(
            tags,
            vec![OpTag::Equal, OpTag::Delete, OpTag::Equal, OpTag::Insert]
        );
        assert!((m.ratio() - 4.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn ties_prefer_earliest_position_in_a() {
        let a = words("x y x y");
        let b = words("x y");
        let m = SequenceMatcher::new(&a, &b);
        assert_eq!(
            m.matching_blocks(),
            &[MatchingBlock { a_start: 0, b_start: 0, len: 2 }]
        );
    }

    #[test]
    fn adjacent_blocks_are_collapsed() {
        let a = words("a b c d");
        let b = words("a b c d");
        let m = SequenceMatcher::new(&a, &b);
        assert_eq!(m.matching_blocks().len(), 1);
        assert_eq!(m.matched_len(), 4);
    }

    #[test]
    fn opcodes_cover_both_sequences() {
        let a = words("the quick brown fox jumps");
        let b = words("a quick red fox leaps high");
        let ops = SequenceMatcher::new(&a, &b).opcodes();
        assert_eq!(ops.first().map(|o| (o.a.start, o.b.start)), Some((0, 0)));
        assert_eq!(ops.last().map(|o| (o.a.end, o.b.end)), Some((a.len(), b.len())));
        for pair in ops.windows(2) {
            assert_eq!(pair[0].a.end, pair[1].a.start);
            assert_eq!(pair[0].b.end, pair[1].b.start);
        }
    }
}
