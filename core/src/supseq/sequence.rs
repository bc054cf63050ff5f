use super::element::{Direction, Element, ElementId, Strip};
use crate::control::RunControl;
use crate::error::SequenceError;
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;

/// Whether a shift must re-check the phrase pool before it is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validation {
    #[default]
    Checked,
    Unchecked,
}

/// An ordered word sequence that stays able to generate every phrase of its
/// sanity pool.
///
/// Every checked mutation is staged on a copy of the element list, validated
/// against the pool and only then committed. A rejected mutation returns
/// `Ok(false)` and leaves the sequence untouched.
#[derive(Debug, Clone)]
pub struct SuperSequence {
    elements: Vec<Element>,
    sanity_pool: Vec<String>,
    checks: Vec<Vec<String>>,
}

impl SuperSequence {
    /// Builds a sequence from whitespace-separated `sequence` without
    /// validating it.
    pub fn new(sequence: &str, sanity_pool: &[String]) -> Self {
        let elements: Vec<Element> = sequence
            .split_whitespace()
            .enumerate()
            .map(|(i, word)| Element::new(ElementId(i as u32), word))
            .collect();

        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let checks = sanity_pool
            .iter()
            .filter(|phrase| seen.insert(phrase.as_str()))
            .map(|phrase| phrase.split_whitespace().map(str::to_string).collect())
            .collect();

        Self {
            elements,
            sanity_pool: sanity_pool.to_vec(),
            checks,
        }
    }

    /// Restores a saved sequence, rejecting it when some pool phrase can no
    /// longer be read off it.
    pub fn from_saved(sequence: &str, sanity_pool: &[String]) -> Result<Self, SequenceError> {
        Self::from_saved_with_aliases(sequence, &[], sanity_pool)
    }

    /// Like [`Self::from_saved`], with the merge aliases of every element
    /// reattached before validation. `aliases` is either empty or holds one
    /// list per word of `sequence`.
    pub fn from_saved_with_aliases(
        sequence: &str,
        aliases: &[Vec<String>],
        sanity_pool: &[String],
    ) -> Result<Self, SequenceError> {
        let mut restored = Self::new(sequence, sanity_pool);
        if !aliases.is_empty() {
            if aliases.len() != restored.elements.len() {
                return Err(SequenceError::AliasMismatch {
                    expected: restored.elements.len(),
                    found: aliases.len(),
                });
            }
            for (element, saved) in restored.elements.iter_mut().zip(aliases) {
                element.set_aliases(saved);
            }
        }
        match restored.failing_phrase() {
            Some(phrase) => Err(SequenceError::InvalidSavedSequence {
                phrase: phrase.to_string(),
            }),
            None => Ok(restored),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn sanity_pool(&self) -> &[String] {
        &self.sanity_pool
    }

    /// Merge aliases per element, in sequence order. Empty when no element
    /// has absorbed another.
    pub fn aliases(&self) -> Vec<Vec<String>> {
        if self.elements.iter().all(|el| el.aliases().is_empty()) {
            return Vec::new();
        }
        self.elements.iter().map(|el| el.aliases().to_vec()).collect()
    }

    pub fn position(&self, id: ElementId) -> Result<usize, SequenceError> {
        self.elements
            .iter()
            .position(|el| el.id() == id)
            .ok_or(SequenceError::UnknownElement { id })
    }

    pub fn element(&self, id: ElementId) -> Result<&Element, SequenceError> {
        let pos = self.position(id)?;
        Ok(&self.elements[pos])
    }

    pub fn element_at(&self, index: usize) -> Result<&Element, SequenceError> {
        self.elements
            .get(index)
            .ok_or(SequenceError::IndexOutOfRange {
                index,
                len: self.elements.len(),
            })
    }

    pub fn id_at(&self, index: usize) -> Result<ElementId, SequenceError> {
        self.element_at(index).map(Element::id)
    }

    /// Words without padding, in order.
    pub fn words(&self) -> Vec<&str> {
        self.elements.iter().map(Element::text).collect()
    }

    pub fn as_string(&self) -> String {
        self.words().join(" ")
    }

    /// Total characters of all words, padding included.
    pub fn char_length(&self) -> usize {
        self.elements.iter().map(|el| el.char_len(Strip::None)).sum()
    }

    pub fn shortest_word_len(&self) -> Option<usize> {
        self.elements.iter().map(|el| el.char_len(Strip::Both)).min()
    }

    pub fn longest_word_len(&self) -> Option<usize> {
        self.elements.iter().map(|el| el.char_len(Strip::Both)).max()
    }

    /// Words that occur on more than one element.
    pub fn duplicate_words(&self) -> BTreeSet<String> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        self.elements
            .iter()
            .map(Element::text)
            .filter(|word| !seen.insert(*word))
            .map(str::to_string)
            .collect()
    }

    /// Left and right neighbours of `id`.
    pub fn adjacent(
        &self,
        id: ElementId,
    ) -> Result<(Option<ElementId>, Option<ElementId>), SequenceError> {
        let pos = self.position(id)?;
        let left = pos.checked_sub(1).map(|p| self.elements[p].id());
        let right = self.elements.get(pos + 1).map(Element::id);
        Ok((left, right))
    }

    /// Elements from `from` onwards, longest word first. Ties keep sequence
    /// order.
    pub fn remaining_by_size(&self, from: usize) -> Vec<ElementId> {
        let mut rest: Vec<&Element> = self
            .elements
            .get(from..)
            .map(|tail| tail.iter().collect())
            .unwrap_or_default();
        rest.sort_by(|x, y| y.char_len(Strip::None).cmp(&x.char_len(Strip::None)));
        rest.into_iter().map(Element::id).collect()
    }

    /// `(large, small)` pairs where the word of `small` is a proper substring
    /// of the word of `large`, larger words first.
    pub fn containing_pairs(&self) -> Vec<(ElementId, ElementId)> {
        let by_size = self.remaining_by_size(0);
        let mut pairs = Vec::new();
        for (i, &large) in by_size.iter().enumerate() {
            let Ok(large_el) = self.element(large) else {
                continue;
            };
            for &small in &by_size[i + 1..] {
                let Ok(small_el) = self.element(small) else {
                    continue;
                };
                if small_el.text() != large_el.text() && large_el.text().contains(small_el.text())
                {
                    pairs.push((large, small));
                }
            }
        }
        pairs
    }

    /// True when some pool phrase reads `id` and its right neighbour as
    /// consecutive words, so the two need a visible gap.
    pub fn needs_spacing(&self, id: ElementId) -> Result<bool, SequenceError> {
        let pos = self.position(id)?;
        let Some(next) = self.elements.get(pos + 1) else {
            return Ok(false);
        };
        let current = &self.elements[pos];
        Ok(self.checks.iter().any(|phrase| {
            phrase
                .windows(2)
                .any(|pair| current.accepts(&pair[0]) && next.accepts(&pair[1]))
        }))
    }

    /// Sets the display padding of `id`. Only the stored word changes; the
    /// sanity check always compares stripped text.
    pub fn set_padding(
        &mut self,
        id: ElementId,
        leading: bool,
        trailing: bool,
    ) -> Result<(), SequenceError> {
        let pos = self.position(id)?;
        self.elements[pos].set_padding(leading, trailing);
        Ok(())
    }

    /// True when every pool phrase can be read off the sequence.
    pub fn sanity_check(&self) -> bool {
        generates_all(&self.elements, &self.checks)
    }

    /// Same check against an arbitrary phrase list.
    pub fn sanity_check_phrases<S: AsRef<str>>(&self, phrases: &[S]) -> bool {
        phrases.iter().all(|phrase| {
            let words: Vec<&str> = phrase.as_ref().split_whitespace().collect();
            generates(&self.elements, &words)
        })
    }

    /// First pool phrase the sequence cannot generate.
    pub fn failing_phrase(&self) -> Option<&str> {
        self.sanity_pool
            .iter()
            .find(|phrase| {
                let words: Vec<&str> = phrase.split_whitespace().collect();
                !generates(&self.elements, &words)
            })
            .map(String::as_str)
    }

    /// Swaps `id` with its neighbour in `direction`.
    ///
    /// Errors when there is no neighbour that way. With
    /// [`Validation::Checked`], a swap that breaks the pool is rejected and
    /// the neighbour is remembered in the element's block cache.
    pub fn shift(
        &mut self,
        id: ElementId,
        direction: Direction,
        validation: Validation,
    ) -> Result<bool, SequenceError> {
        let pos = self.position(id)?;
        let target = match direction {
            Direction::Left if pos > 0 => pos - 1,
            Direction::Right if pos + 1 < self.elements.len() => pos + 1,
            _ => {
                return Err(SequenceError::InvalidShift {
                    position: pos,
                    direction,
                })
            }
        };

        if validation == Validation::Checked {
            let mut staged = self.elements.clone();
            staged.swap(pos, target);
            if !generates_all(&staged, &self.checks) {
                let neighbour = self.elements[target].id();
                self.elements[pos].record_block(direction, neighbour);
                return Ok(false);
            }
        }

        self.elements.swap(pos, target);
        self.elements[pos].moved();
        self.elements[target].moved();
        Ok(true)
    }

    /// Moves `id` step by step until it sits at `target`.
    ///
    /// Gives up without testing when an element on the way is already known
    /// to block it. A refused step leaves the element wherever it got to.
    pub fn shift_to_position(
        &mut self,
        id: ElementId,
        target: usize,
    ) -> Result<bool, SequenceError> {
        if target >= self.elements.len() {
            return Err(SequenceError::IndexOutOfRange {
                index: target,
                len: self.elements.len(),
            });
        }
        let pos = self.position(id)?;
        if pos == target {
            return Ok(true);
        }
        let (direction, passed) = if target > pos {
            (Direction::Right, pos + 1..target + 1)
        } else {
            (Direction::Left, target..pos)
        };
        let blocked = self.elements[pos].blocked_by(direction);
        if self.elements[passed]
            .iter()
            .any(|el| blocked.contains(&el.id()))
        {
            return Ok(false);
        }

        while self.position(id)? != target {
            if !self.shift(id, direction, Validation::Checked)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Brings `one` and `two` next to each other, keeping their relative
    /// order. Each step moves the left element right or, failing that, the
    /// right element left.
    pub fn converge(&mut self, one: ElementId, two: ElementId) -> Result<bool, SequenceError> {
        let (p1, p2) = (self.position(one)?, self.position(two)?);
        if p1 == p2 {
            return Ok(false);
        }
        let (first, second) = if p1 < p2 { (one, two) } else { (two, one) };

        loop {
            if self.position(second)? - self.position(first)? == 1 {
                return Ok(true);
            }
            if !(self.shift(first, Direction::Right, Validation::Checked)?
                || self.shift(second, Direction::Left, Validation::Checked)?)
            {
                return Ok(false);
            }
        }
    }

    /// Merges two adjacent elements whose words contain one another: the
    /// shorter word is absorbed by the longer one as an alias.
    pub fn merge_adjacent(&mut self, one: ElementId, two: ElementId) -> Result<bool, SequenceError> {
        let (large, small) = self.containment(one, two)?;
        let (large_pos, small_pos) = (self.position(large)?, self.position(small)?);
        if large_pos.abs_diff(small_pos) != 1 {
            return Err(SequenceError::NotAdjacent {
                left: large_pos.min(small_pos),
                right: large_pos.max(small_pos),
            });
        }

        let mut staged = self.elements.clone();
        let absorbed = staged.remove(small_pos);
        let large_pos = if small_pos < large_pos {
            large_pos - 1
        } else {
            large_pos
        };
        staged[large_pos].absorb(&absorbed);
        if !generates_all(&staged, &self.checks) {
            return Ok(false);
        }
        tracing::debug!(
            large = staged[large_pos].text(),
            small = absorbed.text(),
            "merged substring element"
        );
        self.elements = staged;
        Ok(true)
    }

    /// Converges the two elements, then merges them.
    pub fn merge(&mut self, one: ElementId, two: ElementId) -> Result<bool, SequenceError> {
        self.containment(one, two)?;
        if !self.converge(one, two)? {
            return Ok(false);
        }
        self.merge_adjacent(one, two)
    }

    /// Removes duplicate elements the pool does not need, returning how many
    /// were removed.
    ///
    /// For every repeated word, consecutive occurrences are converged and the
    /// earlier one is dropped if the pool still holds. The survivor inherits
    /// its aliases.
    pub fn eliminate_redundancies(
        &mut self,
        control: &mut RunControl<'_>,
    ) -> Result<usize, SequenceError> {
        let mut removed = 0usize;
        for word in self.duplicate_words() {
            let occurrences: Vec<ElementId> = self
                .elements
                .iter()
                .filter(|el| el.text() == word)
                .map(Element::id)
                .collect();

            for pair in occurrences.windows(2) {
                control.checkpoint()?;
                control.pulse();
                let (one, two) = (pair[0], pair[1]);
                if !self.converge(one, two)? {
                    continue;
                }

                let (p1, p2) = (self.position(one)?, self.position(two)?);
                let (earlier, later) = if p1 < p2 { (p1, p2) } else { (p2, p1) };
                let mut staged = self.elements.clone();
                let dropped = staged.remove(earlier);
                staged[later - 1].absorb(&dropped);
                if generates_all(&staged, &self.checks) {
                    self.elements = staged;
                    removed += 1;
                }
            }
        }
        tracing::debug!(removed, len = self.elements.len(), "fine redundancy pass finished");
        Ok(removed)
    }

    /// Tries to merge every element into a longer element containing its
    /// word. Returns the number of merges committed.
    pub fn merge_substrings(&mut self, control: &mut RunControl<'_>) -> Result<usize, SequenceError> {
        let mut absorbed: FxHashSet<ElementId> = FxHashSet::default();
        for (large, small) in self.containing_pairs() {
            control.checkpoint()?;
            control.pulse();
            if absorbed.contains(&large) || absorbed.contains(&small) {
                continue;
            }
            if self.merge(large, small)? {
                absorbed.insert(small);
            }
        }
        Ok(absorbed.len())
    }

    fn containment(
        &self,
        one: ElementId,
        two: ElementId,
    ) -> Result<(ElementId, ElementId), SequenceError> {
        let (w1, w2) = (self.element(one)?.text(), self.element(two)?.text());
        if one != two && w1.len() > w2.len() && w1.contains(w2) {
            Ok((one, two))
        } else if one != two && w2.len() > w1.len() && w2.contains(w1) {
            Ok((two, one))
        } else {
            Err(SequenceError::NotMergeable {
                first: w1.to_string(),
                second: w2.to_string(),
            })
        }
    }
}

impl std::fmt::Display for SuperSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_string())
    }
}

fn generates_all(elements: &[Element], checks: &[Vec<String>]) -> bool {
    checks.iter().all(|phrase| generates(elements, phrase))
}

/// Greedy read-off: each word lands on the earliest accepting element after
/// the previous landing spot.
fn generates<S: AsRef<str>>(elements: &[Element], phrase: &[S]) -> bool {
    let mut cursor = 0usize;
    for word in phrase {
        let word = word.as_ref();
        match elements[cursor..].iter().position(|el| el.accepts(word)) {
            Some(offset) => cursor += offset + 1,
            None => return false,
        }
    }
    true
}
