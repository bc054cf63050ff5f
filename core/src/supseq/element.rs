use serde::{Deserialize, Serialize};

/// Stable handle for an element. Survives every shift, unlike positions.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u32);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Left => f.write_str("left"),
            Direction::Right => f.write_str("right"),
        }
    }
}

/// Which padding to ignore when measuring a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strip {
    #[default]
    None,
    Left,
    Right,
    Both,
}

/// Neighbours that have already refused to let the element pass, per
/// direction. Emptied whenever the element actually moves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockCache {
    left: Vec<ElementId>,
    right: Vec<ElementId>,
}

impl BlockCache {
    pub fn get(&self, direction: Direction) -> &[ElementId] {
        match direction {
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }

    pub fn contains(&self, direction: Direction, id: ElementId) -> bool {
        self.get(direction).contains(&id)
    }

    pub(crate) fn record(&mut self, direction: Direction, id: ElementId) {
        let side = match direction {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        };
        if !side.contains(&id) {
            side.push(id);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }
}

/// One word in context inside a [`super::SuperSequence`].
///
/// Positions are not stored; the owning sequence derives them on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    id: ElementId,
    word: String,
    aliases: Vec<String>,
    blocked_by: BlockCache,
}

impl Element {
    pub(crate) fn new(id: ElementId, word: &str) -> Self {
        Self {
            id,
            word: word.to_string(),
            aliases: Vec::new(),
            blocked_by: BlockCache::default(),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The word as displayed, including any padding space.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// The word with display padding removed.
    pub fn text(&self) -> &str {
        self.word.trim()
    }

    /// Words merged away into this one.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn blocked_by(&self, direction: Direction) -> &[ElementId] {
        self.blocked_by.get(direction)
    }

    pub fn block_cache(&self) -> &BlockCache {
        &self.blocked_by
    }

    /// Length in characters (not bytes).
    pub fn char_len(&self, strip: Strip) -> usize {
        let word = match strip {
            Strip::None => self.word.as_str(),
            Strip::Left => self.word.trim_start(),
            Strip::Right => self.word.trim_end(),
            Strip::Both => self.word.trim(),
        };
        word.chars().count()
    }

    /// True when a phrase asking for `word` may land on this element.
    pub fn accepts(&self, word: &str) -> bool {
        self.text() == word || self.aliases.iter().any(|alias| alias == word)
    }

    pub(crate) fn absorb(&mut self, other: &Element) {
        for alias in std::iter::once(other.text().to_string()).chain(other.aliases.iter().cloned()) {
            if alias != self.text() && !self.aliases.contains(&alias) {
                self.aliases.push(alias);
            }
        }
    }

    pub(crate) fn set_aliases(&mut self, aliases: &[String]) {
        self.aliases.clear();
        for alias in aliases {
            if alias != self.text() && !self.aliases.contains(alias) {
                self.aliases.push(alias.clone());
            }
        }
    }

    pub(crate) fn set_padding(&mut self, leading: bool, trailing: bool) {
        let text = self.text().to_string();
        let mut padded = String::with_capacity(text.len() + 2);
        if leading {
            padded.push(' ');
        }
        padded.push_str(&text);
        if trailing {
            padded.push(' ');
        }
        self.word = padded;
    }

    pub(crate) fn record_block(&mut self, direction: Direction, by: ElementId) {
        self.blocked_by.record(direction, by);
    }

    /// Called on every committed move: padding and the block cache only
    /// describe the old surroundings.
    pub(crate) fn moved(&mut self) {
        let text = self.text().to_string();
        self.word = text;
        self.blocked_by.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_len_counts_characters_and_honours_strip() {
        let mut el = Element::new(ElementId(0), "Сейчас");
        assert_eq!(el.char_len(Strip::None), 6);
        el.set_padding(true, false);
        assert_eq!(el.word(), " Сейчас");
        assert_eq!(el.char_len(Strip::None), 7);
        assert_eq!(el.char_len(Strip::Left), 6);
        assert_eq!(el.char_len(Strip::Right), 7);
        assert_eq!(el.text(), "Сейчас");
    }

    #[test]
    fn absorbed_words_are_accepted() {
        let mut large = Element::new(ElementId(0), "twenty-five");
        let mut small = Element::new(ElementId(1), "five");
        small.absorb(&Element::new(ElementId(2), "ive"));
        large.absorb(&small);
        assert!(large.accepts("twenty-five"));
        assert!(large.accepts("five"));
        assert!(large.accepts("ive"));
        assert!(!large.accepts("twenty"));
    }

    #[test]
    fn moving_clears_cache_and_padding() {
        let mut el = Element::new(ElementId(0), "past");
        el.set_padding(true, true);
        el.record_block(Direction::Left, ElementId(4));
        el.record_block(Direction::Left, ElementId(4));
        assert_eq!(el.blocked_by(Direction::Left), &[ElementId(4)]);
        el.moved();
        assert!(el.block_cache().is_empty());
        assert_eq!(el.word(), "past");
    }

    #[test]
    fn restored_aliases_skip_own_text_and_repeats() {
        let mut el = Element::new(ElementId(0), "twenty-five");
        el.set_aliases(&["five".into(), "twenty-five".into(), "five".into()]);
        assert_eq!(el.aliases(), &["five".to_string()]);
        assert!(el.accepts("five"));
    }
}
