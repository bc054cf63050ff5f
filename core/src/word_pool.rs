use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Interned handle for one word token.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WordId(pub u32);

impl std::fmt::Display for WordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dense interner for the words of a phrase pool.
///
/// Every pass between tokenization and the final string hand-off works on
/// `WordId` slices, so alignment compares integers instead of strings.
#[derive(Debug, Default)]
pub struct WordPool {
    words: Vec<String>,
    ids: FxHashMap<String, WordId>,
}

impl WordPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids are handed out in first-seen order starting at zero.
    pub fn intern(&mut self, word: &str) -> WordId {
        if let Some(&id) = self.ids.get(word) {
            return id;
        }
        let id = WordId(self.words.len() as u32);
        self.words.push(word.to_owned());
        self.ids.insert(word.to_owned(), id);
        id
    }

    pub fn resolve(&self, id: WordId) -> &str {
        &self.words[id.0 as usize]
    }

    /// Splits a phrase on whitespace and interns every token.
    pub fn tokenize(&mut self, phrase: &str) -> Vec<WordId> {
        phrase.split_whitespace().map(|w| self.intern(w)).collect()
    }

    pub fn join(&self, ids: &[WordId]) -> String {
        let mut out = String::new();
        for (n, id) in ids.iter().enumerate() {
            if n > 0 {
                out.push(' ');
            }
            out.push_str(self.resolve(*id));
        }
        out
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_idempotent_and_dense() {
        let mut pool = WordPool::new();
        let it = pool.intern("it");
        let is = pool.intern("is");
        assert_eq!(it, WordId(0));
        assert_eq!(is, WordId(1));
        assert_eq!(pool.intern("it"), it);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn tokenize_and_join_preserve_words() {
        let mut pool = WordPool::new();
        let ids = pool.tokenize("  it is   one o'clock ");
        assert_eq!(ids.len(), 4);
        assert_eq!(pool.join(&ids), "it is one o'clock");
        assert_eq!(pool.resolve(ids[3]), "o'clock");
    }

    #[test]
    fn words_differing_by_one_character_stay_distinct() {
        let mut pool = WordPool::new();
        let heure = pool.intern("heure");
        let heures = pool.intern("heures");
        assert_ne!(heure, heures);
        assert_eq!(pool.intern("heure"), heure);
        assert_eq!(pool.words(), ["heure".to_string(), "heures".to_string()]);
        assert_eq!(pool.join(&[]), "");
    }
}
