//! Statistics over a clock's sentence dump, used to size the panel before a
//! supersequence exists.

use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MinAvgMax {
    pub min: usize,
    pub avg: f64,
    pub max: usize,
}

impl MinAvgMax {
    fn of(lengths: impl IntoIterator<Item = usize>) -> Self {
        let mut count = 0usize;
        let mut sum = 0usize;
        let mut min = usize::MAX;
        let mut max = 0usize;
        for len in lengths {
            count += 1;
            sum += len;
            min = min.min(len);
            max = max.max(len);
        }
        if count == 0 {
            return Self {
                min: 0,
                avg: 0.0,
                max: 0,
            };
        }
        Self {
            min,
            avg: sum as f64 / count as f64,
            max,
        }
    }
}

impl std::fmt::Display for MinAvgMax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {:.1}, {})", self.min, self.avg, self.max)
    }
}

/// Smallest near-square grid holding a given number of characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PanelSize {
    pub x: usize,
    pub y: usize,
    pub extra_cells: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhraseStats {
    pub sentences: usize,
    pub unique_sentences: usize,
    pub unique_words: usize,
    pub words_per_sentence: MinAvgMax,
    pub chars_in_unique_words: usize,
    pub chars_per_word: MinAvgMax,
    /// Whitespace is not counted.
    pub chars_per_sentence: MinAvgMax,
    pub min_panel: PanelSize,
}

pub fn analyze_phrases(phrases: &[String]) -> PhraseStats {
    let unique: BTreeSet<&str> = phrases.iter().map(String::as_str).collect();
    let words: BTreeSet<&str> = phrases.iter().flat_map(|p| p.split_whitespace()).collect();
    let char_count = |w: &str| w.chars().count();

    let chars_in_unique_words: usize = words.iter().map(|w| char_count(*w)).sum();
    PhraseStats {
        sentences: phrases.len(),
        unique_sentences: unique.len(),
        unique_words: words.len(),
        words_per_sentence: MinAvgMax::of(unique.iter().map(|p| p.split_whitespace().count())),
        chars_in_unique_words,
        chars_per_word: MinAvgMax::of(words.iter().map(|w| char_count(*w))),
        chars_per_sentence: MinAvgMax::of(
            unique
                .iter()
                .map(|p| p.split_whitespace().map(char_count).sum::<usize>()),
        ),
        min_panel: minimum_panel_size(chars_in_unique_words),
    }
}

/// `root²`, else `(root+1)·root`, else `(root+1)²` with `root = ⌊√chars⌋`.
/// Word boundaries are not taken into account.
pub fn minimum_panel_size(chars: usize) -> PanelSize {
    let mut root = (chars as f64).sqrt() as usize;
    while root * root > chars {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= chars {
        root += 1;
    }
    let (x, y) = if root * root >= chars {
        (root, root)
    } else if (root + 1) * root >= chars {
        (root + 1, root)
    } else {
        (root + 1, root + 1)
    };
    PanelSize {
        x,
        y,
        extra_cells: x * y - chars,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_size_prefers_squares() {
        assert_eq!(minimum_panel_size(16), PanelSize { x: 4, y: 4, extra_cells: 0 });
        assert_eq!(minimum_panel_size(18), PanelSize { x: 5, y: 4, extra_cells: 2 });
        assert_eq!(minimum_panel_size(21), PanelSize { x: 5, y: 5, extra_cells: 4 });
        assert_eq!(minimum_panel_size(0), PanelSize { x: 0, y: 0, extra_cells: 0 });
    }

    #[test]
    fn stats_use_true_minimum_and_unicode_chars() {
        let phrases: Vec<String> = ["It is one", "It is one", "Сейчас два часа"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let stats = analyze_phrases(&phrases);
        assert_eq!(stats.sentences, 3);
        assert_eq!(stats.unique_sentences, 2);
        assert_eq!(stats.unique_words, 6);
        assert_eq!(stats.words_per_sentence.min, 3);
        assert_eq!(stats.chars_per_word.min, 2);
        assert_eq!(stats.chars_per_word.max, 6);
        assert_eq!(stats.chars_per_sentence.min, 7);
        assert_eq!(stats.chars_per_sentence.max, 13);
        assert_eq!(stats.chars_in_unique_words, 2 + 2 + 3 + 6 + 3 + 4);
        assert_eq!(stats.words_per_sentence.to_string(), "(3, 3.0, 3)");
    }
}
