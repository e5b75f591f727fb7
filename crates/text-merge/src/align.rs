use crate::affix::{extract_affixes, AffixMode};
use crate::decorate::{Plain, VariantDecorator};
use crate::join::{join_list, Conjunction};
use itertools::Itertools;

/// A successful word-by-word merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    /// The merged, templated sentence
    pub text: String,

    /// Number of word positions whose tokens were not all identical
    pub differing_positions: usize,

    /// Number of words in each aligned input
    pub word_count: usize,
}

/// Merges sentences of equal word count position by position
pub struct TokenAligner<'a> {
    conjunction: Conjunction,
    decorator: &'a dyn VariantDecorator,
}

impl TokenAligner<'static> {
    pub fn new(conjunction: Conjunction) -> Self {
        Self {
            conjunction,
            decorator: &Plain,
        }
    }
}

impl Default for TokenAligner<'static> {
    fn default() -> Self {
        Self::new(Conjunction::default())
    }
}

impl<'a> TokenAligner<'a> {
    /// Create an aligner that decorates every core before joining
    pub fn with_decorator(conjunction: Conjunction, decorator: &'a dyn VariantDecorator) -> Self {
        Self {
            conjunction,
            decorator,
        }
    }

    /// Align strings, numbering variants by their position in `strings`
    pub fn align<S: AsRef<str>>(&self, strings: &[S]) -> Option<Alignment> {
        let variants: Vec<(usize, &str)> = strings
            .iter()
            .enumerate()
            .map(|(idx, s)| (idx, s.as_ref()))
            .collect();
        self.align_variants(&variants)
    }

    /// Align `(variant, text)` pairs into one templated sentence.
    ///
    /// Returns `None` when the word counts differ or when a differing word
    /// reduces to a numeric core: a combined number list would hide which
    /// value belongs to which variant.
    pub fn align_variants(&self, variants: &[(usize, &str)]) -> Option<Alignment> {
        let tokenized: Vec<Vec<&str>> = variants
            .iter()
            .map(|(_, text)| text.split_whitespace().collect())
            .collect();

        let word_count = tokenized.first().map_or(0, Vec::len);
        if tokenized.iter().any(|words| words.len() != word_count) {
            return None;
        }

        let mut items = Vec::with_capacity(word_count);
        let mut differing_positions = 0;

        for position in 0..word_count {
            let words: Vec<&str> = tokenized.iter().map(|words| words[position]).collect();
            if words.iter().all(|word| *word == words[0]) {
                items.push(words[0].to_string());
                continue;
            }

            differing_positions += 1;
            let affixes = extract_affixes(&words, AffixMode::Sentence);
            if affixes.has_numeric_core() {
                log::trace!("numeric difference at word {position}: {words:?}");
                return None;
            }

            // Variants sharing a core are named once, at their first position.
            let decorated: Vec<String> = variants
                .iter()
                .zip(&affixes.cores)
                .map(|((variant, _), core)| self.decorator.decorate(*variant, core))
                .unique()
                .collect();
            items.push(affixes.wrap(&join_list(&decorated, self.conjunction)));
        }

        Some(Alignment {
            text: items.join(" "),
            differing_positions,
            word_count,
        })
    }
}
