use crate::align::TokenAligner;
use crate::config::DEFAULT_MAX_REPLACEMENT_FRACTION;
use itertools::Itertools;

/// Number of word positions a merge of `word_count`-word sentences may replace.
///
/// Rounds half to even, and always allows at least one replacement.
pub fn replacement_budget(max_replacement_fraction: f64, word_count: usize) -> usize {
    let scaled = (max_replacement_fraction * word_count as f64).round_ties_even();
    (scaled as usize).max(1)
}

/// Collapses parallel sentences into templated ones where only a few words differ
pub struct FuzzyMerger<'a> {
    aligner: TokenAligner<'a>,
    max_replacement_fraction: f64,
}

impl Default for FuzzyMerger<'static> {
    fn default() -> Self {
        Self::new(TokenAligner::default(), DEFAULT_MAX_REPLACEMENT_FRACTION)
    }
}

impl<'a> FuzzyMerger<'a> {
    pub fn new(aligner: TokenAligner<'a>, max_replacement_fraction: f64) -> Self {
        Self {
            aligner,
            max_replacement_fraction,
        }
    }

    /// Merge a group of parallel strings.
    ///
    /// Strings are only compared with strings of the same word count. Within
    /// each word-count group every subset of two or more strings is tried,
    /// largest first, and the first mergeable subset is replaced by its merged
    /// text. A merged string takes the place of its earliest member and joins
    /// the group of its own word count, so the search restarts until no
    /// subset of the current strings merges. Output order follows input order.
    /// The search is exponential in group size, which stays small for tier and
    /// civilization variants.
    pub fn merge<S: AsRef<str>>(&self, strings: &[S]) -> Vec<String> {
        let mut slots: Vec<Option<String>> =
            strings.iter().map(|s| Some(s.as_ref().to_string())).collect();

        while let Some((members, merged)) = self.find_merge(&slots) {
            log::debug!("merged {} strings into: {merged}", members.len());
            slots[members[0]] = Some(merged);
            for &idx in &members[1..] {
                slots[idx] = None;
            }
        }

        slots.into_iter().flatten().collect()
    }

    fn find_merge(&self, slots: &[Option<String>]) -> Option<(Vec<usize>, String)> {
        let groups = slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_deref().map(|text| (idx, text)))
            .into_group_map_by(|(_, text)| text.split_whitespace().count());

        groups
            .into_iter()
            .filter(|(_, members)| members.len() >= 2)
            .sorted_by_key(|(word_count, _)| *word_count)
            .find_map(|(word_count, members)| {
                let budget = replacement_budget(self.max_replacement_fraction, word_count);
                self.find_group_merge(&members, budget)
            })
    }

    fn find_group_merge(
        &self,
        group: &[(usize, &str)],
        budget: usize,
    ) -> Option<(Vec<usize>, String)> {
        for size in (2..=group.len()).rev() {
            for variants in group.iter().copied().combinations(size) {
                let Some(alignment) = self.aligner.align_variants(&variants) else {
                    continue;
                };

                let members: Vec<usize> = variants.iter().map(|(idx, _)| *idx).collect();
                if alignment.differing_positions > budget {
                    log::trace!(
                        "rejected merge of {members:?}: {} positions differ, budget {budget}",
                        alignment.differing_positions
                    );
                    continue;
                }

                return Some((members, alignment.text));
            }
        }
        None
    }
}

/// Merge strings with the default aligner and the given replacement fraction
pub fn merge_strings<S: AsRef<str>>(strings: &[S], max_replacement_fraction: f64) -> Vec<String> {
    FuzzyMerger::new(TokenAligner::default(), max_replacement_fraction).merge(strings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::join::Conjunction;

    #[test]
    fn budget_rounds_half_to_even_with_floor_of_one() {
        assert_eq!(replacement_budget(0.1, 20), 2);
        assert_eq!(replacement_budget(0.1, 4), 1);
        assert_eq!(replacement_budget(0.1, 25), 2);
        assert_eq!(replacement_budget(0.1, 35), 4);
        assert_eq!(replacement_budget(0.0, 50), 1);
    }

    #[test]
    fn single_string_passes_through() {
        let merged = FuzzyMerger::default().merge(&["Only one line."]);
        assert_eq!(merged, vec!["Only one line."]);
    }

    #[test]
    fn prefers_largest_subset() {
        let merged = merge_strings(
            &[
                "Hoplite: +10% Damage.",
                "Toxotes: +10% Damage.",
                "Hippeus: +10% Damage.",
            ],
            0.1,
        );
        assert_eq!(merged, vec!["Hoplite, Toxotes, or Hippeus: +10% Damage."]);
    }

    #[test]
    fn merged_string_takes_earliest_slot() {
        let merged = merge_strings(
            &[
                "Hoplite gains 5 armor.",
                "A completely different line",
                "Toxotes gains 5 armor.",
            ],
            0.1,
        );
        assert_eq!(
            merged,
            vec!["Hoplite or Toxotes gains 5 armor.", "A completely different line"]
        );
    }

    #[test]
    fn merged_strings_keep_merging() {
        let merged = merge_strings(
            &[
                "Hoplite gains shield.",
                "Toxotes gains shield.",
                "Hoplite gains armor.",
                "Toxotes gains armor.",
            ],
            0.1,
        );
        assert_eq!(merged, vec!["Hoplite or Toxotes gains shield or armor."]);
        assert_eq!(merge_strings(&merged, 0.1), merged);
    }

    #[test]
    fn repeated_strings_are_named_once() {
        let merged = merge_strings(
            &[
                "Hoplite gains 5 armor.",
                "Hoplite gains 5 armor.",
                "Toxotes gains 5 armor.",
            ],
            0.1,
        );
        assert_eq!(merged, vec!["Hoplite or Toxotes gains 5 armor."]);
        assert_eq!(merge_strings(&["a", "a", "b"], 0.1), vec!["a or b"]);
    }

    #[test]
    fn continues_after_first_merge() {
        let merger = FuzzyMerger::new(TokenAligner::new(Conjunction::And), 0.1);
        let merged = merger.merge(&[
            "Hoplite gains 5 armor.",
            "Hoplite gains 8 armor.",
            "Toxotes gains 5 armor.",
            "Toxotes gains 8 armor.",
        ]);
        assert_eq!(
            merged,
            vec![
                "Hoplite and Toxotes gains 5 armor.",
                "Hoplite and Toxotes gains 8 armor.",
            ]
        );
    }
}
