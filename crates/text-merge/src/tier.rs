//! Merging the rarity-tier variants of one description.
//!
//! Tier variants are parallel by construction, so unlike the fuzzy merge the
//! wordwise strategy keeps numeric differences and lists them per tier, e.g.
//! `+1/2/3m` with every value coloured by its tier.

use crate::affix::{extract_affixes, AffixMode};
use crate::decorate::VariantDecorator;
use crate::error::{MergeError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;

/// How the tiers of one record are presented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TierStrategy {
    /// Word-by-word merge into a single sentence
    #[default]
    Wordwise,

    /// An intro line followed by every tier's lines, each in its tier's colour
    Incremental,
}

/// Settings shared by every tier merge of a build
#[derive(Debug, Clone, Copy)]
pub struct TierLayout<'a> {
    pub tier_separator: &'a str,
    pub line_separator: &'a str,
    pub incremental_intro: &'a str,
}

/// Merge one record's tier variants with the given strategy
pub fn merge_tiers(
    key: &str,
    variants: &BTreeMap<u32, String>,
    strategy: TierStrategy,
    layout: &TierLayout<'_>,
    decorator: &dyn VariantDecorator,
) -> Result<Option<String>> {
    match strategy {
        TierStrategy::Wordwise => {
            merge_wordwise(key, variants, layout.tier_separator, decorator)
        }
        TierStrategy::Incremental => Ok(list_incremental(variants, layout, decorator)),
    }
}

/// Merge tier variants word by word.
///
/// Empty variants are dropped and identical texts are kept once, coloured with
/// the highest tier that produced them. Variants must share a word count.
pub fn merge_wordwise(
    key: &str,
    variants: &BTreeMap<u32, String>,
    separator: &str,
    decorator: &dyn VariantDecorator,
) -> Result<Option<String>> {
    let mut distinct: Vec<(u32, &str)> = Vec::new();
    for (&tier, text) in variants {
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        match distinct.iter_mut().find(|(_, seen)| *seen == text) {
            Some(entry) => entry.0 = tier,
            None => distinct.push((tier, text)),
        }
    }

    if distinct.is_empty() {
        return Ok(None);
    }

    // Split on spaces only: escaped or literal line breaks stay inside their word.
    let words: Vec<(u32, Vec<&str>)> = distinct
        .iter()
        .map(|&(tier, text)| (tier, text.split(' ').filter(|w| !w.is_empty()).collect()))
        .collect();

    let mut counts: Vec<usize> = words.iter().map(|(_, w)| w.len()).collect();
    counts.dedup();
    if counts.len() > 1 {
        return Err(MergeError::word_count_mismatch(key, counts));
    }

    let mut items = Vec::with_capacity(counts[0]);
    for position in 0..counts[0] {
        let column: Vec<&str> = words.iter().map(|(_, w)| w[position]).collect();
        if column.iter().all(|word| *word == column[0]) {
            items.push(column[0].to_string());
            continue;
        }

        let affixes = extract_affixes(&column, AffixMode::Field);
        let decorated: Vec<String> = words
            .iter()
            .zip(&affixes.cores)
            .map(|((tier, _), core)| decorator.decorate(*tier as usize, core))
            .collect();
        items.push(affixes.wrap(&decorated.join(separator)));
    }

    Ok(Some(items.join(" ")))
}

fn list_incremental(
    variants: &BTreeMap<u32, String>,
    layout: &TierLayout<'_>,
    decorator: &dyn VariantDecorator,
) -> Option<String> {
    let lines: Vec<String> = variants
        .iter()
        .filter(|(_, text)| !text.trim().is_empty())
        .flat_map(|(&tier, text)| {
            text.split(layout.line_separator)
                .map(move |line| decorator.decorate(tier as usize, line))
        })
        .collect();

    if lines.is_empty() {
        return None;
    }

    let mut items = Vec::with_capacity(lines.len() + 1);
    items.push(layout.incremental_intro.to_string());
    items.extend(lines);
    Some(items.join(layout.line_separator))
}

/// Tier variants of one labelled part of a record, such as one age
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TierSection {
    pub label: String,
    pub variants: BTreeMap<u32, String>,
}

impl TierSection {
    pub fn new(label: impl Into<String>, variants: BTreeMap<u32, String>) -> Self {
        Self {
            label: label.into(),
            variants,
        }
    }
}

/// Merge every section word by word into `Label: merged` lines.
///
/// Sections keep the caller's order. A section with no text is left out, and
/// a section whose tiers cannot be aligned fails the whole record.
pub fn merge_sections(
    key: &str,
    sections: &[TierSection],
    layout: &TierLayout<'_>,
    decorator: &dyn VariantDecorator,
) -> Result<Option<String>> {
    let mut lines = Vec::with_capacity(sections.len());
    for section in sections {
        let section_key = format!("{key} ({})", section.label);
        match merge_wordwise(&section_key, &section.variants, layout.tier_separator, decorator)? {
            Some(text) => lines.push(format!("{}: {text}", section.label)),
            None => log::debug!("no text generated for {section_key}"),
        }
    }

    if lines.is_empty() {
        return Ok(None);
    }
    Ok(Some(lines.join(layout.line_separator)))
}

/// Merge many records, skipping and reporting those that cannot be merged.
///
/// A malformed record never fails the batch: its error is logged and the
/// record is left out of the result, so the caller keeps its original text.
pub fn merge_tier_batch(
    records: &BTreeMap<String, BTreeMap<u32, String>>,
    strategy_for: impl Fn(&str) -> TierStrategy,
    layout: &TierLayout<'_>,
    decorator: &dyn VariantDecorator,
) -> BTreeMap<String, String> {
    let mut merged = BTreeMap::new();
    for (key, variants) in records {
        match merge_tiers(key, variants, strategy_for(key), layout, decorator) {
            Ok(Some(text)) => {
                merged.insert(key.clone(), text);
            }
            Ok(None) => log::debug!("no text generated for {key}"),
            Err(e) => log::warn!("skipping {key}: {e}"),
        }
    }
    merged
}
