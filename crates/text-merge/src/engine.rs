use crate::align::{Alignment, TokenAligner};
use crate::config::MergeConfig;
use crate::decorate::{Plain, VariantDecorator};
use crate::error::{MergeError, Result};
use crate::fuzzy::FuzzyMerger;
use crate::response::{combine_responses, StructuredResponse};
use crate::shared::{SharedLayout, SharedTextAccumulator};
use crate::tier::{
    merge_sections, merge_tier_batch, merge_tiers, TierLayout, TierSection, TierStrategy,
};
use crate::tooltip::{assemble_tooltip, TooltipAdditions};
use std::collections::BTreeMap;

/// Main entry point binding a validated configuration to the merge algorithms
#[derive(Debug, Clone, Default)]
pub struct MergeEngine {
    config: MergeConfig,
}

impl MergeEngine {
    /// Create an engine, rejecting invalid configuration
    pub fn new(config: MergeConfig) -> Result<Self> {
        config.validate().map_err(MergeError::invalid_config)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Merge one group of parallel strings
    pub fn merge<S: AsRef<str>>(&self, strings: &[S]) -> Vec<String> {
        self.merge_decorated(strings, &Plain)
    }

    /// Merge one group, decorating each core with its input position
    pub fn merge_decorated<S: AsRef<str>>(
        &self,
        strings: &[S],
        decorator: &dyn VariantDecorator,
    ) -> Vec<String> {
        let aligner = TokenAligner::with_decorator(self.config.conjunction, decorator);
        FuzzyMerger::new(aligner, self.config.max_replacement_fraction).merge(strings)
    }

    /// Align strings word by word without a replacement budget
    pub fn align<S: AsRef<str>>(&self, strings: &[S]) -> Option<Alignment> {
        TokenAligner::new(self.config.conjunction).align(strings)
    }

    /// Fold structurally identical responses in place
    pub fn combine(&self, responses: &mut Vec<StructuredResponse>) {
        combine_responses(responses);
    }

    /// Combine and render responses into one tooltip
    pub fn assemble_tooltip(
        &self,
        responses: Vec<StructuredResponse>,
        additions: Option<&TooltipAdditions>,
        skip_affected: bool,
    ) -> Option<String> {
        assemble_tooltip(responses, additions, skip_affected, &self.config.line_separator)
    }

    /// Merge the tier variants of one record
    pub fn merge_tiers(
        &self,
        key: &str,
        variants: &BTreeMap<u32, String>,
        strategy: TierStrategy,
        decorator: &dyn VariantDecorator,
    ) -> Result<Option<String>> {
        merge_tiers(key, variants, strategy, &self.tier_layout(), decorator)
    }

    /// Merge each section's tiers into one labelled line per section
    pub fn merge_sections(
        &self,
        key: &str,
        sections: &[TierSection],
        decorator: &dyn VariantDecorator,
    ) -> Result<Option<String>> {
        merge_sections(key, sections, &self.tier_layout(), decorator)
    }

    /// Merge the tier variants of many records, skipping malformed ones
    pub fn merge_tier_batch(
        &self,
        records: &BTreeMap<String, BTreeMap<u32, String>>,
        strategy_for: impl Fn(&str) -> TierStrategy,
        decorator: &dyn VariantDecorator,
    ) -> BTreeMap<String, String> {
        merge_tier_batch(records, strategy_for, &self.tier_layout(), decorator)
    }

    /// Resolve every string id collected during a build
    pub fn resolve_shared(&self, accumulator: &SharedTextAccumulator) -> BTreeMap<String, String> {
        accumulator.resolve(&SharedLayout {
            line_separator: &self.config.line_separator,
            section_prefix: &self.config.section_prefix,
        })
    }

    fn tier_layout(&self) -> TierLayout<'_> {
        TierLayout {
            tier_separator: &self.config.tier_separator,
            line_separator: &self.config.line_separator,
            incremental_intro: &self.config.incremental_intro,
        }
    }
}
