//! # Tooltip Text Merge
//!
//! Collapses parallel tooltip descriptions into compact templated text.
//!
//! ## Philosophy
//!
//! Several rarity tiers, civilizations or unit variants often produce
//! descriptions that differ in a word or two. The engine merges them into a
//! single line that names only what differs, and refuses merges that would
//! mislead:
//! - Numbers are never folded into a shared list across variants
//! - Unrelated names are never sliced into a shared affix
//! - Only a bounded share of a sentence may be parameterized
//! - A failed merge keeps every input line unchanged
//!
//! ## Architecture
//!
//! ```text
//! Effect records
//!     │
//!     ├──> Response combiner (same template, different subjects/targets)
//!     │
//!     ├──> Render each record to a line
//!     │
//!     └──> Fuzzy merge across one group's lines
//!          ├─> Group by word count
//!          ├─> Try subsets, largest first
//!          ├─> Align word by word (affix extraction per differing word)
//!          └─> Enforce numeric safety and the replacement budget
//! ```
//!
//! ## Example
//!
//! ```rust
//! use tooltip_text_merge::{MergeConfig, MergeEngine};
//!
//! let engine = MergeEngine::new(MergeConfig::default()).unwrap();
//! let merged = engine.merge(&[
//!     "Hoplite: +10% Damage.",
//!     "Toxotes: +10% Damage.",
//!     "Slows target by 10%.",
//!     "Slows target by 20%.",
//! ]);
//!
//! assert_eq!(
//!     merged,
//!     vec![
//!         "Hoplite or Toxotes: +10% Damage.",
//!         "Slows target by 10%.",
//!         "Slows target by 20%.",
//!     ]
//! );
//! ```

mod affix;
mod align;
mod config;
mod decorate;
mod engine;
mod error;
mod fuzzy;
mod join;
mod response;
mod shared;
mod tier;
mod tooltip;

pub use affix::{extract_affixes, is_numeric, AffixMode, AffixResult};
pub use align::{Alignment, TokenAligner};
pub use config::{MergeConfig, DEFAULT_MAX_REPLACEMENT_FRACTION};
pub use decorate::{Plain, RarityColours, VariantDecorator};
pub use engine::MergeEngine;
pub use error::{MergeError, Result};
pub use fuzzy::{merge_strings, replacement_budget, FuzzyMerger};
pub use join::{join_list, Conjunction};
pub use response::{combine_responses, StructuredResponse, COMBINABLE_PLACEHOLDER};
pub use shared::{SharedLayout, SharedTextAccumulator, Subject};
pub use tier::{
    merge_sections, merge_tier_batch, merge_tiers, merge_wordwise, TierLayout, TierSection,
    TierStrategy,
};
pub use tooltip::{assemble_tooltip, TooltipAdditions};
