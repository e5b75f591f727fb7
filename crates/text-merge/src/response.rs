use crate::join::{join_list, Conjunction};
use serde::{Deserialize, Serialize};

/// Substitution point inside a response template
pub const COMBINABLE_PLACEHOLDER: &str = "{combinable}";

/// One formatted effect before it is flattened to text.
///
/// `text` is a template with a single `{combinable}` slot, filled with
/// `combinable_targets` when rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredResponse {
    /// Subjects the effect applies to ("X and Y: ...")
    #[serde(default)]
    pub affects: Vec<String>,

    /// Template text for the tooltip line
    #[serde(default = "default_template")]
    pub text: String,

    /// Values for the substitution point, if this response is substitution-based
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combinable_targets: Option<Vec<String>>,
}

fn default_template() -> String {
    COMBINABLE_PLACEHOLDER.to_string()
}

impl StructuredResponse {
    pub fn new<I, S>(affects: I, text: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut response = Self {
            affects: Vec::new(),
            text: text.into(),
            combinable_targets: None,
        };
        extend_unique(&mut response.affects, affects.into_iter().map(Into::into));
        response
    }

    /// Attach substitution targets
    #[must_use]
    pub fn with_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique = Vec::new();
        extend_unique(&mut unique, targets.into_iter().map(Into::into));
        self.combinable_targets = Some(unique);
        self
    }

    /// Whether `other` differs from this response only in its subjects
    pub fn can_combine_affects(&self, other: &Self) -> bool {
        self.text == other.text && self.combinable_targets == other.combinable_targets
    }

    /// Whether `other` differs from this response only in its substitution targets
    pub fn can_combine_targets(&self, other: &Self) -> bool {
        self.combinable_targets.is_some()
            && other.combinable_targets.is_some()
            && self.text == other.text
            && self.affects == other.affects
    }

    fn absorb_affects(&mut self, other: Self) {
        extend_unique(&mut self.affects, other.affects);
    }

    fn absorb_targets(&mut self, other: Self) {
        let targets = self.combinable_targets.get_or_insert_with(Vec::new);
        extend_unique(targets, other.combinable_targets.unwrap_or_default());
    }

    /// Render as one tooltip line: `"A and B: <template with targets>."`
    pub fn render(&self, skip_affected: bool) -> String {
        let mut components = Vec::with_capacity(2);
        if !skip_affected {
            components.push(format!("{}:", join_list(&self.affects, Conjunction::And)));
        }

        let targets = self
            .combinable_targets
            .as_deref()
            .map(|targets| join_list(targets, Conjunction::And))
            .unwrap_or_default();
        components.push(
            self.text
                .replace(COMBINABLE_PLACEHOLDER, &targets)
                .replace(" :", ":"),
        );

        let mut text = components
            .iter()
            .map(|component| component.trim())
            .filter(|component| !component.is_empty() && *component != ":")
            .collect::<Vec<_>>()
            .join(" ");

        if !text.is_empty() && !text.ends_with('.') {
            text.push('.');
        }
        text
    }
}

fn extend_unique(list: &mut Vec<String>, items: impl IntoIterator<Item = String>) {
    for item in items {
        if !list.contains(&item) {
            list.push(item);
        }
    }
}

/// Fold responses that differ along a single axis, in place.
///
/// Pairs are scanned in index order; after each merge the scan restarts, until
/// a full pass merges nothing. The later response of a pair is folded into the
/// earlier one, so the surviving order is stable for a fixed input order.
pub fn combine_responses(responses: &mut Vec<StructuredResponse>) {
    while let Some((keep, fold)) = next_combinable_pair(responses) {
        let other = responses.remove(fold);
        let target = &mut responses[keep];
        if target.can_combine_affects(&other) {
            target.absorb_affects(other);
        } else {
            target.absorb_targets(other);
        }
    }
}

fn next_combinable_pair(responses: &[StructuredResponse]) -> Option<(usize, usize)> {
    for (idx, response) in responses.iter().enumerate() {
        for (offset, other) in responses[idx + 1..].iter().enumerate() {
            if response.can_combine_affects(other) || response.can_combine_targets(other) {
                return Some((idx, idx + 1 + offset));
            }
        }
    }
    None
}
