use crate::response::{combine_responses, StructuredResponse};

type LineFilter = Box<dyn Fn(&str) -> bool>;

/// Hand-written lines and filtering for one tooltip
#[derive(Default)]
pub struct TooltipAdditions {
    /// Lines placed before the generated effects
    pub start: Vec<String>,

    /// Lines placed after the generated effects
    pub end: Vec<String>,

    line_filter: Option<LineFilter>,
}

impl TooltipAdditions {
    #[must_use]
    pub fn with_start(mut self, line: impl Into<String>) -> Self {
        self.start.push(line.into());
        self
    }

    #[must_use]
    pub fn with_end(mut self, line: impl Into<String>) -> Self {
        self.end.push(line.into());
        self
    }

    /// Drop every generated response whose rendered line fails `filter`
    #[must_use]
    pub fn with_line_filter(mut self, filter: impl Fn(&str) -> bool + 'static) -> Self {
        self.line_filter = Some(Box::new(filter));
        self
    }

    fn keeps(&self, line: &str) -> bool {
        self.line_filter.as_ref().map_or(true, |filter| filter(line))
    }
}

/// Build a tooltip from independently produced responses.
///
/// Responses are filtered on their full rendering, combined, rendered, and
/// framed by the additions. Returns `None` when nothing would be written, so
/// the caller can fall back to its existing text.
pub fn assemble_tooltip(
    mut responses: Vec<StructuredResponse>,
    additions: Option<&TooltipAdditions>,
    skip_affected: bool,
    line_separator: &str,
) -> Option<String> {
    let produced = responses.len();
    if let Some(additions) = additions {
        responses.retain(|response| additions.keeps(&response.render(false)));
    }

    combine_responses(&mut responses);

    let mut lines: Vec<String> = Vec::new();
    if let Some(additions) = additions {
        lines.extend(additions.start.iter().cloned());
    }
    lines.extend(
        responses
            .iter()
            .map(|response| response.render(skip_affected))
            .filter(|line| !line.is_empty()),
    );
    if let Some(additions) = additions {
        lines.extend(additions.end.iter().cloned());
    }

    if lines.is_empty() {
        if produced > 0 {
            log::warn!("{produced} responses produced no tooltip text");
        }
        return None;
    }
    Some(lines.join(line_separator))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn damage(unit: &str) -> StructuredResponse {
        StructuredResponse::new([unit], "Damage +10%")
    }

    #[test]
    fn combines_then_renders_lines() {
        let responses = vec![
            damage("Hoplite"),
            damage("Toxotes"),
            StructuredResponse::new(["Hoplite"], "Speed +5%"),
        ];
        let text = assemble_tooltip(responses, None, false, "\n").unwrap();
        assert_eq!(text, "Hoplite and Toxotes: Damage +10%.\nHoplite: Speed +5%.");
    }

    #[test]
    fn applies_additions() {
        let additions = TooltipAdditions::default()
            .with_start("Grants a second Pharaoh.")
            .with_end("Lasts until the end of the game.")
            .with_line_filter(|line| !line.contains("Promotion"));
        let responses = vec![
            damage("Hoplite"),
            StructuredResponse::new(["Hero"], "Promotion cost +50%"),
        ];

        let text = assemble_tooltip(responses, Some(&additions), false, "\\n").unwrap();
        assert_eq!(
            text,
            "Grants a second Pharaoh.\\nHoplite: Damage +10%.\\nLasts until the end of the game."
        );
    }

    #[test]
    fn empty_tooltip_is_none() {
        let additions = TooltipAdditions::default().with_line_filter(|_| false);
        assert!(assemble_tooltip(vec![damage("Hoplite")], Some(&additions), false, "\n").is_none());
        assert!(assemble_tooltip(Vec::new(), None, false, "\n").is_none());
    }

    #[test]
    fn skip_affected_omits_subjects() {
        let text = assemble_tooltip(vec![damage("Hoplite")], None, true, "\n").unwrap();
        assert_eq!(text, "Damage +10%.");
    }
}
