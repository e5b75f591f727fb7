//! Texts generated for one string id by several subjects.
//!
//! Many units share an ability string id while wanting different text for it.
//! The accumulator collects every candidate during a build and resolves each
//! id to a single string at the end.

use std::collections::BTreeMap;

/// An object that generated text for a string id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subject {
    /// Internal name, unique per subject
    pub id: String,

    /// Player-facing name, if known
    pub display_name: Option<String>,
}

impl Subject {
    pub fn new(id: impl Into<String>, display_name: Option<&str>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.map(str::to_string),
        }
    }

    fn display_label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }
}

/// How conflicting texts are laid out
#[derive(Debug, Clone, Copy)]
pub struct SharedLayout<'a> {
    pub line_separator: &'a str,
    pub section_prefix: &'a str,
}

/// Build-scoped collection of generated texts keyed by string id
#[derive(Debug, Default, Clone)]
pub struct SharedTextAccumulator {
    entries: BTreeMap<String, Vec<(Subject, String)>>,
}

impl SharedTextAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `text` for `subject` under `key`.
    ///
    /// A text already recorded under the key by any subject is ignored; a new
    /// text replaces the subject's previous one.
    pub fn record(&mut self, key: impl Into<String>, subject: Subject, text: impl Into<String>) {
        let text = text.into();
        let entries = self.entries.entry(key.into()).or_default();
        if entries.iter().any(|(_, existing)| *existing == text) {
            return;
        }
        match entries.iter_mut().find(|(existing, _)| *existing == subject) {
            Some(entry) => entry.1 = text,
            None => entries.push((subject, text)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve every key to one text.
    ///
    /// When all texts have the same line count and fewer than half the lines
    /// differ, shared lines are written once and each differing line is
    /// written per subject as `Label: line`. Otherwise each subject gets its
    /// own section.
    pub fn resolve(&self, layout: &SharedLayout<'_>) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(key, entries)| (key.clone(), resolve_entries(key, entries, layout)))
            .collect()
    }
}

fn resolve_entries(key: &str, entries: &[(Subject, String)], layout: &SharedLayout<'_>) -> String {
    if let [(_, only)] = entries {
        return only.clone();
    }

    let labels = subject_labels(entries);
    let sep = layout.line_separator;
    let lines: Vec<Vec<&str>> = entries.iter().map(|(_, text)| text.split(sep).collect()).collect();

    let line_by_line = lines.iter().all(|l| l.len() == lines[0].len()) && {
        let line_count = lines[0].len();
        let differing = (0..line_count)
            .filter(|&idx| lines.iter().any(|l| l[idx] != lines[0][idx]))
            .count();
        differing * 2 < line_count
    };

    log::info!(
        "{labels:?} share {key} but want different values for it: written {}",
        if line_by_line {
            "line by line comparison"
        } else {
            "out each entry separately"
        }
    );

    let mut output: Vec<String> = Vec::new();
    if line_by_line {
        for idx in 0..lines[0].len() {
            if lines.iter().all(|l| l[idx] == lines[0][idx]) {
                output.push(lines[0][idx].to_string());
            } else {
                output.extend(
                    labels
                        .iter()
                        .zip(&lines)
                        .map(|(label, l)| format!("{label}: {}", l[idx])),
                );
            }
        }
    } else {
        output.extend(
            labels
                .iter()
                .zip(entries)
                .map(|(label, (_, text))| format!("{}{label}:{sep}{text}", layout.section_prefix)),
        );
    }
    output.join(sep)
}

/// Display names when they tell every subject apart, otherwise ids
fn subject_labels(entries: &[(Subject, String)]) -> Vec<&str> {
    let mut display: Vec<&str> = Vec::with_capacity(entries.len());
    for (subject, _) in entries {
        let label = subject.display_label();
        if !display.contains(&label) {
            display.push(label);
        }
    }

    if display.len() == entries.len() {
        display
    } else {
        entries.iter().map(|(subject, _)| subject.id.as_str()).collect()
    }
}
