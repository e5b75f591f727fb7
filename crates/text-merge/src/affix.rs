//! Shared prefix/suffix extraction for tokens occupying the same slot.
//!
//! Affixes never contain digits, so an affix can never look like it carries
//! one of the values that differ between variants.

/// How letters inside affixes are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffixMode {
    /// An isolated field such as `+1m`/`+2m`: letters may be shared
    Field,

    /// One word of a whole sentence: an affix containing a letter is only kept
    /// when some core is numeric, so unrelated names are never sliced apart
    Sentence,
}

/// Shared affixes and the distinguishing core of every token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffixResult {
    pub prefix: String,
    pub suffix: String,
    pub cores: Vec<String>,
}

impl AffixResult {
    /// Place `inner` between the shared prefix and suffix
    pub fn wrap(&self, inner: &str) -> String {
        format!("{}{inner}{}", self.prefix, self.suffix)
    }

    /// Whether any core parses as a number
    pub fn has_numeric_core(&self) -> bool {
        self.cores.iter().any(|core| is_numeric(core))
    }
}

/// Whether `text` parses as a floating point number
pub fn is_numeric(text: &str) -> bool {
    text.parse::<f64>().is_ok()
}

/// Find the longest digit-free prefix and suffix shared by every token.
///
/// The suffix is limited to what remains of the shortest token after the
/// prefix, so the two never overlap. Fewer than two tokens share nothing.
pub fn extract_affixes<S: AsRef<str>>(tokens: &[S], mode: AffixMode) -> AffixResult {
    let chars: Vec<Vec<char>> = tokens
        .iter()
        .map(|token| token.as_ref().chars().collect())
        .collect();

    if chars.len() < 2 {
        return split(&chars, 0, 0);
    }

    let shortest = chars.iter().map(Vec::len).min().unwrap_or(0);
    let prefix_len = shared_run(&chars, shortest, |token, i| token[i]);
    let suffix_len = shared_run(&chars, shortest - prefix_len, |token, i| {
        token[token.len() - 1 - i]
    });

    let result = split(&chars, prefix_len, suffix_len);
    if mode == AffixMode::Field || result.has_numeric_core() {
        return result;
    }

    let prefix_len = if has_letter(&result.prefix) { 0 } else { prefix_len };
    let suffix_len = if has_letter(&result.suffix) { 0 } else { suffix_len };
    split(&chars, prefix_len, suffix_len)
}

fn shared_run(
    tokens: &[Vec<char>],
    limit: usize,
    char_at: impl Fn(&[char], usize) -> char,
) -> usize {
    let mut len = 0;
    while len < limit {
        let ch = char_at(&tokens[0], len);
        if ch.is_numeric() || tokens[1..].iter().any(|token| char_at(token, len) != ch) {
            break;
        }
        len += 1;
    }
    len
}

fn split(tokens: &[Vec<char>], prefix_len: usize, suffix_len: usize) -> AffixResult {
    let (prefix, suffix) = match tokens.first() {
        Some(first) => (
            first[..prefix_len].iter().collect(),
            first[first.len() - suffix_len..].iter().collect(),
        ),
        None => (String::new(), String::new()),
    };

    let cores = tokens
        .iter()
        .map(|token| token[prefix_len..token.len() - suffix_len].iter().collect())
        .collect();

    AffixResult {
        prefix,
        suffix,
        cores,
    }
}

fn has_letter(text: &str) -> bool {
    text.chars().any(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_mode_keeps_letter_affixes() {
        let result = extract_affixes(&["+1m", "+2m", "+3m"], AffixMode::Field);
        assert_eq!(result.prefix, "+");
        assert_eq!(result.suffix, "m");
        assert_eq!(result.cores, vec!["1", "2", "3"]);
    }

    #[test]
    fn affixes_stop_at_digits() {
        let result = extract_affixes(&["10%.", "20%.", "30%."], AffixMode::Field);
        assert_eq!(result.prefix, "");
        assert_eq!(result.suffix, "%.");
        assert_eq!(result.cores, vec!["10", "20", "30"]);

        let result = extract_affixes(&["x12a", "x13a"], AffixMode::Field);
        assert_eq!(result.prefix, "x");
        assert_eq!(result.cores, vec!["12", "13"]);
    }

    #[test]
    fn sentence_mode_rejects_letter_affixes_without_numeric_core() {
        let result = extract_affixes(&["Arkantos", "Ajax"], AffixMode::Sentence);
        assert_eq!(result.prefix, "");
        assert_eq!(result.suffix, "");
        assert_eq!(result.cores, vec!["Arkantos", "Ajax"]);

        let field = extract_affixes(&["Arkantos", "Ajax"], AffixMode::Field);
        assert_eq!(field.prefix, "A");
    }

    #[test]
    fn sentence_mode_keeps_letter_affixes_with_numeric_core() {
        let result = extract_affixes(&["+1m", "+2m"], AffixMode::Sentence);
        assert_eq!(result.prefix, "+");
        assert_eq!(result.suffix, "m");
        assert!(result.has_numeric_core());
    }

    #[test]
    fn sentence_mode_keeps_punctuation_affixes() {
        let result = extract_affixes(&["(Hoplite)", "(Toxotes)"], AffixMode::Sentence);
        assert_eq!(result.prefix, "(");
        assert_eq!(result.suffix, ")");
        assert_eq!(result.cores, vec!["Hoplite", "Toxotes"]);
        assert_eq!(result.wrap("X"), "(X)");
    }

    #[test]
    fn suffix_never_overlaps_prefix() {
        let result = extract_affixes(&["aba", "a"], AffixMode::Field);
        assert_eq!(result.prefix, "a");
        assert_eq!(result.suffix, "");
        assert_eq!(result.cores, vec!["ba", ""]);
    }

    #[test]
    fn handles_multibyte_characters() {
        let result = extract_affixes(&["ÆxÆ", "ÆyÆ"], AffixMode::Field);
        assert_eq!(result.prefix, "Æ");
        assert_eq!(result.suffix, "Æ");
        assert_eq!(result.cores, vec!["x", "y"]);
    }

    #[test]
    fn single_token_shares_nothing() {
        let result = extract_affixes(&["+1m"], AffixMode::Field);
        assert_eq!(result.prefix, "");
        assert_eq!(result.cores, vec!["+1m"]);
    }
}
