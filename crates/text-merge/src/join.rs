use serde::{Deserialize, Serialize};

/// Word placed before the last item of a list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Conjunction {
    And,
    #[default]
    Or,
}

impl Conjunction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

/// Join items into prose: `a`, `a or b`, `a, b, or c`.
pub fn join_list<S: AsRef<str>>(parts: &[S], conjunction: Conjunction) -> String {
    let word = conjunction.as_str();
    match parts {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} {word} {}", first.as_ref(), second.as_ref()),
        [head @ .., last] => {
            let mut text = head
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(", ");
            text.push_str(", ");
            text.push_str(word);
            text.push(' ');
            text.push_str(last.as_ref());
            text
        }
    }
}
