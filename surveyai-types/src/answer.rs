use std::fmt;

/// A single answer submitted for a question.
///
/// This is the value stored in `Answers` for each answered question. The variant
/// follows the question kind it was parsed for.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// The chosen option of a multiple-choice question.
    Choice(String),

    /// The chosen options of a multiple-select question, in selection order.
    Selections(Vec<String>),

    /// A value for a number question.
    Number(i64),

    /// A rating between 1 and the question's scale.
    Rating(u32),

    /// Free text.
    Text(String),
}

impl Answer {
    /// Check whether the answer carries no content (blank text or no selections).
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Choice(s) | Self::Text(s) => s.trim().is_empty(),
            Self::Selections(items) => items.is_empty(),
            Self::Number(_) | Self::Rating(_) => false,
        }
    }

    /// Try to get this answer as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Choice(s) | Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether `option` is the chosen option or one of the selections.
    pub fn includes(&self, option: &str) -> bool {
        match self {
            Self::Choice(chosen) => chosen == option,
            Self::Selections(items) => items.iter().any(|item| item == option),
            _ => false,
        }
    }

    /// Try to get this answer as a number.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the type name of this answer for log and error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Choice(_) => "Choice",
            Self::Selections(_) => "Selections",
            Self::Number(_) => "Number",
            Self::Rating(_) => "Rating",
            Self::Text(_) => "Text",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Choice(s) | Self::Text(s) => write!(f, "{s}"),
            Self::Selections(items) => write!(f, "{}", items.join(", ")),
            Self::Number(n) => write!(f, "{n}"),
            Self::Rating(r) => write!(f, "{r}"),
        }
    }
}

impl From<&str> for Answer {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Answer {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Answer {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}
