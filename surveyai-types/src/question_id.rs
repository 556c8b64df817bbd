use std::fmt;

/// The identifier of a question, e.g. `"nss_1"` or `"q_3"`.
///
/// Used as the key in `Answers` and for every by-id draft operation. Ids are unique
/// within a `SurveyDraft`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuestionId {
    id: String,
}

impl QuestionId {
    /// Create a new id.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.id
    }

    /// Check if the id is empty (such ids are rejected by `Question::validate`).
    pub fn is_empty(&self) -> bool {
        self.id.trim().is_empty()
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for QuestionId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&String> for QuestionId {
    fn from(s: &String) -> Self {
        Self::new(s.clone())
    }
}

impl PartialEq<str> for QuestionId {
    fn eq(&self, other: &str) -> bool {
        self.id == other
    }
}

impl PartialEq<&str> for QuestionId {
    fn eq(&self, other: &&str) -> bool {
        self.id == *other
    }
}
