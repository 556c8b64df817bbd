use crate::QuestionId;

/// Error type for survey authoring and channel operations.
///
/// Every variant is recoverable: it is raised by a single user action, leaves the
/// draft and all channel cursors untouched, and is meant to be shown as a notice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurveyError {
    /// A question with this id is already part of the draft.
    #[error("A question with id '{0}' already exists")]
    DuplicateId(QuestionId),

    /// The referenced question (or catalog entry) does not exist.
    #[error("No question with id '{0}'")]
    NotFound(String),

    /// Malformed input: empty prompt, unparsable number, unknown key, bad question shape.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A required answer or precondition is missing.
    #[error("{0}")]
    Validation(String),
}

impl SurveyError {
    /// Create an invalid-input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a not-found error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// The message meant for the user, without the error class prefix.
    pub fn message(&self) -> String {
        match self {
            Self::InvalidInput(message) | Self::Validation(message) => message.clone(),
            other => other.to_string(),
        }
    }
}
