use std::collections::BTreeMap;

use crate::{Answer, Language, QuestionId, SurveyError};

/// A single question in a survey draft.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// Unique identifier within the draft.
    id: QuestionId,

    /// The prompt text shown to the respondent.
    text: String,

    /// The kind of question (determines input type, options and bounds).
    kind: QuestionKind,

    /// Localized copies of `text`, used by the avatar channel.
    translations: BTreeMap<Language, String>,
}

impl Question {
    /// Create a new question. Shape is checked by `validate` when it enters a draft.
    pub fn new(id: impl Into<QuestionId>, text: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind,
            translations: BTreeMap::new(),
        }
    }

    /// Create a multiple-choice question.
    pub fn multiple_choice<S: Into<String>>(
        id: impl Into<QuestionId>,
        text: impl Into<String>,
        options: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(
            id,
            text,
            QuestionKind::MultipleChoice(ChoiceQuestion::new(options)),
        )
    }

    /// Create a multiple-select question.
    pub fn multiple_select<S: Into<String>>(
        id: impl Into<QuestionId>,
        text: impl Into<String>,
        options: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(
            id,
            text,
            QuestionKind::MultipleSelect(ChoiceQuestion::new(options)),
        )
    }

    /// Create a number question with optional bounds.
    pub fn number(
        id: impl Into<QuestionId>,
        text: impl Into<String>,
        min: Option<i64>,
        max: Option<i64>,
    ) -> Self {
        Self::new(
            id,
            text,
            QuestionKind::Number(NumberQuestion::with_bounds(min, max)),
        )
    }

    /// Create a rating question on a 1..=scale scale.
    pub fn rating(id: impl Into<QuestionId>, text: impl Into<String>, scale: u32) -> Self {
        Self::new(id, text, QuestionKind::Rating(RatingQuestion { scale }))
    }

    /// Create a free-text question.
    pub fn free_text(id: impl Into<QuestionId>, text: impl Into<String>) -> Self {
        Self::new(id, text, QuestionKind::Text)
    }

    /// Add a localized copy of the question text.
    pub fn with_translation(mut self, language: Language, text: impl Into<String>) -> Self {
        self.translations.insert(language, text.into());
        self
    }

    /// Get the question id.
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    /// Get the prompt text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the prompt text in `language`, falling back to the authored text.
    pub fn text_in(&self, language: Language) -> &str {
        self.translations
            .get(&language)
            .map(String::as_str)
            .unwrap_or(&self.text)
    }

    /// Get the question kind.
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// Check the question's shape: non-empty id and text, and the kind's invariants.
    pub fn validate(&self) -> Result<(), SurveyError> {
        if self.id.is_empty() {
            return Err(SurveyError::invalid_input("question id must not be empty"));
        }
        if self.text.trim().is_empty() {
            return Err(SurveyError::invalid_input(format!(
                "question '{}' has no text",
                self.id
            )));
        }
        self.kind.validate().map_err(|reason| {
            SurveyError::invalid_input(format!("question '{}' {reason}", self.id))
        })
    }

    /// Parse raw respondent input into an answer for this question.
    ///
    /// Choices match an option by text (case-insensitive) or by 1-based position.
    /// Multi-select input is comma separated; an option whose text contains commas
    /// still matches as a whole. Blank input is a `Validation` error,
    /// anything malformed is `InvalidInput`.
    pub fn parse_answer(&self, raw: &str) -> Result<Answer, SurveyError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(SurveyError::validation("Please provide an answer to continue"));
        }

        match &self.kind {
            QuestionKind::MultipleChoice(choice) => choice.resolve(raw).map(Answer::Choice),
            QuestionKind::MultipleSelect(choice) => {
                let picked = choice.resolve_list(raw)?;
                if picked.is_empty() {
                    return Err(SurveyError::validation("Please select at least one option"));
                }
                Ok(Answer::Selections(picked))
            }
            QuestionKind::Number(number) => {
                let value: i64 = raw
                    .parse()
                    .map_err(|_| SurveyError::invalid_input(format!("'{raw}' is not a number")))?;
                number.check(value)?;
                Ok(Answer::Number(value))
            }
            QuestionKind::Rating(rating) => {
                let value: u32 = raw.parse().map_err(|_| {
                    SurveyError::invalid_input(format!("'{raw}' is not a rating"))
                })?;
                rating.check(value)?;
                Ok(Answer::Rating(value))
            }
            QuestionKind::Text => Ok(Answer::Text(raw.to_string())),
        }
    }
}

/// The kind of question, determining input type and constraints.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKind {
    /// Pick exactly one option.
    MultipleChoice(ChoiceQuestion),

    /// Pick any number of options.
    MultipleSelect(ChoiceQuestion),

    /// Integer input with optional min/max bounds.
    Number(NumberQuestion),

    /// Rating on a 1..=scale scale.
    Rating(RatingQuestion),

    /// Free text.
    Text,
}

impl QuestionKind {
    /// Palette tags accepted by `QuestionKind::blank`.
    pub const TAGS: [&'static str; 5] = [
        "multiple_choice",
        "multiple_select",
        "number",
        "rating",
        "text",
    ];

    /// The palette tag, e.g. `"multiple_choice"`.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::MultipleChoice(_) => "multiple_choice",
            Self::MultipleSelect(_) => "multiple_select",
            Self::Number(_) => "number",
            Self::Rating(_) => "rating",
            Self::Text => "text",
        }
    }

    /// Human-readable name, e.g. `"multiple choice"`.
    pub fn label(&self) -> String {
        self.tag().replace('_', " ")
    }

    /// The default kind created when a palette entry is dropped on the canvas.
    pub fn blank(tag: &str) -> Result<Self, SurveyError> {
        let placeholder_options = || ChoiceQuestion::new(["Option 1", "Option 2", "Option 3"]);
        match tag.trim() {
            "multiple_choice" => Ok(Self::MultipleChoice(placeholder_options())),
            "multiple_select" => Ok(Self::MultipleSelect(placeholder_options())),
            "number" => Ok(Self::Number(NumberQuestion::with_bounds(Some(1), Some(20)))),
            "rating" => Ok(Self::Rating(RatingQuestion { scale: 5 })),
            "text" => Ok(Self::Text),
            other => Err(SurveyError::invalid_input(format!(
                "unknown question type '{other}'"
            ))),
        }
    }

    /// The options of a choice kind.
    pub fn options(&self) -> Option<&[String]> {
        match self {
            Self::MultipleChoice(choice) | Self::MultipleSelect(choice) => Some(&choice.options),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            Self::MultipleChoice(choice) | Self::MultipleSelect(choice) => {
                if choice.options.is_empty() {
                    return Err("needs at least one option".to_string());
                }
                if choice.options.iter().any(|o| o.trim().is_empty()) {
                    return Err("has a blank option".to_string());
                }
                Ok(())
            }
            Self::Number(NumberQuestion {
                min: Some(min),
                max: Some(max),
            }) if min > max => Err(format!("has min {min} greater than max {max}")),
            Self::Rating(RatingQuestion { scale: 0 }) => Err("has a rating scale of 0".to_string()),
            _ => Ok(()),
        }
    }
}

/// Configuration for choice questions (single or multiple selection).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChoiceQuestion {
    /// The options in display order.
    pub options: Vec<String>,
}

impl ChoiceQuestion {
    /// Create a choice configuration from the given options.
    pub fn new<S: Into<String>>(options: impl IntoIterator<Item = S>) -> Self {
        Self {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Resolve comma separated input to distinct options, in input order.
    ///
    /// At each position the longest run of parts naming an option wins, so
    /// `"Cash, coins"` picks that option rather than failing on `"Cash"`.
    fn resolve_list(&self, input: &str) -> Result<Vec<String>, SurveyError> {
        let parts: Vec<&str> = input.split(',').collect();
        let mut picked: Vec<String> = Vec::new();
        let mut start = 0;
        while start < parts.len() {
            if parts[start].trim().is_empty() {
                start += 1;
                continue;
            }
            let by_text = (start + 1..=parts.len())
                .rev()
                .find_map(|end| {
                    let candidate = parts[start..end].join(",");
                    self.find_text(&candidate).map(|option| (option, end))
                });
            let (option, end) = match by_text {
                Some((option, end)) => (option.clone(), end),
                None => (self.resolve(parts[start].trim())?, start + 1),
            };
            if !picked.contains(&option) {
                picked.push(option);
            }
            start = end;
        }
        Ok(picked)
    }

    fn find_text(&self, input: &str) -> Option<&String> {
        let input = input.trim();
        self.options
            .iter()
            .find(|o| o.trim().eq_ignore_ascii_case(input))
    }

    /// Resolve input to an option, by text or by 1-based position.
    fn resolve(&self, input: &str) -> Result<String, SurveyError> {
        if let Some(option) = self.find_text(input) {
            return Ok(option.clone());
        }
        input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| self.options.get(idx))
            .cloned()
            .ok_or_else(|| SurveyError::invalid_input(format!("'{input}' is not one of the options")))
    }
}

/// Configuration for an integer input question.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberQuestion {
    /// Optional minimum value.
    pub min: Option<i64>,

    /// Optional maximum value.
    pub max: Option<i64>,
}

impl NumberQuestion {
    /// Create with bounds.
    pub fn with_bounds(min: Option<i64>, max: Option<i64>) -> Self {
        Self { min, max }
    }

    /// Check a value against the bounds.
    pub fn check(&self, value: i64) -> Result<(), SurveyError> {
        let below = self.min.is_some_and(|min| value < min);
        let above = self.max.is_some_and(|max| value > max);
        if below || above {
            return Err(SurveyError::invalid_input(format!(
                "{value} is outside the allowed range{}",
                self.describe_range()
            )));
        }
        Ok(())
    }

    /// Range description such as `" 1 to 20"`, or empty when unbounded.
    pub fn describe_range(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!(" {min} to {max}"),
            (Some(min), None) => format!(" of at least {min}"),
            (None, Some(max)) => format!(" of at most {max}"),
            (None, None) => String::new(),
        }
    }
}

/// Configuration for a rating question.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingQuestion {
    /// Highest rating; ratings run from 1 to `scale`.
    pub scale: u32,
}

impl RatingQuestion {
    /// Check a rating against the scale.
    pub fn check(&self, value: u32) -> Result<(), SurveyError> {
        if value == 0 || value > self.scale {
            return Err(SurveyError::invalid_input(format!(
                "rating must be between 1 and {}",
                self.scale
            )));
        }
        Ok(())
    }
}
