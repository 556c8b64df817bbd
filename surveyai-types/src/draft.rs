use std::collections::HashSet;

use crate::{Question, QuestionId, SurveyError};

/// The in-progress, unsaved sequence of authored questions.
///
/// Insertion order is display order. Ids are unique and every question has passed
/// `Question::validate`; a failed mutation leaves the draft unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveyDraft {
    questions: Vec<Question>,
}

impl SurveyDraft {
    /// Create an empty draft.
    pub fn new() -> Self {
        Self {
            questions: Vec::new(),
        }
    }

    /// Create a draft from the given questions, checking shape and id uniqueness.
    pub fn from_questions(questions: Vec<Question>) -> Result<Self, SurveyError> {
        let mut seen = HashSet::new();
        for question in &questions {
            question.validate()?;
            if !seen.insert(question.id()) {
                return Err(SurveyError::DuplicateId(question.id().clone()));
            }
        }
        Ok(Self { questions })
    }

    /// Append a question to the end of the draft.
    pub fn push(&mut self, question: Question) -> Result<(), SurveyError> {
        question.validate()?;
        if self.contains(question.id()) {
            return Err(SurveyError::DuplicateId(question.id().clone()));
        }
        self.questions.push(question);
        Ok(())
    }

    /// Remove the question with the given id.
    pub fn remove(&mut self, id: &QuestionId) -> Result<Question, SurveyError> {
        let idx = self
            .position(id)
            .ok_or_else(|| SurveyError::not_found(id.as_str()))?;
        Ok(self.questions.remove(idx))
    }

    /// Replace every question at once. On error the current content is kept.
    pub fn replace(&mut self, questions: Vec<Question>) -> Result<(), SurveyError> {
        *self = Self::from_questions(questions)?;
        Ok(())
    }

    /// Remove every question.
    pub fn clear(&mut self) {
        self.questions.clear();
    }

    /// Get the questions in display order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Get the question at a display position.
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Find a question by id.
    pub fn find(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    /// Get the display position of a question.
    pub fn position(&self, id: &QuestionId) -> Option<usize> {
        self.questions.iter().position(|q| q.id() == id)
    }

    /// Check if a question with this id is in the draft.
    pub fn contains(&self, id: &QuestionId) -> bool {
        self.position(id).is_some()
    }

    /// Check if the draft has any questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Get the number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Iterate over the questions in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}
