use std::collections::HashMap;

use crate::{Answer, QuestionId};

/// Answers collected by one channel session.
///
/// Keyed by `QuestionId`; re-answering a question overwrites the earlier value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Answers {
    values: HashMap<QuestionId, Answer>,
}

impl Answers {
    /// Create a new empty answers collection.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Record an answer for the given question.
    pub fn insert(&mut self, id: impl Into<QuestionId>, answer: impl Into<Answer>) {
        self.values.insert(id.into(), answer.into());
    }

    /// Get the answer for the given question.
    pub fn get(&self, id: &QuestionId) -> Option<&Answer> {
        self.values.get(id)
    }

    /// Check if an answer exists for the given question.
    pub fn contains(&self, id: &QuestionId) -> bool {
        self.values.contains_key(id)
    }

    /// Remove the answer for the given question.
    pub fn remove(&mut self, id: &QuestionId) -> Option<Answer> {
        self.values.remove(id)
    }

    /// Get an iterator over all id-answer pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &Answer)> {
        self.values.iter()
    }

    /// Get the number of answers.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no answers.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Drop every answer.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Check if the answer for the given question is present and non-empty.
    pub fn has_value(&self, id: &QuestionId) -> bool {
        self.get(id).is_some_and(|answer| !answer.is_empty())
    }
}

impl IntoIterator for Answers {
    type Item = (QuestionId, Answer);
    type IntoIter = std::collections::hash_map::IntoIter<QuestionId, Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Answers {
    type Item = (&'a QuestionId, &'a Answer);
    type IntoIter = std::collections::hash_map::Iter<'a, QuestionId, Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
