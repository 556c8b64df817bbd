//! Per-channel cursor state shared by every channel variant.

use surveyai_types::{Answer, Answers, ChannelKind, Question, QuestionId, SurveyDraft, SurveyError};

/// Where a channel session stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    NotStarted,
    /// Presenting the question at this index.
    InProgress(usize),
    Completed,
}

/// Cursor and collected answers of one channel session.
///
/// Transitions:
/// - `NotStarted -> InProgress(0)` on `start`
/// - `InProgress(i) -> InProgress(i + 1)` on `advance` while `i + 1 < len`
/// - `InProgress(len - 1) -> Completed` on the final `advance`
/// - any state `-> NotStarted` on `reset`
///
/// Nothing leaves `Completed` except `reset`. Failed transitions change nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelProgress {
    channel: ChannelKind,
    state: SessionState,
    answers: Answers,
}

impl ChannelProgress {
    pub fn new(channel: ChannelKind) -> Self {
        Self {
            channel,
            state: SessionState::NotStarted,
            answers: Answers::new(),
        }
    }

    pub fn channel(&self) -> ChannelKind {
        self.channel
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The cursor, while a question is being presented.
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            SessionState::InProgress(index) => Some(index),
            _ => None,
        }
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn is_completed(&self) -> bool {
        self.state == SessionState::Completed
    }

    /// Begin a session over a draft of `len` questions, discarding earlier answers.
    pub fn start(&mut self, len: usize) -> Result<(), SurveyError> {
        if len == 0 {
            return Err(SurveyError::validation("Please add some questions first!"));
        }
        self.answers.clear();
        self.state = SessionState::InProgress(0);
        Ok(())
    }

    /// Move past the current question.
    pub fn advance(&mut self, len: usize) -> Result<SessionState, SurveyError> {
        let SessionState::InProgress(index) = self.state else {
            return Err(not_in_progress(self.state));
        };
        self.state = if index + 1 < len {
            SessionState::InProgress(index + 1)
        } else {
            SessionState::Completed
        };
        Ok(self.state)
    }

    /// Step back one question, stopping at the first. No-op outside a session.
    pub fn retreat(&mut self) -> SessionState {
        if let SessionState::InProgress(index) = self.state {
            self.state = SessionState::InProgress(index.saturating_sub(1));
        }
        self.state
    }

    /// Record an answer for a question of the current session.
    pub fn record(&mut self, id: &QuestionId, answer: Answer) {
        self.answers.insert(id.clone(), answer);
    }

    pub fn reset(&mut self) {
        self.state = SessionState::NotStarted;
        self.answers.clear();
    }

    /// The question under the cursor.
    pub fn current_question<'d>(
        &self,
        draft: &'d SurveyDraft,
    ) -> Result<(usize, &'d Question), SurveyError> {
        let index = self
            .current_index()
            .ok_or_else(|| not_in_progress(self.state))?;
        let question = draft.get(index).ok_or_else(|| {
            SurveyError::validation("The survey has changed; please restart this channel")
        })?;
        Ok((index, question))
    }
}

fn not_in_progress(state: SessionState) -> SurveyError {
    match state {
        SessionState::Completed => SurveyError::validation("This survey is already complete"),
        _ => SurveyError::validation("The survey has not been started on this channel"),
    }
}
