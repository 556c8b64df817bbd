//! Mobile app channel: one question per screen with Previous/Next navigation.

use surveyai_types::{ChannelKind, MobileView, SurveyDraft, SurveyError};
use tracing::{debug, warn};

use crate::{Channel, ChannelProgress, RenderEvent, RenderOutput, SessionState};

/// What the respondent did on the mobile screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MobileInput {
    /// Fill in the answer for the question on screen.
    Answer(String),
    /// Go to the next question; requires an answer.
    Next,
    /// Go back one question.
    Prev,
}

#[derive(Debug, Clone)]
pub struct MobileChannel {
    progress: ChannelProgress,
}

impl MobileChannel {
    pub fn new() -> Self {
        Self {
            progress: ChannelProgress::new(ChannelKind::Mobile),
        }
    }

    /// The screen for the current state.
    pub fn view(&self, draft: &SurveyDraft) -> MobileView {
        let total = draft.len();
        match self.progress.state() {
            SessionState::InProgress(index) => {
                let question = draft.get(index).cloned();
                let answer = question
                    .as_ref()
                    .and_then(|q| self.progress.answers().get(q.id()))
                    .cloned();
                MobileView {
                    question,
                    position: index + 1,
                    total,
                    answer,
                }
            }
            SessionState::Completed => MobileView {
                question: None,
                position: total,
                total,
                answer: None,
            },
            SessionState::NotStarted => MobileView {
                question: draft.get(0).cloned(),
                position: 1,
                total,
                answer: None,
            },
        }
    }

    fn render(&self, draft: &SurveyDraft) -> RenderOutput {
        RenderOutput::immediate(RenderEvent::Mobile(self.view(draft)))
    }
}

impl Default for MobileChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl Channel for MobileChannel {
    type Input = MobileInput;

    fn kind(&self) -> ChannelKind {
        ChannelKind::Mobile
    }

    fn progress(&self) -> &ChannelProgress {
        &self.progress
    }

    fn start(&mut self, draft: &SurveyDraft) -> Result<RenderOutput, SurveyError> {
        self.progress.start(draft.len())?;
        debug!(questions = draft.len(), "mobile session started");
        Ok(self.render(draft))
    }

    fn advance(
        &mut self,
        draft: &SurveyDraft,
        input: MobileInput,
    ) -> Result<RenderOutput, SurveyError> {
        match input {
            MobileInput::Answer(raw) => {
                let (_, question) = self.progress.current_question(draft)?;
                let answer = question.parse_answer(&raw)?;
                debug!(question = %question.id(), answer = %answer, "mobile answer recorded");
                self.progress.record(question.id(), answer);
            }
            MobileInput::Next => {
                let (index, question) = self.progress.current_question(draft)?;
                if !self.progress.answers().has_value(question.id()) {
                    warn!(question = %question.id(), "next pressed without an answer");
                    return Err(SurveyError::validation(
                        "Please answer this question before continuing",
                    ));
                }
                let state = self.progress.advance(draft.len())?;
                debug!(from = index, ?state, "mobile next");
            }
            MobileInput::Prev => {
                let state = self.progress.retreat();
                debug!(?state, "mobile previous");
            }
        }
        Ok(self.render(draft))
    }

    fn reset(&mut self) {
        self.progress.reset();
    }
}
