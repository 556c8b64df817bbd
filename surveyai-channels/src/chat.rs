//! Chat channel: a linear question-by-question dialogue.

use std::time::Duration;

use surveyai_types::{ChannelKind, ChatTurn, SurveyDraft, SurveyError};
use tracing::{debug, warn};

use crate::{Channel, ChannelProgress, RenderEvent, RenderOutput, SessionState, prompt};

/// Closing bot turn once every question is answered.
pub const CHAT_CLOSING: &str = "Thank you for completing the survey! Your responses have been recorded.";

/// Messaging-style channel keeping a transcript of bot and user turns.
#[derive(Debug, Clone)]
pub struct ChatChannel {
    progress: ChannelProgress,
    transcript: Vec<ChatTurn>,
    reply_delay: Duration,
}

impl ChatChannel {
    pub fn new(reply_delay: Duration) -> Self {
        Self {
            progress: ChannelProgress::new(ChannelKind::Chat),
            transcript: Vec::new(),
            reply_delay,
        }
    }

    /// All turns so far, oldest first.
    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    fn push_turn(&mut self, turn: ChatTurn) -> RenderEvent {
        self.transcript.push(turn.clone());
        RenderEvent::Turn(turn)
    }
}

impl Default for ChatChannel {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl Channel for ChatChannel {
    type Input = String;

    fn kind(&self) -> ChannelKind {
        ChannelKind::Chat
    }

    fn progress(&self) -> &ChannelProgress {
        &self.progress
    }

    fn start(&mut self, draft: &SurveyDraft) -> Result<RenderOutput, SurveyError> {
        self.progress.start(draft.len())?;
        self.transcript.clear();

        let (_, question) = self.progress.current_question(draft)?;
        let opening = ChatTurn::bot(prompt::chat_prompt(question, question.text()));
        debug!(questions = draft.len(), "chat session started");
        Ok(RenderOutput::immediate(self.push_turn(opening)))
    }

    fn advance(&mut self, draft: &SurveyDraft, input: String) -> Result<RenderOutput, SurveyError> {
        let (index, question) = self.progress.current_question(draft)?;
        let answer = question.parse_answer(&input).inspect_err(|err| {
            warn!(question = %question.id(), %err, "chat answer rejected");
        })?;

        debug!(question = %question.id(), answer = %answer, "chat answer accepted");
        let user_turn = ChatTurn::user(answer.to_string());
        self.progress.record(question.id(), answer);
        let state = self.progress.advance(draft.len())?;

        let reply = match state {
            SessionState::InProgress(next) => {
                let next_question = draft.get(next).ok_or_else(|| {
                    SurveyError::validation("The survey has changed; please restart this channel")
                })?;
                ChatTurn::bot(format!(
                    "Thank you! {}",
                    prompt::chat_prompt(next_question, next_question.text())
                ))
            }
            _ => {
                debug!(answered = index + 1, "chat session completed");
                ChatTurn::bot(CHAT_CLOSING)
            }
        };

        let user_event = self.push_turn(user_turn);
        let reply_event = self.push_turn(reply);
        Ok(RenderOutput::immediate(user_event).followed_by(self.reply_delay, reply_event))
    }

    fn reset(&mut self) {
        self.progress.reset();
        self.transcript.clear();
    }
}

#[cfg(test)]
mod tests {
    use surveyai_types::{Answer, Question, QuestionId, Speaker};

    use super::*;

    fn two_questions() -> SurveyDraft {
        SurveyDraft::from_questions(vec![
            Question::multiple_choice("ai_3", "What is your age group?", ["18-25", "26-35"]),
            Question::rating("ai_2", "How comfortable are you?", 5),
        ])
        .unwrap()
    }

    #[test]
    fn walks_through_states() {
        let draft = two_questions();
        let mut chat = ChatChannel::default();
        assert_eq!(chat.progress().state(), SessionState::NotStarted);

        chat.start(&draft).unwrap();
        assert_eq!(chat.progress().state(), SessionState::InProgress(0));

        chat.advance(&draft, "2".into()).unwrap();
        assert_eq!(chat.progress().state(), SessionState::InProgress(1));

        let out = chat.advance(&draft, "4".into()).unwrap();
        assert_eq!(chat.progress().state(), SessionState::Completed);
        assert_eq!(
            out.follow_up.map(|f| f.event),
            Some(RenderEvent::Turn(ChatTurn::bot(CHAT_CLOSING)))
        );
        assert_eq!(
            chat.progress().answers().get(&QuestionId::new("ai_3")),
            Some(&Answer::Choice("26-35".into()))
        );
    }

    #[test]
    fn transcript_alternates() {
        let draft = two_questions();
        let mut chat = ChatChannel::default();
        chat.start(&draft).unwrap();
        chat.advance(&draft, "18-25".into()).unwrap();

        let speakers: Vec<_> = chat.transcript().iter().map(|t| t.speaker).collect();
        assert_eq!(speakers, vec![Speaker::Bot, Speaker::User, Speaker::Bot]);
        assert!(chat.transcript()[2].text.starts_with("Thank you! How comfortable"));
    }

    #[test]
    fn rejected_answer_keeps_cursor_and_transcript() {
        let draft = two_questions();
        let mut chat = ChatChannel::default();
        chat.start(&draft).unwrap();

        assert!(chat.advance(&draft, "65+".into()).is_err());
        assert_eq!(chat.progress().state(), SessionState::InProgress(0));
        assert_eq!(chat.transcript().len(), 1);
    }

    #[test]
    fn advancing_a_completed_session_fails() {
        let draft = SurveyDraft::from_questions(vec![Question::free_text("t", "Anything else?")])
            .unwrap();
        let mut chat = ChatChannel::default();
        chat.start(&draft).unwrap();
        chat.advance(&draft, "No".into()).unwrap();

        assert!(matches!(
            chat.advance(&draft, "Still no".into()),
            Err(SurveyError::Validation(_))
        ));
        assert_eq!(chat.progress().state(), SessionState::Completed);
    }
}
