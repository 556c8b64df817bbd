//! Voice/IVR channel: spoken prompts answered with the telephone keypad.

use std::time::Duration;

use surveyai_types::{Answer, ChannelKind, Question, QuestionKind, SurveyDraft, SurveyError};
use tracing::{debug, warn};

use crate::{Channel, ChannelProgress, RenderEvent, RenderOutput, SessionState};

/// Keys on a DTMF keypad.
pub const KEYPAD: [char; 12] = ['1', '2', '3', '4', '5', '6', '7', '8', '9', '*', '0', '#'];

/// Answer stored for free-text questions, whose audio is not transcribed.
pub const VOICE_RECORDING: &str = "[voice response recorded]";

const MOVING_ON: &str = "Thank you for your response. Moving to the next question...";
const GOODBYE: &str = "Thank you for your response. The survey is complete. Goodbye!";
const PLAYBACK_DONE: &str =
    "Voice message completed. Please select your response using the keypad below.";

/// Longest digit entry; keeps the value inside `i64`.
const MAX_ENTRY: usize = 18;

/// Voice channel. Each question is read out with keypad instructions; a key press
/// is confirmed at once and the next prompt follows after a processing delay.
///
/// Number questions are keyed digit by digit and committed with `#`.
#[derive(Debug, Clone)]
pub struct IvrChannel {
    progress: ChannelProgress,
    voice_text: String,
    entry: String,
    follow_up_delay: Duration,
    playback_delay: Duration,
}

impl IvrChannel {
    pub fn new(follow_up_delay: Duration, playback_delay: Duration) -> Self {
        Self {
            progress: ChannelProgress::new(ChannelKind::Ivr),
            voice_text: String::new(),
            entry: String::new(),
            follow_up_delay,
            playback_delay,
        }
    }

    /// The last committed voice line (what the caller hears once delays elapse).
    pub fn voice_text(&self) -> &str {
        &self.voice_text
    }

    /// Digits keyed so far for the current number question.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Buffer a key for a number question, or commit the buffer on `#`.
    ///
    /// `*` is the minus sign on an empty entry and clears the entry otherwise.
    fn key_number(
        &mut self,
        question: &Question,
        key: char,
    ) -> Result<Option<Answer>, SurveyError> {
        match key {
            '#' => {
                let entry = std::mem::take(&mut self.entry);
                question.parse_answer(&entry).map(Some).inspect_err(|err| {
                    warn!(question = %question.id(), %entry, %err, "number entry rejected");
                })
            }
            '*' if self.entry.is_empty() => {
                self.entry.push('-');
                Ok(None)
            }
            '*' => {
                self.entry.clear();
                Ok(None)
            }
            digit if digit.is_ascii_digit() && self.entry.len() < MAX_ENTRY => {
                self.entry.push(digit);
                Ok(None)
            }
            _ => Err(invalid_key(question, key)),
        }
    }

    /// Play the current prompt again, then tell the caller to use the keypad.
    pub fn replay(&self, draft: &SurveyDraft) -> Result<RenderOutput, SurveyError> {
        let (index, question) = self.progress.current_question(draft)?;
        debug!(question = %question.id(), "replaying voice prompt");
        Ok(
            RenderOutput::immediate(RenderEvent::VoiceText(spoken_prompt(
                question,
                index,
                draft.len(),
            )))
            .followed_by(
                self.playback_delay,
                RenderEvent::VoiceText(PLAYBACK_DONE.to_string()),
            ),
        )
    }
}

impl Default for IvrChannel {
    fn default() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }
}

impl Channel for IvrChannel {
    type Input = char;

    fn kind(&self) -> ChannelKind {
        ChannelKind::Ivr
    }

    fn progress(&self) -> &ChannelProgress {
        &self.progress
    }

    fn start(&mut self, draft: &SurveyDraft) -> Result<RenderOutput, SurveyError> {
        self.progress.start(draft.len())?;
        self.entry.clear();
        let (index, question) = self.progress.current_question(draft)?;
        self.voice_text = spoken_prompt(question, index, draft.len());
        debug!(questions = draft.len(), "voice session started");
        Ok(RenderOutput::immediate(RenderEvent::VoiceText(
            self.voice_text.clone(),
        )))
    }

    fn advance(&mut self, draft: &SurveyDraft, key: char) -> Result<RenderOutput, SurveyError> {
        let (_, question) = self.progress.current_question(draft)?;
        let (answer, confirmation) = match question.kind() {
            QuestionKind::Number(_) => match self.key_number(question, key)? {
                Some(answer) => {
                    let confirmation =
                        format!("You entered {answer}. Processing your response...");
                    (answer, confirmation)
                }
                None => {
                    debug!(question = %question.id(), entry = %self.entry, "digit buffered");
                    let echo = match self.entry.as_str() {
                        "" => "Entry cleared.".to_string(),
                        entry => format!("You entered {entry}."),
                    };
                    return Ok(RenderOutput::immediate(RenderEvent::VoiceText(echo)));
                }
            },
            _ => {
                let answer = key_answer(question, key).ok_or_else(|| invalid_key(question, key))?;
                (answer, format!("You pressed {key}. Processing your response..."))
            }
        };

        debug!(question = %question.id(), %key, answer = %answer, "key accepted");
        self.progress.record(question.id(), answer);

        self.voice_text = match self.progress.advance(draft.len())? {
            SessionState::InProgress(next) => {
                let next_question = draft.get(next).ok_or_else(|| {
                    SurveyError::validation("The survey has changed; please restart this channel")
                })?;
                format!(
                    "{MOVING_ON} {}",
                    spoken_prompt(next_question, next, draft.len())
                )
            }
            _ => GOODBYE.to_string(),
        };

        Ok(RenderOutput::immediate(RenderEvent::VoiceText(confirmation)).followed_by(
            self.follow_up_delay,
            RenderEvent::VoiceText(self.voice_text.clone()),
        ))
    }

    fn reset(&mut self) {
        self.progress.reset();
        self.voice_text.clear();
        self.entry.clear();
    }
}

/// The keys that answer `question`. Number questions use the whole keypad.
pub fn recognized_keys(question: &Question) -> Vec<char> {
    match question.kind() {
        QuestionKind::Number(_) => KEYPAD.to_vec(),
        _ => KEYPAD
            .into_iter()
            .filter(|&key| key_answer(question, key).is_some())
            .collect(),
    }
}

fn invalid_key(question: &Question, key: char) -> SurveyError {
    warn!(question = %question.id(), %key, "unrecognized key");
    SurveyError::invalid_input(format!("Invalid key {key}. {}", instructions(question)))
}

/// Map a single key press to an answer, if the key is meaningful for the question.
///
/// Choices and ratings take `1..=n` (so only the first nine options are reachable),
/// free text takes `#` after speaking. Numbers are keyed through the entry buffer.
fn key_answer(question: &Question, key: char) -> Option<Answer> {
    match question.kind() {
        QuestionKind::MultipleChoice(choice) => {
            option_for(&choice.options, key).map(Answer::Choice)
        }
        QuestionKind::MultipleSelect(choice) => {
            option_for(&choice.options, key).map(|option| Answer::Selections(vec![option]))
        }
        QuestionKind::Rating(rating) => {
            let value = key.to_digit(10).filter(|&d| d >= 1)?;
            rating.check(value).ok().map(|()| Answer::Rating(value))
        }
        QuestionKind::Number(_) => None,
        QuestionKind::Text => (key == '#').then(|| Answer::Text(VOICE_RECORDING.to_string())),
    }
}

fn option_for(options: &[String], key: char) -> Option<String> {
    let position = usize::try_from(key.to_digit(10)?).ok()?;
    options.get(position.checked_sub(1)?).cloned()
}

fn spoken_prompt(question: &Question, index: usize, total: usize) -> String {
    format!(
        "Question {} of {total}. {} {}",
        index + 1,
        question.text(),
        instructions(question)
    )
}

fn instructions(question: &Question) -> String {
    match question.kind() {
        QuestionKind::MultipleChoice(choice) | QuestionKind::MultipleSelect(choice) => choice
            .options
            .iter()
            .take(9)
            .enumerate()
            .map(|(i, option)| format!("Press {} for {option}.", i + 1))
            .collect::<Vec<_>>()
            .join(" "),
        QuestionKind::Rating(rating) => {
            format!("Press a key from 1 to {} to rate.", rating.scale.min(9))
        }
        QuestionKind::Number(number) => {
            let mut text = format!(
                "Enter a number{} on the keypad, then press #.",
                number.describe_range()
            );
            if number.min.is_none_or(|min| min < 0) {
                text.push_str(" Press * first for a negative number.");
            }
            text
        }
        QuestionKind::Text => "Speak your answer after the tone, then press #.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use surveyai_types::QuestionId;

    use super::*;

    fn draft() -> SurveyDraft {
        SurveyDraft::from_questions(vec![
            Question::multiple_choice(
                "nss_1",
                "What is your household's primary source of income?",
                ["Agriculture", "Business", "Salary/Wages", "Pension", "Other"],
            ),
            Question::number("nss_2", "How many members are there?", Some(1), Some(20)),
        ])
        .unwrap()
    }

    #[test]
    fn start_reads_first_prompt() {
        let draft = draft();
        let mut ivr = IvrChannel::default();
        ivr.start(&draft).unwrap();
        assert!(ivr.voice_text().starts_with("Question 1 of 2."));
        assert!(ivr.voice_text().contains("Press 2 for Business."));
    }

    #[test]
    fn valid_key_confirms_then_moves_on() {
        let draft = draft();
        let mut ivr = IvrChannel::new(Duration::from_millis(1500), Duration::ZERO);
        ivr.start(&draft).unwrap();

        let out = ivr.advance(&draft, '2').unwrap();
        assert_eq!(
            out.events,
            vec![RenderEvent::VoiceText(
                "You pressed 2. Processing your response...".into()
            )]
        );
        let follow_up = out.follow_up.unwrap();
        assert_eq!(follow_up.after, Duration::from_millis(1500));
        assert!(matches!(
            follow_up.event,
            RenderEvent::VoiceText(ref text) if text.starts_with(MOVING_ON)
        ));
        assert_eq!(ivr.progress().state(), SessionState::InProgress(1));
        assert_eq!(
            ivr.progress().answers().get(&QuestionId::new("nss_1")),
            Some(&Answer::Choice("Business".into()))
        );
    }

    #[test]
    fn unrecognized_key_keeps_cursor() {
        let draft = draft();
        let mut ivr = IvrChannel::default();
        ivr.start(&draft).unwrap();

        for key in ['6', '0', '*', '#', 'x'] {
            let err = ivr.advance(&draft, key).unwrap_err();
            assert!(err.message().starts_with(&format!("Invalid key {key}.")));
            assert_eq!(ivr.progress().state(), SessionState::InProgress(0));
        }
        assert!(ivr.progress().answers().is_empty());
    }

    #[test]
    fn number_entry_commits_on_hash() {
        let draft = SurveyDraft::from_questions(vec![Question::number(
            "age",
            "How old are you?",
            Some(18),
            Some(99),
        )])
        .unwrap();
        let mut ivr = IvrChannel::default();
        ivr.start(&draft).unwrap();
        assert!(
            ivr.voice_text()
                .contains("Enter a number 18 to 99 on the keypad, then press #.")
        );
        assert_eq!(recognized_keys(draft.get(0).unwrap()), KEYPAD.to_vec());

        let out = ivr.advance(&draft, '4').unwrap();
        assert_eq!(out.events, vec![RenderEvent::VoiceText("You entered 4.".into())]);
        ivr.advance(&draft, '2').unwrap();
        assert_eq!(ivr.entry(), "42");
        assert_eq!(ivr.progress().state(), SessionState::InProgress(0));

        let out = ivr.advance(&draft, '#').unwrap();
        assert_eq!(
            out.events,
            vec![RenderEvent::VoiceText(
                "You entered 42. Processing your response...".into()
            )]
        );
        assert!(ivr.progress().is_completed());
        assert_eq!(
            ivr.progress().answers().get(&QuestionId::new("age")),
            Some(&Answer::Number(42))
        );
    }

    #[test]
    fn out_of_range_entry_is_cleared() {
        let draft = SurveyDraft::from_questions(vec![Question::number(
            "age",
            "How old are you?",
            Some(18),
            Some(99),
        )])
        .unwrap();
        let mut ivr = IvrChannel::default();
        ivr.start(&draft).unwrap();

        ivr.advance(&draft, '7').unwrap();
        let err = ivr.advance(&draft, '#').unwrap_err();
        assert!(matches!(err, SurveyError::InvalidInput(_)));
        assert_eq!(ivr.entry(), "");
        assert_eq!(ivr.progress().state(), SessionState::InProgress(0));

        assert!(matches!(
            ivr.advance(&draft, '#'),
            Err(SurveyError::Validation(_))
        ));

        ivr.advance(&draft, '2').unwrap();
        ivr.advance(&draft, '5').unwrap();
        ivr.advance(&draft, '#').unwrap();
        assert!(ivr.progress().is_completed());
    }

    #[test]
    fn star_is_minus_then_clear() {
        let draft = SurveyDraft::from_questions(vec![Question::number(
            "balance",
            "Change in savings this month?",
            Some(-50),
            Some(50),
        )])
        .unwrap();
        let mut ivr = IvrChannel::default();
        ivr.start(&draft).unwrap();
        assert!(ivr.voice_text().ends_with("Press * first for a negative number."));

        ivr.advance(&draft, '9').unwrap();
        let out = ivr.advance(&draft, '*').unwrap();
        assert_eq!(out.events, vec![RenderEvent::VoiceText("Entry cleared.".into())]);

        for key in ['*', '1', '2', '#'] {
            ivr.advance(&draft, key).unwrap();
        }
        assert_eq!(
            ivr.progress().answers().get(&QuestionId::new("balance")),
            Some(&Answer::Number(-12))
        );
    }

    #[test]
    fn reset_drops_partial_entry() {
        let draft = draft();
        let mut ivr = IvrChannel::default();
        ivr.start(&draft).unwrap();
        ivr.advance(&draft, '1').unwrap();
        ivr.advance(&draft, '3').unwrap();
        assert_eq!(ivr.entry(), "3");

        ivr.reset();
        assert_eq!(ivr.entry(), "");
        assert!(matches!(ivr.advance(&draft, 'x'), Err(SurveyError::Validation(_))));
    }

    #[test]
    fn final_key_says_goodbye() {
        let draft = draft();
        let mut ivr = IvrChannel::default();
        ivr.start(&draft).unwrap();
        for key in ['1', '4', '#'] {
            ivr.advance(&draft, key).unwrap();
        }

        assert!(ivr.progress().is_completed());
        assert_eq!(ivr.voice_text(), GOODBYE);
    }

    #[test]
    fn replay_needs_a_session() {
        let draft = draft();
        let mut ivr = IvrChannel::default();
        assert!(ivr.replay(&draft).is_err());

        ivr.start(&draft).unwrap();
        let out = ivr.replay(&draft).unwrap();
        assert_eq!(
            out.follow_up.map(|f| f.event),
            Some(RenderEvent::VoiceText(PLAYBACK_DONE.into()))
        );
    }
}
