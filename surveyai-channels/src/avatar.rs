//! Avatar assistant channel: a spoken dialogue in the respondent's language.

use surveyai_types::{ChannelKind, DialogueLine, Language, Question, SurveyDraft, SurveyError};
use tracing::{debug, warn};

use crate::{Channel, ChannelProgress, RenderEvent, RenderOutput, SessionState, prompt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarInput {
    /// Switch the conversation to the language with this code (e.g. `"hi"`).
    SelectLanguage(String),
    /// Answer the current question.
    Answer(String),
}

/// Localized framing of avatar lines.
struct Phrases {
    question: &'static str,
    /// `{language}` is replaced with the language label.
    switched: &'static str,
    closing: &'static str,
}

fn phrases(language: Language) -> Phrases {
    match language {
        Language::English => Phrases {
            question: "Question",
            switched: "Perfect! I'll continue our conversation in {language}.",
            closing: "Thank you! Your responses have been recorded.",
        },
        Language::Hindi => Phrases {
            question: "प्रश्न",
            switched: "बढ़िया! अब हम {language} में बातचीत जारी रखेंगे।",
            closing: "धन्यवाद! आपके उत्तर दर्ज कर लिए गए हैं।",
        },
        Language::Telugu => Phrases {
            question: "ప్రశ్న",
            switched: "సరే! మనం {language}లో సంభాషణ కొనసాగిద్దాం.",
            closing: "ధన్యవాదాలు! మీ సమాధానాలు నమోదు చేయబడ్డాయి.",
        },
        Language::Tamil => Phrases {
            question: "கேள்வி",
            switched: "சரி! நாம் {language} மொழியில் உரையாடலைத் தொடர்வோம்.",
            closing: "நன்றி! உங்கள் பதில்கள் பதிவு செய்யப்பட்டன.",
        },
        Language::Bengali => Phrases {
            question: "প্রশ্ন",
            switched: "ঠিক আছে! আমরা {language} ভাষায় কথোপকথন চালিয়ে যাব।",
            closing: "ধন্যবাদ! আপনার উত্তরগুলি রেকর্ড করা হয়েছে।",
        },
        Language::Gujarati => Phrases {
            question: "પ્રશ્ન",
            switched: "સરસ! આપણે {language}માં વાતચીત ચાલુ રાખીશું.",
            closing: "આભાર! તમારા જવાબો નોંધાઈ ગયા છે.",
        },
    }
}

/// Avatar channel. The selected language is session-wide and only changes how
/// prompts are worded; it never moves the cursor.
#[derive(Debug, Clone)]
pub struct AvatarChannel {
    progress: ChannelProgress,
    language: Language,
    default_language: Language,
    dialogue: Vec<DialogueLine>,
}

impl AvatarChannel {
    pub fn new(default_language: Language) -> Self {
        Self {
            progress: ChannelProgress::new(ChannelKind::Avatar),
            language: default_language,
            default_language,
            dialogue: Vec::new(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Every line spoken in this session, oldest first.
    pub fn dialogue(&self) -> &[DialogueLine] {
        &self.dialogue
    }

    fn say(&mut self, text: String) -> RenderEvent {
        let line = DialogueLine {
            language: self.language,
            text,
        };
        self.dialogue.push(line.clone());
        RenderEvent::Dialogue(line)
    }

    fn question_line(&self, question: &Question, index: usize, total: usize) -> String {
        let framing = phrases(self.language);
        let body = prompt::chat_prompt(question, question.text_in(self.language));
        format!("{} {}/{total}: {body}", framing.question, index + 1)
    }

    fn select_language(
        &mut self,
        draft: &SurveyDraft,
        code: &str,
    ) -> Result<RenderOutput, SurveyError> {
        let language = Language::from_code(code).ok_or_else(|| {
            warn!(code, "unsupported avatar language");
            SurveyError::invalid_input(format!("Unsupported language '{code}'"))
        })?;
        self.language = language;
        debug!(%language, "avatar language selected");

        let switched = phrases(language)
            .switched
            .replace("{language}", &language.label());
        let mut output = RenderOutput::immediate(self.say(switched));

        if let SessionState::InProgress(index) = self.progress.state() {
            let (_, question) = self.progress.current_question(draft)?;
            let line = self.question_line(question, index, draft.len());
            output = output.then(self.say(line));
        }
        Ok(output)
    }

    fn answer(&mut self, draft: &SurveyDraft, raw: &str) -> Result<RenderOutput, SurveyError> {
        let (_, question) = self.progress.current_question(draft)?;
        let answer = question.parse_answer(raw)?;
        debug!(question = %question.id(), answer = %answer, "avatar answer accepted");
        self.progress.record(question.id(), answer);

        let line = match self.progress.advance(draft.len())? {
            SessionState::InProgress(next) => {
                let next_question = draft.get(next).ok_or_else(|| {
                    SurveyError::validation("The survey has changed; please restart this channel")
                })?;
                self.question_line(next_question, next, draft.len())
            }
            _ => phrases(self.language).closing.to_string(),
        };
        Ok(RenderOutput::immediate(self.say(line)))
    }
}

impl Default for AvatarChannel {
    fn default() -> Self {
        Self::new(Language::English)
    }
}

impl Channel for AvatarChannel {
    type Input = AvatarInput;

    fn kind(&self) -> ChannelKind {
        ChannelKind::Avatar
    }

    fn progress(&self) -> &ChannelProgress {
        &self.progress
    }

    fn start(&mut self, draft: &SurveyDraft) -> Result<RenderOutput, SurveyError> {
        self.progress.start(draft.len())?;
        self.dialogue.clear();
        let (index, question) = self.progress.current_question(draft)?;
        let line = self.question_line(question, index, draft.len());
        debug!(questions = draft.len(), language = %self.language, "avatar session started");
        Ok(RenderOutput::immediate(self.say(line)))
    }

    fn advance(
        &mut self,
        draft: &SurveyDraft,
        input: AvatarInput,
    ) -> Result<RenderOutput, SurveyError> {
        match input {
            AvatarInput::SelectLanguage(code) => self.select_language(draft, &code),
            AvatarInput::Answer(raw) => self.answer(draft, &raw),
        }
    }

    fn reset(&mut self) {
        self.progress.reset();
        self.dialogue.clear();
        self.language = self.default_language;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> SurveyDraft {
        SurveyDraft::from_questions(vec![
            Question::multiple_choice(
                "nss_1",
                "Primary source of income?",
                ["Agriculture", "Business"],
            )
            .with_translation(Language::Hindi, "आय का मुख्य स्रोत क्या है?"),
            Question::rating("nss_5", "Opinion of digital initiatives?", 5),
        ])
        .unwrap()
    }

    #[test]
    fn language_switch_keeps_cursor() {
        let draft = draft();
        let mut avatar = AvatarChannel::default();
        avatar.start(&draft).unwrap();
        assert_eq!(avatar.progress().state(), SessionState::InProgress(0));

        let out = avatar
            .advance(&draft, AvatarInput::SelectLanguage("hi".into()))
            .unwrap();
        assert_eq!(avatar.progress().state(), SessionState::InProgress(0));
        assert_eq!(avatar.language(), Language::Hindi);
        assert_eq!(out.events.len(), 2);

        let RenderEvent::Dialogue(line) = &out.events[1] else {
            panic!("expected dialogue");
        };
        assert_eq!(line.language, Language::Hindi);
        assert!(line.text.starts_with("प्रश्न 1/2: आय का मुख्य स्रोत क्या है?"));
    }

    #[test]
    fn language_before_start_only_acknowledges() {
        let draft = draft();
        let mut avatar = AvatarChannel::default();
        let out = avatar
            .advance(&draft, AvatarInput::SelectLanguage("te".into()))
            .unwrap();
        assert_eq!(out.events.len(), 1);
        assert_eq!(avatar.progress().state(), SessionState::NotStarted);
    }

    #[test]
    fn unknown_language_is_rejected() {
        let draft = draft();
        let mut avatar = AvatarChannel::default();
        avatar.start(&draft).unwrap();
        assert!(matches!(
            avatar.advance(&draft, AvatarInput::SelectLanguage("xx".into())),
            Err(SurveyError::InvalidInput(_))
        ));
        assert_eq!(avatar.language(), Language::English);
    }

    #[test]
    fn answers_advance_and_close_in_locale() {
        let draft = draft();
        let mut avatar = AvatarChannel::default();
        avatar.start(&draft).unwrap();
        avatar
            .advance(&draft, AvatarInput::SelectLanguage("ta".into()))
            .unwrap();
        avatar.advance(&draft, AvatarInput::Answer("2".into())).unwrap();
        let out = avatar.advance(&draft, AvatarInput::Answer("5".into())).unwrap();

        assert!(avatar.progress().is_completed());
        assert_eq!(
            out.events,
            vec![RenderEvent::Dialogue(DialogueLine {
                language: Language::Tamil,
                text: phrases(Language::Tamil).closing.to_string(),
            })]
        );
    }

    #[test]
    fn reset_restores_default_language() {
        let draft = draft();
        let mut avatar = AvatarChannel::new(Language::Bengali);
        avatar
            .advance(&draft, AvatarInput::SelectLanguage("gu".into()))
            .unwrap();
        avatar.reset();
        assert_eq!(avatar.language(), Language::Bengali);
        assert!(avatar.dialogue().is_empty());
    }
}
