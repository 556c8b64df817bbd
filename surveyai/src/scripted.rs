//! Scripted respondent for driving channel previews without user interaction.
//!
//! `ScriptedRespondent` answers every question of a session from pre-defined raw
//! responses keyed by question id, the way a respondent would type or press them.
//!
//! # Example
//!
//! ```rust
//! use surveyai::{AuthoringSession, ChannelKind, ScriptedRespondent};
//!
//! let mut session = AuthoringSession::new();
//! session.add_from_catalog("nss_2").unwrap();
//!
//! let answers = ScriptedRespondent::new()
//!     .with_response("nss_2", "4")
//!     .run(&mut session, ChannelKind::Chat)
//!     .unwrap();
//!
//! assert_eq!(answers.get(&"nss_2".into()).and_then(|a| a.as_number()), Some(4));
//! ```

use std::collections::HashMap;

use tracing::debug;

use crate::{
    Answers, AuthoringSession, AvatarInput, ChannelInput, ChannelKind, Language, MobileInput,
    QuestionId, QuestionKind, SurveyError,
};

/// A respondent that answers from a script.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRespondent {
    responses: HashMap<QuestionId, String>,
    language: Option<Language>,
}

/// Error type for `ScriptedRespondent`.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("Missing response for question: {0}")]
    MissingResponse(QuestionId),

    #[error("Response for '{id}' was rejected: {source}")]
    Rejected { id: QuestionId, source: SurveyError },

    #[error(transparent)]
    Session(#[from] SurveyError),
}

impl ScriptedRespondent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the raw response for a question.
    ///
    /// On the voice channel only the first character is pressed, except for number
    /// questions, which get every character keyed in followed by `#`.
    pub fn with_response(mut self, id: impl Into<QuestionId>, raw: impl Into<String>) -> Self {
        self.responses.insert(id.into(), raw.into());
        self
    }

    /// Pick this language before answering on the avatar channel.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Start `kind` on the session and answer until the survey completes.
    ///
    /// Returns the answers the channel collected.
    pub fn run(
        &self,
        session: &mut AuthoringSession,
        kind: ChannelKind,
    ) -> Result<Answers, ScriptError> {
        session.start_channel(kind)?;
        if let (ChannelKind::Avatar, Some(language)) = (kind, self.language) {
            session.advance_channel(ChannelInput::Avatar(AvatarInput::SelectLanguage(
                language.code().to_string(),
            )))?;
        }

        while let Some(index) = session.channel(kind).progress().current_index() {
            let id = session
                .draft()
                .get(index)
                .map(|q| q.id().clone())
                .ok_or_else(|| SurveyError::not_found(index.to_string()))?;
            let raw = self
                .responses
                .get(&id)
                .ok_or_else(|| ScriptError::MissingResponse(id.clone()))?;
            debug!(%id, channel = %kind, "scripted response");

            let keyed = session
                .draft()
                .get(index)
                .is_some_and(|q| matches!(q.kind(), QuestionKind::Number(_)));
            answer(session, kind, raw, keyed)
                .map_err(|source| ScriptError::Rejected { id, source })?;
        }

        Ok(session.channel(kind).progress().answers().clone())
    }
}

fn answer(
    session: &mut AuthoringSession,
    kind: ChannelKind,
    raw: &str,
    keyed: bool,
) -> Result<(), SurveyError> {
    match kind {
        ChannelKind::Chat => {
            session.advance_channel(ChannelInput::Chat(raw.to_string()))?;
        }
        ChannelKind::Ivr if keyed => {
            for key in raw.trim().trim_end_matches('#').chars() {
                session.advance_channel(ChannelInput::Ivr(key))?;
            }
            session.advance_channel(ChannelInput::Ivr('#'))?;
        }
        ChannelKind::Ivr => {
            let key = raw
                .chars()
                .next()
                .ok_or_else(|| SurveyError::invalid_input("No key pressed"))?;
            session.advance_channel(ChannelInput::Ivr(key))?;
        }
        ChannelKind::Mobile => {
            session.advance_channel(ChannelInput::Mobile(MobileInput::Answer(raw.to_string())))?;
            session.advance_channel(ChannelInput::Mobile(MobileInput::Next))?;
        }
        ChannelKind::Avatar => {
            session.advance_channel(ChannelInput::Avatar(AvatarInput::Answer(raw.to_string())))?;
        }
    }
    Ok(())
}
