use surveyai_types::{ChannelKind, Language, SurveyDraft, SurveyError, Timings};

use crate::{
    AvatarChannel, AvatarInput, ChatChannel, ChannelProgress, IvrChannel, MobileChannel,
    MobileInput, RenderOutput,
};

/// The contract shared by every channel projection.
///
/// A channel reads the draft it is given on each call and never mutates it. All
/// state changes happen synchronously inside the call; failed calls change nothing.
pub trait Channel {
    /// What the respondent can do on this channel.
    type Input;

    fn kind(&self) -> ChannelKind;

    fn progress(&self) -> &ChannelProgress;

    /// Start a session at the first question, discarding any earlier one.
    fn start(&mut self, draft: &SurveyDraft) -> Result<RenderOutput, SurveyError>;

    /// Handle one respondent input.
    fn advance(
        &mut self,
        draft: &SurveyDraft,
        input: Self::Input,
    ) -> Result<RenderOutput, SurveyError>;

    /// Return to `NotStarted`, dropping answers.
    fn reset(&mut self);
}

/// Input for any channel, tagged with the channel it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelInput {
    /// A typed chat answer.
    Chat(String),
    /// A keypad key.
    Ivr(char),
    Mobile(MobileInput),
    Avatar(AvatarInput),
}

impl ChannelInput {
    /// The channel this input is meant for.
    pub fn channel(&self) -> ChannelKind {
        match self {
            Self::Chat(_) => ChannelKind::Chat,
            Self::Ivr(_) => ChannelKind::Ivr,
            Self::Mobile(_) => ChannelKind::Mobile,
            Self::Avatar(_) => ChannelKind::Avatar,
        }
    }
}

/// One channel of any kind.
#[derive(Debug, Clone)]
pub enum ChannelHandler {
    Chat(ChatChannel),
    Ivr(IvrChannel),
    Mobile(MobileChannel),
    Avatar(AvatarChannel),
}

impl ChannelHandler {
    /// Create the handler for `kind` with the given delays.
    pub fn new(kind: ChannelKind, timings: &Timings, language: Language) -> Self {
        match kind {
            ChannelKind::Chat => Self::Chat(ChatChannel::new(timings.chat_reply())),
            ChannelKind::Ivr => Self::Ivr(IvrChannel::new(
                timings.ivr_follow_up(),
                timings.voice_playback(),
            )),
            ChannelKind::Mobile => Self::Mobile(MobileChannel::new()),
            ChannelKind::Avatar => Self::Avatar(AvatarChannel::new(language)),
        }
    }

    pub fn kind(&self) -> ChannelKind {
        match self {
            Self::Chat(c) => c.kind(),
            Self::Ivr(c) => c.kind(),
            Self::Mobile(c) => c.kind(),
            Self::Avatar(c) => c.kind(),
        }
    }

    pub fn progress(&self) -> &ChannelProgress {
        match self {
            Self::Chat(c) => c.progress(),
            Self::Ivr(c) => c.progress(),
            Self::Mobile(c) => c.progress(),
            Self::Avatar(c) => c.progress(),
        }
    }

    pub fn start(&mut self, draft: &SurveyDraft) -> Result<RenderOutput, SurveyError> {
        match self {
            Self::Chat(c) => c.start(draft),
            Self::Ivr(c) => c.start(draft),
            Self::Mobile(c) => c.start(draft),
            Self::Avatar(c) => c.start(draft),
        }
    }

    /// Dispatch input to the channel. Input tagged for another channel is rejected.
    pub fn advance(
        &mut self,
        draft: &SurveyDraft,
        input: ChannelInput,
    ) -> Result<RenderOutput, SurveyError> {
        match (self, input) {
            (Self::Chat(c), ChannelInput::Chat(answer)) => c.advance(draft, answer),
            (Self::Ivr(c), ChannelInput::Ivr(key)) => c.advance(draft, key),
            (Self::Mobile(c), ChannelInput::Mobile(action)) => c.advance(draft, action),
            (Self::Avatar(c), ChannelInput::Avatar(action)) => c.advance(draft, action),
            (handler, input) => Err(SurveyError::invalid_input(format!(
                "{} input cannot drive the {} channel",
                input.channel(),
                handler.kind()
            ))),
        }
    }

    pub fn reset(&mut self) {
        match self {
            Self::Chat(c) => c.reset(),
            Self::Ivr(c) => c.reset(),
            Self::Mobile(c) => c.reset(),
            Self::Avatar(c) => c.reset(),
        }
    }
}

/// One handler per channel kind.
#[derive(Debug, Clone)]
pub struct ChannelSet {
    handlers: Vec<ChannelHandler>,
}

impl ChannelSet {
    pub fn new(timings: &Timings, language: Language) -> Self {
        Self {
            handlers: ChannelKind::ALL
                .into_iter()
                .map(|kind| ChannelHandler::new(kind, timings, language))
                .collect(),
        }
    }

    pub fn get(&self, kind: ChannelKind) -> &ChannelHandler {
        &self.handlers[slot(kind)]
    }

    pub fn get_mut(&mut self, kind: ChannelKind) -> &mut ChannelHandler {
        &mut self.handlers[slot(kind)]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChannelHandler> {
        self.handlers.iter()
    }

    pub fn reset_all(&mut self) {
        self.handlers.iter_mut().for_each(ChannelHandler::reset);
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new(&Timings::default(), Language::default())
    }
}

// Handlers are stored in `ChannelKind::ALL` order.
fn slot(kind: ChannelKind) -> usize {
    match kind {
        ChannelKind::Chat => 0,
        ChannelKind::Ivr => 1,
        ChannelKind::Mobile => 2,
        ChannelKind::Avatar => 3,
    }
}
