use std::time::Duration;

use surveyai_types::{ChatTurn, DialogueLine, MobileView, RenderSurface};

/// Something a channel wants shown.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    /// A new chat turn (the full transcript is kept by the channel).
    Turn(ChatTurn),
    /// Text spoken on the voice channel.
    VoiceText(String),
    /// The mobile screen to display.
    Mobile(MobileView),
    /// A line of avatar dialogue.
    Dialogue(DialogueLine),
}

impl RenderEvent {
    /// Draw this event on a rendering surface.
    ///
    /// Chat turns are drawn as a one-turn transcript; surfaces that keep history
    /// should render `ChatChannel::transcript` instead.
    pub fn render_on(&self, surface: &mut dyn RenderSurface) {
        match self {
            Self::Turn(turn) => surface.render_transcript(std::slice::from_ref(turn)),
            Self::VoiceText(text) => surface.render_voice_text(text),
            Self::Mobile(view) => surface.render_form(view),
            Self::Dialogue(line) => surface.render_dialogue(line),
        }
    }
}

/// An event to show after an artificial processing delay.
///
/// The channel state it describes is already committed when it is returned.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowUp {
    pub after: Duration,
    pub event: RenderEvent,
}

/// The result of one channel input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOutput {
    /// Events to show right away.
    pub events: Vec<RenderEvent>,
    /// Event to show once the delay has elapsed.
    pub follow_up: Option<FollowUp>,
}

impl RenderOutput {
    pub fn immediate(event: RenderEvent) -> Self {
        Self {
            events: vec![event],
            follow_up: None,
        }
    }

    pub fn then(mut self, event: RenderEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn followed_by(mut self, after: Duration, event: RenderEvent) -> Self {
        self.follow_up = Some(FollowUp { after, event });
        self
    }

    /// Every event in display order, follow-up last.
    pub fn all_events(&self) -> impl Iterator<Item = &RenderEvent> {
        self.events
            .iter()
            .chain(self.follow_up.as_ref().map(|f| &f.event))
    }
}
