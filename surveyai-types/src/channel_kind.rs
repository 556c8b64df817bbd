use std::fmt;

/// A simulated delivery surface for presenting a survey to a respondent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    /// Messaging chat (WhatsApp-style transcript).
    Chat,
    /// Voice call answered with the telephone keypad.
    Ivr,
    /// Mobile app showing one question per screen.
    Mobile,
    /// Multilingual avatar assistant.
    Avatar,
}

impl ChannelKind {
    /// Every channel, in tab order.
    pub const ALL: [ChannelKind; 4] = [Self::Chat, Self::Ivr, Self::Mobile, Self::Avatar];

    /// Stable identifier used by tabs and configuration.
    pub fn id(self) -> &'static str {
        match self {
            Self::Chat => "whatsapp",
            Self::Ivr => "ivr",
            Self::Mobile => "mobile",
            Self::Avatar => "avatar",
        }
    }

    /// Product name of the integration behind the channel.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Chat => "WhatsApp Business API",
            Self::Ivr => "Voice/IVR System",
            Self::Mobile => "Mobile Application",
            Self::Avatar => "AI Avatar Interface",
        }
    }

    /// Look a channel up by its identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id.trim())
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
