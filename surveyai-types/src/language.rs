use std::fmt;

/// A language the avatar assistant can converse in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Language {
    #[default]
    English,
    Hindi,
    Telugu,
    Tamil,
    Bengali,
    Gujarati,
}

impl Language {
    /// Every supported language, in selector order.
    pub const ALL: [Language; 6] = [
        Self::English,
        Self::Hindi,
        Self::Telugu,
        Self::Tamil,
        Self::Bengali,
        Self::Gujarati,
    ];

    /// The ISO 639-1 code, e.g. `"hi"`.
    pub fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
            Self::Telugu => "te",
            Self::Tamil => "ta",
            Self::Bengali => "bn",
            Self::Gujarati => "gu",
        }
    }

    /// The English name.
    pub fn name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "Hindi",
            Self::Telugu => "Telugu",
            Self::Tamil => "Tamil",
            Self::Bengali => "Bengali",
            Self::Gujarati => "Gujarati",
        }
    }

    /// The name written in the language itself.
    pub fn native(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "हिंदी",
            Self::Telugu => "తెలుగు",
            Self::Tamil => "தமிழ்",
            Self::Bengali => "বাংলা",
            Self::Gujarati => "ગુજરાતી",
        }
    }

    /// Display label such as `Hindi (हिंदी)`; English is shown bare.
    pub fn label(self) -> String {
        match self {
            Self::English => self.name().to_string(),
            other => format!("{} ({})", other.name(), other.native()),
        }
    }

    /// Look a language up by its code, case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
