//! # surveyai-channels
//!
//! Channel projections of a survey draft.
//!
//! The same `SurveyDraft` is presented differently on each simulated delivery
//! channel, and each channel keeps its own cursor and answers in a
//! `ChannelProgress`:
//!
//! - `ChatChannel` - linear bot/user transcript
//! - `IvrChannel` - spoken prompts answered with keypad keys
//! - `MobileChannel` - one question per screen with Previous/Next
//! - `AvatarChannel` - dialogue in the respondent's chosen language
//!
//! All channels implement the `Channel` trait; `ChannelHandler` and `ChannelInput`
//! dispatch over them by variant.
//!
//! ## Example
//!
//! ```rust
//! use surveyai_channels::{Channel, ChatChannel, SessionState};
//! use surveyai_types::{Question, SurveyDraft};
//!
//! let draft = SurveyDraft::from_questions(vec![
//!     Question::rating("service", "How was our service?", 5),
//! ])
//! .unwrap();
//!
//! let mut chat = ChatChannel::default();
//! chat.start(&draft).unwrap();
//! chat.advance(&draft, "4".to_string()).unwrap();
//! assert_eq!(chat.progress().state(), SessionState::Completed);
//! ```

mod progress;
pub use progress::{ChannelProgress, SessionState};

mod output;
pub use output::{FollowUp, RenderEvent, RenderOutput};

mod prompt;

mod chat;
pub use chat::{CHAT_CLOSING, ChatChannel};

mod ivr;
pub use ivr::{IvrChannel, KEYPAD, VOICE_RECORDING, recognized_keys};

mod mobile;
pub use mobile::{MobileChannel, MobileInput};

mod avatar;
pub use avatar::{AvatarChannel, AvatarInput};

mod handler;
pub use handler::{Channel, ChannelHandler, ChannelInput, ChannelSet};
