//! # surveyai
//!
//! Author a survey once and preview it on several delivery channels.
//!
//! The crate ties the pieces together:
//! - `AuthoringSession` - the mutable survey draft with change observers and one
//!   preview session per channel
//! - `MockGenerator` - deterministic stand-in for AI question generation
//! - `catalog` - curated questions for the builder palette
//! - `AppContext` - section and channel navigation, user notices, data pre-population
//! - `dashboard` - static analytics chart series and drifting live metrics
//! - `ScriptedRespondent` - answer a channel session from a script
//!
//! ## Usage
//!
//! ```rust
//! use surveyai::{AuthoringSession, ChannelInput, ChannelKind, SessionState};
//!
//! let mut session = AuthoringSession::new();
//! session.generate_from_prompt("Digital literacy in rural households").unwrap();
//! assert_eq!(session.list_questions().len(), 4);
//!
//! session.start_channel(ChannelKind::Chat).unwrap();
//! let output = session
//!     .advance_channel(ChannelInput::Chat("1, 3".to_string()))
//!     .unwrap();
//! assert!(output.follow_up.is_some());
//! assert_eq!(
//!     session.channel(ChannelKind::Chat).progress().state(),
//!     SessionState::InProgress(1)
//! );
//! ```
//!
//! ## Rendering
//!
//! Front ends implement `RenderSurface` and `ChartSurface`. Channel calls return a
//! `RenderOutput`; its immediate events are shown at once and its `FollowUp`, if any,
//! after the delay it carries. Channel state is already final when the call returns.

pub use surveyai_channels::*;
pub use surveyai_types::*;

pub mod app;
pub mod catalog;
pub mod dashboard;

mod generator;
mod scripted;
mod session;

pub use app::{AppContext, Notice, NoticeLevel, Prepopulation, Section};
pub use generator::MockGenerator;
pub use scripted::{ScriptError, ScriptedRespondent};
pub use session::{AuthoringSession, DraftEvent};
