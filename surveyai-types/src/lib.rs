//! Core types for the surveyai crates.
//!
//! This crate provides the foundational types for authoring and presenting surveys:
//! - `Question` and `QuestionKind` - Individual questions and their input types
//! - `SurveyDraft` - The ordered, mutable collection of authored questions
//! - `Answer` and `Answers` - Submitted values keyed by `QuestionId`
//! - `RenderSurface`, `ChartSurface` and `QuestionGenerator` - Collaborator traits
//! - `SurveyError` - The recoverable error taxonomy shared by every crate

mod question_id;
pub use question_id::QuestionId;

mod answer;
pub use answer::Answer;

mod answers;
pub use answers::Answers;

mod language;
pub use language::Language;

mod channel_kind;
pub use channel_kind::ChannelKind;

mod question;
pub use question::{ChoiceQuestion, NumberQuestion, Question, QuestionKind, RatingQuestion};

mod draft;
pub use draft::SurveyDraft;

mod view;
pub use view::{
    ChartKind, ChartSeries, ChatTurn, DialogueLine, MetricCard, MobileView, ProgressBar, Speaker,
};

mod timings;
pub use timings::Timings;

mod error;
pub use error::SurveyError;

mod traits;
pub use traits::{ChartSurface, QuestionGenerator, RenderSurface};
