//! View models handed to rendering and charting surfaces.

use crate::{Answer, Language, Question};

/// Who said a line in a chat transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Bot,
    User,
}

/// One turn in a chat transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub text: String,
}

impl ChatTurn {
    /// A turn spoken by the survey bot.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Bot,
            text: text.into(),
        }
    }

    /// A turn typed by the respondent.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }
}

/// The single-question screen of the mobile channel.
#[derive(Debug, Clone, PartialEq)]
pub struct MobileView {
    /// The question on screen; `None` once the survey is completed.
    pub question: Option<Question>,

    /// 1-based position of the question on screen.
    pub position: usize,

    /// Number of questions in the survey.
    pub total: usize,

    /// The answer recorded for the question on screen.
    pub answer: Option<Answer>,
}

impl MobileView {
    /// Whether this is the completion screen.
    pub fn is_completed(&self) -> bool {
        self.question.is_none()
    }

    /// Progress bar fill, 0 to 100.
    pub fn progress_percent(&self) -> u8 {
        if self.is_completed() || self.total == 0 {
            return 100;
        }
        let percent = self.position.min(self.total) * 100 / self.total;
        u8::try_from(percent).unwrap_or(100)
    }

    /// Progress caption such as `Question 2 of 5`.
    pub fn caption(&self) -> String {
        if self.is_completed() {
            format!("Completed {} of {}", self.total, self.total)
        } else {
            format!("Question {} of {}", self.position, self.total)
        }
    }
}

/// A line spoken by the avatar assistant.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueLine {
    pub language: Language,
    pub text: String,
}

/// Chart type of a `ChartSeries`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Doughnut,
    Line,
    Bar,
}

/// A labelled data series for a charting surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub kind: ChartKind,

    /// Chart heading.
    pub title: String,

    /// Dataset label (legend or axis caption).
    pub series_label: String,

    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    /// Build a series from label/value pairs.
    pub fn new<S: Into<String>>(
        kind: ChartKind,
        title: impl Into<String>,
        series_label: impl Into<String>,
        points: impl IntoIterator<Item = (S, f64)>,
    ) -> Self {
        let (labels, values) = points
            .into_iter()
            .map(|(label, value)| (label.into(), value))
            .unzip();
        Self {
            kind,
            title: title.into(),
            series_label: series_label.into(),
            labels,
            values,
        }
    }

    /// Iterate over label/value pairs.
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Sum of all values.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// A percentage headline on the dashboard, e.g. a response rate.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub label: String,
    pub percent: f64,
}

impl MetricCard {
    pub fn new(label: impl Into<String>, percent: f64) -> Self {
        Self {
            label: label.into(),
            percent,
        }
    }
}

/// A progress bar on the dashboard; `width` is its fill, 0 to 100.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBar {
    pub label: String,
    pub width: f64,
}

impl ProgressBar {
    pub fn new(label: impl Into<String>, width: f64) -> Self {
        Self {
            label: label.into(),
            width,
        }
    }
}
