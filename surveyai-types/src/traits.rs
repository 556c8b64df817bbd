use crate::{
    ChartSeries, ChatTurn, DialogueLine, MetricCard, MobileView, ProgressBar, Question, SurveyError,
};

/// A source of generated survey questions.
///
/// The bundled implementation is a deterministic mock; a real backend calling an
/// external generation service can be substituted without touching channel logic.
pub trait QuestionGenerator {
    /// Generate questions for a free-text description.
    ///
    /// Callers reject blank prompts before calling this.
    fn generate(&self, prompt: &str) -> Result<Vec<Question>, SurveyError>;
}

/// The rendering surface the survey UI draws on.
///
/// Implementations decide the technology (HTML, terminal, ...); the survey model only
/// hands over view data.
pub trait RenderSurface {
    /// Render the builder canvas with the draft's questions in order.
    fn render_questions(&mut self, questions: &[Question]);

    /// Render the empty-canvas placeholder.
    fn render_empty_canvas(&mut self);

    /// Render a chat transcript.
    fn render_transcript(&mut self, turns: &[ChatTurn]);

    /// Render the mobile single-question form.
    fn render_form(&mut self, view: &MobileView);

    /// Render the text spoken by the voice channel.
    fn render_voice_text(&mut self, text: &str);

    /// Render a line of localized avatar dialogue.
    fn render_dialogue(&mut self, line: &DialogueLine);
}

/// The charting surface used by the analytics dashboard.
pub trait ChartSurface {
    /// Render one labelled series.
    fn render_series(&mut self, series: &ChartSeries);

    /// Render the live metric cards and progress bars. Ignored by default.
    fn render_metrics(&mut self, _cards: &[MetricCard], _bars: &[ProgressBar]) {}
}

impl<F> QuestionGenerator for F
where
    F: Fn(&str) -> Result<Vec<Question>, SurveyError>,
{
    fn generate(&self, prompt: &str) -> Result<Vec<Question>, SurveyError> {
        self(prompt)
    }
}
