//! HTML rendering surface implementation.

use surveyai::dashboard::{self, LiveMetrics};
use surveyai::{
    Answer, AuthoringSession, ChartKind, ChartSeries, ChartSurface, ChatTurn, DialogueLine,
    MetricCard, MobileView, ProgressBar, Question, QuestionKind, RenderSurface, Speaker,
};
use tracing::debug;

/// How an `HtmlSurface` wraps and styles its output.
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// `<title>` and top heading of a full document.
    pub title: Option<String>,
    /// Embed the default stylesheet in a full document.
    pub include_styles: bool,
    /// Wrap the fragments in `<html>` and `<body>`. Off, `finish` returns them bare.
    pub full_document: bool,
    /// Prefix of every generated class name.
    pub class_prefix: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            title: None,
            include_styles: true,
            full_document: true,
            class_prefix: "survey".to_string(),
        }
    }
}

impl HtmlOptions {
    /// A styled full document with the `survey` class prefix.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_styles(mut self, include: bool) -> Self {
        self.include_styles = include;
        self
    }

    pub fn full_document(mut self, full: bool) -> Self {
        self.full_document = full;
        self
    }

    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }
}

/// A rendering and charting surface that accumulates HTML fragments.
///
/// Every render call appends one fragment; `finish` returns them in call order,
/// wrapped in a document when `HtmlOptions::full_document` is set.
#[derive(Debug, Clone)]
pub struct HtmlSurface {
    options: HtmlOptions,
    body: String,
}

impl HtmlSurface {
    pub fn new(options: HtmlOptions) -> Self {
        Self {
            options,
            body: String::new(),
        }
    }

    /// The fragments rendered so far.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Drop everything rendered so far.
    pub fn clear(&mut self) {
        self.body.clear();
    }

    /// Consume the surface and return the HTML.
    pub fn finish(self) -> String {
        if !self.options.full_document {
            return self.body;
        }

        let prefix = &self.options.class_prefix;
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("  <meta charset=\"UTF-8\">\n");
        html.push_str(
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        if let Some(title) = &self.options.title {
            html.push_str(&format!("  <title>{}</title>\n", escape_html(title)));
        }
        if self.options.include_styles {
            html.push_str(&generate_styles(prefix));
        }
        html.push_str("</head>\n<body>\n");
        html.push_str(&format!("<main class=\"{prefix}-container\">\n"));
        if let Some(title) = &self.options.title {
            html.push_str(&format!(
                "  <h1 class=\"{prefix}-title\">{}</h1>\n",
                escape_html(title)
            ));
        }
        html.push_str(&self.body);
        html.push_str("</main>\n</body>\n</html>\n");
        html
    }

    fn prefix(&self) -> &str {
        &self.options.class_prefix
    }
}

impl Default for HtmlSurface {
    fn default() -> Self {
        Self::new(HtmlOptions::new())
    }
}

impl RenderSurface for HtmlSurface {
    fn render_questions(&mut self, questions: &[Question]) {
        let prefix = self.prefix().to_string();
        let mut html = format!("<div class=\"{prefix}-canvas\">\n");
        for question in questions {
            html.push_str(&canvas_question(question, &prefix));
        }
        html.push_str("</div>\n");
        debug!(questions = questions.len(), "canvas rendered");
        self.body.push_str(&html);
    }

    fn render_empty_canvas(&mut self) {
        let prefix = self.prefix().to_string();
        self.body.push_str(&format!(
            "<div class=\"{prefix}-canvas\">\n  <div class=\"{prefix}-canvas-placeholder\"><p>Drag questions here or use AI to generate survey</p></div>\n</div>\n"
        ));
    }

    fn render_transcript(&mut self, turns: &[ChatTurn]) {
        let prefix = self.prefix().to_string();
        let mut html = format!("<div class=\"{prefix}-transcript\">\n");
        for turn in turns {
            let side = match turn.speaker {
                Speaker::Bot => "bot",
                Speaker::User => "user",
            };
            html.push_str(&format!(
                "  <div class=\"{prefix}-message {prefix}-message-{side}\">{}</div>\n",
                escape_multiline(&turn.text)
            ));
        }
        html.push_str("</div>\n");
        self.body.push_str(&html);
    }

    fn render_form(&mut self, view: &MobileView) {
        let prefix = self.prefix().to_string();
        let mut html = format!("<div class=\"{prefix}-mobile\">\n");
        html.push_str(&format!(
            "  <div class=\"{prefix}-progress\"><div class=\"{prefix}-progress-fill\" style=\"width: {}%\"></div></div>\n",
            view.progress_percent()
        ));
        html.push_str(&format!(
            "  <p class=\"{prefix}-progress-caption\">{}</p>\n",
            escape_html(&view.caption())
        ));

        match &view.question {
            Some(question) => {
                html.push_str(&format!(
                    "  <div class=\"{prefix}-field\">\n    <label for=\"{id}\">{}</label>\n",
                    escape_html(question.text()),
                    id = field_id(question)
                ));
                html.push_str(&answer_inputs(question, view.answer.as_ref(), &prefix, 4));
                html.push_str("  </div>\n");
                html.push_str(&format!(
                    "  <div class=\"{prefix}-nav\">\n    <button type=\"button\" class=\"{prefix}-prev\">Previous</button>\n    <button type=\"button\" class=\"{prefix}-next\">Next</button>\n  </div>\n"
                ));
            }
            None => {
                html.push_str(&format!(
                    "  <p class=\"{prefix}-complete\">Survey completed! Thank you for your responses.</p>\n"
                ));
            }
        }

        html.push_str("</div>\n");
        self.body.push_str(&html);
    }

    fn render_voice_text(&mut self, text: &str) {
        let prefix = self.prefix().to_string();
        self.body.push_str(&format!(
            "<div class=\"{prefix}-voice\">{}</div>\n",
            escape_html(text)
        ));
    }

    fn render_dialogue(&mut self, line: &DialogueLine) {
        let prefix = self.prefix().to_string();
        self.body.push_str(&format!(
            "<p class=\"{prefix}-dialogue\" lang=\"{}\">{}</p>\n",
            line.language.code(),
            escape_multiline(&line.text)
        ));
    }
}

impl ChartSurface for HtmlSurface {
    fn render_series(&mut self, series: &ChartSeries) {
        let prefix = self.prefix().to_string();
        let kind = match series.kind {
            ChartKind::Doughnut => "doughnut",
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
        };

        // Doughnut slices are shares of the whole, bars and points are relative to the peak.
        let scale = match series.kind {
            ChartKind::Doughnut => series.total(),
            ChartKind::Line | ChartKind::Bar => {
                series.values.iter().copied().fold(0.0_f64, f64::max)
            }
        };

        let mut html = format!("<figure class=\"{prefix}-chart {prefix}-chart-{kind}\">\n");
        html.push_str(&format!(
            "  <figcaption>{}</figcaption>\n",
            escape_html(&series.title)
        ));
        html.push_str(&format!(
            "  <table>\n    <caption>{}</caption>\n",
            escape_html(&series.series_label)
        ));
        for (label, value) in series.points() {
            let width = if scale > 0.0 { value / scale * 100.0 } else { 0.0 };
            html.push_str(&format!(
                "    <tr><th>{}</th><td>{value}</td><td><div class=\"{prefix}-bar\" style=\"width: {width:.1}%\"></div></td></tr>\n",
                escape_html(label)
            ));
        }
        html.push_str("  </table>\n</figure>\n");
        self.body.push_str(&html);
    }

    fn render_metrics(&mut self, cards: &[MetricCard], bars: &[ProgressBar]) {
        let prefix = self.prefix().to_string();
        let mut html = format!("<section class=\"{prefix}-metrics\">\n");
        for card in cards {
            html.push_str(&format!(
                "  <div class=\"{prefix}-metric\"><span class=\"{prefix}-metric-value\">{:.1}%</span> {}</div>\n",
                card.percent,
                escape_html(&card.label)
            ));
        }
        for bar in bars {
            html.push_str(&format!(
                "  <div class=\"{prefix}-metric-progress\">{}<div class=\"{prefix}-progress\"><div class=\"{prefix}-progress-fill\" style=\"width: {:.1}%\"></div></div></div>\n",
                escape_html(&bar.label),
                bar.width
            ));
        }
        html.push_str("</section>\n");
        self.body.push_str(&html);
    }
}

/// The builder canvas of `session` as a styled document.
pub fn to_html(session: &AuthoringSession, title: Option<&str>) -> String {
    let options = match title {
        Some(title) => HtmlOptions::new().with_title(title),
        None => HtmlOptions::new(),
    };
    to_html_with_options(session, options)
}

pub fn to_html_with_options(session: &AuthoringSession, options: HtmlOptions) -> String {
    let mut surface = HtmlSurface::new(options);
    session.render_canvas(&mut surface);
    surface.finish()
}

/// The dashboard charts followed by the live metrics in their starting state.
pub fn dashboard_html(options: HtmlOptions) -> String {
    let mut surface = HtmlSurface::new(options);
    dashboard::render_dashboard(&mut surface);
    LiveMetrics::default().render(&mut surface);
    surface.finish()
}

/// One question card on the builder canvas.
fn canvas_question(question: &Question, prefix: &str) -> String {
    let mut html = format!(
        "  <div class=\"{prefix}-question\" data-question-id=\"{}\">\n",
        escape_html(question.id().as_str())
    );
    html.push_str(&format!(
        "    <div class=\"{prefix}-question-title\">{}</div>\n",
        escape_html(question.text())
    ));
    html.push_str(&format!(
        "    <div class=\"{prefix}-question-type\">Type: {}</div>\n",
        question.kind().label()
    ));

    match question.kind() {
        QuestionKind::MultipleChoice(choice) | QuestionKind::MultipleSelect(choice) => {
            html.push_str(&format!("    <div class=\"{prefix}-question-options\">\n"));
            for option in &choice.options {
                html.push_str(&format!(
                    "      <div class=\"{prefix}-question-option\"><span>{}</span></div>\n",
                    escape_html(option)
                ));
            }
            html.push_str("    </div>\n");
        }
        QuestionKind::Number(number) => {
            html.push_str(&format!(
                "    <div class=\"{prefix}-question-range\">Accepts a number{}</div>\n",
                escape_html(&number.describe_range())
            ));
        }
        QuestionKind::Rating(rating) => {
            html.push_str(&format!(
                "    <div class=\"{prefix}-question-range\">Scale: 1 to {}</div>\n",
                rating.scale
            ));
        }
        QuestionKind::Text => {}
    }

    html.push_str("  </div>\n");
    html
}

/// Inputs answering `question`, pre-filled with the recorded answer.
fn answer_inputs(
    question: &Question,
    answer: Option<&Answer>,
    prefix: &str,
    indent: usize,
) -> String {
    let ind = " ".repeat(indent);
    let id = field_id(question);
    let name = escape_html(question.id().as_str());
    let mut html = String::new();

    match question.kind() {
        QuestionKind::MultipleChoice(choice) | QuestionKind::MultipleSelect(choice) => {
            let input_type = match question.kind() {
                QuestionKind::MultipleSelect(_) => "checkbox",
                _ => "radio",
            };
            for (i, option) in choice.options.iter().enumerate() {
                let checked = if answer.is_some_and(|a| a.includes(option)) {
                    " checked"
                } else {
                    ""
                };
                html.push_str(&format!(
                    "{ind}<div class=\"{prefix}-{input_type}-option\">\n{ind}  <input type=\"{input_type}\" id=\"{id}-{i}\" name=\"{name}\" value=\"{value}\"{checked}>\n{ind}  <label for=\"{id}-{i}\">{value}</label>\n{ind}</div>\n",
                    value = escape_html(option)
                ));
            }
        }
        QuestionKind::Number(number) => {
            let mut attrs =
                format!("type=\"number\" id=\"{id}\" name=\"{name}\" class=\"{prefix}-input\"");
            if let Some(min) = number.min {
                attrs.push_str(&format!(" min=\"{min}\""));
            }
            if let Some(max) = number.max {
                attrs.push_str(&format!(" max=\"{max}\""));
            }
            if let Some(value) = answer.and_then(Answer::as_number) {
                attrs.push_str(&format!(" value=\"{value}\""));
            }
            html.push_str(&format!("{ind}<input {attrs}>\n"));
        }
        QuestionKind::Rating(rating) => {
            html.push_str(&format!("{ind}<div class=\"{prefix}-rating\">\n"));
            for n in 1..=rating.scale {
                let checked = if answer == Some(&Answer::Rating(n)) {
                    " checked"
                } else {
                    ""
                };
                html.push_str(&format!(
                    "{ind}  <label><input type=\"radio\" name=\"{name}\" value=\"{n}\"{checked}> {n}</label>\n"
                ));
            }
            html.push_str(&format!("{ind}</div>\n"));
        }
        QuestionKind::Text => {
            html.push_str(&format!(
                "{ind}<textarea id=\"{id}\" name=\"{name}\" class=\"{prefix}-textarea\" rows=\"4\">{}</textarea>\n",
                escape_html(answer.and_then(Answer::as_str).unwrap_or_default())
            ));
        }
    }

    html
}

fn field_id(question: &Question) -> String {
    escape_html(&question.id().as_str().replace(['.', ' '], "-"))
}

fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// Chat prompts put options on separate lines.
fn escape_multiline(s: &str) -> String {
    escape_html(s).replace('\n', "<br>")
}

/// Generate default CSS styles.
fn generate_styles(prefix: &str) -> String {
    format!(
        r#"  <style>
    .{prefix}-container {{
      max-width: 720px;
      margin: 2rem auto;
      padding: 1rem;
      font-family: sans-serif;
    }}
    .{prefix}-canvas {{
      min-height: 8rem;
      padding: 1rem;
      border: 2px dashed #ccc;
    }}
    .{prefix}-canvas-placeholder {{
      color: #777;
      text-align: center;
    }}
    .{prefix}-question {{
      margin: 0.5rem 0;
      padding: 0.75rem;
      background: #f5f5f5;
    }}
    .{prefix}-question-type, .{prefix}-question-range {{
      font-size: 0.85rem;
      color: #555;
    }}
    .{prefix}-message {{
      margin: 0.25rem 0;
      padding: 0.5rem 0.75rem;
      max-width: 80%;
      border-radius: 8px;
    }}
    .{prefix}-message-bot {{
      background: #f0f0f0;
    }}
    .{prefix}-message-user {{
      margin-left: auto;
      background: #dcf8c6;
    }}
    .{prefix}-progress {{
      height: 6px;
      background: #eee;
    }}
    .{prefix}-progress-fill, .{prefix}-bar {{
      height: 100%;
      min-height: 6px;
      background: #1fb8cd;
    }}
    .{prefix}-metric-value {{
      font-size: 1.5rem;
      font-weight: bold;
    }}
    .{prefix}-input, .{prefix}-textarea {{
      width: 100%;
      padding: 0.5rem;
      box-sizing: border-box;
    }}
    .{prefix}-radio-option, .{prefix}-checkbox-option {{
      margin: 0.25rem 0;
    }}
    .{prefix}-nav {{
      display: flex;
      justify-content: space-between;
      margin-top: 1rem;
    }}
    .{prefix}-voice, .{prefix}-dialogue {{
      padding: 0.5rem;
      border-left: 3px solid #1fb8cd;
    }}
    .{prefix}-chart table {{
      width: 100%;
    }}
  </style>
"#
    )
}

#[cfg(test)]
mod tests {
    use surveyai::Language;

    use super::*;

    fn fragment() -> HtmlSurface {
        HtmlSurface::new(HtmlOptions::new().full_document(false))
    }

    #[test]
    fn html_options_chaining() {
        let options = HtmlOptions::new()
            .with_title("Test Survey")
            .with_styles(false)
            .full_document(true)
            .with_class_prefix("sv");

        assert_eq!(options.title, Some("Test Survey".to_string()));
        assert!(!options.include_styles);
        assert!(options.full_document);
        assert_eq!(options.class_prefix, "sv");
    }

    #[test]
    fn escapes_special_characters() {
        assert_eq!(
            escape_html("<a href=\"x\">Tom & 'Jerry'</a>"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn transcript_marks_speakers() {
        let mut surface = fragment();
        surface.render_transcript(&[ChatTurn::bot("Hi <there>"), ChatTurn::user("Hello")]);
        let html = surface.finish();
        assert!(html.contains("survey-message-bot\">Hi &lt;there&gt;</div>"));
        assert!(html.contains("survey-message-user\">Hello</div>"));
    }

    #[test]
    fn form_prefills_answer() {
        let question = Question::multiple_select("assets", "Which assets?", ["TV", "Radio", "Car"]);
        let view = MobileView {
            question: Some(question),
            position: 1,
            total: 4,
            answer: Some(Answer::Selections(vec!["TV".into(), "Car".into()])),
        };
        let mut surface = fragment();
        surface.render_form(&view);
        let html = surface.finish();

        assert!(html.contains("width: 25%"));
        assert!(html.contains("Question 1 of 4"));
        assert!(html.contains("value=\"TV\" checked"));
        assert!(html.contains("value=\"Radio\">"));
        assert!(html.contains("value=\"Car\" checked"));
    }

    #[test]
    fn form_checks_option_containing_comma() {
        let question =
            Question::multiple_select("payments", "How do you pay?", ["Cash, coins", "Card"]);
        let view = MobileView {
            question: Some(question),
            position: 1,
            total: 1,
            answer: Some(Answer::Selections(vec!["Cash, coins".into()])),
        };
        let mut surface = fragment();
        surface.render_form(&view);
        let html = surface.finish();

        assert!(html.contains("value=\"Cash, coins\" checked"));
        assert!(html.contains("value=\"Card\">"));
    }

    #[test]
    fn form_prefills_number_and_rating() {
        let mut surface = fragment();
        surface.render_form(&MobileView {
            question: Some(Question::number("size", "Members?", Some(1), Some(20))),
            position: 1,
            total: 2,
            answer: Some(Answer::Number(6)),
        });
        surface.render_form(&MobileView {
            question: Some(Question::rating("opinion", "Opinion?", 5)),
            position: 2,
            total: 2,
            answer: Some(Answer::Rating(4)),
        });
        let html = surface.finish();

        assert!(html.contains("max=\"20\" value=\"6\">"));
        assert!(html.contains("value=\"4\" checked> 4"));
        assert!(html.contains("value=\"3\"> 3"));
    }

    #[test]
    fn completed_form() {
        let view = MobileView {
            question: None,
            position: 3,
            total: 3,
            answer: None,
        };
        let mut surface = fragment();
        surface.render_form(&view);
        assert!(surface.body().contains("Survey completed!"));
    }

    #[test]
    fn dialogue_carries_language() {
        let mut surface = fragment();
        surface.render_dialogue(&DialogueLine {
            language: Language::Tamil,
            text: "நன்றி!".to_string(),
        });
        assert!(surface.body().contains("lang=\"ta\""));
    }

    #[test]
    fn bars_are_relative_to_peak() {
        let mut surface = fragment();
        surface.render_series(&dashboard::device_series());
        let html = surface.finish();
        assert!(html.contains("survey-chart-bar"));
        assert!(html.contains("<th>Android</th><td>450</td>"));
        assert!(html.contains("width: 100.0%"));
        assert!(html.contains("width: 71.1%"));
    }

    #[test]
    fn doughnut_shows_counts() {
        let mut surface = fragment();
        surface.render_series(&dashboard::progress_series());
        let html = surface.finish();
        assert!(html.contains("survey-chart-doughnut"));
        assert!(html.contains("<td>1247</td>"));
        assert!(html.contains("<figcaption>Survey Progress</figcaption>"));
    }

    #[test]
    fn full_document_wraps_body() {
        let mut surface = HtmlSurface::new(HtmlOptions::new().with_title("Q & A"));
        surface.render_voice_text("Press 1");
        let html = surface.finish();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Q &amp; A</title>"));
        assert!(html.contains("<style>"));
        assert!(html.contains("<div class=\"survey-voice\">Press 1</div>"));
    }
}
