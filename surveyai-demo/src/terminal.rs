//! Plain-text rendering surface for the terminal.

use std::thread;

use surveyai::{
    ChartKind, ChartSeries, ChartSurface, ChatTurn, DialogueLine, MetricCard, MobileView, Notice,
    ProgressBar, Question, QuestionKind, RenderOutput, RenderSurface, Speaker,
};

const BAR_WIDTH: f64 = 40.0;

#[derive(Debug, Default)]
pub struct TerminalSurface;

impl TerminalSurface {
    /// Show the immediate events, wait out the follow-up delay, then show the follow-up.
    pub fn play(&mut self, output: &RenderOutput) {
        for event in &output.events {
            event.render_on(self);
        }
        if let Some(follow_up) = &output.follow_up {
            thread::sleep(follow_up.after);
            follow_up.event.render_on(self);
        }
    }

    pub fn notice(&mut self, notice: &Notice) {
        let marker = if notice.is_error() { "!" } else { "*" };
        println!("\n{marker} {}\n", notice.text);
    }
}

impl RenderSurface for TerminalSurface {
    fn render_questions(&mut self, questions: &[Question]) {
        println!();
        for (i, question) in questions.iter().enumerate() {
            println!(
                "{:>2}. [{}] {} ({})",
                i + 1,
                question.id(),
                question.text(),
                question.kind().label()
            );
            match question.kind() {
                QuestionKind::MultipleChoice(choice) | QuestionKind::MultipleSelect(choice) => {
                    for option in &choice.options {
                        println!("      - {option}");
                    }
                }
                QuestionKind::Number(number) => println!("      number{}", number.describe_range()),
                QuestionKind::Rating(rating) => println!("      scale 1 to {}", rating.scale),
                QuestionKind::Text => {}
            }
        }
        println!();
    }

    fn render_empty_canvas(&mut self) {
        println!("\n  (empty) Drag questions here or use AI to generate survey\n");
    }

    fn render_transcript(&mut self, turns: &[ChatTurn]) {
        for turn in turns {
            let who = match turn.speaker {
                Speaker::Bot => "Bot",
                Speaker::User => "You",
            };
            for (i, line) in turn.text.lines().enumerate() {
                if i == 0 {
                    println!("{who}: {line}");
                } else {
                    println!("     {line}");
                }
            }
        }
    }

    fn render_form(&mut self, view: &MobileView) {
        let filled = usize::from(view.progress_percent()) / 5;
        println!(
            "\n[{}{}] {}",
            "#".repeat(filled),
            ".".repeat(20 - filled),
            view.caption()
        );
        match &view.question {
            Some(question) => {
                println!("{}", question.text());
                if let Some(options) = question.kind().options() {
                    for (i, option) in options.iter().enumerate() {
                        println!("  {}. {option}", i + 1);
                    }
                }
                match &view.answer {
                    Some(answer) => println!("Answer: {answer}"),
                    None => println!("Answer: -"),
                }
            }
            None => println!("Survey completed! Thank you for your responses."),
        }
    }

    fn render_voice_text(&mut self, text: &str) {
        println!("(voice) {text}");
    }

    fn render_dialogue(&mut self, line: &DialogueLine) {
        println!("Avatar [{}]: {}", line.language.code(), line.text.replace('\n', " | "));
    }
}

impl ChartSurface for TerminalSurface {
    fn render_series(&mut self, series: &ChartSeries) {
        println!("\n{} - {}", series.title, series.series_label);
        let scale = match series.kind {
            ChartKind::Doughnut => series.total(),
            ChartKind::Line | ChartKind::Bar => {
                series.values.iter().copied().fold(0.0_f64, f64::max)
            }
        };
        let width = series.labels.iter().map(String::len).max().unwrap_or(0);
        for (label, value) in series.points() {
            let share = if scale > 0.0 { value / scale } else { 0.0 };
            let bar = "=".repeat((share * BAR_WIDTH).round() as usize);
            match series.kind {
                ChartKind::Doughnut => {
                    println!("  {label:<width$} {bar} {value} ({:.1}%)", share * 100.0)
                }
                ChartKind::Line | ChartKind::Bar => println!("  {label:<width$} {bar} {value}"),
            }
        }
    }

    fn render_metrics(&mut self, cards: &[MetricCard], bars: &[ProgressBar]) {
        println!();
        for card in cards {
            println!("  {:>5.1}%  {}", card.percent, card.label);
        }
        for bar in bars {
            let filled = ((bar.width / 100.0) * BAR_WIDTH).round() as usize;
            println!(
                "  [{}{}] {:.1}% {}",
                "#".repeat(filled),
                ".".repeat(BAR_WIDTH as usize - filled.min(BAR_WIDTH as usize)),
                bar.width,
                bar.label
            );
        }
    }
}
