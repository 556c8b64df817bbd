//! Dialoguer-driven walkthrough of the application sections.

use std::time::Instant;
use std::{fs, thread};

use dialoguer::{
    FuzzySelect, Input, Select,
    theme::{ColorfulTheme, SimpleTheme, Theme},
};
use surveyai::app::IDENTIFIER_TYPES;
use surveyai::{
    AppContext, AvatarInput, ChannelHandler, ChannelInput, ChannelKind, Language, MobileInput,
    QuestionKind, RenderOutput, RenderSurface, Section, SurveyError, catalog,
};
use surveyai_html::{HtmlOptions, to_html_with_options};
use thiserror::Error;
use tracing::{debug, info};

use crate::terminal::TerminalSurface;

/// Error type for the terminal walkthrough.
#[derive(Debug, Error)]
pub enum WizardError {
    /// User cancelled (e.g., pressed Ctrl+C or Escape).
    #[error("Cancelled by user")]
    Cancelled,

    /// An I/O error occurred during prompting.
    #[error("Dialoguer error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    #[error("Failed to write '{path}': {source}")]
    Export {
        path: String,
        source: std::io::Error,
    },
}

/// Helper to check if a dialoguer error is a cancellation (Ctrl+C / Escape)
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

fn prompt_error(err: dialoguer::Error) -> WizardError {
    if is_cancelled(&err) {
        WizardError::Cancelled
    } else {
        WizardError::Dialoguer(err)
    }
}

pub struct Wizard {
    app: AppContext,
    surface: TerminalSurface,
    colorful: ColorfulTheme,
    plain: bool,
    metrics_seen: Instant,
}

impl Wizard {
    pub fn new(app: AppContext, plain: bool) -> Self {
        Self {
            app,
            surface: TerminalSurface,
            colorful: ColorfulTheme::default(),
            plain,
            metrics_seen: Instant::now(),
        }
    }

    fn theme(&self) -> &dyn Theme {
        if self.plain {
            &SimpleTheme as &dyn Theme
        } else {
            &self.colorful
        }
    }

    fn select(&self, prompt: &str, items: &[&str]) -> Result<usize, WizardError> {
        Select::with_theme(self.theme())
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .map_err(prompt_error)
    }

    fn input(&self, prompt: &str) -> Result<String, WizardError> {
        Input::<String>::with_theme(self.theme())
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)
    }

    fn show<T: AsRef<str>>(&mut self, result: &Result<T, SurveyError>) {
        let notice = self.app.notice_for(result);
        self.surface.notice(&notice);
    }

    fn play(&mut self, result: Result<RenderOutput, SurveyError>) -> bool {
        match result {
            Ok(output) => {
                self.surface.play(&output);
                true
            }
            Err(err) => {
                self.show::<&str>(&Err(err));
                false
            }
        }
    }

    /// Run until the user quits.
    pub fn run(&mut self) -> Result<(), WizardError> {
        println!("SurveyAI - author once, survey on every channel.");
        loop {
            let choice = self.select(
                "Where to?",
                &[
                    "Survey builder",
                    "Deployment",
                    "Sample survey",
                    "Supervisor dashboard",
                    "Paradata dashboard",
                    "Quit",
                ],
            )?;
            let section = match choice {
                0 => Section::Builder,
                1 => Section::Deployment,
                2 => Section::Sample,
                3 => Section::Supervisor,
                4 => Section::Paradata,
                _ => {
                    self.app.show_section(Section::Landing);
                    return Ok(());
                }
            };
            self.app.show_section(section);

            match section {
                Section::Builder => self.builder()?,
                Section::Deployment => self.deployment()?,
                Section::Sample => self.sample(),
                Section::Supervisor | Section::Paradata => {
                    self.app.advance_metrics(self.metrics_seen.elapsed());
                    self.metrics_seen = Instant::now();
                    self.app.render_dashboard(&mut self.surface);
                }
                Section::Landing => {}
            }
        }
    }

    fn builder(&mut self) -> Result<(), WizardError> {
        loop {
            self.app.session().render_canvas(&mut self.surface);
            let choice = self.select(
                "Builder",
                &[
                    "Generate with AI",
                    "Add catalog question",
                    "Add blank question",
                    "Remove question",
                    "Edit question",
                    "Clear draft",
                    "Preview",
                    "Save",
                    "Test on a channel",
                    "Export HTML",
                    "Deploy",
                    "Back",
                ],
            )?;
            match choice {
                0 => self.generate()?,
                1 => self.add_catalog()?,
                2 => self.add_blank()?,
                3 => self.remove()?,
                4 => {
                    let id = self.input("Question id to edit")?;
                    let result = self.app.edit_question(id.trim());
                    self.show(&result);
                }
                5 => {
                    self.app.session_mut().clear();
                    self.show(&Ok::<_, SurveyError>("Draft cleared"));
                }
                6 => {
                    let result = self.app.session().preview();
                    self.show(&result);
                }
                7 => {
                    let result = self.app.session().save();
                    self.show(&result);
                }
                8 => self.test_channel()?,
                9 => self.export()?,
                10 => {
                    let result = self.app.deploy();
                    self.show(&result);
                    if result.is_ok() {
                        return self.deployment();
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn generate(&mut self) -> Result<(), WizardError> {
        let prompt = self.input("Describe your survey")?;
        if !prompt.trim().is_empty() {
            println!("Generating...");
            thread::sleep(self.app.timings().generation());
        }
        let result = self.app.generate_survey(&prompt);
        self.show(&result);
        Ok(())
    }

    fn add_catalog(&mut self) -> Result<(), WizardError> {
        let samples = catalog::sample_questions();
        let items: Vec<&str> = samples.iter().map(|q| q.text()).collect();
        let Some(index) = FuzzySelect::with_theme(self.theme())
            .with_prompt("Catalog question")
            .items(&items)
            .interact_opt()
            .map_err(prompt_error)?
        else {
            return Ok(());
        };
        let result = self
            .app
            .session_mut()
            .add_from_catalog(samples[index].id().as_str())
            .map(|id| format!("Added {id}"));
        self.show(&result);
        Ok(())
    }

    fn add_blank(&mut self) -> Result<(), WizardError> {
        let labels: Vec<String> = QuestionKind::TAGS
            .iter()
            .map(|tag| tag.replace('_', " "))
            .collect();
        let items: Vec<&str> = labels.iter().map(String::as_str).collect();
        let index = self.select("Question type", &items)?;
        let result = self
            .app
            .session_mut()
            .add_blank(QuestionKind::TAGS[index])
            .map(|id| format!("Added {id}"));
        self.show(&result);
        Ok(())
    }

    fn remove(&mut self) -> Result<(), WizardError> {
        let id = self.input("Question id to remove")?;
        let result = self
            .app
            .session_mut()
            .remove_question(id.trim())
            .map(|_| "Question deleted successfully");
        self.show(&result);
        Ok(())
    }

    fn export(&mut self) -> Result<(), WizardError> {
        let path = self.input("File name")?;
        let path = if path.trim().is_empty() {
            "survey.html".to_string()
        } else {
            path.trim().to_string()
        };
        let html = to_html_with_options(
            self.app.session(),
            HtmlOptions::new().with_title("SurveyAI Draft"),
        );
        fs::write(&path, html).map_err(|source| WizardError::Export {
            path: path.clone(),
            source,
        })?;
        info!(%path, "draft exported");
        self.show(&Ok::<_, SurveyError>(format!("Draft written to {path}")));
        Ok(())
    }

    fn deployment(&mut self) -> Result<(), WizardError> {
        loop {
            let mut items: Vec<String> = ChannelKind::ALL
                .iter()
                .map(|kind| format!("Configure {}", kind.display_name()))
                .collect();
            items.push("Pre-populate respondent data".to_string());
            items.push("Back".to_string());
            let items: Vec<&str> = items.iter().map(String::as_str).collect();
            let choice = self.select("Deployment channels", &items)?;
            match ChannelKind::ALL.get(choice) {
                Some(&kind) => {
                    let notice = self.app.channel_config_notice(kind);
                    self.surface.notice(&notice);
                }
                None if choice == ChannelKind::ALL.len() => self.prepopulate()?,
                None => return Ok(()),
            }
        }
    }

    fn prepopulate(&mut self) -> Result<(), WizardError> {
        let index = self.select("Identifier type", &IDENTIFIER_TYPES)?;
        let identifier_type = IDENTIFIER_TYPES[index];
        let identifier = self.input(identifier_type)?;
        if !identifier.trim().is_empty() {
            println!("Fetching...");
            thread::sleep(self.app.timings().prepopulate());
        }
        let result = self.app.prepopulate(identifier_type, &identifier);
        self.show(&result);
        Ok(())
    }

    fn sample(&mut self) {
        println!("National sample survey questions:");
        self.surface.render_questions(&catalog::sample_questions());
    }

    fn test_channel(&mut self) -> Result<(), WizardError> {
        let names: Vec<&str> = ChannelKind::ALL.iter().map(|k| k.display_name()).collect();
        let kind = ChannelKind::ALL[self.select("Channel", &names)?];
        self.app.select_channel(kind);
        debug!(channel = %kind, "channel preview");

        let started = self.app.session_mut().start_channel(kind);
        if !self.play(started) {
            return Ok(());
        }

        while !self.app.session().channel(kind).progress().is_completed() {
            let Some(input) = self.channel_input(kind)? else {
                break;
            };
            match input {
                Step::Input(input) => {
                    let result = self.app.session_mut().advance_channel(input);
                    self.play(result);
                }
                Step::Keys(keys) => {
                    for key in keys {
                        let result = self
                            .app
                            .session_mut()
                            .advance_channel(ChannelInput::Ivr(key));
                        if !self.play(result) {
                            break;
                        }
                    }
                }
                Step::Replay => {
                    let result = self.app.session().replay_voice();
                    self.play(result);
                }
            }
        }
        Ok(())
    }

    /// Ask for the next input on `kind`; `None` leaves the preview.
    fn channel_input(&mut self, kind: ChannelKind) -> Result<Option<Step>, WizardError> {
        let step = match kind {
            ChannelKind::Chat => {
                let text = self.input("Reply (empty to leave)")?;
                (!text.is_empty()).then(|| Step::Input(ChannelInput::Chat(text)))
            }
            ChannelKind::Ivr => {
                let keys = self.input("Keys 0-9 * # (r to replay, empty to leave)")?;
                match keys.trim() {
                    "" => None,
                    "r" | "R" => Some(Step::Replay),
                    other => Some(Step::Keys(
                        other.chars().filter(|c| !c.is_whitespace()).collect(),
                    )),
                }
            }
            ChannelKind::Mobile => {
                match self.select("Mobile", &["Answer", "Next", "Previous", "Leave"])? {
                    0 => {
                        let text = self.input("Answer")?;
                        Some(Step::Input(ChannelInput::Mobile(MobileInput::Answer(text))))
                    }
                    1 => Some(Step::Input(ChannelInput::Mobile(MobileInput::Next))),
                    2 => Some(Step::Input(ChannelInput::Mobile(MobileInput::Prev))),
                    _ => None,
                }
            }
            ChannelKind::Avatar => {
                let current = match self.app.session().channel(kind) {
                    ChannelHandler::Avatar(avatar) => avatar.language(),
                    _ => Language::default(),
                };
                let prompt = format!("Avatar ({})", current.label());
                match self.select(&prompt, &["Answer", "Change language", "Leave"])? {
                    0 => {
                        let text = self.input("Answer")?;
                        Some(Step::Input(ChannelInput::Avatar(AvatarInput::Answer(text))))
                    }
                    1 => {
                        let labels: Vec<String> =
                            Language::ALL.iter().map(|l| l.label()).collect();
                        let items: Vec<&str> = labels.iter().map(String::as_str).collect();
                        let language = Language::ALL[self.select("Language", &items)?];
                        Some(Step::Input(ChannelInput::Avatar(AvatarInput::SelectLanguage(
                            language.code().to_string(),
                        ))))
                    }
                    _ => None,
                }
            }
        };
        Ok(step)
    }
}

enum Step {
    Input(ChannelInput),
    /// Keypad presses, sent one at a time.
    Keys(Vec<char>),
    Replay,
}
