//! Application-level navigation and user notices.

use std::fmt;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info};

use crate::dashboard::{self, LiveMetrics};
use crate::{AuthoringSession, ChannelKind, ChartSurface, QuestionId, SurveyError, Timings};

/// Respondent identifiers accepted for data pre-population.
pub const IDENTIFIER_TYPES: [&str; 3] = ["Household ID", "Aadhaar Number", "Ration Card Number"];

const GENERATED: &str = "AI survey generated successfully! Based on your prompt about digital literacy and government services.";

/// Most metric updates one `advance_metrics` call applies.
const MAX_METRIC_TICKS: u32 = 120;

/// A top-level page of the application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Section {
    #[default]
    Landing,
    Builder,
    Deployment,
    Sample,
    Supervisor,
    Paradata,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Landing,
        Section::Builder,
        Section::Deployment,
        Section::Sample,
        Section::Supervisor,
        Section::Paradata,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Section::Landing => "landing",
            Section::Builder => "builder",
            Section::Deployment => "deployment",
            Section::Sample => "sample",
            Section::Supervisor => "supervisor",
            Section::Paradata => "paradata",
        }
    }

    pub fn from_id(id: &str) -> Option<Section> {
        Self::ALL.into_iter().find(|section| section.id() == id)
    }

    /// Whether this section hosts the analytics charts.
    pub fn shows_dashboard(self) -> bool {
        matches!(self, Section::Supervisor | Section::Paradata)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A transient message shown at the top of the active section.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    /// How long the notice stays visible.
    pub ttl: Duration,
}

impl Notice {
    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Respondent record fetched ahead of an interview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prepopulation {
    pub identifier_type: String,
    pub identifier: String,
}

/// The running application: the authoring session plus navigation state.
#[derive(Debug)]
pub struct AppContext {
    session: AuthoringSession,
    section: Section,
    channel: ChannelKind,
    timings: Timings,
    prepopulated: Option<Prepopulation>,
    metrics: LiveMetrics,
    metrics_pending: Duration,
    rng: SmallRng,
}

impl AppContext {
    pub fn new(session: AuthoringSession, timings: Timings) -> Self {
        Self {
            session,
            section: Section::default(),
            channel: ChannelKind::Chat,
            timings,
            prepopulated: None,
            metrics: LiveMetrics::default(),
            metrics_pending: Duration::ZERO,
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Use a fixed seed for the simulated metric drift.
    pub fn with_metrics_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    pub fn session(&self) -> &AuthoringSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut AuthoringSession {
        &mut self.session
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn show_section(&mut self, section: Section) {
        debug!(%section, "show section");
        self.section = section;
    }

    /// The channel tab open in the builder preview.
    pub fn active_channel(&self) -> ChannelKind {
        self.channel
    }

    pub fn select_channel(&mut self, kind: ChannelKind) {
        debug!(channel = %kind, "select channel tab");
        self.channel = kind;
    }

    /// Generate a survey and return the success message.
    pub fn generate_survey(&mut self, prompt: &str) -> Result<String, SurveyError> {
        let questions = self.session.generate_from_prompt(prompt)?;
        debug!(count = questions.len(), "survey generated");
        Ok(GENERATED.to_string())
    }

    /// The notice shown by a question's edit button. Editing itself is not offered.
    pub fn edit_question(&self, id: &str) -> Result<String, SurveyError> {
        if !self.session.draft().contains(&QuestionId::new(id)) {
            return Err(SurveyError::not_found(id));
        }
        debug!(%id, "edit requested");
        Ok(format!("Question editor would open for question {id} (demo mode)"))
    }

    /// Fetch respondent data for an identifier from the government registry.
    ///
    /// The lookup is simulated; callers show `Timings::prepopulate` worth of progress
    /// first. A blank identifier is a `Validation` error.
    pub fn prepopulate(
        &mut self,
        identifier_type: &str,
        identifier: &str,
    ) -> Result<String, SurveyError> {
        if !IDENTIFIER_TYPES.contains(&identifier_type) {
            return Err(SurveyError::invalid_input(format!(
                "unknown identifier type '{identifier_type}'"
            )));
        }
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(SurveyError::validation("Please enter an identifier value"));
        }
        info!(%identifier_type, "respondent data pre-populated");
        self.prepopulated = Some(Prepopulation {
            identifier_type: identifier_type.to_string(),
            identifier: identifier.to_string(),
        });
        Ok("Data successfully pre-populated from government database!".to_string())
    }

    /// The last successful pre-population.
    pub fn prepopulated(&self) -> Option<&Prepopulation> {
        self.prepopulated.as_ref()
    }

    pub fn metrics(&self) -> &LiveMetrics {
        &self.metrics
    }

    /// Let `elapsed` of simulated field activity pass on the dashboard.
    ///
    /// Applies one metric update per `Timings::metrics_refresh` interval, keeping the
    /// remainder for the next call. A zero interval updates once per call. Returns
    /// the number of updates applied.
    pub fn advance_metrics(&mut self, elapsed: Duration) -> u32 {
        let interval = self.timings.metrics_refresh();
        if interval.is_zero() {
            self.metrics.tick(&mut self.rng);
            return 1;
        }

        self.metrics_pending += elapsed;
        let mut ticks = 0;
        while self.metrics_pending >= interval {
            if ticks == MAX_METRIC_TICKS {
                self.metrics_pending = Duration::ZERO;
                break;
            }
            self.metrics.tick(&mut self.rng);
            self.metrics_pending -= interval;
            ticks += 1;
        }
        debug!(ticks, "dashboard metrics advanced");
        ticks
    }

    /// Mark the draft ready for deployment and open the deployment section.
    pub fn deploy(&mut self) -> Result<String, SurveyError> {
        let count = self.session.require_questions()?;
        info!(questions = count, "survey ready for deployment");
        self.show_section(Section::Deployment);
        Ok("Survey ready for deployment! Configure your channels below.".to_string())
    }

    /// The notice shown by a channel's configure button.
    pub fn channel_config_notice(&self, kind: ChannelKind) -> Notice {
        self.success(format!(
            "{} configuration panel would open here. Settings include: API keys, phone numbers, voice settings, and deployment parameters.",
            kind.display_name()
        ))
    }

    /// Turn the outcome of an operation into a notice.
    pub fn notice_for<T: AsRef<str>>(&self, result: &Result<T, SurveyError>) -> Notice {
        match result {
            Ok(text) => self.success(text.as_ref().to_string()),
            Err(err) => Notice {
                level: NoticeLevel::Error,
                text: err.message(),
                ttl: self.timings.notice_ttl(),
            },
        }
    }

    /// Render the charts if a dashboard section is active. Returns whether it did.
    pub fn render_dashboard(&self, surface: &mut dyn ChartSurface) -> bool {
        if !self.section.shows_dashboard() {
            debug!(section = %self.section, "not a dashboard section, skipping charts");
            return false;
        }
        dashboard::render_dashboard(surface);
        self.metrics.render(surface);
        true
    }

    fn success(&self, text: String) -> Notice {
        Notice {
            level: NoticeLevel::Success,
            text,
            ttl: self.timings.notice_ttl(),
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(AuthoringSession::new(), Timings::default())
    }
}
