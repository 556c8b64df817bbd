//! The authoring session: the survey draft, its observers and the channel previews.

use tracing::{debug, info, warn};

use crate::{
    ChannelHandler, ChannelInput, ChannelKind, ChannelSet, Language, MockGenerator, Question,
    QuestionGenerator, QuestionId, QuestionKind, RenderOutput, RenderSurface, SurveyDraft,
    SurveyError, Timings, catalog,
};

/// What changed in the draft.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftEvent {
    /// A question was appended.
    Added(QuestionId),
    /// A question was removed.
    Removed(QuestionId),
    /// The whole draft was replaced by generated questions.
    Replaced,
    /// The draft was cleared on request.
    Cleared,
    /// The draft has become empty; show the empty-state placeholder.
    Empty,
}

type Observer = Box<dyn FnMut(&DraftEvent, &[Question]) + Send>;

/// Owns the survey draft for one authoring session.
///
/// Every mutation notifies the registered observers with the new question list.
/// Replacing, clearing or removing from the draft resets every channel preview;
/// appending keeps running previews, since their cursors stay valid.
pub struct AuthoringSession {
    draft: SurveyDraft,
    generator: Box<dyn QuestionGenerator + Send>,
    channels: ChannelSet,
    observers: Vec<Observer>,
    next_blank: u64,
}

impl AuthoringSession {
    /// Create a session with the mock generator and default delays.
    pub fn new() -> Self {
        Self::with_generator(MockGenerator)
    }

    /// Create a session using the given generation backend.
    pub fn with_generator(generator: impl QuestionGenerator + Send + 'static) -> Self {
        Self {
            draft: SurveyDraft::new(),
            generator: Box::new(generator),
            channels: ChannelSet::default(),
            observers: Vec::new(),
            next_blank: 1,
        }
    }

    /// Use these delays and avatar language for the channel previews.
    ///
    /// Rebuilds the channels, so any running preview is discarded.
    pub fn with_channel_settings(mut self, timings: &Timings, language: Language) -> Self {
        self.channels = ChannelSet::new(timings, language);
        self
    }

    /// Register an observer called after every draft mutation.
    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&DraftEvent, &[Question]) + Send + 'static,
    ) {
        self.observers.push(Box::new(observer));
    }

    /// The current draft.
    pub fn draft(&self) -> &SurveyDraft {
        &self.draft
    }

    /// Read-only snapshot of the questions in display order.
    pub fn list_questions(&self) -> &[Question] {
        self.draft.questions()
    }

    /// Append a question to the end of the draft.
    pub fn add_question(&mut self, question: Question) -> Result<(), SurveyError> {
        let id = question.id().clone();
        self.draft.push(question).inspect_err(|err| {
            warn!(%id, %err, "question rejected");
        })?;
        debug!(%id, "question added");
        self.notify(DraftEvent::Added(id));
        Ok(())
    }

    /// Add a question from the curated catalog by its id.
    pub fn add_from_catalog(&mut self, catalog_id: &str) -> Result<QuestionId, SurveyError> {
        let question =
            catalog::find_sample(catalog_id).ok_or_else(|| SurveyError::not_found(catalog_id))?;
        let id = question.id().clone();
        self.add_question(question)?;
        Ok(id)
    }

    /// Add a placeholder question of the palette type `tag` (e.g. `"rating"`).
    pub fn add_blank(&mut self, tag: &str) -> Result<QuestionId, SurveyError> {
        let kind = QuestionKind::blank(tag)?;
        let id = self.fresh_id();
        let text = format!("New {} question - click to edit", kind.label());
        self.add_question(Question::new(id.clone(), text, kind))?;
        Ok(id)
    }

    /// Remove the question with the given id.
    ///
    /// Unknown ids are reported as `NotFound`.
    pub fn remove_question(&mut self, id: &str) -> Result<Question, SurveyError> {
        let id = QuestionId::new(id);
        let removed = self.draft.remove(&id).inspect_err(|_| {
            warn!(%id, "remove of unknown question");
        })?;
        debug!(%id, remaining = self.draft.len(), "question removed");
        self.channels.reset_all();
        self.notify(DraftEvent::Removed(id));
        if self.draft.is_empty() {
            self.notify(DraftEvent::Empty);
        }
        Ok(removed)
    }

    /// Replace the draft with questions generated from `prompt`.
    ///
    /// A blank prompt is rejected before the generator is consulted and leaves the
    /// draft untouched, as does a generator error.
    pub fn generate_from_prompt(&mut self, prompt: &str) -> Result<Vec<Question>, SurveyError> {
        if prompt.trim().is_empty() {
            return Err(SurveyError::invalid_input(
                "Please enter a description for your survey",
            ));
        }
        let questions = self.generator.generate(prompt)?;
        self.draft.replace(questions.clone())?;
        info!(count = questions.len(), "draft replaced by generated questions");
        self.channels.reset_all();
        self.notify(DraftEvent::Replaced);
        if self.draft.is_empty() {
            self.notify(DraftEvent::Empty);
        }
        Ok(questions)
    }

    /// Remove every question.
    pub fn clear(&mut self) {
        self.draft.clear();
        self.channels.reset_all();
        debug!("draft cleared");
        self.notify(DraftEvent::Cleared);
        self.notify(DraftEvent::Empty);
    }

    /// Summary shown by the preview button.
    pub fn preview(&self) -> Result<String, SurveyError> {
        let count = self.require_questions()?;
        Ok(format!(
            "Survey preview: Your survey has {count} questions and is ready for testing."
        ))
    }

    /// Summary shown by the save button. Nothing is persisted.
    pub fn save(&self) -> Result<String, SurveyError> {
        let count = self.require_questions()?;
        Ok(format!("Survey saved successfully with {count} questions!"))
    }

    /// Draw the builder canvas: the questions, or the placeholder when empty.
    pub fn render_canvas(&self, surface: &mut dyn RenderSurface) {
        if self.draft.is_empty() {
            surface.render_empty_canvas();
        } else {
            surface.render_questions(self.draft.questions());
        }
    }

    /// The preview handler for a channel.
    pub fn channel(&self, kind: ChannelKind) -> &ChannelHandler {
        self.channels.get(kind)
    }

    /// Start (or restart) the preview session on a channel.
    pub fn start_channel(&mut self, kind: ChannelKind) -> Result<RenderOutput, SurveyError> {
        self.channels.get_mut(kind).start(&self.draft)
    }

    /// Feed respondent input to the channel it is tagged for.
    pub fn advance_channel(&mut self, input: ChannelInput) -> Result<RenderOutput, SurveyError> {
        let kind = input.channel();
        self.channels.get_mut(kind).advance(&self.draft, input)
    }

    /// Play the current voice prompt again.
    pub fn replay_voice(&self) -> Result<RenderOutput, SurveyError> {
        match self.channels.get(ChannelKind::Ivr) {
            ChannelHandler::Ivr(ivr) => ivr.replay(&self.draft),
            other => Err(SurveyError::invalid_input(format!(
                "the {} channel has no voice prompt",
                other.kind()
            ))),
        }
    }

    /// End the preview session on a channel.
    pub fn reset_channel(&mut self, kind: ChannelKind) {
        self.channels.get_mut(kind).reset();
    }

    pub(crate) fn require_questions(&self) -> Result<usize, SurveyError> {
        if self.draft.is_empty() {
            return Err(SurveyError::validation("Please add some questions first!"));
        }
        Ok(self.draft.len())
    }

    fn fresh_id(&mut self) -> QuestionId {
        loop {
            let id = QuestionId::new(format!("q_{}", self.next_blank));
            self.next_blank += 1;
            if !self.draft.contains(&id) {
                return id;
            }
        }
    }

    fn notify(&mut self, event: DraftEvent) {
        let questions = self.draft.questions();
        for observer in &mut self.observers {
            observer(&event, questions);
        }
    }
}

impl Default for AuthoringSession {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AuthoringSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthoringSession")
            .field("draft", &self.draft)
            .field("channels", &self.channels)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
