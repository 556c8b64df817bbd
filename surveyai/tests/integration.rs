//! Integration tests for surveyai

use std::sync::{Arc, Mutex};

use surveyai::{
    Answer, AppContext, AuthoringSession, AvatarInput, ChannelHandler, ChannelInput, ChannelKind,
    ChatTurn, DialogueLine, DraftEvent, Language, MobileInput, MobileView, Question,
    RenderEvent, RenderSurface, ScriptedRespondent, Section, SessionState, SurveyError,
    Timings,
};

fn session() -> AuthoringSession {
    AuthoringSession::new().with_channel_settings(&Timings::instant(), Language::English)
}

fn two_questions() -> AuthoringSession {
    let mut session = session();
    session
        .add_question(Question::multiple_choice(
            "transport",
            "How do you usually travel to work?",
            ["Bus", "Train", "Walk"],
        ))
        .unwrap();
    session
        .add_question(Question::rating("satisfaction", "How satisfied are you?", 5))
        .unwrap();
    session
}

fn state(session: &AuthoringSession, kind: ChannelKind) -> SessionState {
    session.channel(kind).progress().state()
}

#[test]
fn adds_list_back_in_call_order() {
    let mut session = session();
    session.add_from_catalog("nss_3").unwrap();
    session.add_blank("multiple_choice").unwrap();
    session.add_from_catalog("nss_1").unwrap();

    let ids: Vec<_> = session
        .list_questions()
        .iter()
        .map(|q| q.id().as_str())
        .collect();
    assert_eq!(ids, ["nss_3", "q_1", "nss_1"]);
}

#[test]
fn duplicate_add_leaves_draft_unchanged() {
    let mut session = two_questions();
    let before = session.list_questions().to_vec();

    let err = session
        .add_question(Question::free_text("transport", "Anything else?"))
        .unwrap_err();

    assert!(matches!(err, SurveyError::DuplicateId(id) if id == "transport"));
    assert_eq!(session.list_questions(), before.as_slice());
}

#[test]
fn removing_last_question_signals_empty() {
    let mut session = session();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    session.subscribe(move |event, questions| {
        sink.lock().unwrap().push((event.clone(), questions.len()));
    });

    session.add_from_catalog("nss_5").unwrap();
    session.remove_question("nss_5").unwrap();

    assert!(session.draft().is_empty());
    assert_eq!(
        events.lock().unwrap().last(),
        Some(&(DraftEvent::Empty, 0))
    );
}

#[test]
fn removing_unknown_question_is_not_found() {
    let mut session = two_questions();
    assert!(matches!(
        session.remove_question("missing"),
        Err(SurveyError::NotFound(_))
    ));
    assert_eq!(session.draft().len(), 2);
}

#[test]
fn blank_prompt_leaves_draft_untouched() {
    let mut session = two_questions();
    let err = session.generate_from_prompt("").unwrap_err();
    assert_eq!(
        err,
        SurveyError::InvalidInput("Please enter a description for your survey".into())
    );
    assert_eq!(session.draft().len(), 2);
}

#[test]
fn generation_discards_prior_content() {
    let mut session = two_questions();
    let generated = session
        .generate_from_prompt("Access to government services")
        .unwrap();

    let ids: Vec<_> = session
        .list_questions()
        .iter()
        .map(|q| q.id().as_str())
        .collect();
    assert_eq!(ids, ["ai_1", "ai_2", "ai_3", "ai_4"]);
    assert_eq!(generated.as_slice(), session.list_questions());
}

#[test]
fn mobile_next_requires_answer() {
    let mut session = two_questions();
    session.start_channel(ChannelKind::Mobile).unwrap();

    let err = session
        .advance_channel(ChannelInput::Mobile(MobileInput::Next))
        .unwrap_err();
    assert!(matches!(err, SurveyError::Validation(_)));
    assert_eq!(state(&session, ChannelKind::Mobile), SessionState::InProgress(0));

    session
        .advance_channel(ChannelInput::Mobile(MobileInput::Answer("Train".into())))
        .unwrap();
    let output = session
        .advance_channel(ChannelInput::Mobile(MobileInput::Next))
        .unwrap();
    assert_eq!(state(&session, ChannelKind::Mobile), SessionState::InProgress(1));

    let Some(RenderEvent::Mobile(view)) = output.events.last() else {
        panic!("expected a mobile view, got {output:?}");
    };
    assert_eq!(view.caption(), "Question 2 of 2");
    assert_eq!(view.progress_percent(), 100);
}

#[test]
fn mobile_prev_floors_at_first_question() {
    let mut session = two_questions();
    session.start_channel(ChannelKind::Mobile).unwrap();
    session
        .advance_channel(ChannelInput::Mobile(MobileInput::Prev))
        .unwrap();
    assert_eq!(state(&session, ChannelKind::Mobile), SessionState::InProgress(0));
}

#[test]
fn chat_walks_through_two_questions() {
    let mut session = two_questions();
    assert_eq!(state(&session, ChannelKind::Chat), SessionState::NotStarted);

    session.start_channel(ChannelKind::Chat).unwrap();
    assert_eq!(state(&session, ChannelKind::Chat), SessionState::InProgress(0));

    session
        .advance_channel(ChannelInput::Chat("bus".into()))
        .unwrap();
    assert_eq!(state(&session, ChannelKind::Chat), SessionState::InProgress(1));

    session
        .advance_channel(ChannelInput::Chat("5".into()))
        .unwrap();
    assert_eq!(state(&session, ChannelKind::Chat), SessionState::Completed);

    let answers = session.channel(ChannelKind::Chat).progress().answers();
    assert_eq!(answers.get(&"transport".into()), Some(&Answer::Choice("Bus".into())));
    assert_eq!(answers.get(&"satisfaction".into()), Some(&Answer::Rating(5)));

    assert!(matches!(
        session.advance_channel(ChannelInput::Chat("again".into())),
        Err(SurveyError::Validation(_))
    ));
}

#[test]
fn chat_reply_arrives_as_follow_up() {
    let mut session = AuthoringSession::new();
    session.add_from_catalog("nss_2").unwrap();
    session.start_channel(ChannelKind::Chat).unwrap();

    let output = session
        .advance_channel(ChannelInput::Chat("6".into()))
        .unwrap();
    assert_eq!(output.events, [RenderEvent::Turn(ChatTurn::user("6"))]);

    let follow_up = output.follow_up.unwrap();
    assert_eq!(follow_up.after, Timings::default().chat_reply());
    assert_eq!(
        follow_up.event,
        RenderEvent::Turn(ChatTurn::bot(surveyai::CHAT_CLOSING))
    );
}

#[test]
fn ivr_unknown_key_keeps_cursor() {
    let mut session = two_questions();
    session.start_channel(ChannelKind::Ivr).unwrap();

    let err = session
        .advance_channel(ChannelInput::Ivr('7'))
        .unwrap_err();
    assert!(matches!(err, SurveyError::InvalidInput(_)));
    assert!(err.message().starts_with("Invalid key 7."));
    assert_eq!(state(&session, ChannelKind::Ivr), SessionState::InProgress(0));

    let output = session.advance_channel(ChannelInput::Ivr('2')).unwrap();
    assert_eq!(
        output.events,
        [RenderEvent::VoiceText(
            "You pressed 2. Processing your response...".into()
        )]
    );
    assert_eq!(state(&session, ChannelKind::Ivr), SessionState::InProgress(1));
}

#[test]
fn ivr_two_digit_number_completes() {
    let mut session = session();
    session
        .add_question(Question::number("age", "How old are you?", Some(18), Some(99)))
        .unwrap();
    session.start_channel(ChannelKind::Ivr).unwrap();

    for key in ['3', '7'] {
        session.advance_channel(ChannelInput::Ivr(key)).unwrap();
        assert_eq!(state(&session, ChannelKind::Ivr), SessionState::InProgress(0));
    }
    session.advance_channel(ChannelInput::Ivr('#')).unwrap();

    assert_eq!(state(&session, ChannelKind::Ivr), SessionState::Completed);
    assert_eq!(
        session.channel(ChannelKind::Ivr).progress().answers().get(&"age".into()),
        Some(&Answer::Number(37))
    );
}

#[test]
fn ivr_replay_schedules_playback_notice() {
    let mut session = two_questions();
    assert!(session.replay_voice().is_err());

    session.start_channel(ChannelKind::Ivr).unwrap();
    let output = session.replay_voice().unwrap();
    let follow_up = output.follow_up.unwrap();
    assert_eq!(
        follow_up.event,
        RenderEvent::VoiceText(
            "Voice message completed. Please select your response using the keypad below."
                .into()
        )
    );
}

#[test]
fn avatar_language_never_moves_cursor() {
    let mut session = two_questions();
    session.start_channel(ChannelKind::Avatar).unwrap();
    session
        .advance_channel(ChannelInput::Avatar(AvatarInput::Answer("Walk".into())))
        .unwrap();

    for code in ["hi", "te", "ta", "bn", "gu", "en"] {
        session
            .advance_channel(ChannelInput::Avatar(AvatarInput::SelectLanguage(code.into())))
            .unwrap();
        assert_eq!(state(&session, ChannelKind::Avatar), SessionState::InProgress(1));
    }

    assert!(
        session
            .advance_channel(ChannelInput::Avatar(AvatarInput::SelectLanguage("fr".into())))
            .is_err()
    );
    assert_eq!(state(&session, ChannelKind::Avatar), SessionState::InProgress(1));
}

#[test]
fn avatar_uses_translations() {
    let mut session = session();
    session.add_from_catalog("nss_2").unwrap();
    session.start_channel(ChannelKind::Avatar).unwrap();
    session
        .advance_channel(ChannelInput::Avatar(AvatarInput::SelectLanguage("hi".into())))
        .unwrap();

    let ChannelHandler::Avatar(avatar) = session.channel(ChannelKind::Avatar) else {
        panic!("avatar slot holds another channel");
    };
    assert_eq!(avatar.language(), Language::Hindi);
    let last = avatar.dialogue().last().unwrap();
    assert!(last.text.contains("आपके परिवार में कितने सदस्य हैं?"));
}

#[test]
fn regenerating_resets_every_channel() {
    let mut session = two_questions();
    for kind in ChannelKind::ALL {
        session.start_channel(kind).unwrap();
    }
    session.advance_channel(ChannelInput::Ivr('1')).unwrap();

    session.generate_from_prompt("Household assets").unwrap();

    for kind in ChannelKind::ALL {
        assert_eq!(state(&session, kind), SessionState::NotStarted, "{kind}");
        assert!(session.channel(kind).progress().answers().is_empty());
    }
}

#[test]
fn channels_need_questions() {
    let mut session = session();
    for kind in ChannelKind::ALL {
        assert!(matches!(
            session.start_channel(kind),
            Err(SurveyError::Validation(_))
        ));
        assert_eq!(state(&session, kind), SessionState::NotStarted);
    }
}

#[test]
fn scripted_respondent_completes_generated_survey() -> anyhow::Result<()> {
    let mut session = session();
    session.generate_from_prompt("Digital payments")?;

    let answers = ScriptedRespondent::new()
        .with_response("ai_1", "1")
        .with_response("ai_2", "4")
        .with_response("ai_3", "3")
        .with_response("ai_4", "5")
        .run(&mut session, ChannelKind::Ivr)?;

    assert_eq!(answers.len(), 4);
    assert_eq!(
        answers.get(&"ai_3".into()),
        Some(&Answer::Choice("36-50".into()))
    );
    Ok(())
}

#[derive(Default)]
struct Recorder {
    canvas: Vec<String>,
    empty: usize,
}

impl RenderSurface for Recorder {
    fn render_questions(&mut self, questions: &[Question]) {
        self.canvas = questions.iter().map(|q| q.text().to_string()).collect();
    }

    fn render_empty_canvas(&mut self) {
        self.empty += 1;
    }

    fn render_transcript(&mut self, _: &[ChatTurn]) {}

    fn render_form(&mut self, _: &MobileView) {}

    fn render_voice_text(&mut self, _: &str) {}

    fn render_dialogue(&mut self, _: &DialogueLine) {}
}

#[test]
fn canvas_shows_placeholder_when_empty() {
    let mut session = session();
    let mut surface = Recorder::default();

    session.render_canvas(&mut surface);
    assert_eq!(surface.empty, 1);

    session.add_blank("rating").unwrap();
    session.render_canvas(&mut surface);
    assert_eq!(surface.canvas, ["New rating question - click to edit"]);
}

#[test]
fn app_flow_from_builder_to_dashboard() {
    let mut app = AppContext::new(session(), Timings::instant());
    app.show_section(Section::Builder);

    let notice = app.notice_for(&app.session().preview());
    assert!(notice.is_error());

    let generated = app.generate_survey("Rural connectivity");
    assert!(!app.notice_for(&generated).is_error());

    app.select_channel(ChannelKind::Avatar);
    assert_eq!(app.active_channel(), ChannelKind::Avatar);

    app.deploy().unwrap();
    assert_eq!(app.section(), Section::Deployment);
}
