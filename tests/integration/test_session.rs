//! End-to-end integration tests for the Goethe Coach session loop.
//!
//! These tests drive complete mode runs through the public API with a
//! scripted oracle and frontend, validating the flow from level
//! selection through task generation, evaluation, and statistics.

use std::collections::VecDeque;
use std::sync::Mutex;

use coach_core::{
    CoachError, ExercisePrompt, Feedback, FeedbackSignal, Frontend, InstructionSet, Level, Mode,
    ModeSession, Oracle, OracleErrorKind, Result, SessionContext, UserInput,
};

/// An oracle that replays a fixed script of replies and records every
/// instruction set it was asked to complete.
struct ScriptedOracle {
    replies: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<InstructionSet>>,
}

impl ScriptedOracle {
    fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(ToString::to_string).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }

    fn call(&self, index: usize) -> InstructionSet {
        self.calls.lock().expect("calls lock")[index].clone()
    }
}

#[async_trait::async_trait]
impl Oracle for ScriptedOracle {
    async fn complete(&self, instructions: &InstructionSet) -> Result<String> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(instructions.clone());
        self.replies
            .lock()
            .expect("replies lock")
            .pop_front()
            .ok_or_else(|| {
                CoachError::oracle_unavailable(OracleErrorKind::Network, "connection refused")
            })
    }
}

/// A frontend that replays scripted inputs and captures everything shown.
#[derive(Default)]
struct ScriptedFrontend {
    inputs: VecDeque<UserInput>,
    messages: Vec<String>,
    tasks: Vec<ExercisePrompt>,
    feedbacks: Vec<Feedback>,
}

impl ScriptedFrontend {
    fn with_inputs(inputs: &[UserInput]) -> Self {
        Self {
            inputs: inputs.iter().cloned().collect(),
            ..Self::default()
        }
    }

    fn next_input(&mut self) -> Result<UserInput> {
        self.inputs.pop_front().ok_or_else(|| {
            CoachError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input script exhausted",
            ))
        })
    }
}

impl Frontend for ScriptedFrontend {
    fn show_message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }

    fn show_task(&mut self, prompt: &ExercisePrompt) {
        self.tasks.push(prompt.clone());
    }

    fn show_feedback(&mut self, feedback: &Feedback) {
        self.feedbacks.push(feedback.clone());
    }

    fn read_answer(&mut self) -> Result<UserInput> {
        self.next_input()
    }

    fn read_level(&mut self, _mode: Mode) -> Result<UserInput> {
        self.next_input()
    }

    fn read_direction(&mut self) -> Result<UserInput> {
        self.next_input()
    }
}

fn answer(text: &str) -> UserInput {
    UserInput::Answer(text.to_string())
}

/// A full vocabulary session: two rounds with different scores, then
/// quit. Verifies per-bucket counts and that the evaluation prompt
/// embeds the task and answer verbatim.
#[tokio::test]
async fn test_vocabulary_session_two_rounds() {
    let oracle = ScriptedOracle::new(&[
        "WORD: die Verantwortung\nSENTENCE: Er übernimmt die Verantwortung.",
        "Genau richtig!\nSCORE: correct",
        "WORD: der Aufwand\nSENTENCE: Der Aufwand war enorm.",
        "Fast, 'expense' passt nicht ganz.\nSCORE: partially_correct",
    ]);
    let mut frontend = ScriptedFrontend::with_inputs(&[
        answer("1"),
        answer("B2"),
        answer("responsibility"),
        answer("expense"),
        UserInput::Quit,
    ]);
    let mut context = SessionContext::new();

    ModeSession::new(&oracle, &mut frontend, &mut context)
        .run(Mode::Vocabulary)
        .await
        .expect("session should complete");

    let stats = context.snapshot();
    assert_eq!(stats.vocab.total, 2);
    assert_eq!(stats.vocab.correct, 1);
    assert_eq!(stats.vocab.partial, 1);
    assert_eq!(stats.vocab.incorrect, 0);
    assert_eq!(stats.exam.total(), 0);

    // Task fields were extracted from the oracle reply.
    assert_eq!(frontend.tasks[0].field("WORD"), Some("die Verantwortung"));
    assert_eq!(frontend.tasks[1].field("WORD"), Some("der Aufwand"));

    // The second evaluation call embeds the learner's answer verbatim.
    let eval = oracle.call(3);
    assert!(eval.user.contains("Here is their answer:\nexpense"));
    assert!(eval.user.contains("WORD: der Aufwand"));
}

/// Listening practice accepts any fraction the oracle reports, even a
/// numerator above the denominator.
#[tokio::test]
async fn test_listening_session_accepts_lenient_fraction() {
    let oracle = ScriptedOracle::new(&[
        "AUDIO: Die Bibliothek schließt heute früher.\nQUESTIONS:\n1. Wann schließt sie?",
        "Unerwartet gut!\nSCORE: 7/3",
    ]);
    let mut frontend = ScriptedFrontend::with_inputs(&[
        answer("C1"),
        answer("1. Früher als sonst."),
        UserInput::Quit,
    ]);
    let mut context = SessionContext::new();

    ModeSession::new(&oracle, &mut frontend, &mut context)
        .run(Mode::Listening)
        .await
        .expect("session should complete");

    assert_eq!(context.snapshot().exam.listening, 1);
    assert!(matches!(
        frontend.feedbacks[0].signal,
        FeedbackSignal::Fraction {
            numerator: 7,
            denominator: 3
        }
    ));
}

/// Speaking practice ends with a level estimate, and the attempt counts
/// even though the reply also contains chatty prose.
#[tokio::test]
async fn test_speaking_session_level_estimate() {
    let oracle = ScriptedOracle::new(&[
        "Halte einen kurzen Vortrag über dein Lieblingsbuch.",
        "Dein Vortrag war flüssig und gut strukturiert.\nLEVEL:C1",
    ]);
    let mut frontend = ScriptedFrontend::with_inputs(&[
        answer("C1"),
        answer("Mein Lieblingsbuch ist ..."),
        UserInput::Quit,
    ]);
    let mut context = SessionContext::new();

    ModeSession::new(&oracle, &mut frontend, &mut context)
        .run(Mode::Speaking)
        .await
        .expect("session should complete");

    assert_eq!(context.snapshot().exam.speaking, 1);
    assert!(matches!(
        frontend.feedbacks[0].signal,
        FeedbackSignal::LevelEstimate { level: Level::C1 }
    ));
}

/// Quitting at the answer prompt aborts the iteration: the oracle was
/// consulted for the task but nothing is recorded.
#[tokio::test]
async fn test_quit_mid_iteration_records_nothing() {
    let oracle = ScriptedOracle::new(&["TEXT: Ein Artikel.\nQUESTIONS:\n1. Thema?"]);
    let mut frontend =
        ScriptedFrontend::with_inputs(&[answer("B2"), UserInput::Quit]);
    let mut context = SessionContext::new();

    ModeSession::new(&oracle, &mut frontend, &mut context)
        .run(Mode::Reading)
        .await
        .expect("session should complete");

    assert_eq!(oracle.call_count(), 1);
    let stats = context.snapshot();
    assert_eq!(stats.exam.total(), 0);
    assert_eq!(stats.vocab.total, 0);
}

/// An evaluation reply with no recognizable tag still completes the
/// round: coarse counter only, plus a notice to the learner.
#[tokio::test]
async fn test_unrecognized_feedback_counts_coarse_only() {
    let oracle = ScriptedOracle::new(&[
        "WORD: die Nachhaltigkeit\nSENTENCE: Nachhaltigkeit zählt.",
        "Interessante Antwort, darüber lässt sich streiten.",
    ]);
    let mut frontend = ScriptedFrontend::with_inputs(&[
        answer("1"),
        answer("B2"),
        answer("sustainability"),
        UserInput::Quit,
    ]);
    let mut context = SessionContext::new();

    ModeSession::new(&oracle, &mut frontend, &mut context)
        .run(Mode::Vocabulary)
        .await
        .expect("session should complete");

    let stats = context.snapshot();
    assert_eq!(stats.vocab.total, 1);
    assert_eq!(stats.vocab.correct + stats.vocab.partial + stats.vocab.incorrect, 0);
    assert!(frontend.feedbacks[0].is_unknown());
    assert!(!frontend.messages.is_empty());
}

/// An oracle failure during evaluation propagates to the caller without
/// touching statistics; a later mode run over the same context works.
#[tokio::test]
async fn test_oracle_failure_then_recovery_in_same_session() {
    let mut context = SessionContext::new();

    // First run: the evaluation call fails.
    let failing = ScriptedOracle::new(&["WORD: das Ziel\nSENTENCE: Das Ziel ist nah."]);
    let mut frontend =
        ScriptedFrontend::with_inputs(&[answer("1"), answer("B1"), answer("goal")]);
    let result = ModeSession::new(&failing, &mut frontend, &mut context)
        .run(Mode::Vocabulary)
        .await;
    assert!(matches!(result, Err(CoachError::OracleUnavailable { .. })));
    assert_eq!(context.snapshot().vocab.total, 0);

    // Second run over the same context succeeds and counts.
    let working = ScriptedOracle::new(&[
        "WORD: das Ziel\nSENTENCE: Das Ziel ist nah.",
        "Richtig.\nSCORE: correct",
    ]);
    let mut frontend = ScriptedFrontend::with_inputs(&[
        answer("1"),
        answer("B1"),
        answer("goal"),
        UserInput::Quit,
    ]);
    ModeSession::new(&working, &mut frontend, &mut context)
        .run(Mode::Vocabulary)
        .await
        .expect("second run should complete");

    let stats = context.snapshot();
    assert_eq!(stats.vocab.total, 1);
    assert_eq!(stats.vocab.correct, 1);
}

/// One session context accumulates across modes.
#[tokio::test]
async fn test_stats_accumulate_across_modes() {
    let mut context = SessionContext::new();

    let vocab_oracle = ScriptedOracle::new(&[
        "WORD: der Vertrag\nSENTENCE: Der Vertrag ist unterschrieben.",
        "SCORE: incorrect",
    ]);
    let mut frontend = ScriptedFrontend::with_inputs(&[
        answer("1"),
        answer("A2"),
        answer("the contract... treaty?"),
        UserInput::Quit,
    ]);
    ModeSession::new(&vocab_oracle, &mut frontend, &mut context)
        .run(Mode::Vocabulary)
        .await
        .expect("vocabulary run");

    let writing_oracle = ScriptedOracle::new(&[
        "Schreibe eine Beschwerde an die Hausverwaltung.",
        "Solide.\nLEVEL:B2",
    ]);
    let mut frontend = ScriptedFrontend::with_inputs(&[
        answer("B2"),
        answer("Sehr geehrte Hausverwaltung, ..."),
        UserInput::Quit,
    ]);
    ModeSession::new(&writing_oracle, &mut frontend, &mut context)
        .run(Mode::Writing)
        .await
        .expect("writing run");

    let stats = context.snapshot();
    assert_eq!(stats.vocab.total, 1);
    assert_eq!(stats.vocab.incorrect, 1);
    assert_eq!(stats.exam.writing, 1);
    assert_eq!(stats.exam.total(), 1);
}

/// Exam modes reject vocabulary-only levels and fall back to B2.
#[tokio::test]
async fn test_exam_mode_level_fallback() {
    let oracle = ScriptedOracle::new(&[
        "AUDIO: Eine Durchsage am Bahnhof.\nQUESTIONS:\n1. Wo?",
        "SCORE: 1/1",
    ]);
    let mut frontend = ScriptedFrontend::with_inputs(&[
        answer("A2"),
        answer("1. Am Bahnhof."),
        UserInput::Quit,
    ]);
    let mut context = SessionContext::new();

    ModeSession::new(&oracle, &mut frontend, &mut context)
        .run(Mode::Listening)
        .await
        .expect("session should complete");

    assert!(frontend.messages.iter().any(|m| m.contains("B2")));
    assert!(oracle.call(0).system.contains("B2"));
    assert_eq!(context.snapshot().exam.listening, 1);
}
