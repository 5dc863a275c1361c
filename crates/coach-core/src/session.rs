//! Mode state machine for the Goethe Coach.
//!
//! Each practice mode runs the same interactive loop:
//!
//! `AwaitingLevelSelection → GeneratingTask → AwaitingUserAnswer →
//! Evaluating → ShowingFeedback → (GeneratingTask | Exited)`
//!
//! One full cycle is one exercise iteration. The loop is unbounded,
//! terminated only by the universal quit sentinel (`q`/`quit`/`exit`,
//! case-insensitive) or an unrecovered oracle failure. Statistics are
//! updated only after a completed evaluation round; an aborted iteration
//! leaves every counter untouched.
//!
//! Rendering and input collection go through the [`Frontend`] seam so
//! the same engine serves any thin front-end adapter.

use crate::error::Result;
use crate::exercise::{Direction, ExerciseKind, ExercisePrompt, Feedback};
use crate::level::Level;
use crate::oracle::Oracle;
use crate::parser;
use crate::prompt;
use crate::stats::SessionStats;

/// Warning shown when level input is not recognized.
const UNKNOWN_LEVEL_MSG: &str = "Unbekanntes Niveau – ich nehme B2.";

/// Warning shown when the vocabulary direction input is not recognized.
const UNKNOWN_DIRECTION_MSG: &str = "Unbekannte Richtung – ich nehme DE→EN.";

/// Notice shown when the evaluation reply carried no recognizable tag.
const UNDETERMINED_MSG: &str = "Score/Level konnte nicht ermittelt werden.";

// ============================================================================
// ModeState
// ============================================================================

/// State of one mode's interactive loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeState {
    /// Waiting for the learner to pick a level (and, for vocabulary, a
    /// direction).
    AwaitingLevelSelection,
    /// Asking the oracle to generate a task.
    GeneratingTask,
    /// Waiting for the learner's answer (or the quit sentinel).
    AwaitingUserAnswer,
    /// Asking the oracle to evaluate the answer.
    Evaluating,
    /// Presenting feedback and updating statistics.
    ShowingFeedback,
    /// The loop has ended; control returns to the parent menu.
    Exited,
}

impl ModeState {
    /// Returns `true` if this state ends the mode loop.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Exited)
    }

    /// Returns `true` if `next` is a legal successor of this state.
    ///
    /// The quit sentinel (and an aborted oracle call) may exit from any
    /// state; otherwise the loop advances strictly through the cycle,
    /// with `ShowingFeedback` looping back to `GeneratingTask`.
    #[must_use]
    pub const fn can_transition_to(&self, next: Self) -> bool {
        if matches!(next, Self::Exited) {
            return !self.is_terminal();
        }
        matches!(
            (self, next),
            (Self::AwaitingLevelSelection | Self::ShowingFeedback, Self::GeneratingTask)
                | (Self::GeneratingTask, Self::AwaitingUserAnswer)
                | (Self::AwaitingUserAnswer, Self::Evaluating)
                | (Self::Evaluating, Self::ShowingFeedback)
        )
    }
}

impl std::fmt::Display for ModeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::AwaitingLevelSelection => "AwaitingLevelSelection",
            Self::GeneratingTask => "GeneratingTask",
            Self::AwaitingUserAnswer => "AwaitingUserAnswer",
            Self::Evaluating => "Evaluating",
            Self::ShowingFeedback => "ShowingFeedback",
            Self::Exited => "Exited",
        };
        write!(f, "{name}")
    }
}

// ============================================================================
// Mode and UserInput
// ============================================================================

/// A practice mode selectable from the top-level menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Vocabulary drills (A1–C1, direction chosen at entry).
    Vocabulary,
    /// Goethe exam listening practice (B2/C1).
    Listening,
    /// Goethe exam reading practice (B2/C1).
    Reading,
    /// Goethe exam writing practice (B2/C1).
    Writing,
    /// Goethe exam speaking practice (B2/C1).
    Speaking,
}

impl Mode {
    /// Returns a short human-readable label for this mode.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vocabulary => "Wortschatz-Training (A1–C1)",
            Self::Listening => "Hörverstehen (B2/C1)",
            Self::Reading => "Leseverstehen (B2/C1)",
            Self::Writing => "Schreiben (B2/C1)",
            Self::Speaking => "Sprechen (B2/C1)",
        }
    }

    /// Returns `true` for the vocabulary mode.
    #[must_use]
    pub const fn is_vocabulary(self) -> bool {
        matches!(self, Self::Vocabulary)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One line of learner input, classified at the input boundary.
///
/// The quit sentinel is recognized uniformly at every prompt of the
/// state machine; anything else — including the empty string — is
/// treated as answer text verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// Answer text, passed through unmodified.
    Answer(String),
    /// The universal cancellation signal (`q`, `quit`, or `exit`).
    Quit,
}

impl UserInput {
    /// Classifies one raw input line.
    ///
    /// Sentinel detection ignores surrounding whitespace and case; the
    /// answer variant keeps the raw text verbatim.
    ///
    /// # Examples
    ///
    /// ```
    /// use coach_core::UserInput;
    ///
    /// assert_eq!(UserInput::parse("  QUIT "), UserInput::Quit);
    /// assert_eq!(
    ///     UserInput::parse("die Antwort"),
    ///     UserInput::Answer("die Antwort".to_string())
    /// );
    /// assert_eq!(UserInput::parse(""), UserInput::Answer(String::new()));
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("q")
            || trimmed.eq_ignore_ascii_case("quit")
            || trimmed.eq_ignore_ascii_case("exit")
        {
            Self::Quit
        } else {
            Self::Answer(raw.to_string())
        }
    }
}

// ============================================================================
// Frontend
// ============================================================================

/// Rendering and input collection seam.
///
/// The core never touches stdin/stdout directly; front-end adapters are
/// only responsible for showing text and collecting lines. All `read_*`
/// methods return [`UserInput`] so the quit sentinel is honored at every
/// input boundary.
pub trait Frontend {
    /// Shows a plain message (warnings, notices, errors).
    fn show_message(&mut self, text: &str);

    /// Shows a freshly generated exercise task.
    fn show_task(&mut self, prompt: &ExercisePrompt);

    /// Shows evaluation feedback.
    fn show_feedback(&mut self, feedback: &Feedback);

    /// Reads the learner's answer to the current task.
    fn read_answer(&mut self) -> Result<UserInput>;

    /// Reads the raw level selection for the given mode.
    fn read_level(&mut self, mode: Mode) -> Result<UserInput>;

    /// Reads the raw vocabulary direction selection.
    fn read_direction(&mut self) -> Result<UserInput>;
}

// ============================================================================
// SessionContext
// ============================================================================

/// Per-session mutable state.
///
/// Created once at session start and passed by reference into every mode
/// run; there is no process-wide singleton. The statistics tracker is
/// the only mutable shared state and is never duplicated or cached
/// elsewhere.
#[derive(Debug, Default)]
pub struct SessionContext {
    stats: SessionStats,
}

impl SessionContext {
    /// Creates a fresh session context with zeroed statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an immutable copy of the current statistics.
    #[must_use]
    pub const fn snapshot(&self) -> SessionStats {
        self.stats.snapshot()
    }
}

// ============================================================================
// ModeSession
// ============================================================================

/// Drives one practice mode's interactive loop.
pub struct ModeSession<'a, O, F>
where
    O: Oracle + ?Sized,
    F: Frontend + ?Sized,
{
    oracle: &'a O,
    frontend: &'a mut F,
    context: &'a mut SessionContext,
    state: ModeState,
}

impl<'a, O, F> ModeSession<'a, O, F>
where
    O: Oracle + ?Sized,
    F: Frontend + ?Sized,
{
    /// Creates a new mode session over the shared session context.
    pub fn new(oracle: &'a O, frontend: &'a mut F, context: &'a mut SessionContext) -> Self {
        Self {
            oracle,
            frontend,
            context,
            state: ModeState::AwaitingLevelSelection,
        }
    }

    /// Returns the current state (useful for assertions and logging).
    #[must_use]
    pub const fn state(&self) -> ModeState {
        self.state
    }

    /// Runs the mode loop until the learner quits or an oracle call
    /// fails.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::OracleUnavailable` when a completion call
    /// fails; the iteration in flight is aborted with no statistics
    /// increment and the caller decides whether the session continues.
    pub async fn run(&mut self, mode: Mode) -> Result<()> {
        tracing::info!(mode = %mode, "Entering mode");

        // Vocabulary branches on a direction selector fixed for the
        // lifetime of the loop; it is not re-asked per iteration.
        let kind = match mode {
            Mode::Vocabulary => match self.frontend.read_direction()? {
                UserInput::Quit => return self.exit(),
                UserInput::Answer(raw) => ExerciseKind::vocab(self.select_direction(&raw)),
            },
            Mode::Listening => ExerciseKind::Listening,
            Mode::Reading => ExerciseKind::Reading,
            Mode::Writing => ExerciseKind::Writing,
            Mode::Speaking => ExerciseKind::Speaking,
        };

        let level = match self.frontend.read_level(mode)? {
            UserInput::Quit => return self.exit(),
            UserInput::Answer(raw) => self.select_level(mode, &raw),
        };

        tracing::info!(kind = %kind, level = %level, "Mode configured");

        loop {
            self.advance(ModeState::GeneratingTask)?;
            let instructions = prompt::task_instructions(kind, level);
            let rendered = self.oracle.complete(&instructions).await?;
            let task = parser::parse_task(kind, level, &rendered);
            self.frontend.show_task(&task);

            self.advance(ModeState::AwaitingUserAnswer)?;
            let answer = match self.frontend.read_answer()? {
                UserInput::Quit => return self.exit(),
                UserInput::Answer(text) => text,
            };

            self.advance(ModeState::Evaluating)?;
            let instructions =
                prompt::evaluation_instructions(kind, level, &task.rendered_text, &answer);
            let reply = self.oracle.complete(&instructions).await?;
            let feedback = parser::parse_feedback(kind, &reply);

            self.advance(ModeState::ShowingFeedback)?;
            self.frontend.show_feedback(&feedback);
            if feedback.is_unknown() {
                self.frontend.show_message(UNDETERMINED_MSG);
            }

            // The evaluation round completed, so the coarse counter
            // increments even when no tag was recoverable.
            if kind.is_vocab() {
                self.context.stats.record_vocab_result(feedback.vocab_score());
            } else {
                self.context.stats.record_exam_attempt(kind);
            }
        }
    }

    /// Marks the loop as exited and returns control to the parent menu.
    fn exit(&mut self) -> Result<()> {
        self.advance(ModeState::Exited)?;
        tracing::info!("Leaving mode");
        Ok(())
    }

    /// Advances the state machine, guarding against illegal transitions.
    fn advance(&mut self, next: ModeState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            return Err(crate::error::CoachError::invalid_transition(
                self.state, next,
            ));
        }
        tracing::debug!(from = %self.state, to = %next, "State transition");
        self.state = next;
        Ok(())
    }

    /// Resolves raw direction input, defaulting to DE→EN with a warning.
    fn select_direction(&mut self, raw: &str) -> Direction {
        match parse_direction(raw) {
            Some(direction) => direction,
            None => {
                tracing::warn!(input = raw, "Unrecognized direction input");
                self.frontend.show_message(UNKNOWN_DIRECTION_MSG);
                Direction::DeToEn
            }
        }
    }

    /// Resolves raw level input against the mode's accepted set,
    /// defaulting to B2 with a warning.
    fn select_level(&mut self, mode: Mode, raw: &str) -> Level {
        let parsed = Level::from_str_case_insensitive(raw);
        let accepted = match parsed {
            Some(level) if mode.is_vocabulary() => Some(level),
            Some(level) if level.is_exam_level() => Some(level),
            _ => None,
        };
        match accepted {
            Some(level) => level,
            None => {
                tracing::warn!(input = raw, mode = %mode, "Unrecognized level input");
                self.frontend.show_message(UNKNOWN_LEVEL_MSG);
                Level::DEFAULT
            }
        }
    }
}

/// Parses a vocabulary direction selection.
///
/// Accepts menu numbers and a few obvious spellings; returns `None` for
/// anything else.
#[must_use]
fn parse_direction(raw: &str) -> Option<Direction> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "de" | "de-en" | "de->en" | "de→en" => Some(Direction::DeToEn),
        "2" | "en" | "en-de" | "en->de" | "en→de" => Some(Direction::EnToDe),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
