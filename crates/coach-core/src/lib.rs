//! Goethe Coach Core
//!
//! Session orchestration, prompt construction, feedback parsing, and
//! statistics for the interactive German language coach.

pub mod config;
pub mod error;
pub mod exercise;
pub mod level;
pub mod oracle;
pub mod parser;
pub mod prompt;
pub mod session;
pub mod stats;

pub use config::{Config, API_BASE_VAR, API_KEY_VAR, MODEL_VAR, TEMPERATURE_VAR};
pub use error::{CoachError, OracleErrorKind, Result};
pub use exercise::{
    Direction, ExerciseKind, ExercisePrompt, Feedback, FeedbackSignal, VocabScore,
};
pub use level::Level;
pub use oracle::{ChatOracle, Oracle};
pub use prompt::{InstructionSet, PERSONA_PREAMBLE};
pub use session::{Frontend, Mode, ModeSession, ModeState, SessionContext, UserInput};
pub use stats::{ExamAttempts, SessionStats, VocabCounters};
