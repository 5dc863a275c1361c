//! Exercise data model for the Goethe Coach.
//!
//! This module defines the exercise taxonomy, the per-iteration
//! [`ExercisePrompt`] produced by the oracle, and the structured
//! [`Feedback`] recovered from evaluation responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::level::Level;

// ============================================================================
// Direction and ExerciseKind
// ============================================================================

/// Translation direction for vocabulary drills.
///
/// Chosen once when entering vocabulary mode and fixed for the lifetime
/// of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// German to English.
    DeToEn,
    /// English to German.
    EnToDe,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DeToEn => write!(f, "DE→EN"),
            Self::EnToDe => write!(f, "EN→DE"),
        }
    }
}

/// The kind of exercise being practiced.
///
/// Determines which prompt template is built and which parser rules apply
/// to the oracle's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    /// Vocabulary drill, German word translated into English.
    VocabDeToEn,
    /// Vocabulary drill, English word translated into German.
    VocabEnToDe,
    /// Goethe exam listening comprehension (transcript + questions).
    Listening,
    /// Goethe exam reading comprehension (text + questions).
    Reading,
    /// Goethe exam writing task.
    Writing,
    /// Goethe exam speaking task (answered in writing).
    Speaking,
}

impl ExerciseKind {
    /// Returns the vocabulary kind for the given direction.
    #[must_use]
    pub const fn vocab(direction: Direction) -> Self {
        match direction {
            Direction::DeToEn => Self::VocabDeToEn,
            Direction::EnToDe => Self::VocabEnToDe,
        }
    }

    /// Returns `true` for the two vocabulary kinds.
    #[must_use]
    pub const fn is_vocab(self) -> bool {
        matches!(self, Self::VocabDeToEn | Self::VocabEnToDe)
    }

    /// Returns `true` for the four Goethe exam sub-skill kinds.
    #[must_use]
    pub const fn is_exam(self) -> bool {
        !self.is_vocab()
    }

    /// Returns the translation direction for vocabulary kinds.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::VocabDeToEn => Some(Direction::DeToEn),
            Self::VocabEnToDe => Some(Direction::EnToDe),
            _ => None,
        }
    }

    /// Returns a short human-readable label for this kind.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VocabDeToEn => "Wortschatz DE→EN",
            Self::VocabEnToDe => "Wortschatz EN→DE",
            Self::Listening => "Hören",
            Self::Reading => "Lesen",
            Self::Writing => "Schreiben",
            Self::Speaking => "Sprechen",
        }
    }
}

impl std::fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// ExercisePrompt
// ============================================================================

/// One generated exercise, as returned by the oracle.
///
/// Created once per exercise iteration, immutable after parsing, and
/// discarded at the end of the iteration. `extracted_fields` holds the
/// tagged lines recovered from the rendered text (e.g., `"WORD"` →
/// `"die Verantwortung"`); the oracle's format is not guaranteed, so any
/// field may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExercisePrompt {
    /// The exercise kind this prompt was generated for.
    pub kind: ExerciseKind,

    /// The (unnormalized) level the learner selected.
    pub level: Level,

    /// Free text returned by the oracle, shown to the learner verbatim.
    pub rendered_text: String,

    /// Tagged fields recovered from the rendered text.
    #[serde(default)]
    pub extracted_fields: BTreeMap<String, String>,
}

impl ExercisePrompt {
    /// Returns the value of an extracted field, if present.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.extracted_fields.get(name).map(String::as_str)
    }
}

// ============================================================================
// VocabScore and Feedback
// ============================================================================

/// Evaluation outcome for a vocabulary answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VocabScore {
    /// The answer was correct.
    Correct,
    /// The answer was partially correct.
    PartiallyCorrect,
    /// The answer was incorrect.
    Incorrect,
}

impl VocabScore {
    /// Returns the sanctioned tag literal for this score.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::PartiallyCorrect => "partially_correct",
            Self::Incorrect => "incorrect",
        }
    }
}

impl std::fmt::Display for VocabScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The machine-actionable signal recovered from an evaluation response.
///
/// Exactly one variant is populated per evaluation, matching the
/// [`ExerciseKind`]'s expected tag. `Unknown` means no recognizable tag
/// was found; that is a normal outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum FeedbackSignal {
    /// Vocabulary score (`SCORE: correct|partially_correct|incorrect`).
    Vocab {
        /// The recovered score.
        score: VocabScore,
    },
    /// Listening/reading fraction (`SCORE: X/Y`).
    ///
    /// No bounds validation is performed; a numerator exceeding the
    /// denominator is accepted as-is.
    Fraction {
        /// Points awarded.
        numerator: u32,
        /// Points available.
        denominator: u32,
    },
    /// Writing/speaking level estimate (`LEVEL:B1|B2|C1`).
    LevelEstimate {
        /// The estimated level.
        level: Level,
    },
    /// No recognizable tag was found in the oracle's output.
    Unknown,
}

/// Parsed evaluation feedback for one exercise iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    /// The oracle's evaluation text, shown to the learner verbatim.
    pub raw_text: String,

    /// The structured signal recovered from the text.
    pub signal: FeedbackSignal,
}

impl Feedback {
    /// Returns `true` if no recognizable score/level tag was found.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self.signal, FeedbackSignal::Unknown)
    }

    /// Returns the vocabulary score, if this is vocabulary feedback.
    #[must_use]
    pub const fn vocab_score(&self) -> Option<VocabScore> {
        match self.signal {
            FeedbackSignal::Vocab { score } => Some(score),
            _ => None,
        }
    }
}
