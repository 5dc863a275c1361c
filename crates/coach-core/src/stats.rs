//! Session statistics tracking for the Goethe Coach.
//!
//! Statistics are the only mutable shared state in a session. They are
//! owned by the session context, mutated exclusively through the two
//! record operations here, and live for the process duration (no
//! persistence across sessions).

use serde::{Deserialize, Serialize};

use crate::exercise::{ExerciseKind, VocabScore};

/// Counters for vocabulary drills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabCounters {
    /// Completed evaluation rounds, recognizable score or not.
    pub total: u32,
    /// Rounds scored `correct`.
    pub correct: u32,
    /// Rounds scored `partially_correct`.
    pub partial: u32,
    /// Rounds scored `incorrect`.
    pub incorrect: u32,
}

/// Attempt counters for Goethe exam practice, one per sub-skill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamAttempts {
    /// Completed listening evaluation rounds.
    pub listening: u32,
    /// Completed reading evaluation rounds.
    pub reading: u32,
    /// Completed writing evaluation rounds.
    pub writing: u32,
    /// Completed speaking evaluation rounds.
    pub speaking: u32,
}

impl ExamAttempts {
    /// Returns the total number of exam evaluation rounds.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.listening + self.reading + self.writing + self.speaking
    }
}

/// Per-session performance counters.
///
/// A counter only ever increments after a *completed* evaluation round;
/// an aborted iteration (quit sentinel, oracle failure) leaves every
/// counter untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Vocabulary drill counters.
    pub vocab: VocabCounters,
    /// Exam practice attempt counters.
    pub exam: ExamAttempts,
}

impl SessionStats {
    /// Creates a zeroed statistics tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one completed vocabulary evaluation round.
    ///
    /// `total` always increments. The matching score bucket increments
    /// only when a score was recoverable; an unreadable score still
    /// counts as an attempt.
    pub fn record_vocab_result(&mut self, score: Option<VocabScore>) {
        self.vocab.total += 1;
        match score {
            Some(VocabScore::Correct) => self.vocab.correct += 1,
            Some(VocabScore::PartiallyCorrect) => self.vocab.partial += 1,
            Some(VocabScore::Incorrect) => self.vocab.incorrect += 1,
            None => {}
        }
        tracing::debug!(total = self.vocab.total, score = ?score, "Vocabulary result recorded");
    }

    /// Records one completed exam evaluation round.
    ///
    /// The matching attempt counter increments unconditionally, whether
    /// or not a score/level tag was recoverable. Vocabulary kinds are not
    /// exam attempts and are ignored.
    pub fn record_exam_attempt(&mut self, kind: ExerciseKind) {
        match kind {
            ExerciseKind::Listening => self.exam.listening += 1,
            ExerciseKind::Reading => self.exam.reading += 1,
            ExerciseKind::Writing => self.exam.writing += 1,
            ExerciseKind::Speaking => self.exam.speaking += 1,
            ExerciseKind::VocabDeToEn | ExerciseKind::VocabEnToDe => {
                tracing::warn!(kind = %kind, "record_exam_attempt called with a vocabulary kind");
            }
        }
    }

    /// Returns an immutable copy of the current counters for reporting.
    ///
    /// Never hands out the live structure; calling `snapshot` twice
    /// without an intervening record yields equal results.
    #[must_use]
    pub const fn snapshot(&self) -> Self {
        *self
    }
}
