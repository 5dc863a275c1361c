//! Goethe Coach Report Generation
//!
//! This crate provides types and utilities for generating end-of-session
//! reports from coach statistics. Reports can be serialized to JSON for
//! programmatic access or rendered to Markdown for human consumption.
//!
//! # Types
//!
//! - [`SessionReport`] - The complete report structure for one session
//! - [`VocabSummary`] - Vocabulary drill counters and derived rates
//! - [`ExamSummary`] - Exam practice attempt counters per sub-skill
//!
//! # Generators
//!
//! - [`json::JsonGenerator`] - Generate JSON reports with compact or pretty formatting
//! - [`MarkdownGenerator`] - Generate human-readable Markdown reports
//!
//! # Example
//!
//! ```rust
//! use coach_report::{ExamSummary, SessionReport, VocabSummary};
//! use coach_report::json::JsonGenerator;
//!
//! let report = SessionReport::new(
//!     VocabSummary {
//!         total: 4,
//!         correct: 2,
//!         partial: 1,
//!         incorrect: 1,
//!     },
//!     ExamSummary {
//!         listening: 1,
//!         ..ExamSummary::default()
//!     },
//!     420,
//! );
//!
//! let json = JsonGenerator::new(&report).generate_pretty().unwrap();
//! assert!(json.contains("vocab"));
//! ```

pub mod json;
mod markdown;

pub use markdown::MarkdownGenerator;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Failed to serialize the report to JSON.
    #[error("failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failed to read or write report files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

// ============================================================================
// VocabSummary
// ============================================================================

/// Vocabulary drill counters for one session.
///
/// This is a local copy of the core crate's vocabulary counters to keep
/// report generation free of a cross-crate dependency; the front end
/// converts from the live tracker at report time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabSummary {
    /// Completed evaluation rounds, recognizable score or not.
    pub total: u32,
    /// Rounds scored correct.
    pub correct: u32,
    /// Rounds scored partially correct.
    pub partial: u32,
    /// Rounds scored incorrect.
    pub incorrect: u32,
}

impl VocabSummary {
    /// Returns the number of rounds with a recognizable score.
    #[must_use]
    pub const fn scored(&self) -> u32 {
        self.correct + self.partial + self.incorrect
    }

    /// Returns the number of rounds where no score was recoverable.
    #[must_use]
    pub const fn unscored(&self) -> u32 {
        self.total.saturating_sub(self.scored())
    }

    /// Returns the fraction of scored rounds answered correctly, or
    /// `None` when no round received a score.
    #[must_use]
    pub fn accuracy(&self) -> Option<f64> {
        let scored = self.scored();
        if scored == 0 {
            None
        } else {
            Some(f64::from(self.correct) / f64::from(scored))
        }
    }
}

// ============================================================================
// ExamSummary
// ============================================================================

/// Exam practice attempt counters for one session, one per sub-skill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamSummary {
    /// Completed listening evaluation rounds.
    pub listening: u32,
    /// Completed reading evaluation rounds.
    pub reading: u32,
    /// Completed writing evaluation rounds.
    pub writing: u32,
    /// Completed speaking evaluation rounds.
    pub speaking: u32,
}

impl ExamSummary {
    /// Returns the total number of exam evaluation rounds.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.listening + self.reading + self.writing + self.speaking
    }
}

// ============================================================================
// SessionReport
// ============================================================================

/// Complete report for one coaching session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,

    /// Total session duration in seconds.
    pub duration_seconds: u64,

    /// Vocabulary drill summary.
    pub vocab: VocabSummary,

    /// Exam practice summary.
    pub exam: ExamSummary,
}

impl SessionReport {
    /// Creates a report timestamped now.
    #[must_use]
    pub fn new(vocab: VocabSummary, exam: ExamSummary, duration_seconds: u64) -> Self {
        Self {
            generated_at: Utc::now(),
            duration_seconds,
            vocab,
            exam,
        }
    }

    /// Creates a report with an explicit timestamp.
    #[must_use]
    pub const fn at_time(
        generated_at: DateTime<Utc>,
        vocab: VocabSummary,
        exam: ExamSummary,
        duration_seconds: u64,
    ) -> Self {
        Self {
            generated_at,
            duration_seconds,
            vocab,
            exam,
        }
    }

    /// Returns `true` when no evaluation round completed in the session.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.vocab.total == 0 && self.exam.total() == 0
    }

    /// Serializes the report to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Serialization` if JSON serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(ReportError::from)
    }
}

// ============================================================================
// Tests
// ============================================================================
