//! JSON report generation for coach sessions.
//!
//! This module provides [`JsonGenerator`] for serializing session reports
//! to JSON, either compact for programmatic consumption or pretty-printed
//! for human readability.
//!
//! # Example
//!
//! ```rust
//! use coach_report::{ExamSummary, SessionReport, VocabSummary};
//! use coach_report::json::JsonGenerator;
//!
//! let report = SessionReport::new(VocabSummary::default(), ExamSummary::default(), 0);
//! let generator = JsonGenerator::new(&report);
//!
//! let compact = generator.generate().unwrap();
//! let pretty = generator.generate_pretty().unwrap();
//! assert!(pretty.len() > compact.len());
//! ```

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::{Result, SessionReport};

/// JSON report generator.
pub struct JsonGenerator<'a> {
    report: &'a SessionReport,
}

impl<'a> JsonGenerator<'a> {
    /// Creates a new JSON generator for the given report.
    #[must_use]
    pub const fn new(report: &'a SessionReport) -> Self {
        Self { report }
    }

    /// Generates compact JSON output (single line, no extra whitespace).
    ///
    /// # Errors
    ///
    /// Returns [`crate::ReportError::Serialization`] if serialization fails.
    pub fn generate(&self) -> Result<String> {
        Ok(serde_json::to_string(self.report)?)
    }

    /// Generates pretty-printed JSON output.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ReportError::Serialization`] if serialization fails.
    pub fn generate_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self.report)?)
    }

    /// Writes the report to a file, pretty-printed or compact.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ReportError::Serialization`] if serialization
    /// fails, or [`crate::ReportError::Io`] if the file cannot be written.
    pub fn write_to_file(&self, path: &Path, pretty: bool) -> Result<()> {
        let json = if pretty {
            self.generate_pretty()?
        } else {
            self.generate()?
        };

        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }
}
