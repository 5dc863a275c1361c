//! Markdown report generation for coach sessions.
//!
//! This module provides the [`MarkdownGenerator`] struct for converting a
//! [`SessionReport`] into a human-readable Markdown document with a
//! vocabulary table, an exam practice table, and a generation footer.
//!
//! # Example
//!
//! ```rust
//! use coach_report::{ExamSummary, MarkdownGenerator, SessionReport, VocabSummary};
//!
//! let report = SessionReport::new(VocabSummary::default(), ExamSummary::default(), 0);
//! let markdown = MarkdownGenerator::new(&report).generate();
//! assert!(markdown.contains("# Goethe Coach"));
//! ```

use std::fmt::Write;

use crate::SessionReport;

/// Generates Markdown reports from session results.
pub struct MarkdownGenerator<'a> {
    report: &'a SessionReport,
}

impl<'a> MarkdownGenerator<'a> {
    /// Creates a new Markdown generator for the given report.
    #[must_use]
    pub const fn new(report: &'a SessionReport) -> Self {
        Self { report }
    }

    /// Generates the complete Markdown report.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();

        let _ = writeln!(output, "# Goethe Coach – Sitzungsbericht\n");

        if self.report.is_empty() {
            let _ = writeln!(output, "Keine abgeschlossenen Übungen in dieser Sitzung.\n");
        } else {
            self.write_vocab(&mut output);
            self.write_exam(&mut output);
        }

        self.write_footer(&mut output);
        output
    }

    /// Writes the vocabulary section with its counter table.
    fn write_vocab(&self, output: &mut String) {
        let vocab = &self.report.vocab;
        if vocab.total == 0 {
            return;
        }

        let _ = writeln!(output, "## Wortschatz\n");
        let _ = writeln!(output, "| Ergebnis | Anzahl |");
        let _ = writeln!(output, "|----------|--------|");
        let _ = writeln!(output, "| Richtig | {} |", vocab.correct);
        let _ = writeln!(output, "| Teilweise richtig | {} |", vocab.partial);
        let _ = writeln!(output, "| Falsch | {} |", vocab.incorrect);
        if vocab.unscored() > 0 {
            let _ = writeln!(output, "| Ohne Bewertung | {} |", vocab.unscored());
        }
        let _ = writeln!(output, "| **Gesamt** | **{}** |", vocab.total);

        if let Some(accuracy) = vocab.accuracy() {
            let _ = writeln!(output, "\nTrefferquote: {:.0} %", accuracy * 100.0);
        }
        let _ = writeln!(output);
    }

    /// Writes the exam practice section with per-skill attempt counts.
    fn write_exam(&self, output: &mut String) {
        let exam = &self.report.exam;
        if exam.total() == 0 {
            return;
        }

        let _ = writeln!(output, "## Prüfungstraining\n");
        let _ = writeln!(output, "| Teilfertigkeit | Versuche |");
        let _ = writeln!(output, "|----------------|----------|");
        for (label, count) in [
            ("Hören", exam.listening),
            ("Lesen", exam.reading),
            ("Schreiben", exam.writing),
            ("Sprechen", exam.speaking),
        ] {
            if count > 0 {
                let _ = writeln!(output, "| {label} | {count} |");
            }
        }
        let _ = writeln!(output, "| **Gesamt** | **{}** |", exam.total());
        let _ = writeln!(output);
    }

    /// Writes the generation footer.
    fn write_footer(&self, output: &mut String) {
        let _ = writeln!(output, "---\n");
        let _ = writeln!(output, "Dauer: {}", format_duration(self.report.duration_seconds));
        let _ = writeln!(
            output,
            "Erstellt am {}",
            self.report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
}

/// Formats a duration in seconds as `XmYYs`.
fn format_duration(seconds: u64) -> String {
    format!("{}m {:02}s", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExamSummary, VocabSummary};

    fn sample_report() -> SessionReport {
        SessionReport::new(
            VocabSummary {
                total: 5,
                correct: 3,
                partial: 1,
                incorrect: 0,
            },
            ExamSummary {
                listening: 2,
                writing: 1,
                ..ExamSummary::default()
            },
            125,
        )
    }

    #[test]
    fn test_generate_contains_all_sections() {
        let report = sample_report();
        let markdown = MarkdownGenerator::new(&report).generate();

        assert!(markdown.contains("# Goethe Coach – Sitzungsbericht"));
        assert!(markdown.contains("## Wortschatz"));
        assert!(markdown.contains("## Prüfungstraining"));
        assert!(markdown.contains("| Richtig | 3 |"));
        assert!(markdown.contains("| Hören | 2 |"));
        assert!(markdown.contains("| Schreiben | 1 |"));
        assert!(markdown.contains("Dauer: 2m 05s"));
        assert!(markdown.contains("Erstellt am"));
    }

    #[test]
    fn test_unscored_rounds_shown_when_present() {
        let report = sample_report();
        let markdown = MarkdownGenerator::new(&report).generate();
        // 5 total, 4 scored.
        assert!(markdown.contains("| Ohne Bewertung | 1 |"));
    }

    #[test]
    fn test_accuracy_rendered_as_percentage() {
        let report = sample_report();
        let markdown = MarkdownGenerator::new(&report).generate();
        assert!(markdown.contains("Trefferquote: 75 %"));
    }

    #[test]
    fn test_empty_report_renders_placeholder() {
        let report = SessionReport::new(VocabSummary::default(), ExamSummary::default(), 5);
        let markdown = MarkdownGenerator::new(&report).generate();

        assert!(markdown.contains("Keine abgeschlossenen Übungen"));
        assert!(!markdown.contains("## Wortschatz"));
        assert!(!markdown.contains("## Prüfungstraining"));
    }

    #[test]
    fn test_skills_without_attempts_omitted() {
        let report = sample_report();
        let markdown = MarkdownGenerator::new(&report).generate();
        assert!(!markdown.contains("| Lesen |"));
        assert!(!markdown.contains("| Sprechen |"));
    }
}
