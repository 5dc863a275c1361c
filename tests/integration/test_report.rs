//! Integration tests for the statistics-to-report pipeline.
//!
//! Validates that a session's counters convert cleanly into a report and
//! that both generators render consistent output.

use coach_core::{ExerciseKind, SessionStats, VocabScore};
use coach_report::{
    json::JsonGenerator, ExamSummary, MarkdownGenerator, SessionReport, VocabSummary,
};

/// Converts live session counters into report summaries.
fn to_report(stats: &SessionStats) -> SessionReport {
    to_report_with_duration(stats, 90)
}

fn to_report_with_duration(stats: &SessionStats, duration_seconds: u64) -> SessionReport {
    SessionReport::new(
        VocabSummary {
            total: stats.vocab.total,
            correct: stats.vocab.correct,
            partial: stats.vocab.partial,
            incorrect: stats.vocab.incorrect,
        },
        ExamSummary {
            listening: stats.exam.listening,
            reading: stats.exam.reading,
            writing: stats.exam.writing,
            speaking: stats.exam.speaking,
        },
        duration_seconds,
    )
}

#[test]
fn test_stats_to_report_conversion() {
    let mut stats = SessionStats::new();
    stats.record_vocab_result(Some(VocabScore::Correct));
    stats.record_vocab_result(Some(VocabScore::Incorrect));
    stats.record_vocab_result(None);
    stats.record_exam_attempt(ExerciseKind::Listening);
    stats.record_exam_attempt(ExerciseKind::Speaking);

    let report = to_report(&stats.snapshot());

    assert_eq!(report.vocab.total, 3);
    assert_eq!(report.vocab.scored(), 2);
    assert_eq!(report.vocab.unscored(), 1);
    assert_eq!(report.exam.total(), 2);
    assert!(!report.is_empty());
}

#[test]
fn test_markdown_and_json_agree_on_counts() {
    let mut stats = SessionStats::new();
    stats.record_vocab_result(Some(VocabScore::Correct));
    stats.record_vocab_result(Some(VocabScore::Correct));
    stats.record_vocab_result(Some(VocabScore::PartiallyCorrect));
    stats.record_exam_attempt(ExerciseKind::Writing);

    let report = to_report(&stats.snapshot());

    let markdown = MarkdownGenerator::new(&report).generate();
    assert!(markdown.contains("| Richtig | 2 |"));
    assert!(markdown.contains("| Teilweise richtig | 1 |"));
    assert!(markdown.contains("| Schreiben | 1 |"));

    let json = JsonGenerator::new(&report)
        .generate()
        .expect("JSON generation");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
    assert_eq!(value["vocab"]["correct"], 2);
    assert_eq!(value["vocab"]["partial"], 1);
    assert_eq!(value["exam"]["writing"], 1);
    assert_eq!(value["duration_seconds"], 90);
}

#[test]
fn test_duration_rendered_in_markdown() {
    let stats = SessionStats::new();
    let report = to_report_with_duration(&stats, 3 * 60 + 7);
    let markdown = MarkdownGenerator::new(&report).generate();
    assert!(markdown.contains("Dauer: 3m 07s"));
}

#[test]
fn test_empty_session_report() {
    let stats = SessionStats::new();
    let report = to_report(&stats);

    assert!(report.is_empty());
    let markdown = MarkdownGenerator::new(&report).generate();
    assert!(markdown.contains("Keine abgeschlossenen Übungen"));
}

#[test]
fn test_json_report_roundtrip_through_file() {
    let mut stats = SessionStats::new();
    stats.record_exam_attempt(ExerciseKind::Reading);

    let report = to_report(&stats);
    let path = std::env::temp_dir().join("coach-integration-report.json");

    JsonGenerator::new(&report)
        .write_to_file(&path, false)
        .expect("write report");

    let contents = std::fs::read_to_string(&path).expect("read report");
    let parsed: SessionReport = serde_json::from_str(&contents).expect("parse report");
    assert_eq!(parsed.exam.reading, 1);

    let _ = std::fs::remove_file(&path);
}
