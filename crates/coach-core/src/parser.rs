//! Response parsing for the Goethe Coach.
//!
//! The oracle is an untrusted text source: it is *instructed* to emit
//! tagged lines (`WORD:`, `SCORE:`, `LEVEL:`, ...) but nothing guarantees
//! it complies. Every function in this module is therefore tolerant:
//! tags are matched case-insensitively, leading whitespace is ignored,
//! tags may appear anywhere in the body, and absence is reported as
//! `None` — never as an error.
//!
//! When a tag appears more than once (the evaluation reply sometimes
//! quotes the instructions back), the *last* occurrence wins, matching
//! the "trailing tag" contract the prompts ask for.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::exercise::{ExerciseKind, ExercisePrompt, Feedback, FeedbackSignal, VocabScore};
use crate::level::Level;

/// Matches `SCORE:` followed by one of the three sanctioned vocabulary
/// literals. Common near-miss spellings of the middle literal are
/// tolerated because models tend to produce them.
static VOCAB_SCORE_RE: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(?im)^\s*SCORE:\s*(partially[ _]correct|partly[ _]correct|incorrect|correct)\b")
        .ok()
});

/// Matches `SCORE: X/Y` fractions for listening/reading evaluations.
static FRACTION_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?im)^\s*SCORE:\s*(\d+)\s*/\s*(\d+)").ok());

/// Matches `LEVEL:B1|B2|C1` estimates for writing/speaking evaluations.
static LEVEL_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?im)^\s*LEVEL:\s*(B1|B2|C1)\b").ok());

/// Extracts the value of a tagged line from free text.
///
/// A line matches when, after arbitrary leading whitespace, it starts
/// with the tag name (case-insensitive) followed by a colon. The value is
/// the remainder of the line, trimmed. The first matching line anywhere
/// in the body wins.
///
/// # Examples
///
/// ```
/// use coach_core::parser::extract_field;
///
/// let text = "Aufgabe:\n  word: die Verantwortung\nÜbersetze das Wort.";
/// assert_eq!(
///     extract_field(text, "WORD"),
///     Some("die Verantwortung".to_string())
/// );
/// assert_eq!(extract_field(text, "SENTENCE"), None);
/// ```
#[must_use]
pub fn extract_field(text: &str, tag: &str) -> Option<String> {
    for line in text.lines() {
        let trimmed = line.trim_start();
        // `get` rejects splits that land inside a multi-byte character,
        // which German prose lines regularly produce.
        let Some(head) = trimmed.get(..tag.len()) else {
            continue;
        };
        if head.eq_ignore_ascii_case(tag) {
            if let Some(value) = trimmed[tag.len()..].strip_prefix(':') {
                return Some(value.trim().to_string());
            }
        }
    }
    None
}

/// Parses a vocabulary evaluation score from free text.
///
/// Matches only the sanctioned literals after a `SCORE:` tag; returns
/// `None` when no such tag is present.
#[must_use]
pub fn parse_vocab_score(text: &str) -> Option<VocabScore> {
    let re = VOCAB_SCORE_RE.as_ref()?;
    let caps = re.captures_iter(text).last()?;
    let literal = caps.get(1)?.as_str().to_lowercase();
    match literal.as_str() {
        "correct" => Some(VocabScore::Correct),
        "incorrect" => Some(VocabScore::Incorrect),
        // partially_correct plus tolerated spellings
        _ => Some(VocabScore::PartiallyCorrect),
    }
}

/// Parses a `SCORE: X/Y` exam fraction from free text.
///
/// No bounds validation is performed: `7/3` is accepted as-is. (Known
/// fidelity gap, kept deliberately; this function is the single place a
/// bound check would go.)
#[must_use]
pub fn parse_exam_fraction(text: &str) -> Option<(u32, u32)> {
    let re = FRACTION_RE.as_ref()?;
    let caps = re.captures_iter(text).last()?;
    let numerator = caps.get(1)?.as_str().parse().ok()?;
    let denominator = caps.get(2)?.as_str().parse().ok()?;
    Some((numerator, denominator))
}

/// Parses a `LEVEL:B1|B2|C1` estimate from free text.
#[must_use]
pub fn parse_level_estimate(text: &str) -> Option<Level> {
    let re = LEVEL_RE.as_ref()?;
    let caps = re.captures_iter(text).last()?;
    match caps.get(1)?.as_str().to_uppercase().as_str() {
        "B1" => Some(Level::B1),
        "B2" => Some(Level::B2),
        "C1" => Some(Level::C1),
        _ => None,
    }
}

/// Parses an evaluation reply into structured [`Feedback`].
///
/// Dispatches on the exercise kind so only the expected tag is consulted;
/// never fails — an unrecognizable reply yields
/// [`FeedbackSignal::Unknown`].
#[must_use]
pub fn parse_feedback(kind: ExerciseKind, text: &str) -> Feedback {
    let signal = match kind {
        ExerciseKind::VocabDeToEn | ExerciseKind::VocabEnToDe => parse_vocab_score(text)
            .map_or(FeedbackSignal::Unknown, |score| FeedbackSignal::Vocab {
                score,
            }),
        ExerciseKind::Listening | ExerciseKind::Reading => parse_exam_fraction(text).map_or(
            FeedbackSignal::Unknown,
            |(numerator, denominator)| FeedbackSignal::Fraction {
                numerator,
                denominator,
            },
        ),
        ExerciseKind::Writing | ExerciseKind::Speaking => parse_level_estimate(text)
            .map_or(FeedbackSignal::Unknown, |level| {
                FeedbackSignal::LevelEstimate { level }
            }),
    };

    if matches!(signal, FeedbackSignal::Unknown) {
        tracing::debug!(kind = %kind, "No recognizable feedback tag in oracle output");
    }

    Feedback {
        raw_text: text.to_string(),
        signal,
    }
}

/// Parses a task-generation reply into an [`ExercisePrompt`].
///
/// The rendered text is kept verbatim; the single-line tags relevant to
/// the kind are extracted into `extracted_fields`. Missing tags simply
/// leave the map sparse.
#[must_use]
pub fn parse_task(kind: ExerciseKind, level: Level, text: &str) -> ExercisePrompt {
    let tags: &[&str] = match kind {
        ExerciseKind::VocabDeToEn => &["WORD", "SENTENCE"],
        ExerciseKind::VocabEnToDe => &["WORD", "HINT"],
        ExerciseKind::Listening => &["AUDIO"],
        ExerciseKind::Reading => &["TEXT"],
        ExerciseKind::Writing | ExerciseKind::Speaking => &[],
    };

    let mut extracted_fields = BTreeMap::new();
    for tag in tags {
        if let Some(value) = extract_field(text, tag) {
            extracted_fields.insert((*tag).to_string(), value);
        }
    }

    ExercisePrompt {
        kind,
        level,
        rendered_text: text.to_string(),
        extracted_fields,
    }
}
