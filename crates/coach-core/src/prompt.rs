//! Prompt construction for the Goethe Coach.
//!
//! This module builds the deterministic instruction payloads sent to the
//! oracle. Each exercise kind carries a fixed output contract (tagged
//! lines such as `WORD:` or `SCORE:`) that the instructions encode
//! verbatim, because [`crate::parser`] depends on those tags to recover
//! structured signals from the oracle's free-text reply.
//!
//! All functions here are pure: the same kind/level/task/answer always
//! produce the same instruction set.

use crate::exercise::ExerciseKind;
use crate::level::Level;

/// Fixed persona sent as the first system segment of every oracle call.
pub const PERSONA_PREAMBLE: &str = "\
You are a friendly, supportive German teacher helping a learner prepare \
for Goethe B2 and C1 exams and build vocabulary from A1 to C1.

Your style:
- Mostly answer in German, but use short English explanations if helpful.
- Be encouraging and not too formal.
- Keep answers fairly short (so they fit well in a terminal).
- Correct mistakes gently and clearly.";

/// A pair of text segments for one oracle call.
///
/// `system` carries the per-call task instructions; `user` carries the
/// user-facing message. The persona preamble is prepended separately by
/// the oracle client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionSet {
    /// Per-call system instructions, including the output tag contract.
    pub system: String,
    /// The user-facing message.
    pub user: String,
}

/// Builds the instructions for generating a new exercise task.
///
/// The selected level is normalized (`A0` → `A1`) before being embedded;
/// the oracle never sees `A0`.
#[must_use]
pub fn task_instructions(kind: ExerciseKind, level: Level) -> InstructionSet {
    let level = level.normalize();

    match kind {
        ExerciseKind::VocabDeToEn => InstructionSet {
            system: format!(
                "Create one short vocabulary exercise for CEFR level {level}.\n\
                 Choose ONE useful German word or phrase for this level.\n\
                 Output exactly these tagged lines:\n\
                 WORD: <the German word or phrase>\n\
                 SENTENCE: <one short German example sentence using it>\n\
                 Then ask the learner, in German, to translate the word into English.\n\
                 Do not reveal the English translation. Keep it compact."
            ),
            user: format!("Gib mir eine neue Wortschatz-Aufgabe (DE→EN) auf Niveau {level}."),
        },
        ExerciseKind::VocabEnToDe => InstructionSet {
            system: format!(
                "Create one short vocabulary exercise for CEFR level {level}.\n\
                 Choose ONE useful English word or phrase a German learner at this \
                 level should know.\n\
                 Output exactly these tagged lines:\n\
                 WORD: <the English word or phrase>\n\
                 HINT: <optional short hint in German, omit the line if not needed>\n\
                 Then ask the learner, in German, to translate the word into German.\n\
                 Do not reveal the German translation. Keep it compact."
            ),
            user: format!("Gib mir eine neue Wortschatz-Aufgabe (EN→DE) auf Niveau {level}."),
        },
        ExerciseKind::Listening => InstructionSet {
            system: format!(
                "Create one Goethe-style {level} listening comprehension task.\n\
                 Output exactly this structure:\n\
                 AUDIO: <a short spoken-style German monologue or dialogue of 4-6 \
                 sentences, written out as a transcript>\n\
                 QUESTIONS:\n\
                 <3-5 numbered comprehension questions in German>\n\
                 Do NOT include the answers or an answer key. Keep it compact."
            ),
            user: format!("Gib mir eine neue Höraufgabe im Stil der Goethe-Prüfung {level}."),
        },
        ExerciseKind::Reading => InstructionSet {
            system: format!(
                "Create one Goethe-style {level} reading comprehension task.\n\
                 Output exactly this structure:\n\
                 TEXT: <a short German text of 5-8 sentences>\n\
                 QUESTIONS:\n\
                 <3-5 numbered comprehension questions in German>\n\
                 Do NOT include the answers or an answer key. Keep it compact."
            ),
            user: format!("Gib mir eine neue Leseaufgabe im Stil der Goethe-Prüfung {level}."),
        },
        ExerciseKind::Writing => InstructionSet {
            system: format!(
                "Create ONE Goethe-style {level} writing task.\n\
                 Examples:\n\
                 - Schreibe einen kurzen Kommentar zu einer Meinung.\n\
                 - Schreibe eine formelle E-Mail.\n\
                 Explain the task in German. Be clear but not too long."
            ),
            user: format!("Gib mir eine neue Schreibaufgabe im Stil der Goethe-Prüfung {level}."),
        },
        ExerciseKind::Speaking => InstructionSet {
            system: format!(
                "Create ONE Goethe-style {level} speaking task that the learner will \
                 answer in writing, as if giving a short talk.\n\
                 Examples:\n\
                 - Halte einen kurzen Vortrag zu einem Thema.\n\
                 - Nimm Stellung zu einer Aussage.\n\
                 Explain the task in German. Be clear but not too long."
            ),
            user: format!("Gib mir eine neue Sprechaufgabe im Stil der Goethe-Prüfung {level}."),
        },
    }
}

/// Builds the instructions for evaluating the learner's answer to a task.
///
/// `task` is the oracle's rendered task text from the same iteration;
/// `answer` is the learner's response verbatim (possibly empty). The
/// trailing tag contract depends on the kind:
///
/// - vocabulary: `SCORE: correct|partially_correct|incorrect`
/// - listening/reading: `SCORE: X/Y`
/// - writing/speaking: `LEVEL:B1|LEVEL:B2|LEVEL:C1`
#[must_use]
pub fn evaluation_instructions(
    kind: ExerciseKind,
    level: Level,
    task: &str,
    answer: &str,
) -> InstructionSet {
    let level = level.normalize();

    let system = match kind {
        ExerciseKind::VocabDeToEn | ExerciseKind::VocabEnToDe => format!(
            "The learner practices vocabulary at level {level}.\n\
             Evaluate their answer to the exercise below.\n\
             Correct mistakes gently. Give 1-2 natural example sentences in German.\n\
             Use very short English explanations only if really needed.\n\
             End your reply with exactly one line:\n\
             SCORE: correct\n\
             or\n\
             SCORE: partially_correct\n\
             or\n\
             SCORE: incorrect"
        ),
        ExerciseKind::Listening | ExerciseKind::Reading => format!(
            "You are evaluating answers to a Goethe {level} comprehension task.\n\
             Go through the learner's answers question by question, in German.\n\
             Say which are right and correct the wrong ones briefly.\n\
             End your reply with exactly one line of the form:\n\
             SCORE: X/Y\n\
             where Y is the number of questions and X the number answered correctly."
        ),
        ExerciseKind::Writing | ExerciseKind::Speaking => format!(
            "You are evaluating a Goethe {level} exam-style answer.\n\
             Give feedback in German (you may add very short English hints).\n\
             1) Comment on content & structure.\n\
             2) Correct important grammar and vocabulary mistakes.\n\
             3) Suggest 2-3 improved sentences or phrases.\n\
             End your reply with exactly one line:\n\
             LEVEL:B1\n\
             or\n\
             LEVEL:B2\n\
             or\n\
             LEVEL:C1"
        ),
    };

    InstructionSet {
        system,
        user: format!(
            "Here is the exercise you gave them:\n{task}\n\n\
             Here is their answer:\n{answer}"
        ),
    }
}
