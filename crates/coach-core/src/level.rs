//! CEFR level taxonomy for the Goethe Coach.
//!
//! Levels are ordered `A0 < A1 < A2 < B1 < B2 < C1`. `A0` is a
//! presentational alias for absolute beginners: it normalizes to `A1`
//! before being embedded into any oracle instruction, since the oracle
//! has no notion of `A0`.

use serde::{Deserialize, Serialize};

/// A CEFR proficiency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Absolute beginner (presentational only; normalizes to `A1`).
    A0,
    /// Beginner.
    A1,
    /// Elementary.
    A2,
    /// Intermediate.
    B1,
    /// Upper intermediate (Goethe B2 exam level).
    B2,
    /// Advanced (Goethe C1 exam level).
    C1,
}

impl Level {
    /// The documented fallback when user input is not a recognizable level.
    pub const DEFAULT: Self = Self::B2;

    /// All levels a learner can select for vocabulary practice.
    pub const ALL: [Self; 6] = [Self::A0, Self::A1, Self::A2, Self::B1, Self::B2, Self::C1];

    /// Levels accepted for Goethe exam practice modes.
    pub const EXAM: [Self; 2] = [Self::B2, Self::C1];

    /// Normalizes the level for oracle consumption.
    ///
    /// Maps `A0` to `A1` and is the identity for every other level. The
    /// oracle never sees `A0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use coach_core::Level;
    ///
    /// assert_eq!(Level::A0.normalize(), Level::A1);
    /// assert_eq!(Level::B2.normalize(), Level::B2);
    /// ```
    #[must_use]
    pub const fn normalize(self) -> Self {
        match self {
            Self::A0 => Self::A1,
            other => other,
        }
    }

    /// Returns the canonical uppercase name of this level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A0 => "A0",
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::B1 => "B1",
            Self::B2 => "B2",
            Self::C1 => "C1",
        }
    }

    /// Returns `true` if this level is accepted for exam practice (B2/C1).
    #[must_use]
    pub const fn is_exam_level(self) -> bool {
        matches!(self, Self::B2 | Self::C1)
    }

    /// Parses a string into a `Level`, case-insensitively.
    ///
    /// Surrounding whitespace is ignored. Returns `None` for anything that
    /// is not one of the six recognized level names.
    #[must_use]
    pub fn from_str_case_insensitive(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "A0" => Some(Self::A0),
            "A1" => Some(Self::A1),
            "A2" => Some(Self::A2),
            "B1" => Some(Self::B1),
            "B2" => Some(Self::B2),
            "C1" => Some(Self::C1),
            _ => None,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str_case_insensitive(&s).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid CEFR level '{s}': expected one of 'A0', 'A1', 'A2', 'B1', 'B2', 'C1'"
            ))
        })
    }
}

impl Serialize for Level {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
