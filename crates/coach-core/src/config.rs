//! Configuration for the Goethe Coach.
//!
//! Configuration is environment-first: the API key is required and its
//! absence must surface as a configuration error before any oracle call
//! is attempted. Model identity and sampling temperature are fixed
//! configuration, not user-controllable per call.

use crate::error::{CoachError, Result};

/// Environment variable holding the required API credential.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variable overriding the completion model.
pub const MODEL_VAR: &str = "COACH_MODEL";

/// Environment variable overriding the sampling temperature.
pub const TEMPERATURE_VAR: &str = "COACH_TEMPERATURE";

/// Environment variable overriding the API base URL (for
/// OpenAI-compatible services).
pub const API_BASE_VAR: &str = "OPENAI_API_BASE";

/// Default completion model.
const DEFAULT_MODEL: &str = "gpt-4.1-mini";

/// Default sampling temperature.
const DEFAULT_TEMPERATURE: f32 = 0.4;

/// Runtime configuration for the coach.
#[derive(Clone)]
pub struct Config {
    /// API key for the completion service.
    pub api_key: String,

    /// Model identifier used for every oracle call.
    pub model: String,

    /// Sampling temperature used for every oracle call.
    pub temperature: f32,

    /// Optional base URL override for OpenAI-compatible services.
    pub api_base: Option<String>,
}

// Manual Debug so the credential never ends up in logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl Config {
    /// Builds configuration from process environment variables.
    ///
    /// `OPENAI_API_KEY` is required; `COACH_MODEL`, `COACH_TEMPERATURE`
    /// and `OPENAI_API_BASE` are optional overrides.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::Configuration` if the API key is missing or
    /// empty, or if an override has an invalid value.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_VAR).unwrap_or_default();

        let model = std::env::var(MODEL_VAR).unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let temperature = match std::env::var(TEMPERATURE_VAR) {
            Ok(raw) => raw.trim().parse::<f32>().map_err(|_| {
                CoachError::configuration(
                    format!("{TEMPERATURE_VAR} is not a number: '{raw}'"),
                    format!("Set {TEMPERATURE_VAR} to a value between 0.0 and 2.0, or unset it"),
                )
            })?,
            Err(_) => DEFAULT_TEMPERATURE,
        };

        let api_base = std::env::var(API_BASE_VAR)
            .ok()
            .filter(|s| !s.trim().is_empty());

        let config = Self {
            api_key,
            model,
            temperature,
            api_base,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::Configuration` if:
    /// - the API key is empty,
    /// - the model identifier is empty,
    /// - the temperature is outside `0.0..=2.0`.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(CoachError::configuration(
                format!("{API_KEY_VAR} is not set"),
                format!("Export {API_KEY_VAR} or add it to a .env file in the working directory"),
            ));
        }

        if self.model.trim().is_empty() {
            return Err(CoachError::configuration(
                "model identifier must not be empty",
                format!("Set {MODEL_VAR} to a valid model name or unset it to use the default"),
            ));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(CoachError::configuration(
                format!("temperature {} is out of range", self.temperature),
                format!("Set {TEMPERATURE_VAR} to a value between 0.0 and 2.0"),
            ));
        }

        Ok(())
    }
}
