//! Completion oracle client for the Goethe Coach.
//!
//! The oracle is a pure I/O boundary: one request carries three ordered
//! text segments (fixed persona preamble, per-call system instructions,
//! user-facing message) and returns one text blob. No retry logic lives
//! here; a failed call surfaces as `OracleUnavailable` and propagates to
//! the mode state machine, which aborts the current iteration without
//! touching statistics.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;

use crate::config::Config;
use crate::error::{CoachError, OracleErrorKind, Result};
use crate::prompt::{InstructionSet, PERSONA_PREAMBLE};

/// A text-completion oracle.
///
/// Abstracting the remote service behind a trait lets tests drive the
/// full session loop with a scripted implementation.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Sends one instruction set (persona preamble prepended by the
    /// implementation) and returns the oracle's raw text reply.
    async fn complete(&self, instructions: &InstructionSet) -> Result<String>;
}

/// An [`Oracle`] backed by an OpenAI-compatible chat-completions API.
pub struct ChatOracle {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl ChatOracle {
    /// Creates a new client from validated configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let mut openai_config = OpenAIConfig::new().with_api_key(config.api_key.clone());
        if let Some(base) = &config.api_base {
            openai_config = openai_config.with_api_base(base.clone());
        }

        Self {
            client: Client::with_config(openai_config),
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }
}

#[async_trait]
impl Oracle for ChatOracle {
    async fn complete(&self, instructions: &InstructionSet) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(self.temperature)
            .messages(vec![
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(PERSONA_PREAMBLE)
                    .build()
                    .map_err(into_coach_error)?
                    .into(),
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(instructions.system.clone())
                    .build()
                    .map_err(into_coach_error)?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(instructions.user.clone())
                    .build()
                    .map_err(into_coach_error)?
                    .into(),
            ])
            .build()
            .map_err(into_coach_error)?;

        tracing::debug!(model = %self.model, "Sending completion request");
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(into_coach_error)?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                CoachError::oracle_unavailable(
                    OracleErrorKind::Other,
                    "completion response contained no text content",
                )
            })?;

        Ok(content.trim().to_string())
    }
}

/// Maps an `async-openai` error into the coach error taxonomy.
fn into_coach_error(err: OpenAIError) -> CoachError {
    let kind = match &err {
        OpenAIError::ApiError(api) => classify_message(&api.message),
        other => classify_transport(&other.to_string()),
    };
    CoachError::oracle_unavailable(kind, err.to_string())
}

/// Classifies an API-level error message into an [`OracleErrorKind`].
fn classify_message(message: &str) -> OracleErrorKind {
    let lower = message.to_lowercase();
    if lower.contains("api key")
        || lower.contains("authentication")
        || lower.contains("unauthorized")
    {
        OracleErrorKind::Authentication
    } else if lower.contains("rate limit") || lower.contains("quota") {
        OracleErrorKind::RateLimit
    } else if lower.contains("server error") || lower.contains("overloaded") {
        OracleErrorKind::Server
    } else {
        OracleErrorKind::Other
    }
}

/// Classifies a transport-level error message into an [`OracleErrorKind`].
fn classify_transport(message: &str) -> OracleErrorKind {
    let lower = message.to_lowercase();
    if lower.contains("connect")
        || lower.contains("network")
        || lower.contains("timed out")
        || lower.contains("dns")
    {
        OracleErrorKind::Network
    } else {
        OracleErrorKind::Other
    }
}
