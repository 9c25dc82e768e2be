use thiserror::Error;

/// Error type for the assistant service.
///
/// Variants are typed by cause so the classifier can map them onto
/// user-facing status codes without string inspection where a typed
/// signal exists; provider-reported errors keep their diagnostic text.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Invalid input: question is empty")]
    EmptyQuestion,

    #[error("Invalid input: question exceeds {0} characters")]
    QuestionTooLong(usize),

    #[error("Service configuration error: {0}")]
    Configuration(String),

    #[error("Rate limit exceeded for client '{0}'")]
    RateLimited(String),

    #[error("Provider call timed out after {0}ms")]
    Timeout(u64),

    #[error("Provider returned an empty response")]
    EmptyResponse,

    #[error("Provider declined to answer (safety block): {0}")]
    PolicyBlocked(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AssistantError>;
