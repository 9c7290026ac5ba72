use thiserror::Error;

#[derive(Debug, Error)]
pub enum CapabilityError {
    #[cfg(feature = "huggingface")]
    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Inference backend error: {0}")]
    BackendError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("At least one candidate label is required")]
    NoCandidateLabels,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Capability not configured: {0}")]
    NotConfigured(String),

    #[error("Runtime error: {0}")]
    RuntimeError(String),
}
