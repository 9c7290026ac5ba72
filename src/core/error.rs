use crate::capability::CapabilityError;
use crate::core::validation::ValidationReport;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid recipe: {0}")]
    InvalidRecipe(ValidationReport),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Step {step} requires slot '{slot}', which is not available")]
    UnboundSlot { step: String, slot: String },

    #[error("Argument {index} should be a {expected}")]
    ArgumentType { index: usize, expected: &'static str },

    #[error("Finalization error: {0}")]
    Finalize(String),

    #[error("Capability error: {0}")]
    Capability(#[from] CapabilityError),
}
