//! Inference capabilities consumed by the extraction pipeline.
//!
//! The pipeline needs exactly two primitives: a zero-shot label classifier
//! and an extractive question answerer. Both are traits so any backend can
//! be plugged in; closures implement them too, which keeps scripted
//! capabilities in tests short.

pub mod adapter;
pub mod error;
#[cfg(feature = "huggingface")]
pub mod huggingface;
pub mod models;

use serde::{Deserialize, Serialize};

pub use adapter::{AdapterConfig, NlpAdapter};
pub use error::CapabilityError;
pub use models::Models;

/// Confidence of one candidate label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// An extracted answer span. Only `answer` is consumed by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaAnswer {
    pub answer: String,
    #[serde(default)]
    pub score: f64,
}

impl QaAnswer {
    pub fn new(answer: impl Into<String>, score: f64) -> Self {
        Self {
            answer: answer.into(),
            score,
        }
    }

    /// The model found nothing to extract.
    pub fn none() -> Self {
        Self::new("", 0.0)
    }
}

/// Scores candidate labels against a text.
///
/// Implementations return one score per candidate, in the order the model
/// ranks them.
pub trait Classifier: Send + Sync {
    fn classify(&self, text: &str, labels: &[String]) -> Result<Vec<LabelScore>, CapabilityError>;
}

/// Extracts an answer span for a question from a context.
pub trait QuestionAnswerer: Send + Sync {
    fn answer(&self, question: &str, context: &str) -> Result<QaAnswer, CapabilityError>;
}

impl<F> Classifier for F
where
    F: Fn(&str, &[String]) -> Result<Vec<LabelScore>, CapabilityError> + Send + Sync,
{
    fn classify(&self, text: &str, labels: &[String]) -> Result<Vec<LabelScore>, CapabilityError> {
        self(text, labels)
    }
}

impl<F> QuestionAnswerer for F
where
    F: Fn(&str, &str) -> Result<QaAnswer, CapabilityError> + Send + Sync,
{
    fn answer(&self, question: &str, context: &str) -> Result<QaAnswer, CapabilityError> {
        self(question, context)
    }
}
