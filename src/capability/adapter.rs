use crate::capability::{CapabilityError, Models};
use std::sync::Arc;

/// Environment variable overriding the relevance threshold.
pub const THRESHOLD_ENV: &str = "SLOTSMITH_RELEVANCE_THRESHOLD";

/// Configuration for the capability adapter
#[derive(Clone, Debug, PartialEq)]
pub struct AdapterConfig {
    /// Minimum confidence for a text to count as relevant to a label (default: 0.6)
    pub relevance_threshold: f64,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            relevance_threshold: 0.6,
        }
    }
}

impl AdapterConfig {
    /// Creates a config, rejecting thresholds outside the open interval (0, 1).
    pub fn new(relevance_threshold: f64) -> Result<Self, CapabilityError> {
        if !(relevance_threshold > 0.0 && relevance_threshold < 1.0) {
            return Err(CapabilityError::InvalidConfig(format!(
                "relevance threshold must lie in (0, 1), got {}",
                relevance_threshold
            )));
        }
        Ok(Self {
            relevance_threshold,
        })
    }

    /// Reads the threshold from `SLOTSMITH_RELEVANCE_THRESHOLD`, falling back to the default.
    pub fn from_env() -> Result<Self, CapabilityError> {
        match std::env::var(THRESHOLD_ENV) {
            Ok(raw) => {
                let threshold = raw.trim().parse::<f64>().map_err(|e| {
                    CapabilityError::InvalidConfig(format!("{}={}: {}", THRESHOLD_ENV, raw, e))
                })?;
                Self::new(threshold)
            }
            Err(_) => Ok(Self::default()),
        }
    }
}

/// Wraps the inference models with the pipeline's decision policy:
/// a confidence threshold for relevance and argmax for picking a label.
#[derive(Clone)]
pub struct NlpAdapter {
    models: Arc<Models>,
    config: AdapterConfig,
}

impl NlpAdapter {
    pub fn new(models: Arc<Models>, config: AdapterConfig) -> Self {
        Self { models, config }
    }

    /// Adapter over the given models with the default threshold.
    pub fn with_models(models: Arc<Models>) -> Self {
        Self::new(models, AdapterConfig::default())
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn models(&self) -> &Arc<Models> {
        &self.models
    }

    /// True iff the classifier's confidence for `label` exceeds the threshold.
    pub fn is_relevant(&self, text: &str, label: &str) -> Result<bool, CapabilityError> {
        let scores = self
            .models
            .classifier()
            .classify(text, &[label.to_string()])?;
        let score = scores
            .iter()
            .find(|s| s.label == label)
            .or_else(|| scores.first())
            .map(|s| s.score)
            .ok_or_else(|| {
                CapabilityError::InvalidResponse(format!("no score returned for '{}'", label))
            })?;

        log::debug!("Relevance of '{}': {:.3}", label, score);
        Ok(score > self.config.relevance_threshold)
    }

    /// The candidate with the highest confidence. Ties go to the first maximum
    /// in the order the classifier returned them.
    pub fn best_label<S: AsRef<str>>(
        &self,
        text: &str,
        candidates: &[S],
    ) -> Result<String, CapabilityError> {
        if candidates.is_empty() {
            return Err(CapabilityError::NoCandidateLabels);
        }
        let labels: Vec<String> = candidates.iter().map(|c| c.as_ref().to_string()).collect();
        let scores = self.models.classifier().classify(text, &labels)?;

        let mut best = None;
        for entry in &scores {
            if best.is_none_or(|(_, score)| entry.score > score) {
                best = Some((&entry.label, entry.score));
            }
        }

        let (label, _) = best.ok_or_else(|| {
            CapabilityError::InvalidResponse("classifier returned no scores".to_string())
        })?;
        if !labels.contains(label) {
            return Err(CapabilityError::InvalidResponse(format!(
                "classifier picked unknown label '{}'",
                label
            )));
        }
        Ok(label.clone())
    }

    /// The extracted answer span, or an empty string when there is none.
    pub fn answer(&self, question: &str, context: &str) -> Result<String, CapabilityError> {
        let answer = self.models.answerer().answer(question, context)?;
        log::debug!("Q: '{}' -> A: '{}'", question, answer.answer);
        Ok(answer.answer)
    }
}
