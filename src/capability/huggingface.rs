//! Hugging Face Inference API backend
//!
//! Serves both capabilities from hosted pipelines: zero-shot classification
//! (default `facebook/bart-large-mnli`) and extractive question answering
//! (default `distilbert-base-cased-distilled-squad`). The HTTP client is
//! async; [`Blocking`] drives it from the synchronous pipeline.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::capability::{
    CapabilityError, Classifier, LabelScore, Models, QaAnswer, QuestionAnswerer,
};

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "HF_API_TOKEN";
/// Environment variable overriding the inference endpoint.
pub const URL_ENV: &str = "HF_INFERENCE_URL";

/// Configuration for the Hugging Face backend
#[derive(Clone, Debug)]
pub struct HuggingFaceConfig {
    /// Bearer token sent with every request
    pub api_token: String,
    /// Inference endpoint (default: https://api-inference.huggingface.co)
    pub base_url: String,
    /// Zero-shot classification model (default: facebook/bart-large-mnli)
    pub zero_shot_model: String,
    /// Question answering model (default: distilbert-base-cased-distilled-squad)
    pub qa_model: String,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            base_url: "https://api-inference.huggingface.co".to_string(),
            zero_shot_model: "facebook/bart-large-mnli".to_string(),
            qa_model: "distilbert-base-cased-distilled-squad".to_string(),
        }
    }
}

impl HuggingFaceConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            ..Default::default()
        }
    }

    /// Required: HF_API_TOKEN
    /// Optional: HF_INFERENCE_URL
    pub fn from_env() -> Result<Self, CapabilityError> {
        let api_token = std::env::var(TOKEN_ENV)
            .map_err(|_| CapabilityError::NotConfigured(format!("{} not set", TOKEN_ENV)))?;
        let mut config = Self::new(api_token);
        if let Ok(url) = std::env::var(URL_ENV) {
            config = config.with_base_url(url);
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_zero_shot_model(mut self, model: impl Into<String>) -> Self {
        self.zero_shot_model = model.into();
        self
    }

    pub fn with_qa_model(mut self, model: impl Into<String>) -> Self {
        self.qa_model = model.into();
        self
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/models/{}", self.base_url, model)
    }
}

/// An asynchronous source of both inference capabilities.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    async fn zero_shot(
        &self,
        text: &str,
        labels: &[String],
    ) -> Result<Vec<LabelScore>, CapabilityError>;

    async fn question_answering(
        &self,
        question: &str,
        context: &str,
    ) -> Result<QaAnswer, CapabilityError>;
}

/// Request structure for zero-shot classification
#[derive(Debug, Serialize)]
pub struct ZeroShotRequest<'a> {
    pub inputs: &'a str,
    pub parameters: ZeroShotParameters<'a>,
}

#[derive(Debug, Serialize)]
pub struct ZeroShotParameters<'a> {
    pub candidate_labels: &'a [String],
    /// Labels are scored independently when true. A single label is always
    /// scored on its own; softmax over one label would always give 1.0.
    pub multi_label: bool,
}

impl<'a> ZeroShotRequest<'a> {
    pub fn new(inputs: &'a str, candidate_labels: &'a [String]) -> Self {
        Self {
            inputs,
            parameters: ZeroShotParameters {
                candidate_labels,
                multi_label: candidate_labels.len() == 1,
            },
        }
    }
}

/// Zero-shot responses come either column-wise (pipeline format) or as a
/// ranked list of label/score rows.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ZeroShotResponse {
    Columns {
        labels: Vec<String>,
        scores: Vec<f64>,
    },
    Rows(Vec<LabelScore>),
}

impl ZeroShotResponse {
    pub fn into_scores(self) -> Result<Vec<LabelScore>, CapabilityError> {
        match self {
            ZeroShotResponse::Columns { labels, scores, .. } => {
                if labels.len() != scores.len() {
                    return Err(CapabilityError::InvalidResponse(format!(
                        "{} labels but {} scores",
                        labels.len(),
                        scores.len()
                    )));
                }
                Ok(labels
                    .into_iter()
                    .zip(scores)
                    .map(|(label, score)| LabelScore::new(label, score))
                    .collect())
            }
            ZeroShotResponse::Rows(rows) => Ok(rows),
        }
    }
}

/// Request structure for question answering
#[derive(Debug, Serialize)]
pub struct QaRequest<'a> {
    pub inputs: QaInputs<'a>,
}

#[derive(Debug, Serialize)]
pub struct QaInputs<'a> {
    pub question: &'a str,
    pub context: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum QaResponse {
    Single(QaAnswer),
    Ranked(Vec<QaAnswer>),
}

impl QaResponse {
    /// The top answer; an empty ranking means nothing was extractable.
    pub fn into_answer(self) -> QaAnswer {
        match self {
            QaResponse::Single(answer) => answer,
            QaResponse::Ranked(answers) => answers.into_iter().next().unwrap_or_else(QaAnswer::none),
        }
    }
}

/// Client for the hosted inference endpoints
#[derive(Clone)]
pub struct HuggingFace {
    client: reqwest::Client,
    config: HuggingFaceConfig,
}

impl HuggingFace {
    pub fn new(config: HuggingFaceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &HuggingFaceConfig {
        &self.config
    }

    async fn post<T, R>(&self, model: &str, body: &T) -> Result<R, CapabilityError>
    where
        T: Serialize + Sync,
        R: DeserializeOwned,
    {
        let mut request = self.client.post(self.config.model_url(model)).json(body);
        if !self.config.api_token.is_empty() {
            request = request.bearer_auth(&self.config.api_token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(CapabilityError::BackendError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl InferenceBackend for HuggingFace {
    async fn zero_shot(
        &self,
        text: &str,
        labels: &[String],
    ) -> Result<Vec<LabelScore>, CapabilityError> {
        let request = ZeroShotRequest::new(text, labels);
        let response: ZeroShotResponse = self.post(&self.config.zero_shot_model, &request).await?;
        response.into_scores()
    }

    async fn question_answering(
        &self,
        question: &str,
        context: &str,
    ) -> Result<QaAnswer, CapabilityError> {
        let request = QaRequest {
            inputs: QaInputs { question, context },
        };
        let response: QaResponse = self.post(&self.config.qa_model, &request).await?;
        Ok(response.into_answer())
    }
}

/// Drives an async backend on a private current-thread runtime so it can
/// serve the synchronous capability traits.
///
/// Calls block the current thread and must not be made from inside another
/// tokio runtime.
pub struct Blocking<B> {
    backend: B,
    runtime: tokio::runtime::Runtime,
}

impl<B: InferenceBackend> Blocking<B> {
    pub fn new(backend: B) -> Result<Self, CapabilityError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CapabilityError::RuntimeError(e.to_string()))?;
        Ok(Self { backend, runtime })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: InferenceBackend> Classifier for Blocking<B> {
    fn classify(&self, text: &str, labels: &[String]) -> Result<Vec<LabelScore>, CapabilityError> {
        self.runtime.block_on(self.backend.zero_shot(text, labels))
    }
}

impl<B: InferenceBackend> QuestionAnswerer for Blocking<B> {
    fn answer(&self, question: &str, context: &str) -> Result<QaAnswer, CapabilityError> {
        self.runtime
            .block_on(self.backend.question_answering(question, context))
    }
}

impl Models {
    /// Both capabilities served by one Hugging Face client.
    pub fn hugging_face(config: HuggingFaceConfig) -> Result<Models, CapabilityError> {
        let backend = Arc::new(Blocking::new(HuggingFace::new(config))?);
        Ok(Models::new(backend.clone(), backend))
    }

    /// The process-wide models, loaded from the environment on first use.
    pub fn shared_from_env() -> Result<Arc<Models>, CapabilityError> {
        Models::shared_or_init(|| Models::hugging_face(HuggingFaceConfig::from_env()?))
    }
}
