//! Prompt dispatcher.

use crate::capability::NlpAdapter;
use crate::core::error::PipelineError;
use crate::core::outcome::Outcome;
use crate::field::{mep, structural, Field};
use std::sync::Arc;

/// Label every prompt must be relevant to before any field is consulted.
pub const REQUEST_LABEL: &str = "request";

/// Answer given to prompts that are not requests at all.
pub const NOT_A_REQUEST: &str = "Please, a request must be placed.";

/// Routes prompts to the first matching field.
#[derive(Clone)]
pub struct Agent {
    adapter: Arc<NlpAdapter>,
    fields: Vec<Field>,
}

impl Agent {
    /// An agent with the default fields: structural, then MEP.
    pub fn new(adapter: Arc<NlpAdapter>) -> Result<Self, PipelineError> {
        let fields = vec![
            structural::field(adapter.clone())?,
            mep::field(adapter.clone()),
        ];
        Ok(Self::with_fields(adapter, fields))
    }

    /// An agent over the given fields, consulted in order.
    pub fn with_fields(adapter: Arc<NlpAdapter>, fields: Vec<Field>) -> Self {
        Self { adapter, fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Processes one prompt end to end.
    ///
    /// Returns `Ok(None)` when the prompt is a request but no field claims it.
    /// Capability failures are returned as errors; every other failure is an
    /// unsuccessful [`Outcome`] with an explanatory answer.
    pub fn process_prompt(&self, prompt: &str) -> Result<Option<Outcome>, PipelineError> {
        if !self.adapter.is_relevant(prompt, REQUEST_LABEL)? {
            log::info!("Prompt is not a request.");
            return Ok(Some(Outcome::rejected(NOT_A_REQUEST)));
        }

        for field in &self.fields {
            if field.found_inside(prompt)? {
                log::info!("Routing prompt to field {}.", field.name());
                return field.process_prompt(prompt).map(Some);
            }
        }

        log::info!("No field matched the prompt.");
        Ok(None)
    }
}
