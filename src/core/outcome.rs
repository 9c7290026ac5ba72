use crate::core::slots::SlotSet;
use crate::core::{SlotValue, ANSWER, PROMPT, SUCCESS};
use serde::Serialize;
use std::collections::HashMap;

/// The externally visible result of processing one prompt.
///
/// Serializes as a flat object: `success`, `answer`, `prompt` and every
/// public slot at the top level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub success: bool,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(flatten)]
    pub slots: HashMap<String, SlotValue>,
    /// Name of the field that produced this outcome, if any.
    #[serde(skip)]
    pub field: Option<String>,
}

impl Outcome {
    /// Builds an outcome from the slots left after discard. The prompt is
    /// lifted out of the slot map; reserved keys never leak into `slots`.
    pub fn from_slots(success: bool, answer: impl Into<String>, slots: SlotSet) -> Self {
        let mut slots = slots.into_inner();
        let prompt = slots
            .remove(PROMPT)
            .and_then(|v| v.as_str().map(String::from));
        slots.remove(SUCCESS);
        slots.remove(ANSWER);
        Self {
            success,
            answer: answer.into(),
            prompt,
            slots,
            field: None,
        }
    }

    /// An outcome carrying nothing but a failure message.
    pub fn rejected(answer: impl Into<String>) -> Self {
        Self {
            success: false,
            answer: answer.into(),
            prompt: None,
            slots: HashMap::new(),
            field: None,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn get(&self, slot: &str) -> Option<&SlotValue> {
        self.slots.get(slot)
    }

    pub fn get_str(&self, slot: &str) -> Option<&str> {
        self.slots.get(slot).and_then(|v| v.as_str())
    }

    pub fn to_json(&self) -> SlotValue {
        serde_json::to_value(self).unwrap_or(SlotValue::Null)
    }
}
