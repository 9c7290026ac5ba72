use crate::core::error::PipelineError;
use crate::core::{SlotValue, PROMPT};
use std::collections::HashMap;

/// The slots extracted so far for a single prompt.
///
/// The prompt itself lives under the reserved `prompt` key from the start,
/// so steps resolve it exactly like any other slot. Slots are only ever added
/// while a recipe runs; [`SlotSet::discard`] is the single removal point.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotSet {
    slots: HashMap<String, SlotValue>,
}

impl SlotSet {
    /// Creates a slot set seeded with the prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        let mut slots = HashMap::new();
        slots.insert(PROMPT.to_string(), SlotValue::String(prompt.into()));
        Self { slots }
    }

    /// Creates a slot set without a prompt. Mostly useful for narratives and tests.
    pub fn empty() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    pub fn prompt(&self) -> Option<&str> {
        self.slots.get(PROMPT).and_then(|v| v.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&SlotValue> {
        self.slots.get(name)
    }

    /// Returns the slot as a string slice if it holds a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.slots.get(name).and_then(|v| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Stores a slot. Overwriting an existing slot is logged since recipes
    /// are validated to produce every name once.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<SlotValue>) {
        let name = name.into();
        if self.slots.contains_key(&name) {
            log::warn!("Slot {} was already filled, overwriting it.", &name);
        }
        self.slots.insert(name, value.into());
    }

    /// Resolves the given slot names, in order, into extractor arguments.
    pub fn resolve(&self, step: &str, names: &[String]) -> Result<Vec<SlotValue>, PipelineError> {
        names
            .iter()
            .map(|name| {
                self.slots
                    .get(name)
                    .cloned()
                    .ok_or_else(|| PipelineError::UnboundSlot {
                        step: step.to_string(),
                        slot: name.clone(),
                    })
            })
            .collect()
    }

    /// Removes every listed slot. Names that are absent are ignored.
    pub fn discard<S: AsRef<str>>(&mut self, names: &[S]) {
        for name in names {
            self.slots.remove(name.as_ref());
        }
    }

    /// Removes and returns a slot.
    pub fn take(&mut self, name: &str) -> Option<SlotValue> {
        self.slots.remove(name)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SlotValue)> {
        self.slots.iter()
    }

    pub fn into_inner(self) -> HashMap<String, SlotValue> {
        self.slots
    }
}

impl From<HashMap<String, SlotValue>> for SlotSet {
    fn from(slots: HashMap<String, SlotValue>) -> Self {
        Self { slots }
    }
}

impl<K: Into<String>, V: Into<SlotValue>> FromIterator<(K, V)> for SlotSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            slots: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
