//! Domain fields.
//!
//! A [`Field`] bundles everything needed to serve one category of request:
//! a relevance test (its name and aliases), an extraction [`Recipe`], and the
//! phrasing used to report what was understood. Field-specific behavior is
//! injected as data (`summary`, `finalize`, the discard list), so every field
//! is the same type.

pub mod mep;
pub mod structural;

use crate::capability::{CapabilityError, NlpAdapter};
use crate::core::engine::{Narrative, RecipeEngine};
use crate::core::error::PipelineError;
use crate::core::outcome::Outcome;
use crate::core::recipe::Recipe;
use crate::core::slots::SlotSet;
use crate::core::validation::validate_discards;
use crate::core::SlotValue;
use std::sync::Arc;

/// Builds the narrative sentence for whatever slots are present.
pub type SummaryFn = fn(&SlotSet) -> String;

/// Reshapes slots once every step resolved.
pub type FinalizeFn = fn(&mut SlotSet) -> Result<(), PipelineError>;

fn no_summary(_slots: &SlotSet) -> String {
    String::new()
}

/// A domain bundle: relevance test, recipe, and narrative logic.
#[derive(Clone)]
pub struct Field {
    name: String,
    aliases: Vec<String>,
    elements: Vec<String>,
    directions: Vec<String>,
    recipe: Recipe,
    discard: Vec<String>,
    summary: SummaryFn,
    finalize: Option<FinalizeFn>,
    adapter: Arc<NlpAdapter>,
    engine: RecipeEngine,
}

impl Field {
    pub fn builder(name: impl Into<String>, adapter: Arc<NlpAdapter>) -> FieldBuilder {
        FieldBuilder::new(name, adapter)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    pub fn directions(&self) -> &[String] {
        &self.directions
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// Replaces the engine, e.g. to attach telemetry.
    pub fn with_engine(mut self, engine: RecipeEngine) -> Self {
        self.engine = engine;
        self
    }

    /// True if the prompt is relevant to the field's name or, checked in
    /// declaration order, to any of its aliases.
    pub fn found_inside(&self, prompt: &str) -> Result<bool, CapabilityError> {
        if self.adapter.is_relevant(prompt, &self.name)? {
            return Ok(true);
        }
        for alias in &self.aliases {
            if self.adapter.is_relevant(prompt, alias)? {
                log::debug!("Field {} matched through alias '{}'.", self.name, alias);
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn summary(&self, slots: &SlotSet) -> String {
        (self.summary)(slots)
    }

    /// Asks the user to rephrase, echoing back whatever was understood.
    pub fn failure_message(&self, missing_item: &str, slots: &SlotSet) -> String {
        let summary = self.summary(slots);
        let mut txt = if summary.is_empty() {
            "Sorry, ".to_string()
        } else {
            format!("Hey! I understood {}. However, ", summary)
        };
        txt.push_str(&format!(
            "I could not understand which {} you are talking about. ",
            missing_item
        ));
        txt.push_str("Would you mind to rephrase it in a clear way for me and try again? Thanks in advance!");
        txt
    }

    pub fn success_message(&self, slots: &SlotSet) -> String {
        format!(
            "Hey! Perfect, I understood that {}. Doing my job now!",
            self.summary(slots)
        )
    }

    /// Runs the field's recipe against the prompt.
    pub fn process_prompt(&self, prompt: &str) -> Result<Outcome, PipelineError> {
        if self.recipe.is_empty() {
            log::warn!("Field {} has no recipe, cannot extract anything.", self.name);
            return Ok(Outcome::rejected(format!(
                "Hey! I understood this is a {} request, but I do not know how to handle {} requests yet. Thanks for your patience!",
                self.name, self.name
            ))
            .with_prompt(prompt)
            .with_field(&self.name));
        }

        let outcome = self.engine.run(&self.recipe, prompt, self)?;
        Ok(outcome.with_field(&self.name))
    }
}

impl Narrative for Field {
    fn failure_message(&self, missing_item: &str, slots: &SlotSet) -> String {
        Field::failure_message(self, missing_item, slots)
    }

    fn success_message(&self, slots: &SlotSet) -> String {
        Field::success_message(self, slots)
    }

    fn finalize(&self, slots: &mut SlotSet) -> Result<(), PipelineError> {
        match self.finalize {
            Some(finalize) => finalize(slots),
            None => Ok(()),
        }
    }

    fn discarded_slots(&self) -> &[String] {
        &self.discard
    }
}

/// Builder for [`Field`]
pub struct FieldBuilder {
    name: String,
    adapter: Arc<NlpAdapter>,
    aliases: Vec<String>,
    elements: Vec<String>,
    directions: Vec<String>,
    recipe: Recipe,
    discard: Vec<String>,
    summary: SummaryFn,
    finalize: Option<FinalizeFn>,
}

impl FieldBuilder {
    pub fn new(name: impl Into<String>, adapter: Arc<NlpAdapter>) -> Self {
        Self {
            name: name.into(),
            adapter,
            aliases: Vec::new(),
            elements: Vec::new(),
            directions: Vec::new(),
            recipe: Recipe::empty(),
            discard: Vec::new(),
            summary: no_summary,
            finalize: None,
        }
    }

    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn elements<I, S>(mut self, elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.elements = elements.into_iter().map(Into::into).collect();
        self
    }

    pub fn directions<I, S>(mut self, directions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.directions = directions.into_iter().map(Into::into).collect();
        self
    }

    pub fn recipe(mut self, recipe: Recipe) -> Self {
        self.recipe = recipe;
        self
    }

    /// Intermediate slots hidden from the outcome.
    pub fn discard<I, S>(mut self, discard: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.discard = discard.into_iter().map(Into::into).collect();
        self
    }

    pub fn summary(mut self, summary: SummaryFn) -> Self {
        self.summary = summary;
        self
    }

    pub fn finalize(mut self, finalize: FinalizeFn) -> Self {
        self.finalize = Some(finalize);
        self
    }

    pub fn build(self) -> Field {
        let report = validate_discards(self.recipe.steps(), &self.discard);
        if report.has_warnings() {
            report.log_summary();
        }

        Field {
            name: self.name,
            aliases: self.aliases,
            elements: self.elements,
            directions: self.directions,
            recipe: self.recipe,
            discard: self.discard,
            summary: self.summary,
            finalize: self.finalize,
            adapter: self.adapter,
            engine: RecipeEngine::new(),
        }
    }
}

/// Renders a slot for narratives. Integral numbers keep one decimal, so
/// `1.0` reads as "1.0" rather than "1".
pub fn slot_text(slots: &SlotSet, name: &str) -> Option<String> {
    slots.get(name).map(|value| match value {
        SlotValue::String(s) => s.clone(),
        SlotValue::Number(n) => match n.as_f64() {
            Some(f) => format_number(f),
            None => n.to_string(),
        },
        other => other.to_string(),
    })
}

pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e16 {
        format!("{:.1}", n)
    } else {
        format!("{}", n)
    }
}
