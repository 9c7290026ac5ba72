use crate::core::error::PipelineError;
use crate::core::outcome::Outcome;
use crate::core::recipe::Recipe;
use crate::core::slots::SlotSet;
use crate::core::telemetry::{Telemetry, TraceEntry};
use crate::core::SlotValue;
use std::sync::Arc;
use uuid::Uuid;

/// The domain-specific half of a recipe run: phrasing, finalization and
/// which intermediate slots to hide from callers.
pub trait Narrative {
    /// Clarification message for an unresolved item, given what was understood so far.
    fn failure_message(&self, missing_item: &str, slots: &SlotSet) -> String;

    /// Confirmation message for a fully resolved recipe.
    fn success_message(&self, slots: &SlotSet) -> String;

    /// Reshapes slots after every step resolved, before discard.
    fn finalize(&self, _slots: &mut SlotSet) -> Result<(), PipelineError> {
        Ok(())
    }

    /// Intermediate slot names removed before the outcome is returned.
    fn discarded_slots(&self) -> &[String];
}

/// Executes recipes step by step against a prompt.
#[derive(Clone, Default)]
pub struct RecipeEngine {
    telemetry: Option<Arc<dyn Telemetry>>,
}

impl RecipeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every executed step into the given sink.
    pub fn with_telemetry(mut self, telemetry: Arc<dyn Telemetry>) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    pub fn run(
        &self,
        recipe: &Recipe,
        prompt: &str,
        narrative: &dyn Narrative,
    ) -> Result<Outcome, PipelineError> {
        self.run_traced(recipe, prompt, narrative)
            .map(|(outcome, _run_id)| outcome)
    }

    /// Runs the recipe and also returns the run id used for telemetry.
    pub fn run_traced(
        &self,
        recipe: &Recipe,
        prompt: &str,
        narrative: &dyn Narrative,
    ) -> Result<(Outcome, Uuid), PipelineError> {
        let run_id = Uuid::new_v4();
        let mut slots = SlotSet::new(prompt);

        for step in recipe.steps() {
            let args = slots.resolve(step.name(), step.arg_refs())?;
            let value = step.extract(&args)?;
            let resolved = value.is_some();

            if let Some(value) = &value {
                slots.insert(step.name(), value.clone());
            }
            self.trace(run_id, step.name(), args, value, slots.len());

            if !resolved {
                log::warn!(
                    "Run {}: could not resolve '{}', stopping.",
                    run_id,
                    step.name()
                );
                let answer = narrative.failure_message(step.display_name(), &slots);
                slots.discard(narrative.discarded_slots());
                self.flush();
                return Ok((Outcome::from_slots(false, answer, slots), run_id));
            }
            log::debug!("Run {}: resolved '{}'.", run_id, step.name());
        }

        narrative.finalize(&mut slots)?;
        slots.discard(narrative.discarded_slots());
        let answer = narrative.success_message(&slots);
        log::info!("Run {}: all {} steps resolved.", run_id, recipe.len());

        self.flush();
        Ok((Outcome::from_slots(true, answer, slots), run_id))
    }

    fn flush(&self) {
        if let Some(telemetry) = &self.telemetry {
            telemetry.flush();
        }
    }

    fn trace(
        &self,
        run_id: Uuid,
        step: &str,
        inputs: Vec<SlotValue>,
        output: Option<SlotValue>,
        slot_count: usize,
    ) {
        if let Some(telemetry) = &self.telemetry {
            telemetry.record(TraceEntry {
                timestamp: chrono::Utc::now(),
                run_id,
                step: step.to_string(),
                inputs,
                output,
                slot_count,
            });
        }
    }
}
