use crate::core::error::PipelineError;
use crate::core::step::Step;
use crate::core::validation::validate_steps;

/// An ordered chain of extraction steps.
///
/// Every recipe is validated when it is built: each step may only consume
/// the prompt or a slot produced by a strictly earlier step.
#[derive(Debug, Clone, Default)]
pub struct Recipe {
    steps: Vec<Step>,
}

impl Recipe {
    /// Builds a recipe, rejecting any step whose inputs are not yet available.
    pub fn new(steps: Vec<Step>) -> Result<Self, PipelineError> {
        let report = validate_steps(&steps);
        if !report.is_safe() {
            report.log_summary();
            return Err(PipelineError::InvalidRecipe(report));
        }
        Ok(Self { steps })
    }

    /// A recipe with no steps. Fields without extraction logic carry one.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> RecipeBuilder {
        RecipeBuilder::default()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, name: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.name() == name)
    }
}

/// Collects steps in declaration order, validating on [`RecipeBuilder::build`].
#[derive(Default)]
pub struct RecipeBuilder {
    steps: Vec<Step>,
}

impl RecipeBuilder {
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn build(self) -> Result<Recipe, PipelineError> {
        Recipe::new(self.steps)
    }
}
