//! # Slotsmith
//!
//! A declarative slot-extraction pipeline that turns free-text instructions
//! ("move beam B125 down 0.2m") into structured commands by chaining a
//! zero-shot classifier and an extractive question answerer.
//!
//! ## Features
//!
//! - **Validated Recipes**: Steps declare the slots they consume; a recipe that
//!   reads a slot before it exists is rejected when it is built
//! - **Short-circuiting Engine**: Extraction stops at the first unresolved slot
//!   and explains what was understood so far
//! - **Composable Fields**: A field is data (recipe, vocabulary, narrative
//!   functions), not a subclass
//! - **Pluggable Inference**: Any classifier / question answerer works; a Hugging Face
//!   backend ships behind the `huggingface` feature
//!
//! ## Quick Start
//!
//! ```rust
//! use slotsmith::prelude::*;
//! use std::sync::Arc;
//!
//! // Scripted capabilities: everything is relevant, nothing is answerable
//! let models = Models::from_fns(
//!     |_text: &str, labels: &[String]| {
//!         Ok(labels.iter().map(|l| LabelScore::new(l.clone(), 0.9)).collect())
//!     },
//!     |_question: &str, _context: &str| Ok(QaAnswer::none()),
//! );
//! let adapter = Arc::new(NlpAdapter::with_models(Arc::new(models)));
//! let agent = Agent::new(adapter).unwrap();
//!
//! let outcome = agent.process_prompt("move beam B125 down 0.2m").unwrap().unwrap();
//! assert!(!outcome.success);
//! ```
//!
//! ## Module Organization
//!
//! - [`core`]: Slots, steps, recipes and the recipe engine
//! - [`capability`]: Inference traits, the capability adapter and shared models
//! - [`field`]: Composable fields and the reference structural / MEP fields
//! - [`agent`]: The dispatcher routing prompts to fields
//! - [`prelude`]: Commonly used types (import with `use slotsmith::prelude::*`)

// ============================================================================
// Modules
// ============================================================================

pub mod agent;
pub mod capability;
pub mod core;
pub mod field;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use agent::Agent;
pub use capability::{
    AdapterConfig, CapabilityError, Classifier, LabelScore, Models, NlpAdapter, QaAnswer,
    QuestionAnswerer,
};
pub use crate::core::engine::{Narrative, RecipeEngine};
pub use crate::core::error::PipelineError;
pub use crate::core::outcome::Outcome;
pub use crate::core::recipe::{Recipe, RecipeBuilder};
pub use crate::core::signature::Signature;
pub use crate::core::slots::SlotSet;
pub use crate::core::step::{text_arg, Extraction, Extractor, Step};
pub use crate::core::telemetry::{MemoryTelemetry, Telemetry, TraceEntry};
pub use crate::core::validation::{ValidationIssue, ValidationReport};
pub use crate::core::SlotValue;
pub use field::{Field, FieldBuilder};

#[cfg(feature = "huggingface")]
pub use capability::huggingface::{HuggingFace, HuggingFaceConfig};

// ============================================================================
// Prelude
// ============================================================================

/// The main prelude: imports everything needed to build and run fields.
///
/// # Example
/// ```rust
/// use slotsmith::prelude::*;
/// ```
pub mod prelude {
    pub use super::{
        // Dispatch
        Agent,
        // Capabilities
        AdapterConfig,
        CapabilityError,
        Classifier,
        // Fields
        Field,
        FieldBuilder,
        LabelScore,
        MemoryTelemetry,
        Models,
        Narrative,
        NlpAdapter,
        Outcome,
        PipelineError,
        QaAnswer,
        QuestionAnswerer,
        // Core
        Recipe,
        RecipeEngine,
        SlotSet,
        SlotValue,
        Step,
        Telemetry,
    };
}

// ============================================================================
// Library Metadata
// ============================================================================

/// The version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of this crate.
pub const NAME: &str = env!("CARGO_PKG_NAME");
