//! Generic slot-extraction machinery.
//!
//! This module contains everything needed to run a declarative extraction
//! pipeline against a single prompt:
//! - [`Step`] and [`Signature`] for declaring one unit of extraction
//! - [`Recipe`] for an ordered, validated chain of steps
//! - [`RecipeEngine`] for executing a recipe and producing an [`Outcome`]
//! - [`SlotSet`] for the per-prompt state the engine owns while it runs

pub mod engine;
pub mod error;
pub mod outcome;
pub mod recipe;
pub mod signature;
pub mod slots;
pub mod step;
pub mod telemetry;
pub mod validation;

/// The Alias for serde_json::Value since slots hold heterogeneous values
pub type SlotValue = serde_json::Value;

/// Reserved slot holding the raw prompt.
pub const PROMPT: &str = "prompt";
/// Reserved slot holding the success flag.
pub const SUCCESS: &str = "success";
/// Reserved slot holding the human-readable answer.
pub const ANSWER: &str = "answer";

/// Slot names a step may never produce.
pub const RESERVED_SLOTS: [&str; 3] = [PROMPT, SUCCESS, ANSWER];
