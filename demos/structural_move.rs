//! Runs the reference queries through the default agent using the hosted
//! Hugging Face models.
//!
//! ```text
//! HF_API_TOKEN=... cargo run --example structural_move --features huggingface
//! ```

use serde_json::json;
use slotsmith::prelude::*;
use std::sync::Arc;

const QUERIES: [&str; 4] = [
    "Please, lower by 0.2 m the height of beam B125",
    "Can you move 0.5m to the front a wall W15?",
    "Displace column C27 one meter to the left, please",
    "Displace column C27 1 m to the left, please",
];

fn main() -> Result<(), PipelineError> {
    let models = Models::shared_from_env()?;
    let adapter = Arc::new(NlpAdapter::new(models, AdapterConfig::from_env()?));
    let agent = Agent::new(adapter)?;

    for query in QUERIES {
        match agent.process_prompt(query)? {
            Some(outcome) => println!("{}", outcome.to_json()),
            None => println!("{}", json!({ "prompt": query, "field": null })),
        }
    }
    Ok(())
}
