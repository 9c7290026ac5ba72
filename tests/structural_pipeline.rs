//! End-to-end runs of the structural field against scripted capabilities.

mod common;

use common::{adapter, beam_script, Script, ACTION, PROMPT};
use serde_json::json;
use slotsmith::field::structural;
use slotsmith::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

fn slot_names(outcome: &Outcome) -> BTreeSet<&str> {
    outcome.slots.keys().map(String::as_str).collect()
}

#[test]
fn test_structural_move_resolves_every_slot() {
    let field = structural::field(adapter(Arc::new(beam_script()))).unwrap();
    let outcome = field.process_prompt(PROMPT).unwrap();

    assert!(outcome.success);
    assert_eq!(
        outcome.answer,
        "Hey! Perfect, I understood that a beam named B125 is requested to be moved down by 0.2 m. Doing my job now!"
    );
    assert_eq!(outcome.get_str("element"), Some("beam"));
    assert_eq!(outcome.get_str("element_name"), Some("B125"));
    assert_eq!(outcome.get_str("direction"), Some("down"));
    assert_eq!(outcome.get("number"), Some(&json!(0.2)));
    assert_eq!(outcome.get_str("unit"), Some("m"));
    assert_eq!(
        slot_names(&outcome),
        BTreeSet::from(["direction", "element", "element_name", "number", "unit"])
    );
    assert_eq!(outcome.prompt.as_deref(), Some(PROMPT));
    assert_eq!(outcome.field.as_deref(), Some("structural"));
}

#[test]
fn test_outcome_serializes_flat() {
    let field = structural::field(adapter(Arc::new(beam_script()))).unwrap();
    let json = field.process_prompt(PROMPT).unwrap().to_json();

    assert_eq!(json["success"], json!(true));
    assert_eq!(json["element_name"], json!("B125"));
    assert_eq!(json["number"], json!(0.2));
    assert!(json.get("action").is_none());
    assert!(json.get("number_unit").is_none());
}

#[test]
fn test_questions_are_scoped_as_declared() {
    let script = Arc::new(beam_script());
    let field = structural::field(adapter(script.clone())).unwrap();
    field.process_prompt(PROMPT).unwrap();

    // "To where?" reads the prompt, "By how much?" reads only the action clause
    assert_eq!(script.context_of("To where?").as_deref(), Some(PROMPT));
    assert_eq!(script.context_of("By how much?").as_deref(), Some(ACTION));
}

#[test]
fn test_element_name_keeps_first_token() {
    let script = beam_script().answer("Which is the name of the beam?", "B125 beam");
    let field = structural::field(adapter(Arc::new(script))).unwrap();
    let outcome = field.process_prompt(PROMPT).unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.get_str("element_name"), Some("B125"));
}

#[test]
fn test_missing_element_name_stops_early() {
    let script = beam_script().answer("Which is the name of the beam?", "");
    let field = structural::field(adapter(Arc::new(script))).unwrap();
    let outcome = field.process_prompt(PROMPT).unwrap();

    assert!(!outcome.success);
    assert_eq!(
        outcome.answer,
        "Hey! I understood a beam. However, I could not understand which element_name you are talking about. \
         Would you mind to rephrase it in a clear way for me and try again? Thanks in advance!"
    );
    assert_eq!(slot_names(&outcome), BTreeSet::from(["element"]));
}

#[test]
fn test_unmentioned_element_is_rejected() {
    // argmax still lands on beam, but beam alone is not relevant enough
    let script = beam_script().score("beam", 0.5);
    let field = structural::field(adapter(Arc::new(script))).unwrap();
    let outcome = field.process_prompt(PROMPT).unwrap();

    assert!(!outcome.success);
    assert!(outcome.answer.starts_with("Sorry, I could not understand which element"));
    assert!(outcome.slots.is_empty());
}

#[test]
fn test_missing_direction_uses_readable_name() {
    let script = beam_script().answer("To where?", "");
    let field = structural::field(adapter(Arc::new(script))).unwrap();
    let outcome = field.process_prompt(PROMPT).unwrap();

    assert!(!outcome.success);
    assert!(outcome.answer.starts_with(
        "Hey! I understood a beam named B125. However, I could not understand which direction you"
    ));
    assert!(outcome.get("overall_direction").is_none());
}

#[test]
fn test_blank_direction_answer_is_unresolved() {
    let script = Arc::new(beam_script().answer("To where?", "   "));
    let field = structural::field(adapter(script.clone())).unwrap();
    let outcome = field.process_prompt(PROMPT).unwrap();

    assert!(!outcome.success);
    assert!(outcome.answer.contains("which direction you are talking about"));
    assert!(outcome.get("direction").is_none());
    assert!(script.context_of("By how much?").is_none());
}

#[test]
fn test_malformed_amount_reports_amount() {
    let script = beam_script().answer("By how much?", "one meter");
    let field = structural::field(adapter(Arc::new(script))).unwrap();
    let outcome = field.process_prompt(PROMPT).unwrap();

    assert!(!outcome.success);
    assert!(outcome.answer.starts_with(
        "Hey! I understood a beam named B125 is requested to be moved down. \
         However, I could not understand which amount you are talking about."
    ));
    assert_eq!(
        slot_names(&outcome),
        BTreeSet::from(["direction", "element", "element_name"])
    );
}

#[test]
fn test_amount_without_unit_defaults_to_meters() {
    let script = beam_script().answer("By how much?", "5");
    let field = structural::field(adapter(Arc::new(script))).unwrap();
    let outcome = field.process_prompt(PROMPT).unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.get("number"), Some(&json!(5.0)));
    assert_eq!(outcome.get_str("unit"), Some("m"));
    assert!(outcome.answer.contains("by 5.0 m"));
}

#[test]
fn test_slot_growth_is_monotonic() {
    let telemetry = Arc::new(MemoryTelemetry::new());
    let field = structural::field(adapter(Arc::new(beam_script())))
        .unwrap()
        .with_engine(RecipeEngine::new().with_telemetry(telemetry.clone()));
    field.process_prompt(PROMPT).unwrap();

    let traces = telemetry.get_traces();
    let steps: Vec<&str> = traces.iter().map(|t| t.step.as_str()).collect();
    assert_eq!(
        steps,
        vec![
            "element",
            "element_name",
            "action",
            "overall_direction",
            "direction",
            "amount",
            "number_unit"
        ]
    );
    assert!(traces.windows(2).all(|w| w[0].slot_count < w[1].slot_count));
}

#[test]
fn test_same_prompt_same_outcome() {
    let field = structural::field(adapter(Arc::new(beam_script()))).unwrap();
    let first = field.process_prompt(PROMPT).unwrap();
    let second = field.process_prompt(PROMPT).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_capability_failure_is_fatal() {
    let script: Script = beam_script().fail_on("wall");
    let field = structural::field(adapter(Arc::new(script))).unwrap();

    match field.process_prompt(PROMPT) {
        Err(PipelineError::Capability(CapabilityError::BackendError(msg))) => {
            assert_eq!(msg, "model crashed");
        }
        other => panic!("Expected a capability error, got {other:?}"),
    }
}
