//! Scripted inference capabilities shared by the integration tests.

#![allow(dead_code)]

use slotsmith::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const PROMPT: &str = "Please, lower by 0.2 m the height of beam B125";
pub const ACTION: &str = "lower by 0.2 m the height";

/// Classifier and question answerer driven by lookup tables.
///
/// Labels missing from the score table get 0.01. Questions missing from the
/// answer table get an empty answer. Every question is logged with its context.
#[derive(Default)]
pub struct Script {
    pub scores: HashMap<String, f64>,
    pub answers: HashMap<String, String>,
    pub failing_label: Option<String>,
    pub asked: Mutex<Vec<(String, String)>>,
}

impl Script {
    pub fn score(mut self, label: &str, score: f64) -> Self {
        self.scores.insert(label.to_string(), score);
        self
    }

    pub fn answer(mut self, question: &str, answer: &str) -> Self {
        self.answers.insert(question.to_string(), answer.to_string());
        self
    }

    pub fn fail_on(mut self, label: &str) -> Self {
        self.failing_label = Some(label.to_string());
        self
    }

    pub fn context_of(&self, question: &str) -> Option<String> {
        self.asked
            .lock()
            .unwrap()
            .iter()
            .find(|(q, _)| q == question)
            .map(|(_, c)| c.clone())
    }
}

impl Classifier for Script {
    fn classify(&self, _text: &str, labels: &[String]) -> Result<Vec<LabelScore>, CapabilityError> {
        if let Some(failing) = &self.failing_label {
            if labels.contains(failing) {
                return Err(CapabilityError::BackendError("model crashed".to_string()));
            }
        }
        Ok(labels
            .iter()
            .map(|l| LabelScore::new(l.clone(), *self.scores.get(l).unwrap_or(&0.01)))
            .collect())
    }
}

impl QuestionAnswerer for Script {
    fn answer(&self, question: &str, context: &str) -> Result<QaAnswer, CapabilityError> {
        self.asked
            .lock()
            .unwrap()
            .push((question.to_string(), context.to_string()));
        Ok(self
            .answers
            .get(question)
            .map(|a| QaAnswer::new(a.clone(), 0.9))
            .unwrap_or_else(QaAnswer::none))
    }
}

/// The scripted outputs for "lower beam B125 by 0.2 m".
pub fn beam_script() -> Script {
    Script::default()
        .score("request", 0.95)
        .score("structural", 0.9)
        .score("beam", 0.8)
        .score("column", 0.1)
        .score("down", 0.7)
        .score("up", 0.1)
        .answer("Which is the name of the beam?", "B125")
        .answer("What should we do with the beam B125?", ACTION)
        .answer("To where?", "down")
        .answer("By how much?", "0.2 m")
}

pub fn adapter(script: Arc<Script>) -> Arc<NlpAdapter> {
    let models = Models::new(script.clone(), script);
    Arc::new(NlpAdapter::with_models(Arc::new(models)))
}
