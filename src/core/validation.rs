use crate::core::step::Step;
use crate::core::{PROMPT, RESERVED_SLOTS};
use std::collections::HashSet;
use std::fmt;

/// Represents an issue found during recipe validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// A hard error: the recipe cannot run as declared.
    Error(String),
    /// A warning: the recipe runs, but something in its declaration is suspicious.
    Warning(String),
}

/// The result of a recipe validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.issues.push(ValidationIssue::Error(msg.into()));
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.issues.push(ValidationIssue::Warning(msg.into()));
    }

    pub fn is_safe(&self) -> bool {
        !self.issues.iter().any(|i| matches!(i, ValidationIssue::Error(_)))
    }

    pub fn has_warnings(&self) -> bool {
        self.issues.iter().any(|i| matches!(i, ValidationIssue::Warning(_)))
    }

    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.issues.iter().filter_map(|i| match i {
            ValidationIssue::Error(msg) => Some(msg.as_str()),
            ValidationIssue::Warning(_) => None,
        })
    }

    /// Sends every issue to the log.
    pub fn log_summary(&self) {
        for issue in &self.issues {
            match issue {
                ValidationIssue::Error(msg) => log::error!("Recipe validation error: {}", msg),
                ValidationIssue::Warning(msg) => log::warn!("Recipe validation warning: {}", msg),
            }
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .issues
            .iter()
            .map(|issue| match issue {
                ValidationIssue::Error(msg) => format!("error: {}", msg),
                ValidationIssue::Warning(msg) => format!("warning: {}", msg),
            })
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Walks the steps in order and checks that every argument is bound by the
/// prompt or by a strictly earlier step.
pub fn validate_steps(steps: &[Step]) -> ValidationReport {
    let mut report = ValidationReport::new();
    let mut available: HashSet<&str> = HashSet::from([PROMPT]);

    for (position, step) in steps.iter().enumerate() {
        for arg in step.arg_refs() {
            if !available.contains(arg.as_str()) {
                report.add_error(format!(
                    "Step '{}' (position {}) requires input '{}', which no earlier step produces",
                    step.name(),
                    position,
                    arg
                ));
            }
        }

        if RESERVED_SLOTS.contains(&step.name()) {
            report.add_error(format!(
                "Step '{}' (position {}) uses a reserved slot name",
                step.name(),
                position
            ));
        } else if !available.insert(step.name()) {
            report.add_error(format!(
                "Step '{}' (position {}) is declared more than once",
                step.name(),
                position
            ));
        }
    }

    report
}

/// Checks a discard list against the slots a recipe can produce.
pub fn validate_discards<S: AsRef<str>>(steps: &[Step], discard: &[S]) -> ValidationReport {
    let mut report = ValidationReport::new();
    for name in discard {
        let name = name.as_ref();
        if name != PROMPT && !steps.iter().any(|s| s.name() == name) {
            report.add_warning(format!(
                "Slot '{}' is marked for discard but no step produces it",
                name
            ));
        }
    }
    report
}
