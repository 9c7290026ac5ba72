use crate::core::SlotValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use uuid::Uuid;

/// A single executed step in the trace of one recipe run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEntry {
    pub timestamp: DateTime<Utc>,
    pub run_id: Uuid,
    pub step: String,
    pub inputs: Vec<SlotValue>,
    /// `None` when the step was unresolved.
    pub output: Option<SlotValue>,
    /// Number of slots held right after the step ran.
    pub slot_count: usize,
}

/// Trait for recording execution traces.
pub trait Telemetry: Send + Sync {
    fn record(&self, entry: TraceEntry);
    fn flush(&self);
}

/// Simple in-memory collector for traces.
#[derive(Default)]
pub struct MemoryTelemetry {
    traces: Mutex<Vec<TraceEntry>>,
}

impl MemoryTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_traces(&self) -> Vec<TraceEntry> {
        self.traces
            .lock()
            .map(|traces| traces.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Traces belonging to a single run, in execution order.
    pub fn run(&self, run_id: Uuid) -> Vec<TraceEntry> {
        self.get_traces()
            .into_iter()
            .filter(|t| t.run_id == run_id)
            .collect()
    }
}

impl Telemetry for MemoryTelemetry {
    fn record(&self, entry: TraceEntry) {
        match self.traces.lock() {
            Ok(mut traces) => traces.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }

    fn flush(&self) {
        // No-op for memory collector
    }
}
