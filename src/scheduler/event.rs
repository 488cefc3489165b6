//! Trace events emitted by the tick engine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Tick;

/// One entry of the simulation trace.
///
/// Events are emitted in non-decreasing tick order. Within a tick the
/// order is: arrivals, completions, then one of idle or selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Tick at which the event happened.
    pub tick: Tick,
    /// What happened.
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventKind {
    /// Job became eligible.
    Arrived {
        /// Job name.
        job: String,
    },
    /// A different job took the CPU.
    Selected {
        /// Job name.
        job: String,
        /// Remaining burst at selection.
        burst: Tick,
    },
    /// Job's remaining burst reached zero.
    Finished {
        /// Job name.
        job: String,
    },
    /// No outstanding work this tick.
    Idle,
}

impl Event {
    /// Creates an event.
    pub fn new(tick: Tick, kind: EventKind) -> Self {
        Self { tick, kind }
    }

    /// Name of the job involved, if any.
    pub fn job(&self) -> Option<&str> {
        match &self.kind {
            EventKind::Arrived { job }
            | EventKind::Selected { job, .. }
            | EventKind::Finished { job } => Some(job),
            EventKind::Idle => None,
        }
    }

    /// Whether this is a selection event.
    #[inline]
    pub fn is_selection(&self) -> bool {
        matches!(self.kind, EventKind::Selected { .. })
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Time {}: ", self.tick)?;
        match &self.kind {
            EventKind::Arrived { job } => write!(f, "{job} arrived"),
            EventKind::Selected { job, burst } => write!(f, "{job} selected (burst {burst})"),
            EventKind::Finished { job } => write!(f, "{job} finished"),
            EventKind::Idle => f.write_str("IDLE"),
        }
    }
}
