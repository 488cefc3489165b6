//! Selection policies for the tick engine.
//!
//! A policy answers one question: which job runs this tick? The engine
//! decides *when* to ask (no job running, quantum expired, or every tick
//! for policies that re-evaluate continuously) and performs all state
//! changes itself.
//!
//! # Usage
//!
//! ```
//! use u_cpusched::dispatching::{Algorithm, TickContext};
//! use u_cpusched::models::{Job, JobSet};
//!
//! let jobs = JobSet::new(vec![Job::new("A", 0, 5), Job::new("B", 0, 2)]);
//! let policy = Algorithm::Sjf.policy();
//!
//! let context = TickContext::at_tick(0, &jobs);
//! assert_eq!(policy.select(&context), Some(1));
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7

mod context;
pub mod policies;

pub use context::TickContext;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::models::JobIndex;

/// Strategy that picks the job to run at a tick.
pub trait SelectionPolicy: Send + Sync + Debug {
    /// Short name (e.g., "FCFS").
    fn name(&self) -> &'static str;

    /// Human-readable title used in reports.
    fn description(&self) -> &'static str {
        self.name()
    }

    /// Maximum consecutive ticks per selection. `None` = unbounded.
    ///
    /// Policies with a time slice are fed from the engine's ready queue.
    fn time_slice(&self) -> Option<NonZeroU32> {
        None
    }

    /// Whether the engine must consult the policy on every tick, even
    /// while a job is running.
    fn reevaluates_every_tick(&self) -> bool {
        false
    }

    /// Returns the job to run at `context.tick`, or `None` if no job
    /// is eligible. Must never return a job that has not arrived or
    /// has no remaining burst.
    fn select(&self, context: &TickContext<'_>) -> Option<JobIndex>;
}

/// Scheduling discipline chosen for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "use", rename_all = "snake_case")]
pub enum Algorithm {
    /// First-come first-served, non-preemptive.
    Fcfs,
    /// Shortest remaining burst first, preemptive.
    Sjf,
    /// Round-robin with a fixed quantum.
    #[serde(rename = "rr")]
    RoundRobin {
        /// Maximum consecutive ticks per selection.
        quantum: NonZeroU32,
    },
}

impl Algorithm {
    /// Round-robin with the given quantum.
    ///
    /// # Panics
    /// If `quantum` is zero.
    pub fn round_robin(quantum: u32) -> Self {
        match NonZeroU32::new(quantum) {
            Some(quantum) => Self::RoundRobin { quantum },
            None => panic!("round-robin quantum must be positive"),
        }
    }

    /// Which family this algorithm belongs to.
    pub fn kind(&self) -> AlgorithmKind {
        match self {
            Self::Fcfs => AlgorithmKind::Fcfs,
            Self::Sjf => AlgorithmKind::Sjf,
            Self::RoundRobin { .. } => AlgorithmKind::RoundRobin,
        }
    }

    /// The quantum, for round-robin.
    pub fn quantum(&self) -> Option<NonZeroU32> {
        match self {
            Self::RoundRobin { quantum } => Some(*quantum),
            _ => None,
        }
    }

    /// Builds the policy implementing this algorithm.
    pub fn policy(&self) -> Box<dyn SelectionPolicy> {
        match *self {
            Self::Fcfs => Box::new(policies::Fcfs),
            Self::Sjf => Box::new(policies::Sjf),
            Self::RoundRobin { quantum } => Box::new(policies::RoundRobin::new(quantum)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoundRobin { quantum } => write!(f, "rr (quantum {quantum})"),
            other => f.write_str(other.kind().keyword()),
        }
    }
}

/// Algorithm family without parameters, as named in job files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    /// `fcfs`
    Fcfs,
    /// `sjf`
    Sjf,
    /// `rr`
    RoundRobin,
}

impl AlgorithmKind {
    /// Keyword used in job files.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Sjf => "sjf",
            Self::RoundRobin => "rr",
        }
    }

    /// Whether a quantum must accompany this kind.
    pub fn needs_quantum(&self) -> bool {
        matches!(self, Self::RoundRobin)
    }

    /// Completes the algorithm. Returns `None` for round-robin without
    /// a quantum; the quantum is ignored for other kinds.
    pub fn with_quantum(self, quantum: Option<NonZeroU32>) -> Option<Algorithm> {
        match self {
            Self::Fcfs => Some(Algorithm::Fcfs),
            Self::Sjf => Some(Algorithm::Sjf),
            Self::RoundRobin => quantum.map(|quantum| Algorithm::RoundRobin { quantum }),
        }
    }
}

impl FromStr for AlgorithmKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fcfs" => Ok(Self::Fcfs),
            "sjf" => Ok(Self::Sjf),
            "rr" => Ok(Self::RoundRobin),
            other => Err(format!("unknown scheduler '{other}'")),
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_robin_constructor() {
        let alg = Algorithm::round_robin(3);
        assert_eq!(alg.kind(), AlgorithmKind::RoundRobin);
        assert_eq!(alg.quantum().map(NonZeroU32::get), Some(3));
        assert_eq!(alg.policy().time_slice().map(NonZeroU32::get), Some(3));
    }

    #[test]
    #[should_panic(expected = "quantum must be positive")]
    fn test_zero_quantum_panics() {
        Algorithm::round_robin(0);
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("fcfs".parse(), Ok(AlgorithmKind::Fcfs));
        assert_eq!("sjf".parse(), Ok(AlgorithmKind::Sjf));
        assert_eq!("rr".parse(), Ok(AlgorithmKind::RoundRobin));
        assert!("RR".parse::<AlgorithmKind>().is_err());
        assert!("lottery".parse::<AlgorithmKind>().is_err());
    }

    #[test]
    fn test_with_quantum() {
        let q = NonZeroU32::new(2);
        assert_eq!(AlgorithmKind::Fcfs.with_quantum(q), Some(Algorithm::Fcfs));
        assert_eq!(AlgorithmKind::RoundRobin.with_quantum(None), None);
        assert_eq!(
            AlgorithmKind::RoundRobin.with_quantum(q),
            Some(Algorithm::round_robin(2))
        );
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(Algorithm::Fcfs.policy().name(), "FCFS");
        assert_eq!(Algorithm::Sjf.policy().name(), "SJF");
        assert_eq!(Algorithm::round_robin(1).policy().name(), "RR");
        assert!(Algorithm::Sjf.policy().reevaluates_every_tick());
        assert!(!Algorithm::Fcfs.policy().reevaluates_every_tick());
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&Algorithm::round_robin(4)).unwrap();
        assert_eq!(json, r#"{"use":"rr","quantum":4}"#);
        let back: Algorithm = serde_json::from_str(r#"{"use":"sjf"}"#).unwrap();
        assert_eq!(back, Algorithm::Sjf);
    }

    #[test]
    fn test_display() {
        assert_eq!(Algorithm::Fcfs.to_string(), "fcfs");
        assert_eq!(Algorithm::round_robin(2).to_string(), "rr (quantum 2)");
    }
}
