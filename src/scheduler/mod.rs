//! Tick engine, trace events and run metrics.
//!
//! # Algorithm
//!
//! `Simulation` advances a discrete clock one tick at a time from 0 to
//! `run_for` inclusive, handling arrivals, wait accrual, completion and
//! idling itself and delegating the choice of runner to a
//! [`SelectionPolicy`](crate::dispatching::SelectionPolicy).
//!
//! # KPI
//!
//! `JobMetrics` records per-job wait and turnaround; `RunKpi` aggregates
//! utilization, throughput and context switches.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7-8

mod engine;
mod event;
mod kpi;
mod observer;

pub use engine::{RunParameters, Simulation};
pub use event::{Event, EventKind};
pub use kpi::{JobMetrics, RunKpi};
pub use observer::Observer;
