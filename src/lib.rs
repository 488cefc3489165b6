//! Tick-driven CPU scheduling simulator.
//!
//! Simulates First-Come First-Served, preemptive Shortest Job First and
//! Round-Robin over a set of jobs with arrival times and CPU bursts,
//! producing a deterministic event trace plus per-job wait and turnaround.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Job`, `JobSet`, `JobCursor`, `ReadyQueue`
//! - **`dispatching`**: Selection policies (`Fcfs`, `Sjf`, `RoundRobin`) and
//!   the `Algorithm` choice
//! - **`scheduler`**: The tick engine, trace events and KPIs
//! - **`report`**: Text and JSON rendering of a finished run
//! - **`config`**: Job file loader
//! - **`validation`**: Input integrity checks (names)
//! - **`workload`**: Seeded random workload generation
//! - **`error`**: Front-end error type with exit codes
//!
//! # Example
//!
//! ```
//! use u_cpusched::config::Config;
//! use u_cpusched::scheduler::Simulation;
//!
//! let config = Config::parse(
//!     "processcount 2\nrunfor 8\nuse sjf\n\
//!      process name A arrival 0 burst 5\n\
//!      process name B arrival 1 burst 3\nend\n",
//! ).unwrap();
//! let report = Simulation::new(config.job_set(), config.params()).run();
//! assert_eq!(report.metrics[1].turnaround, Some(3));
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7-8

pub mod config;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod validation;
pub mod workload;
