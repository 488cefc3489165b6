//! Simulation domain models.
//!
//! Provides the data types the tick engine operates on: jobs, the
//! arrival-ordered job set, a rotating cursor over it, and the bounded
//! ready queue used by round-robin.
//!
//! # Domain Mappings
//!
//! | u-cpusched | Operating system | Batch queue |
//! |------------|------------------|-------------|
//! | Job | Process | Batch job |
//! | JobSet | Process table | Submission list |
//! | ReadyQueue | Run queue | Dispatch queue |
//! | Tick | Timer interrupt | Time unit |

mod cursor;
mod job;
mod job_set;
mod ready_queue;

pub use cursor::JobCursor;
pub use job::Job;
pub use job_set::JobSet;
pub use ready_queue::ReadyQueue;

/// Discrete simulated time unit.
pub type Tick = u32;

/// Position of a job within its [`JobSet`].
pub type JobIndex = usize;
