//! Ordered job collection for one simulation run.

use serde::Serialize;
use std::ops::{Index, IndexMut};

use super::{Job, JobIndex, Tick};

/// The jobs of a single run, ordered by arrival.
///
/// Ordering is established once at construction with a stable sort,
/// so jobs with equal arrival keep their submission order. That order
/// is the final tie-breaker for every selection policy.
///
/// Membership never changes after construction; only the mutable
/// per-job counters do.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobSet {
    jobs: Vec<Job>,
}

impl JobSet {
    /// Builds a job set, sorting by arrival (stable) and resetting all
    /// simulation counters.
    pub fn new(jobs: impl IntoIterator<Item = Job>) -> Self {
        let mut jobs: Vec<Job> = jobs.into_iter().collect();
        jobs.sort_by_key(|job| job.arrival);
        for job in &mut jobs {
            job.reset();
        }
        Self { jobs }
    }

    /// Number of jobs.
    #[inline]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the set is empty (a legal, fully idle run).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Job at `index`, if any.
    pub fn get(&self, index: JobIndex) -> Option<&Job> {
        self.jobs.get(index)
    }

    /// Iterates jobs in set order.
    pub fn iter(&self) -> std::slice::Iter<'_, Job> {
        self.jobs.iter()
    }

    /// Iterates `(index, job)` pairs in set order.
    pub fn indexed(&self) -> impl Iterator<Item = (JobIndex, &Job)> {
        self.jobs.iter().enumerate()
    }

    /// Indices of jobs arriving exactly at tick `t`, in set order.
    ///
    /// Jobs are sorted by arrival, so these form a contiguous run.
    pub fn arriving_at(&self, t: Tick) -> impl Iterator<Item = JobIndex> + '_ {
        let start = self.jobs.partition_point(|job| job.arrival < t);
        self.jobs[start..]
            .iter()
            .take_while(move |job| job.arrival == t)
            .enumerate()
            .map(move |(offset, _)| start + offset)
    }

    /// Indices of jobs eligible at tick `t`, in set order.
    pub fn eligible_at(&self, t: Tick) -> impl Iterator<Item = JobIndex> + '_ {
        self.indexed()
            .filter(move |(_, job)| job.is_eligible(t))
            .map(|(i, _)| i)
    }

    /// Total burst across all jobs.
    pub fn total_burst(&self) -> u64 {
        self.jobs.iter().map(|job| u64::from(job.burst)).sum()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Job> {
        self.jobs.iter_mut()
    }
}

impl Index<JobIndex> for JobSet {
    type Output = Job;

    fn index(&self, index: JobIndex) -> &Job {
        &self.jobs[index]
    }
}

impl IndexMut<JobIndex> for JobSet {
    fn index_mut(&mut self, index: JobIndex) -> &mut Job {
        &mut self.jobs[index]
    }
}

impl<'a> IntoIterator for &'a JobSet {
    type Item = &'a Job;
    type IntoIter = std::slice::Iter<'a, Job>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.iter()
    }
}

impl FromIterator<Job> for JobSet {
    fn from_iter<I: IntoIterator<Item = Job>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(set: &JobSet) -> Vec<&str> {
        set.iter().map(|j| j.name.as_str()).collect()
    }

    #[test]
    fn test_sorted_by_arrival() {
        let set = JobSet::new(vec![
            Job::new("C", 4, 1),
            Job::new("A", 0, 1),
            Job::new("B", 2, 1),
        ]);
        assert_eq!(names(&set), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_equal_arrivals_keep_input_order() {
        let set = JobSet::new(vec![
            Job::new("late", 3, 1),
            Job::new("second", 1, 9),
            Job::new("first", 0, 1),
            Job::new("third", 1, 2),
            Job::new("fourth", 1, 1),
        ]);
        assert_eq!(
            names(&set),
            vec!["first", "second", "third", "fourth", "late"]
        );
    }

    #[test]
    fn test_counters_reset_on_construction() {
        let mut stale = Job::new("A", 0, 3);
        stale.wait = 9;
        stale.remaining_burst = 1;
        stale.completion_tick = Some(2);

        let set = JobSet::new(vec![stale]);
        assert_eq!(set[0], Job::new("A", 0, 3));
    }

    #[test]
    fn test_arriving_at() {
        let set = JobSet::new(vec![
            Job::new("A", 0, 1),
            Job::new("B", 2, 1),
            Job::new("C", 2, 1),
            Job::new("D", 5, 1),
        ]);
        assert_eq!(set.arriving_at(2).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(set.arriving_at(0).collect::<Vec<_>>(), vec![0]);
        assert!(set.arriving_at(3).next().is_none());
        assert!(set.arriving_at(9).next().is_none());
    }

    #[test]
    fn test_eligible_at() {
        let mut set = JobSet::new(vec![
            Job::new("A", 0, 1),
            Job::new("B", 1, 1),
            Job::new("C", 3, 1),
        ]);
        set[0].remaining_burst = 0;
        assert_eq!(set.eligible_at(2).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_empty_set() {
        let set = JobSet::new(Vec::new());
        assert!(set.is_empty());
        assert_eq!(set.total_burst(), 0);
    }
}
