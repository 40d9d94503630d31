// Deadline-ordered job scheduler partitioned into independent lanes.

use super::config::SchedulerConfig;
use crate::Core::error::{ConfigError, SchedError};
use crate::Structs::Job;

use parking_lot::Mutex;
use std::cmp::Ordering as CmpOrdering;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Heap entry. `BinaryHeap` is a max-heap, so the ordering is reversed:
/// the greatest entry is the earliest deadline, then the earliest insertion.
#[derive(Debug)]
struct Pending {
    job: Job,
    seq: u64,
}

impl Pending {
    #[inline]
    fn key(&self) -> (u64, u64) {
        (self.job.deadline_ns, self.seq)
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        other.key().cmp(&self.key())
    }
}

/// A fixed set of lanes, each a min-heap of jobs keyed by deadline.
///
/// ### Ordering
/// Within a lane, jobs come out in non-decreasing `deadline_ns`; equal
/// deadlines come out in insertion order. Lanes never interact.
///
/// ### Concurrency
/// Every lane sits behind its own `parking_lot::Mutex`, so the scheduler is
/// `Send + Sync` and may be shared (e.g. in an `Arc`) between any number of
/// scheduling and polling threads. Work on different lanes never contends.
/// All operations return immediately; an empty lane is reported as `None`.
///
/// ### Lane indices
/// [`schedule`](Self::schedule), [`poll_ready`](Self::poll_ready) and the
/// other per-lane accessors panic on an out-of-range lane: that is a caller
/// bug. Use [`try_schedule`](Self::try_schedule) for lanes that come from
/// untrusted input.
pub struct LaneScheduler {
    lanes: Box<[Mutex<BinaryHeap<Pending>>]>,
    next_seq: AtomicU64,
}

impl LaneScheduler {
    /// A scheduler with `lanes` lanes.
    ///
    /// # Errors
    /// `ConfigError::NoLanes` if `lanes == 0`.
    pub fn new(lanes: usize) -> Result<Self, ConfigError> {
        Self::from_config(SchedulerConfig::default().with_lanes(lanes))
    }

    pub fn from_config(config: SchedulerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_lane_count(config.lanes))
    }

    fn with_lane_count(lanes: usize) -> Self {
        let lanes = (0..lanes).map(|_| Mutex::new(BinaryHeap::new())).collect();
        Self {
            lanes,
            next_seq: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    #[inline]
    #[track_caller]
    fn lane(&self, lane: usize) -> &Mutex<BinaryHeap<Pending>> {
        assert!(
            lane < self.lanes.len(),
            "lane {lane} out of range (scheduler has {} lanes)",
            self.lanes.len()
        );
        &self.lanes[lane]
    }

    /// Insert `job` into lane `job.lane`.
    ///
    /// # Panics
    /// If `job.lane >= lane_count()`.
    #[track_caller]
    pub fn schedule(&self, job: Job) {
        let lane = self.lane(job.lane);
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        lane.lock().push(Pending { job, seq });
        tracing::trace!(lane = job.lane, job_id = job.id, deadline_ns = job.deadline_ns, "scheduled");
    }

    /// Like [`schedule`](Self::schedule) but rejects an out-of-range lane
    /// instead of panicking.
    pub fn try_schedule(&self, job: Job) -> Result<(), SchedError> {
        if job.lane >= self.lanes.len() {
            return Err(SchedError::InvalidLane {
                lane: job.lane,
                lanes: self.lanes.len(),
            });
        }
        self.schedule(job);
        Ok(())
    }

    /// Remove and return the job with the earliest deadline in `lane`.
    ///
    /// The current time is not considered; see [`poll_due`](Self::poll_due).
    ///
    /// # Panics
    /// If `lane >= lane_count()`.
    #[track_caller]
    pub fn poll_ready(&self, lane: usize) -> Option<Job> {
        let job = self.lane(lane).lock().pop().map(|p| p.job);
        if let Some(job) = &job {
            tracing::trace!(lane, job_id = job.id, deadline_ns = job.deadline_ns, "polled");
        }
        job
    }

    /// Remove and return the earliest job in `lane` only if its deadline is
    /// at or before `now_ns`.
    #[track_caller]
    pub fn poll_due(&self, lane: usize, now_ns: u64) -> Option<Job> {
        let mut heap = self.lane(lane).lock();
        if !is_due(heap.peek(), now_ns) {
            return None;
        }
        heap.pop().map(|p| p.job)
    }

    /// Pop up to `max` due jobs from `lane`, earliest first.
    #[track_caller]
    pub fn drain_due(&self, lane: usize, now_ns: u64, max: usize) -> Vec<Job> {
        let mut heap = self.lane(lane).lock();
        let mut out = Vec::new();
        while out.len() < max && is_due(heap.peek(), now_ns) {
            match heap.pop() {
                Some(p) => out.push(p.job),
                None => break,
            }
        }
        out
    }

    /// Poll lanes in index order and return the first job found.
    pub fn poll_any(&self) -> Option<Job> {
        (0..self.lanes.len()).find_map(|lane| self.poll_ready(lane))
    }

    /// Deadline of the job `poll_ready(lane)` would return.
    #[track_caller]
    pub fn peek_deadline(&self, lane: usize) -> Option<u64> {
        self.lane(lane).lock().peek().map(|p| p.job.deadline_ns)
    }

    #[track_caller]
    pub fn lane_len(&self, lane: usize) -> usize {
        self.lane(lane).lock().len()
    }

    /// Total jobs across all lanes. Only a snapshot under concurrent use.
    pub fn len(&self) -> usize {
        self.lanes.iter().map(|l| l.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.iter().all(|l| l.lock().is_empty())
    }
}

#[inline]
fn is_due(head: Option<&Pending>, now_ns: u64) -> bool {
    head.is_some_and(|p| p.job.deadline_ns <= now_ns)
}

impl Default for LaneScheduler {
    fn default() -> Self {
        // the default config always has at least one lane
        Self::with_lane_count(SchedulerConfig::default().lanes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_deadlines_keep_insertion_order() {
        let sched = LaneScheduler::default();
        for id in 0..5 {
            sched.schedule(Job::new(1, 500, id));
        }
        let ids: Vec<u64> = std::iter::from_fn(|| sched.poll_ready(1)).map(|j| j.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn zero_lanes_is_rejected() {
        assert_eq!(LaneScheduler::new(0).err(), Some(ConfigError::NoLanes));
    }
}
