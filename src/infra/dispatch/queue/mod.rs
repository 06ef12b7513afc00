//! Time-agnostic scheduling core of the dispatch engine.
//!
//! The queue never reads a clock: the runner passes the current time to
//! [`TaskQueue::pop_ready`]. Newly scheduled tasks are "unarmed" until the
//! runner first sees them; arming gives one-shot jobs a due time of "now" and
//! periodic jobs a first deadline one period later.
//!
//! Ready jobs run by `(due time, submission sequence)`, so FIFO order holds
//! among one-shot jobs and ties between a one-shot job and a periodic tick go
//! to whichever was submitted first.
use super::{Schedule, TaskHandle};
use crate::error::DispatchError;

struct Entry<J> {
    job: J,
    schedule: Schedule,
    /// Submission order, used to break ties.
    seq: u64,
    /// `None` until armed by the runner.
    due_ms: Option<u64>,
}

/// Fixed-capacity set of scheduled jobs.
pub struct TaskQueue<J, const CAP: usize> {
    slots: [Option<Entry<J>>; CAP],
    generations: [u16; CAP],
    next_seq: u64,
}

impl<J, const CAP: usize> Default for TaskQueue<J, CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<J, const CAP: usize> TaskQueue<J, CAP> {
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
            generations: [0; CAP],
            next_seq: 0,
        }
    }

    /// Number of scheduled tasks (pending one-shots plus live periodic tasks).
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Store `job` in a free slot.
    pub fn schedule(&mut self, schedule: Schedule, job: J) -> Result<TaskHandle, DispatchError> {
        if schedule == (Schedule::Every { period_ms: 0 }) {
            return Err(DispatchError::ZeroPeriod);
        }
        let slot = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(DispatchError::QueueFull)?;

        let seq = self.next_seq;
        self.next_seq += 1;
        self.slots[slot] = Some(Entry {
            job,
            schedule,
            seq,
            due_ms: None,
        });

        Ok(TaskHandle {
            slot: slot as u16,
            generation: self.generations[slot],
        })
    }

    /// Remove the task behind `handle`. Returns `false` for stale handles.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let slot = handle.slot as usize;
        if slot >= CAP || self.generations[slot] != handle.generation || self.slots[slot].is_none()
        {
            return false;
        }
        self.release(slot);
        true
    }

    /// Give a due time to every task the runner has not seen yet.
    pub fn arm(&mut self, now_ms: u64) {
        for entry in self.slots.iter_mut().flatten() {
            if entry.due_ms.is_none() {
                entry.due_ms = Some(match entry.schedule {
                    Schedule::Once => now_ms,
                    Schedule::Every { period_ms } => now_ms.saturating_add(period_ms),
                });
            }
        }
    }

    /// Earliest due time among armed tasks.
    pub fn next_deadline(&self) -> Option<u64> {
        self.slots.iter().flatten().filter_map(|entry| entry.due_ms).min()
    }

    /// Drop every task and invalidate all outstanding handles.
    pub fn clear(&mut self) {
        for slot in 0..CAP {
            if self.slots[slot].is_some() {
                self.release(slot);
            }
        }
    }

    fn release(&mut self, slot: usize) -> Option<Entry<J>> {
        self.generations[slot] = self.generations[slot].wrapping_add(1);
        self.slots[slot].take()
    }
}

impl<J: Clone, const CAP: usize> TaskQueue<J, CAP> {
    /// Arm new tasks, then take the next job due at `now_ms`.
    ///
    /// One-shot jobs leave the queue. Periodic jobs are cloned and their next
    /// deadline advances by whole periods; ticks missed while the worker was
    /// busy collapse into this single run.
    pub fn pop_ready(&mut self, now_ms: u64) -> Option<J> {
        self.arm(now_ms);

        let slot = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                let entry = slot.as_ref()?;
                let due = entry.due_ms.filter(|due| *due <= now_ms)?;
                Some((due, entry.seq, index))
            })
            .min()
            .map(|(_, _, index)| index)?;

        match self.slots[slot].as_ref()?.schedule {
            Schedule::Once => self.release(slot).map(|entry| entry.job),
            Schedule::Every { period_ms } => {
                let entry = self.slots[slot].as_mut()?;
                let due = entry.due_ms.unwrap_or(now_ms);
                let elapsed_periods = (now_ms - due) / period_ms + 1;
                entry.due_ms = Some(due.saturating_add(elapsed_periods.saturating_mul(period_ms)));
                Some(entry.job.clone())
            }
        }
    }
}
//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;
