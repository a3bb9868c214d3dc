//! Virtual-time task scheduling
//!
//! Stands in for `setInterval` / `setTimeout`: tasks are queued against a
//! millisecond clock that only moves when the owner pops due work. Repeating
//! tasks keep their handle across firings, so a single `cancel` stops them.

/// Handle returned for every scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct Entry<T> {
    handle: TaskHandle,
    due_ms: u64,
    period_ms: Option<u64>,
    task: T,
}

/// Deterministic task queue over a virtual millisecond clock
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T: Clone> Scheduler<T> {
    pub fn new(now_ms: u64) -> Self {
        Self {
            now_ms,
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of tasks still queued
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Run `task` every `interval_ms`, first firing one interval from now
    pub fn schedule_repeating(&mut self, interval_ms: u64, task: T) -> TaskHandle {
        // Zero period would fire forever inside one pop loop
        let interval_ms = interval_ms.max(1);
        self.push(interval_ms, Some(interval_ms), task)
    }

    /// Run `task` once after `delay_ms`
    pub fn schedule_once(&mut self, delay_ms: u64, task: T) -> TaskHandle {
        self.push(delay_ms, None, task)
    }

    /// Cancel a task; returns false if it already ran or was cancelled
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    /// Drop every queued task
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Pop the earliest task due at or before `until_ms`.
    ///
    /// Ties fire in scheduling order. The clock moves to the task's due time,
    /// so anything scheduled by the caller while handling it is relative to
    /// that moment. Repeating tasks are re-queued one period later.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(TaskHandle, T)> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= until_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.handle.0))
            .map(|(i, _)| i)?;

        let entry = &mut self.entries[idx];
        self.now_ms = self.now_ms.max(entry.due_ms);
        let fired = (entry.handle, entry.task.clone());

        match entry.period_ms {
            Some(period) => entry.due_ms += period,
            None => {
                self.entries.swap_remove(idx);
            }
        }
        Some(fired)
    }

    /// Move the clock forward once every due task has been popped
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    fn push(&mut self, delay_ms: u64, period_ms: Option<u64>, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            handle,
            due_ms: self.now_ms + delay_ms,
            period_ms,
            task,
        });
        handle
    }
}
