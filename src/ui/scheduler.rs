// SPDX-License-Identifier: MPL-2.0
//! Cancellable one-shot and repeating tasks driven by the host's clock.
//!
//! The overlay never sleeps or spawns timers itself. Tasks are kept here with a
//! due instant; the host calls the session's `tick` with the current time (for
//! example from a periodic subscription) and every due task is handed back once.

use std::time::{Duration, Instant};

/// Handle of a scheduled task, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone)]
struct ScheduledTask<K> {
    handle: TaskHandle,
    kind: K,
    due: Instant,
    period: Option<Duration>,
}

/// Queue of pending tasks tagged with a caller-defined kind.
#[derive(Debug, Clone)]
pub struct Scheduler<K> {
    next_id: u64,
    tasks: Vec<ScheduledTask<K>>,
}

impl<K> Default for Scheduler<K> {
    fn default() -> Self {
        Self {
            next_id: 0,
            tasks: Vec::new(),
        }
    }
}

impl<K: Copy> Scheduler<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `kind` to fire once, `delay` after `now`.
    pub fn schedule_once(&mut self, kind: K, now: Instant, delay: Duration) -> TaskHandle {
        self.push(kind, now + delay, None)
    }

    /// Schedules `kind` to fire every `period`, the first time one period after `now`.
    pub fn schedule_repeating(&mut self, kind: K, now: Instant, period: Duration) -> TaskHandle {
        self.push(kind, now + period, Some(period))
    }

    fn push(&mut self, kind: K, due: Instant, period: Option<Duration>) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.tasks.push(ScheduledTask {
            handle,
            kind,
            due,
            period,
        });
        handle
    }

    /// Cancels a task. Returns `false` if it already fired (one-shot) or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.handle != handle);
        self.tasks.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    #[must_use]
    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|task| task.handle == handle)
    }

    /// Earliest instant at which a task becomes due.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tasks.iter().map(|task| task.due).min()
    }

    /// Removes and returns the earliest task due at `now`.
    ///
    /// Repeating tasks stay queued for their next period. A repeating task that
    /// fell more than one period behind fires once and resumes one period after
    /// `now` instead of replaying every missed period.
    pub fn pop_due(&mut self, now: Instant) -> Option<(TaskHandle, K)> {
        let index = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due <= now)
            .min_by_key(|(_, task)| (task.due, task.handle))
            .map(|(index, _)| index)?;

        let task = &self.tasks[index];
        let fired = (task.handle, task.kind);
        let (due, period) = (task.due, task.period);
        match period {
            Some(period) => {
                let next = due + period;
                self.tasks[index].due = if next <= now { now + period } else { next };
            }
            None => {
                self.tasks.swap_remove(index);
            }
        }
        Some(fired)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
