//! Virtual-clock timer queue.
//!
//! Stands in for `setTimeout`. Time only moves when the owner pops due
//! tasks, so pages can be driven deterministically. Tasks fire in
//! `(due_at, scheduling order)` order. There is no cancellation: once
//! scheduled, a task will fire.

use std::time::Duration;

/// Identifier returned when scheduling a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Snapshot of a scheduled task, for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer<T> {
    pub id: TimerId,
    pub due_at_ms: u64,
    pub task: T,
}

#[derive(Debug, Clone)]
struct Scheduled<T> {
    id: TimerId,
    due_at_ms: u64,
    order: u64,
    task: T,
}

/// A queue of tasks keyed by virtual due time.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    now_ms: u64,
    next_id: u64,
    next_order: u64,
    tasks: Vec<Scheduled<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 1,
            next_order: 0,
            tasks: Vec::new(),
        }
    }

    /// Current virtual time in milliseconds since the queue was created.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run `task` once, `delay` from now.
    pub fn set_timeout(&mut self, delay: Duration, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let order = self.next_order;
        self.next_order += 1;
        self.tasks.push(Scheduled {
            id,
            due_at_ms: self.now_ms.saturating_add(millis(delay)),
            order,
            task,
        });
        id
    }

    fn next_index(&self, limit_ms: u64) -> Option<usize> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_at_ms <= limit_ms)
            .min_by_key(|(_, t)| (t.due_at_ms, t.order))
            .map(|(idx, _)| idx)
    }

    /// Due time of the earliest task.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.tasks.iter().map(|t| t.due_at_ms).min()
    }

    /// Move the clock forward without running anything. Never moves back.
    pub fn advance_clock_to(&mut self, ms: u64) {
        self.now_ms = self.now_ms.max(ms);
    }

    /// Remove and return the earliest task due at or before `limit_ms`,
    /// moving the clock to its due time.
    pub fn pop_due(&mut self, limit_ms: u64) -> Option<T> {
        let idx = self.next_index(limit_ms)?;
        let scheduled = self.tasks.swap_remove(idx);
        self.advance_clock_to(scheduled.due_at_ms);
        Some(scheduled.task)
    }
}

impl<T: Clone> TimerQueue<T> {
    /// Scheduled tasks sorted by firing order.
    pub fn pending(&self) -> Vec<PendingTimer<T>> {
        let mut tasks: Vec<&Scheduled<T>> = self.tasks.iter().collect();
        tasks.sort_by_key(|t| (t.due_at_ms, t.order));
        tasks
            .into_iter()
            .map(|t| PendingTimer {
                id: t.id,
                due_at_ms: t.due_at_ms,
                task: t.task.clone(),
            })
            .collect()
    }
}
