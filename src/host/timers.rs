//! Virtual-time timer queue.
//!
//! Time only moves when the host asks for the next due task, so tests can
//! step through autoplay ticks and resource completions deterministically.

use std::collections::BTreeMap;

/// Handle returned by `set_interval` / `set_timeout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repeat {
    Once,
    Every(u64),
}

#[derive(Debug, Clone)]
struct Timer<T> {
    due: u64,
    repeat: Repeat,
    payload: T,
}

/// Task that came due, returned by [`TimerQueue::pop_due`].
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<T> {
    pub handle: TimerHandle,
    pub at: u64,
    pub payload: T,
}

#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    now: u64,
    next_handle: u64,
    timers: BTreeMap<TimerHandle, Timer<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_handle: 1,
            timers: BTreeMap::new(),
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn set_interval(&mut self, period_ms: u64, payload: T) -> TimerHandle {
        // Zero periods would starve every other task.
        let period = period_ms.max(1);
        self.insert(period, Repeat::Every(period), payload)
    }

    pub fn set_timeout(&mut self, delay_ms: u64, payload: T) -> TimerHandle {
        self.insert(delay_ms, Repeat::Once, payload)
    }

    fn insert(&mut self, delay: u64, repeat: Repeat, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.timers.insert(
            handle,
            Timer {
                due: self.now + delay,
                repeat,
                payload,
            },
        );
        handle
    }

    /// Cancel a timer. Returns false if it was already gone.
    pub fn clear(&mut self, handle: TimerHandle) -> bool {
        self.timers.remove(&handle).is_some()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.timers.contains_key(&handle)
    }

    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }

    pub fn interval_count(&self) -> usize {
        self.timers
            .values()
            .filter(|t| matches!(t.repeat, Repeat::Every(_)))
            .count()
    }

    /// Due time of the earliest one-shot timer.
    pub fn next_timeout_due(&self) -> Option<u64> {
        self.timers
            .values()
            .filter(|t| t.repeat == Repeat::Once)
            .map(|t| t.due)
            .min()
    }

    fn earliest(&self) -> Option<(TimerHandle, u64)> {
        // Ties resolve by handle, i.e. in scheduling order.
        self.timers
            .iter()
            .map(|(handle, timer)| (*handle, timer.due))
            .min_by_key(|(handle, due)| (*due, *handle))
    }

    /// Move the clock forward to `until` without firing anything.
    pub fn advance_clock(&mut self, until: u64) {
        self.now = self.now.max(until);
    }
}

impl<T: Clone> TimerQueue<T> {
    /// Pop the earliest task due at or before `until`, moving the clock to its
    /// due time. Intervals are rescheduled one period later.
    pub fn pop_due(&mut self, until: u64) -> Option<Fired<T>> {
        let (handle, due) = self.earliest()?;
        if due > until {
            return None;
        }
        self.now = self.now.max(due);
        let timer = self.timers.get_mut(&handle)?;
        let payload = timer.payload.clone();
        match timer.repeat {
            Repeat::Every(period) => timer.due = due + period,
            Repeat::Once => {
                self.timers.remove(&handle);
            }
        }
        Some(Fired {
            handle,
            at: due,
            payload,
        })
    }
}

/// Narrow scheduling surface handed to page components.
pub trait Scheduler {
    fn set_interval(&mut self, period_ms: u64) -> TimerHandle;
    fn clear_interval(&mut self, handle: TimerHandle);
}

/// Schedules every interval on a shared queue under one payload.
pub struct TaggedScheduler<'a, T> {
    queue: &'a mut TimerQueue<T>,
    payload: T,
}

impl<'a, T> TaggedScheduler<'a, T> {
    pub fn new(queue: &'a mut TimerQueue<T>, payload: T) -> Self {
        Self { queue, payload }
    }
}

impl<T: Clone> Scheduler for TaggedScheduler<'_, T> {
    fn set_interval(&mut self, period_ms: u64) -> TimerHandle {
        self.queue.set_interval(period_ms, self.payload.clone())
    }

    fn clear_interval(&mut self, handle: TimerHandle) {
        self.queue.clear(handle);
    }
}
