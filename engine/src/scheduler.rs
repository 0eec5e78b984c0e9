//! Cancellable one-shot timers driven by the frame loop.
//!
//! Time is a monotonic `Duration` since an arbitrary origin (the app start in
//! production, zero in tests), so the same queue serves both.

use std::time::Duration;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

pub trait Scheduler {
    /// Schedule a timer that expires `delay` after the scheduler's current time.
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Cancel a pending timer. Returns `false` if it already fired or was cancelled.
    fn cancel(&mut self, id: TimerId) -> bool;

    /// Advance the clock to `now` and return the timers that expired, earliest first.
    fn poll_expired(&mut self, now: Duration) -> Vec<TimerId>;
}

impl<S: Scheduler + ?Sized> Scheduler for &mut S {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        (**self).schedule(delay)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        (**self).cancel(id)
    }

    fn poll_expired(&mut self, now: Duration) -> Vec<TimerId> {
        (**self).poll_expired(now)
    }
}

/// Deadline queue. The clock never moves backwards.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    pending: Vec<(Duration, TimerId)>,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn deadline(&self, id: TimerId) -> Option<Duration> {
        self.pending
            .iter()
            .find(|(_, pending)| *pending == id)
            .map(|(deadline, _)| *deadline)
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push((self.now.saturating_add(delay), id));
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(_, pending)| *pending != id);
        self.pending.len() != before
    }

    fn poll_expired(&mut self, now: Duration) -> Vec<TimerId> {
        self.now = self.now.max(now);
        let now = self.now;

        let mut expired: Vec<(Duration, TimerId)> = self
            .pending
            .iter()
            .copied()
            .filter(|(deadline, _)| *deadline <= now)
            .collect();
        if expired.is_empty() {
            return Vec::new();
        }
        self.pending.retain(|(deadline, _)| *deadline > now);
        expired.sort_unstable();
        expired.into_iter().map(|(_, id)| id).collect()
    }
}
