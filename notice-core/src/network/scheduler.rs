// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reconnect Timers
//!
//! The channel never sleeps. It asks a [`Scheduler`] for a timer and checks
//! which timers are due each time the session is polled. Production code uses
//! [`SystemScheduler`]; tests drive virtual time with [`ManualScheduler`].

use std::time::{Duration, Instant};

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// Timer source for the reconnect policy.
pub trait Scheduler: Send {
    /// Schedules a timer that becomes due after `delay`.
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Cancels a timer. Returns false if it was unknown or already fired.
    fn cancel(&mut self, id: TimerId) -> bool;

    /// Removes and returns every timer that is due, earliest first.
    fn take_due(&mut self) -> Vec<TimerId>;
}

/// Wall-clock scheduler backed by [`Instant`].
#[derive(Debug, Default)]
pub struct SystemScheduler {
    timers: Vec<(TimerId, Instant)>,
    next_id: u64,
}

impl SystemScheduler {
    /// Creates a scheduler with no timers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of timers not yet fired or cancelled.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }
}

impl Scheduler for SystemScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push((id, Instant::now() + delay));
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|(t, _)| *t != id);
        self.timers.len() != before
    }

    fn take_due(&mut self) -> Vec<TimerId> {
        let now = Instant::now();
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|(_, at)| *at <= now);
        self.timers = pending;
        due.sort_by_key(|(_, at)| *at);
        due.into_iter().map(|(id, _)| id).collect()
    }
}

/// Virtual-time scheduler for tests.
///
/// Time only moves when [`ManualScheduler::advance`] is called.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    timers: Vec<(TimerId, Duration)>,
    next_id: u64,
    scheduled_total: usize,
    cancelled_total: usize,
}

impl ManualScheduler {
    /// Creates a scheduler at virtual time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves virtual time forward.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers not yet fired or cancelled.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Number of timers ever scheduled.
    pub fn scheduled_total(&self) -> usize {
        self.scheduled_total
    }

    /// Number of timers cancelled before firing.
    pub fn cancelled_total(&self) -> usize {
        self.cancelled_total
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.iter().map(|(_, at)| *at).min()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.scheduled_total += 1;
        self.timers.push((id, self.now + delay));
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|(t, _)| *t != id);
        let cancelled = self.timers.len() != before;
        if cancelled {
            self.cancelled_total += 1;
        }
        cancelled
    }

    fn take_due(&mut self) -> Vec<TimerId> {
        let now = self.now;
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|(_, at)| *at <= now);
        self.timers = pending;
        due.sort_by_key(|(_, at)| *at);
        due.into_iter().map(|(id, _)| id).collect()
    }
}
