//! Focus timer engine.
//!
//! The timer is a wall-clock count-up state machine. It does not use
//! internal threads -- the caller passes `now` into every operation and is
//! responsible for querying periodically while a run is active.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Idle
//! ```
//!
//! Stopping a run records the elapsed whole minutes; that recorded value
//! is what the daily check-in submits as `focus_minutes`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
}

/// Count-up focus timer.
///
/// Serializable so the CLI can persist it between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusTimer {
    state: TimerState,
    /// Instant the current run began (only valid while Running).
    #[serde(default)]
    started_at: Option<DateTime<Utc>>,
    /// Whole minutes recorded by the most recent completed run.
    #[serde(default)]
    recorded_minutes: u32,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusTimer {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            started_at: None,
            recorded_minutes: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Minutes recorded by the last completed run.
    pub fn recorded_minutes(&self) -> u32 {
        self.recorded_minutes
    }

    /// Whole minutes elapsed: live while Running, recorded otherwise.
    ///
    /// A clock that moves backwards yields 0 additional minutes.
    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> u32 {
        match (self.state, self.started_at) {
            (TimerState::Running, Some(started)) => whole_minutes(started, now),
            _ => self.recorded_minutes,
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self, now: DateTime<Utc>) -> Event {
        Event::TimerSnapshot {
            state: self.state,
            elapsed_minutes: self.elapsed_minutes(now),
            recorded_minutes: self.recorded_minutes,
            at: now,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self, now: DateTime<Utc>) -> Option<Event> {
        match self.state {
            TimerState::Idle => {
                self.state = TimerState::Running;
                self.started_at = Some(now);
                Some(Event::TimerStarted { at: now })
            }
            TimerState::Running => None, // Already running.
        }
    }

    /// Stop the current run and record its whole minutes.
    pub fn stop(&mut self, now: DateTime<Utc>) -> Option<Event> {
        match (self.state, self.started_at.take()) {
            (TimerState::Running, Some(started)) => {
                self.state = TimerState::Idle;
                self.recorded_minutes = whole_minutes(started, now);
                Some(Event::TimerStopped {
                    focus_minutes: self.recorded_minutes,
                    at: now,
                })
            }
            _ => None,
        }
    }

    pub fn reset(&mut self, now: DateTime<Utc>) -> Option<Event> {
        self.state = TimerState::Idle;
        self.started_at = None;
        self.recorded_minutes = 0;
        Some(Event::TimerReset { at: now })
    }
}

fn whole_minutes(from: DateTime<Utc>, to: DateTime<Utc>) -> u32 {
    let secs = (to - from).num_seconds().max(0);
    (secs / 60).min(u32::MAX as i64) as u32
}
