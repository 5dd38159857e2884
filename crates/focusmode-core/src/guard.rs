//! Visibility guard -- penalty escalation for repeated visibility violations.
//!
//! When the client surface loses visibility during a focus session (a
//! tab switch, app backgrounding), a penalty is scheduled
//! rather than applied immediately: restoring visibility inside a grace
//! window cancels it. Penalties that come due are committed to a counter,
//! and reaching the threshold locks the client until the server moves the
//! student on or the guard is reset.
//!
//! ## Lifecycle
//!
//! ```text
//! report_hidden -> pending penalty
//!   report_visible (inside grace)  -> cancelled
//!   tick / any report (past grace) -> committed -> counter++
//! counter reaches threshold        -> locked (terminal until reset)
//! ```
//!
//! Like the timer engine, the guard has no internal clock: every operation
//! takes `now`, and overdue penalties are flushed by whichever call
//! observes them first.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::events::Event;

/// Tunable guard parameters, backed by `[guard]` config.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GuardLimits {
    /// Committed violations required to lock.
    pub violation_threshold: u32,
    /// Seconds after a violation during which restoring visibility
    /// cancels the penalty.
    pub grace_secs: u64,
}

impl Default for GuardLimits {
    fn default() -> Self {
        Self {
            violation_threshold: 3,
            grace_secs: 10,
        }
    }
}

/// Violation counter with a cancellable delayed penalty.
///
/// Serializable so the CLI can persist it between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilityGuard {
    limits: GuardLimits,
    violations: u32,
    /// Deadline of the pending penalty, if one is scheduled.
    #[serde(default)]
    pending_until: Option<DateTime<Utc>>,
    locked: bool,
}

impl Default for VisibilityGuard {
    fn default() -> Self {
        Self::new(GuardLimits::default())
    }
}

impl VisibilityGuard {
    pub fn new(limits: GuardLimits) -> Self {
        Self {
            limits,
            violations: 0,
            pending_until: None,
            locked: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn limits(&self) -> GuardLimits {
        self.limits
    }

    pub fn violations(&self) -> u32 {
        self.violations
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn pending_until(&self) -> Option<DateTime<Utc>> {
        self.pending_until
    }

    /// Replace the limits. Config owns them; persisted guards pick up
    /// config changes on load. An already-held lock is not re-evaluated.
    pub fn set_limits(&mut self, limits: GuardLimits) {
        self.limits = limits;
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> Event {
        Event::GuardSnapshot {
            violations: self.violations,
            threshold: self.limits.violation_threshold,
            locked: self.locked,
            pending_until: self.pending_until,
            at: now,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// The surface lost visibility: schedule a penalty due after the
    /// grace window.
    ///
    /// An overdue pending penalty is committed first and its event
    /// returned; the caller will see the new violation on the next
    /// report. No-op while locked or while a penalty is already pending.
    pub fn report_hidden(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if let Some(event) = self.commit_due(now) {
            return Some(event);
        }
        if self.locked || self.pending_until.is_some() {
            return None;
        }
        let pending_until = now + Duration::seconds(self.limits.grace_secs as i64);
        self.pending_until = Some(pending_until);
        Some(Event::VisibilityLost {
            pending_until,
            at: now,
        })
    }

    /// Visibility restored. Inside the grace window this cancels the
    /// pending penalty; past it, the penalty stands and is committed.
    pub fn report_visible(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if let Some(event) = self.commit_due(now) {
            return Some(event);
        }
        if self.pending_until.take().is_some() {
            Some(Event::PenaltyCancelled { at: now })
        } else {
            None
        }
    }

    /// Call periodically. Commits a pending penalty whose deadline passed.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<Event> {
        self.commit_due(now)
    }

    /// Clear counter, pending penalty, and lock. Used when the server
    /// returns the student to `ON_TRACK`.
    pub fn reset(&mut self, now: DateTime<Utc>) -> Option<Event> {
        self.violations = 0;
        self.pending_until = None;
        self.locked = false;
        Some(Event::GuardReset { at: now })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn commit_due(&mut self, now: DateTime<Utc>) -> Option<Event> {
        match self.pending_until {
            Some(deadline) if now >= deadline => {}
            _ => return None,
        }
        self.pending_until = None;
        self.violations += 1;
        if self.violations >= self.limits.violation_threshold {
            self.locked = true;
            Some(Event::GuardLocked {
                violations: self.violations,
                at: now,
            })
        } else {
            Some(Event::PenaltyApplied {
                violations: self.violations,
                at: now,
            })
        }
    }
}
