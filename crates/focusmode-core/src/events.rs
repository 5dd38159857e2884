use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::student::StudentStatus;
use crate::timer::TimerState;

/// Every state change in the client produces an Event.
/// The CLI prints them as JSON; a richer front end would subscribe to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        at: DateTime<Utc>,
    },
    TimerStopped {
        /// Whole minutes of focus time recorded by this run.
        focus_minutes: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    TimerSnapshot {
        state: TimerState,
        elapsed_minutes: u32,
        recorded_minutes: u32,
        at: DateTime<Utc>,
    },
    /// The client surface lost visibility; a penalty is pending.
    VisibilityLost {
        pending_until: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    /// Visibility came back inside the grace window; pending penalty dropped.
    PenaltyCancelled {
        at: DateTime<Utc>,
    },
    /// A pending penalty came due and was committed to the counter.
    PenaltyApplied {
        violations: u32,
        at: DateTime<Utc>,
    },
    /// The violation counter reached its threshold; client is locked.
    GuardLocked {
        violations: u32,
        at: DateTime<Utc>,
    },
    GuardReset {
        at: DateTime<Utc>,
    },
    GuardSnapshot {
        violations: u32,
        threshold: u32,
        locked: bool,
        pending_until: Option<DateTime<Utc>>,
        at: DateTime<Utc>,
    },
    /// Initial status fetched over HTTP.
    StatusLoaded {
        status: StudentStatus,
        task: Option<String>,
        at: DateTime<Utc>,
    },
    /// Server-pushed status change.
    StatusChanged {
        status: StudentStatus,
        task: Option<String>,
        message: Option<String>,
        at: DateTime<Utc>,
    },
    /// Server-pushed remedial task assignment.
    InterventionAssigned {
        status: StudentStatus,
        task: Option<String>,
        message: Option<String>,
        at: DateTime<Utc>,
    },
    CheckinSubmitted {
        quiz_score: u32,
        focus_minutes: u32,
        /// Human-readable outcome line from the backend.
        response: String,
        at: DateTime<Utc>,
    },
    TaskCompleted {
        message: String,
        at: DateTime<Utc>,
    },
}
