//! Session flow-control: status, derived screen, and request guards.
//!
//! The session is the single reducer between the network (initial HTTP
//! fetch, push events) and the presentational screen state. It also owns
//! the two in-flight request guards that protect check-in submission and
//! mark-complete from duplicate dispatch.

use chrono::{DateTime, Utc};

use crate::api::push::PushEvent;
use crate::api::types::StudentStatusResponse;
use crate::checkin::{CheckinDraft, ValidCheckin};
use crate::error::ValidationError;
use crate::events::Event;
use crate::guard::{GuardLimits, VisibilityGuard};
use crate::student::{ScreenState, StudentState, StudentStatus};

pub struct FocusSession {
    state: StudentState,
    guard: VisibilityGuard,
    submitting: bool,
    marking: bool,
}

impl FocusSession {
    pub fn new(limits: GuardLimits) -> Self {
        Self::with_guard(VisibilityGuard::new(limits))
    }

    /// Resume with a previously persisted guard.
    pub fn with_guard(guard: VisibilityGuard) -> Self {
        Self {
            state: StudentState::default(),
            guard,
            submitting: false,
            marking: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &StudentState {
        &self.state
    }

    pub fn guard(&self) -> &VisibilityGuard {
        &self.guard
    }

    pub fn guard_mut(&mut self) -> &mut VisibilityGuard {
        &mut self.guard
    }

    pub fn screen(&self) -> ScreenState {
        ScreenState::derive(&self.state, self.guard.is_locked())
    }

    // ── State folding ────────────────────────────────────────────────

    /// Fold the initial `GET /student/{id}/status` result into the state.
    pub fn apply_status(&mut self, resp: &StudentStatusResponse, now: DateTime<Utc>) -> Event {
        self.state.status = resp.status;
        self.state.task = resp.current_task.clone();
        self.state.loading = false;
        self.state.error = None;
        Event::StatusLoaded {
            status: resp.status,
            task: resp.current_task.clone(),
            at: now,
        }
    }

    /// The initial fetch failed: surface the generic banner.
    pub fn mark_load_failed(&mut self, message: impl Into<String>) {
        self.state.loading = false;
        self.state.error = Some(message.into());
    }

    /// Fold a push event into the state.
    ///
    /// Both event kinds replace status and task. A return to `ON_TRACK`
    /// resets the visibility guard: the server has moved the student on.
    pub fn apply_push(&mut self, push: &PushEvent, now: DateTime<Utc>) -> Event {
        let (status, task, message, assigned) = match push {
            PushEvent::StatusChanged {
                status,
                task,
                message,
            } => (*status, task.clone(), message.clone(), false),
            PushEvent::InterventionAssigned {
                status,
                task,
                message,
            } => (*status, task.clone(), message.clone(), true),
        };

        self.state.status = status;
        self.state.task = task.clone();
        self.state.loading = false;
        self.state.error = None;
        if status == StudentStatus::OnTrack {
            self.guard.reset(now);
        }

        if assigned {
            Event::InterventionAssigned {
                status,
                task,
                message,
                at: now,
            }
        } else {
            Event::StatusChanged {
                status,
                task,
                message,
                at: now,
            }
        }
    }

    // ── Check-in ─────────────────────────────────────────────────────

    /// Validate a check-in draft against the form rules and the current
    /// screen. Refused unless the check-in screen is showing.
    pub fn prepare_checkin(&self, draft: &CheckinDraft) -> Result<ValidCheckin, ValidationError> {
        match self.screen() {
            ScreenState::CheckIn => draft.validate(),
            ScreenState::Locked if self.guard.is_locked() => Err(ValidationError::Unavailable(
                "client is locked after repeated visibility violations".into(),
            )),
            other => Err(ValidationError::Unavailable(format!(
                "not available on the {} screen",
                screen_name(&other)
            ))),
        }
    }

    // ── In-flight request guards ─────────────────────────────────────

    /// Returns false when a check-in request is already in flight.
    pub fn begin_submit(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.submitting = true;
        true
    }

    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Returns false when a mark-complete request is already in flight.
    pub fn begin_mark_complete(&mut self) -> bool {
        if self.marking {
            return false;
        }
        self.marking = true;
        true
    }

    pub fn finish_mark_complete(&mut self) {
        self.marking = false;
    }

    pub fn is_marking(&self) -> bool {
        self.marking
    }
}

fn screen_name(screen: &ScreenState) -> &'static str {
    match screen {
        ScreenState::Loading => "loading",
        ScreenState::Error { .. } => "error",
        ScreenState::Locked => "locked",
        ScreenState::Remedial { .. } => "remedial",
        ScreenState::CheckIn => "check-in",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn status_response(status: StudentStatus, task: Option<&str>) -> StudentStatusResponse {
        StudentStatusResponse {
            student_id: Uuid::nil(),
            status,
            current_task: task.map(String::from),
        }
    }

    #[test]
    fn starts_loading_then_shows_checkin() {
        let mut session = FocusSession::new(GuardLimits::default());
        assert_eq!(session.screen(), ScreenState::Loading);

        session.apply_status(&status_response(StudentStatus::OnTrack, None), Utc::now());
        assert_eq!(session.screen(), ScreenState::CheckIn);
    }

    #[test]
    fn load_failure_shows_banner() {
        let mut session = FocusSession::new(GuardLimits::default());
        session.mark_load_failed("Failed to load status. Please check your connection.");
        assert!(matches!(session.screen(), ScreenState::Error { .. }));
    }

    #[test]
    fn push_assignment_switches_to_remedial() {
        let mut session = FocusSession::new(GuardLimits::default());
        session.apply_status(&status_response(StudentStatus::OnTrack, None), Utc::now());

        let push = PushEvent::InterventionAssigned {
            status: StudentStatus::AssignedTask,
            task: Some("Read Chapter 4".into()),
            message: None,
        };
        let event = session.apply_push(&push, Utc::now());
        assert!(matches!(event, Event::InterventionAssigned { .. }));
        assert_eq!(
            session.screen(),
            ScreenState::Remedial {
                task: "Read Chapter 4".into()
            }
        );
    }

    #[test]
    fn return_to_on_track_resets_guard() {
        let mut session = FocusSession::new(GuardLimits {
            violation_threshold: 1,
            grace_secs: 10,
        });
        let t0 = Utc::now();
        session.apply_status(&status_response(StudentStatus::OnTrack, None), t0);

        session.guard_mut().report_hidden(t0);
        session.guard_mut().tick(t0 + Duration::seconds(11));
        assert_eq!(session.screen(), ScreenState::Locked);

        let push = PushEvent::StatusChanged {
            status: StudentStatus::OnTrack,
            task: None,
            message: None,
        };
        session.apply_push(&push, t0 + Duration::seconds(12));
        assert_eq!(session.screen(), ScreenState::CheckIn);
        assert!(!session.guard().is_locked());
    }

    #[test]
    fn checkin_refused_while_locked() {
        let mut session = FocusSession::new(GuardLimits {
            violation_threshold: 1,
            grace_secs: 10,
        });
        let t0 = Utc::now();
        session.apply_status(&status_response(StudentStatus::OnTrack, None), t0);
        session.guard_mut().report_hidden(t0);
        session.guard_mut().tick(t0 + Duration::seconds(11));

        let draft = CheckinDraft::new("8", 75);
        assert!(matches!(
            session.prepare_checkin(&draft),
            Err(ValidationError::Unavailable(_))
        ));
    }

    #[test]
    fn checkin_refused_on_remedial_screen() {
        let mut session = FocusSession::new(GuardLimits::default());
        session.apply_status(
            &status_response(StudentStatus::AssignedTask, Some("Read Chapter 4")),
            Utc::now(),
        );

        let draft = CheckinDraft::new("8", 75);
        assert!(session.prepare_checkin(&draft).is_err());
    }

    #[test]
    fn checkin_validates_on_checkin_screen() {
        let mut session = FocusSession::new(GuardLimits::default());
        session.apply_status(&status_response(StudentStatus::OnTrack, None), Utc::now());

        let valid = session
            .prepare_checkin(&CheckinDraft::new("8", 75))
            .unwrap();
        assert_eq!(valid.quiz_score, 8);

        assert!(session.prepare_checkin(&CheckinDraft::new("11", 75)).is_err());
    }

    #[test]
    fn submit_guard_blocks_duplicates() {
        let mut session = FocusSession::new(GuardLimits::default());
        assert!(session.begin_submit());
        assert!(!session.begin_submit());
        session.finish_submit();
        assert!(session.begin_submit());
    }

    #[test]
    fn request_guards_are_independent() {
        let mut session = FocusSession::new(GuardLimits::default());
        assert!(session.begin_submit());
        assert!(session.begin_mark_complete());
        assert!(session.is_submitting());
        assert!(session.is_marking());
        session.finish_mark_complete();
        assert!(session.is_submitting());
        assert!(!session.is_marking());
    }
}
