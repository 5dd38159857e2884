//! Student status and derived screen state.

use serde::{Deserialize, Serialize};

/// Student status as reported by the intervention backend.
///
/// Wire values are SCREAMING_SNAKE_CASE to match the backend enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudentStatus {
    /// Normal state: timer and daily check-in are available.
    OnTrack,
    /// A failed check-in is under mentor review; client is locked out.
    NeedsIntervention,
    /// A remedial task is assigned and pending completion.
    AssignedTask,
}

/// Client-side view of the student, fed by the initial HTTP fetch and
/// subsequent push events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentState {
    pub status: StudentStatus,
    /// Current remedial task text, when one is assigned.
    pub task: Option<String>,
    /// True until the initial status fetch resolves.
    pub loading: bool,
    /// Banner text when the initial fetch failed.
    pub error: Option<String>,
}

impl Default for StudentState {
    fn default() -> Self {
        Self {
            status: StudentStatus::OnTrack,
            task: None,
            loading: true,
            error: None,
        }
    }
}

/// Shown when status is `ASSIGNED_TASK` but the server sent no task text.
pub const DEFAULT_TASK_PROMPT: &str = "Complete the assigned task";

/// Presentational state, derived from `(loading, error, lock, status)`.
/// Never stored; recomputed whenever the inputs change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum ScreenState {
    /// Initial fetch in flight.
    Loading,
    /// Initial fetch failed; generic banner.
    Error { message: String },
    /// Local guard lock or `NEEDS_INTERVENTION`.
    Locked,
    /// Remedial task view with a mark-complete action.
    Remedial { task: String },
    /// Timer + quiz input + submit.
    CheckIn,
}

impl ScreenState {
    /// Derive the screen from the student state and the local guard lock.
    ///
    /// Priority: loading, then error, then lock, then status.
    pub fn derive(state: &StudentState, guard_locked: bool) -> Self {
        if state.loading {
            return ScreenState::Loading;
        }
        if let Some(message) = &state.error {
            return ScreenState::Error {
                message: message.clone(),
            };
        }
        if guard_locked || state.status == StudentStatus::NeedsIntervention {
            return ScreenState::Locked;
        }
        match state.status {
            StudentStatus::AssignedTask => ScreenState::Remedial {
                task: state
                    .task
                    .clone()
                    .unwrap_or_else(|| DEFAULT_TASK_PROMPT.to_string()),
            },
            _ => ScreenState::CheckIn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(status: StudentStatus, task: Option<&str>) -> StudentState {
        StudentState {
            status,
            task: task.map(String::from),
            loading: false,
            error: None,
        }
    }

    #[test]
    fn status_wire_values() {
        assert_eq!(
            serde_json::to_string(&StudentStatus::OnTrack).unwrap(),
            "\"ON_TRACK\""
        );
        assert_eq!(
            serde_json::from_str::<StudentStatus>("\"NEEDS_INTERVENTION\"").unwrap(),
            StudentStatus::NeedsIntervention
        );
        assert_eq!(
            serde_json::from_str::<StudentStatus>("\"ASSIGNED_TASK\"").unwrap(),
            StudentStatus::AssignedTask
        );
    }

    #[test]
    fn loading_wins_over_everything() {
        let state = StudentState::default();
        assert_eq!(ScreenState::derive(&state, true), ScreenState::Loading);
    }

    #[test]
    fn error_wins_over_status() {
        let mut state = loaded(StudentStatus::AssignedTask, Some("Read Chapter 4"));
        state.error = Some("Failed to load status. Please check your connection.".into());
        assert!(matches!(
            ScreenState::derive(&state, false),
            ScreenState::Error { .. }
        ));
    }

    #[test]
    fn local_lock_forces_locked_screen() {
        let state = loaded(StudentStatus::OnTrack, None);
        assert_eq!(ScreenState::derive(&state, true), ScreenState::Locked);
    }

    #[test]
    fn needs_intervention_is_locked() {
        let state = loaded(StudentStatus::NeedsIntervention, None);
        assert_eq!(ScreenState::derive(&state, false), ScreenState::Locked);
    }

    #[test]
    fn assigned_task_shows_remedial_with_fallback() {
        let state = loaded(StudentStatus::AssignedTask, None);
        assert_eq!(
            ScreenState::derive(&state, false),
            ScreenState::Remedial {
                task: DEFAULT_TASK_PROMPT.to_string()
            }
        );

        let state = loaded(StudentStatus::AssignedTask, Some("Read Chapter 4"));
        assert_eq!(
            ScreenState::derive(&state, false),
            ScreenState::Remedial {
                task: "Read Chapter 4".to_string()
            }
        );
    }

    #[test]
    fn on_track_shows_checkin() {
        let state = loaded(StudentStatus::OnTrack, None);
        assert_eq!(ScreenState::derive(&state, false), ScreenState::CheckIn);
    }
}
