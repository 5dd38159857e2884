//! # Focus Mode Core Library
//!
//! This library provides the client-side logic for the Focus Mode
//! intervention system. It implements a CLI-first philosophy: all
//! operations are available via a standalone CLI binary, and any richer
//! front end is a thin layer over the same core library.
//!
//! The hard decisions -- evaluating check-ins, assigning remedial tasks,
//! moving students between statuses -- live on the backend intervention
//! engine. This crate covers everything the client owns:
//!
//! - **Timer Engine**: a wall-clock count-up timer that requires the
//!   caller to invoke it periodically; no internal threads
//! - **Visibility Guard**: counter/threshold penalty state machine that
//!   escalates repeated visibility violations to a local lock
//! - **Session**: screen state derived from student status, plus the
//!   in-flight request guards around check-in and mark-complete
//! - **API**: reqwest client for the REST endpoints and a WebSocket
//!   push channel for server-initiated status changes
//! - **Storage**: SQLite-based state persistence and TOML configuration
//!
//! ## Key Components
//!
//! - [`FocusTimer`]: focus-time timer state machine
//! - [`VisibilityGuard`]: violation counter with cancellable delayed penalty
//! - [`FocusSession`]: status/screen reducer
//! - [`ApiClient`]: REST client for the intervention backend
//! - [`PushChannel`]: push-update channel at `/ws/{student_id}`

pub mod api;
pub mod checkin;
pub mod error;
pub mod events;
pub mod guard;
pub mod logging;
pub mod session;
pub mod storage;
pub mod student;
pub mod timer;

pub use api::{ApiClient, PushChannel, PushEvent, PushStream};
pub use checkin::{CheckinDraft, ValidCheckin};
pub use error::{ApiError, ConfigError, CoreError, PushError, StorageError, ValidationError};
pub use events::Event;
pub use guard::{GuardLimits, VisibilityGuard};
pub use logging::{init_logging, Verbosity};
pub use session::FocusSession;
pub use storage::{CheckinRecord, CheckinStats, Config, Database};
pub use student::{ScreenState, StudentState, StudentStatus};
pub use timer::{FocusTimer, TimerState};
