//! Daily check-in form validation.
//!
//! The pass rule (score and minutes thresholds) belongs to the backend;
//! this module only enforces the field ranges the form itself owns.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MAX_QUIZ_SCORE: i64 = 10;

/// Raw check-in input: the quiz score exactly as the user entered it,
/// plus the minutes handed over by the focus timer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckinDraft {
    pub quiz_score: String,
    pub focus_minutes: i64,
}

impl CheckinDraft {
    pub fn new(quiz_score: impl Into<String>, focus_minutes: i64) -> Self {
        Self {
            quiz_score: quiz_score.into(),
            focus_minutes,
        }
    }

    /// Validate the draft into submittable values.
    ///
    /// Score must parse as an integer in `0..=10`; minutes must be
    /// positive (the timer has to be run and stopped first).
    pub fn validate(&self) -> Result<ValidCheckin, ValidationError> {
        let score: i64 = self.quiz_score.trim().parse().map_err(|_| {
            ValidationError::InvalidValue {
                field: "quiz_score".into(),
                message: format!("'{}' is not a number", self.quiz_score.trim()),
            }
        })?;
        if !(0..=MAX_QUIZ_SCORE).contains(&score) {
            return Err(ValidationError::InvalidValue {
                field: "quiz_score".into(),
                message: "score must be between 0 and 10".into(),
            });
        }
        if self.focus_minutes <= 0 {
            return Err(ValidationError::InvalidValue {
                field: "focus_minutes".into(),
                message: "no focus time recorded; start and stop the timer first".into(),
            });
        }
        Ok(ValidCheckin {
            quiz_score: score as u32,
            focus_minutes: self.focus_minutes as u32,
        })
    }
}

/// A validated check-in, ready for `POST /daily-checkin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidCheckin {
    pub quiz_score: u32,
    pub focus_minutes: u32,
}
