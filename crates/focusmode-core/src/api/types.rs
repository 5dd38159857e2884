//! Wire types mirroring the backend schemas.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::student::StudentStatus;

/// `GET /student/{id}/status` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentStatusResponse {
    pub student_id: Uuid,
    pub status: StudentStatus,
    #[serde(default)]
    pub current_task: Option<String>,
}

/// `POST /daily-checkin` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyCheckinRequest {
    pub student_id: Uuid,
    pub quiz_score: u32,
    pub focus_minutes: u32,
}

/// `POST /daily-checkin` response: a human-readable outcome line
/// ("On Track", "Pending Mentor Review").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyCheckinResponse {
    pub status: String,
}

/// `POST /mark-complete` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkCompleteRequest {
    pub student_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleMessage {
    pub message: String,
}

/// `GET /health` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}
