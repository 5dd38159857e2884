//! REST client for the intervention backend.
//!
//! One client per student: the base URL and student id are fixed at
//! construction. Failures surface as typed errors the caller renders as
//! a generic banner; there is no retry or backoff.

use reqwest::Client;
use url::Url;
use uuid::Uuid;

use crate::api::types::{
    DailyCheckinRequest, DailyCheckinResponse, HealthResponse, MarkCompleteRequest, SimpleMessage,
    StudentStatusResponse,
};
use crate::error::ApiError;

pub struct ApiClient {
    http: Client,
    base_url: Url,
    student_id: Uuid,
}

impl ApiClient {
    pub fn new(base_url: &str, student_id: Uuid) -> Result<Self, ApiError> {
        Ok(Self {
            http: Client::new(),
            base_url: Url::parse(base_url)?,
            student_id,
        })
    }

    pub fn student_id(&self) -> Uuid {
        self.student_id
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    /// `GET /student/{id}/status`
    pub async fn get_status(&self) -> Result<StudentStatusResponse, ApiError> {
        let url = self.endpoint(&format!("/student/{}/status", self.student_id))?;
        let resp = self.http.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status {
                endpoint: "/student/{id}/status",
                status: resp.status().as_u16(),
            });
        }
        Ok(resp.json().await?)
    }

    /// `POST /daily-checkin`
    pub async fn submit_checkin(
        &self,
        quiz_score: u32,
        focus_minutes: u32,
    ) -> Result<DailyCheckinResponse, ApiError> {
        let body = DailyCheckinRequest {
            student_id: self.student_id,
            quiz_score,
            focus_minutes,
        };
        let resp = self
            .http
            .post(self.endpoint("/daily-checkin")?)
            .json(&body)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status {
                endpoint: "/daily-checkin",
                status: resp.status().as_u16(),
            });
        }
        Ok(resp.json().await?)
    }

    /// `POST /mark-complete`
    pub async fn mark_complete(&self) -> Result<SimpleMessage, ApiError> {
        let body = MarkCompleteRequest {
            student_id: self.student_id,
        };
        let resp = self
            .http
            .post(self.endpoint("/mark-complete")?)
            .json(&body)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status {
                endpoint: "/mark-complete",
                status: resp.status().as_u16(),
            });
        }
        Ok(resp.json().await?)
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        let resp = self.http.get(self.endpoint("/health")?).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status {
                endpoint: "/health",
                status: resp.status().as_u16(),
            });
        }
        Ok(resp.json().await?)
    }
}
