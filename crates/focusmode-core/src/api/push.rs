//! Push-update channel.
//!
//! The backend pushes status changes over a WebSocket at
//! `{ws_url}/ws/{student_id}`. The client never sends application
//! messages; it folds incoming events into session state. Unparseable
//! frames are logged and skipped -- a bad frame must never take the
//! client down. There is no reconnect policy: if the socket closes, the
//! stream ends and the application keeps working over HTTP.

use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use uuid::Uuid;

use crate::error::PushError;
use crate::student::StudentStatus;

/// Server-pushed event, tagged by the `event` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum PushEvent {
    #[serde(rename = "STATUS_CHANGED")]
    StatusChanged {
        status: StudentStatus,
        #[serde(default)]
        task: Option<String>,
        #[serde(default)]
        message: Option<String>,
    },
    #[serde(rename = "INTERVENTION_ASSIGNED")]
    InterventionAssigned {
        status: StudentStatus,
        #[serde(default)]
        task: Option<String>,
        #[serde(default)]
        message: Option<String>,
    },
}

/// Connector for the per-student push channel.
pub struct PushChannel {
    url: String,
}

impl PushChannel {
    pub fn new(ws_url: &str, student_id: Uuid) -> Self {
        Self {
            url: format!("{}/ws/{}", ws_url.trim_end_matches('/'), student_id),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn connect(&self) -> Result<PushStream, PushError> {
        let (inner, _response) = connect_async(self.url.as_str()).await?;
        Ok(PushStream { inner })
    }
}

/// An open push channel.
pub struct PushStream {
    inner: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl PushStream {
    /// Next push event; `Ok(None)` when the channel closed.
    ///
    /// Non-text frames and frames that do not parse as a [`PushEvent`]
    /// are skipped.
    pub async fn next_event(&mut self) -> Result<Option<PushEvent>, PushError> {
        while let Some(frame) = self.inner.next().await {
            match frame? {
                Message::Text(text) => match serde_json::from_str::<PushEvent>(&text) {
                    Ok(event) => return Ok(Some(event)),
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping unparseable push frame");
                    }
                },
                Message::Close(_) => return Ok(None),
                _ => {}
            }
        }
        Ok(None)
    }
}
