//! Intervention backend API: REST client, wire types, push channel.

mod client;
pub mod push;
pub mod types;

pub use client::ApiClient;
pub use push::{PushChannel, PushEvent, PushStream};
pub use types::{
    DailyCheckinRequest, DailyCheckinResponse, HealthResponse, MarkCompleteRequest, SimpleMessage,
    StudentStatusResponse,
};
