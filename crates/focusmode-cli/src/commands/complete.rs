use chrono::Utc;
use focusmode_core::{Config, Event};

use super::common::{api_client, runtime};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let client = api_client(&config)?;

    let rt = runtime()?;
    let response = rt.block_on(client.mark_complete())?;

    // The push channel carries the status back to ON_TRACK; this command
    // only reports the acknowledgement.
    let event = Event::TaskCompleted {
        message: response.message,
        at: Utc::now(),
    };
    println!("{}", serde_json::to_string_pretty(&event)?);
    Ok(())
}
