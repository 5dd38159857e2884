//! Stream push updates and print applied events as JSON lines.
//!
//! The loop mirrors the app's startup flow: fetch the initial status over
//! HTTP (falling back to the error banner on failure), then hold the push
//! channel open until it closes or the user interrupts. Each applied
//! event is printed, plus the derived screen whenever it changes.

use chrono::Utc;
use focusmode_core::{Config, Database, FocusSession, PushChannel};
use tracing::{info, warn};

use super::common::{api_client, load_guard, runtime, save_guard};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    let client = api_client(&config)?;
    let channel = PushChannel::new(&config.ws_url(), config.student_id()?);
    let mut session = FocusSession::with_guard(load_guard(&db, config.guard_limits()));

    let rt = runtime()?;
    rt.block_on(async {
        info!("fetching initial status");
        match client.get_status().await {
            Ok(resp) => {
                let event = session.apply_status(&resp, Utc::now());
                println!("{}", serde_json::to_string(&event)?);
            }
            Err(e) => {
                warn!(error = %e, "failed to load status");
                session.mark_load_failed("Failed to load status. Please check your connection.");
            }
        }

        let mut screen = session.screen();
        println!("{}", serde_json::to_string(&screen)?);

        info!(url = channel.url(), "connecting push channel");
        let mut stream = channel.connect().await?;
        info!("push channel connected");

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("interrupted");
                    break;
                }
                event = stream.next_event() => match event? {
                    Some(push) => {
                        let applied = session.apply_push(&push, Utc::now());
                        println!("{}", serde_json::to_string(&applied)?);

                        let next = session.screen();
                        if next != screen {
                            println!("{}", serde_json::to_string(&next)?);
                            screen = next;
                        }
                    }
                    None => {
                        info!("push channel closed");
                        break;
                    }
                }
            }
        }

        Ok::<_, Box<dyn std::error::Error>>(())
    })?;

    save_guard(&db, session.guard())?;
    Ok(())
}
