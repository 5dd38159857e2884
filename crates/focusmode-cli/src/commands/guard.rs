use chrono::Utc;
use clap::Subcommand;
use focusmode_core::{Config, Database};

use super::common::{load_guard, save_guard};

#[derive(Subcommand)]
pub enum GuardAction {
    /// Report that the client surface lost visibility
    Hidden,
    /// Report that visibility was restored
    Visible,
    /// Print current guard state as JSON
    Status,
    /// Clear violations and the lock
    Reset,
}

pub fn run(action: GuardAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    let mut guard = load_guard(&db, config.guard_limits());
    let now = Utc::now();

    let event = match action {
        GuardAction::Hidden => guard.report_hidden(now),
        GuardAction::Visible => guard.report_visible(now),
        GuardAction::Status => {
            // Flush any overdue penalty before reporting.
            let committed = guard.tick(now);
            if let Some(event) = committed {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
            Some(guard.snapshot(now))
        }
        GuardAction::Reset => guard.reset(now),
    };

    if let Some(event) = event {
        println!("{}", serde_json::to_string_pretty(&event)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&guard.snapshot(now))?);
    }

    save_guard(&db, &guard)?;
    Ok(())
}
