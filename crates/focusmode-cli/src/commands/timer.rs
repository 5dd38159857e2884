use chrono::Utc;
use clap::Subcommand;
use focusmode_core::Database;

use super::common::{load_timer, save_timer};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start a focus run
    Start,
    /// Stop the run and record its minutes
    Stop,
    /// Print current timer state as JSON
    Status,
    /// Reset to idle, clearing recorded minutes
    Reset,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut timer = load_timer(&db);
    let now = Utc::now();

    match action {
        TimerAction::Start => {
            if let Some(event) = timer.start(now) {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&timer.snapshot(now))?);
            }
        }
        TimerAction::Stop => {
            if let Some(event) = timer.stop(now) {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&timer.snapshot(now))?);
            }
        }
        TimerAction::Status => {
            println!("{}", serde_json::to_string_pretty(&timer.snapshot(now))?);
        }
        TimerAction::Reset => {
            if let Some(event) = timer.reset(now) {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
    }

    save_timer(&db, &timer)?;
    Ok(())
}
