use chrono::Utc;
use focusmode_core::{Config, Database, FocusSession};

use super::common::{api_client, load_guard, runtime};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    let client = api_client(&config)?;
    let mut session = FocusSession::with_guard(load_guard(&db, config.guard_limits()));

    let rt = runtime()?;
    let resp = rt.block_on(client.get_status())?;
    let event = session.apply_status(&resp, Utc::now());

    println!("{}", serde_json::to_string_pretty(&event)?);
    println!("{}", serde_json::to_string_pretty(&session.screen())?);
    Ok(())
}
