use focusmode_core::Config;

use super::common::{api_client, runtime};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let client = api_client(&config)?;

    let rt = runtime()?;
    let response = rt.block_on(client.health())?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
