use focusmode_core::Database;

pub fn run(limit: u32) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let recent = db.recent_checkins(limit)?;
    let stats = db.stats()?;

    println!("{}", serde_json::to_string_pretty(&recent)?);
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
