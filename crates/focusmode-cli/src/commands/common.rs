//! Shared helpers for command modules.

use focusmode_core::{ApiClient, Config, Database, FocusTimer, GuardLimits, VisibilityGuard};

pub const TIMER_KEY: &str = "focus_timer";
pub const GUARD_KEY: &str = "visibility_guard";

pub fn runtime() -> Result<tokio::runtime::Runtime, Box<dyn std::error::Error>> {
    Ok(tokio::runtime::Runtime::new()?)
}

pub fn api_client(config: &Config) -> Result<ApiClient, Box<dyn std::error::Error>> {
    Ok(ApiClient::new(&config.http_url(), config.student_id()?)?)
}

pub fn load_timer(db: &Database) -> FocusTimer {
    if let Ok(Some(json)) = db.kv_get(TIMER_KEY) {
        if let Ok(timer) = serde_json::from_str::<FocusTimer>(&json) {
            return timer;
        }
    }
    FocusTimer::new()
}

pub fn save_timer(db: &Database, timer: &FocusTimer) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(timer)?;
    db.kv_set(TIMER_KEY, &json)?;
    Ok(())
}

pub fn load_guard(db: &Database, limits: GuardLimits) -> VisibilityGuard {
    if let Ok(Some(json)) = db.kv_get(GUARD_KEY) {
        if let Ok(mut guard) = serde_json::from_str::<VisibilityGuard>(&json) {
            guard.set_limits(limits);
            return guard;
        }
    }
    VisibilityGuard::new(limits)
}

pub fn save_guard(db: &Database, guard: &VisibilityGuard) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(guard)?;
    db.kv_set(GUARD_KEY, &json)?;
    Ok(())
}
