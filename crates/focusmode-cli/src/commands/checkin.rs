use chrono::Utc;
use focusmode_core::{CheckinDraft, Config, Database, Event, FocusSession};

use super::common::{api_client, load_guard, load_timer, runtime, save_timer};

pub fn run(score: String, minutes: Option<i64>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    let client = api_client(&config)?;

    let mut timer = load_timer(&db);
    let minutes = minutes.unwrap_or_else(|| timer.recorded_minutes() as i64);
    let draft = CheckinDraft::new(score, minutes);

    let mut session = FocusSession::with_guard(load_guard(&db, config.guard_limits()));

    let rt = runtime()?;
    let response = rt.block_on(async {
        // The screen gate needs fresh status: check-in is only valid on
        // the check-in screen.
        let status = client.get_status().await?;
        session.apply_status(&status, Utc::now());

        let valid = session.prepare_checkin(&draft)?;
        if !session.begin_submit() {
            return Err("a check-in is already in flight".into());
        }
        let result = client
            .submit_checkin(valid.quiz_score, valid.focus_minutes)
            .await;
        session.finish_submit();
        let response = result?;

        Ok::<_, Box<dyn std::error::Error>>((valid, response))
    });
    let (valid, response) = response?;

    let now = Utc::now();
    db.record_checkin(
        valid.quiz_score,
        valid.focus_minutes,
        &response.status,
        now,
    )?;

    // Submitted minutes are spent; the next check-in needs a fresh run.
    timer.reset(now);
    save_timer(&db, &timer)?;

    let event = Event::CheckinSubmitted {
        quiz_score: valid.quiz_score,
        focus_minutes: valid.focus_minutes,
        response: response.status.clone(),
        at: now,
    };
    println!("{}", serde_json::to_string_pretty(&event)?);
    eprintln!(
        "hint: the backend expects score > {} and focus > {} minutes to pass",
        config.checkin.target_score, config.checkin.target_minutes
    );
    Ok(())
}
