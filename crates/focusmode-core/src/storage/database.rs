//! SQLite-based client state and check-in history.
//!
//! Provides persistent storage for:
//! - Submitted daily check-ins (the client-side log of what went to the
//!   backend, with the backend's outcome line)
//! - Key-value store for application state (persisted timer engine and
//!   visibility guard between CLI invocations)

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use super::data_dir;

/// A submitted check-in, as recorded locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckinRecord {
    pub id: i64,
    pub quiz_score: u32,
    pub focus_minutes: u32,
    /// Outcome line from the backend ("On Track", "Pending Mentor Review").
    pub response_status: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CheckinStats {
    pub total_checkins: u64,
    pub total_focus_min: u64,
    pub today_checkins: u64,
    pub today_focus_min: u64,
}

/// SQLite database for client state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/focusmode/focusmode.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let path = data_dir()?.join("focusmode.db");
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, Box<dyn std::error::Error>> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS checkins (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                quiz_score      INTEGER NOT NULL,
                focus_minutes   INTEGER NOT NULL,
                response_status TEXT NOT NULL,
                submitted_at    TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_checkins_submitted_at ON checkins(submitted_at);",
        )?;
        Ok(())
    }

    // ── Check-in history ─────────────────────────────────────────────

    /// Record a submitted check-in.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn record_checkin(
        &self,
        quiz_score: u32,
        focus_minutes: u32,
        response_status: &str,
        submitted_at: DateTime<Utc>,
    ) -> Result<i64, rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO checkins (quiz_score, focus_minutes, response_status, submitted_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                quiz_score,
                focus_minutes,
                response_status,
                submitted_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent check-ins, newest first.
    pub fn recent_checkins(&self, limit: u32) -> Result<Vec<CheckinRecord>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, quiz_score, focus_minutes, response_status, submitted_at
             FROM checkins
             ORDER BY submitted_at DESC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            let submitted_at: String = row.get(4)?;
            Ok(CheckinRecord {
                id: row.get(0)?,
                quiz_score: row.get(1)?,
                focus_minutes: row.get(2)?,
                response_status: row.get(3)?,
                submitted_at: submitted_at
                    .parse::<DateTime<Utc>>()
                    .unwrap_or_else(|_| Utc::now()),
            })
        })?;
        rows.collect()
    }

    pub fn stats(&self) -> Result<CheckinStats, rusqlite::Error> {
        let mut stats = CheckinStats::default();

        self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(focus_minutes), 0) FROM checkins",
            [],
            |row| {
                stats.total_checkins = row.get(0)?;
                stats.total_focus_min = row.get(1)?;
                Ok(())
            },
        )?;

        let today = Utc::now().format("%Y-%m-%d").to_string();
        self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(focus_minutes), 0) FROM checkins
             WHERE submitted_at >= ?1",
            params![format!("{today}T00:00:00+00:00")],
            |row| {
                stats.today_checkins = row.get(0)?;
                stats.today_focus_min = row.get(1)?;
                Ok(())
            },
        )?;

        Ok(stats)
    }

    // ── Key-value store ──────────────────────────────────────────────

    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<(), rusqlite::Error> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_round_trip() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("missing").unwrap().is_none());

        db.kv_set("focus_timer", "{\"state\":\"idle\"}").unwrap();
        assert_eq!(
            db.kv_get("focus_timer").unwrap().as_deref(),
            Some("{\"state\":\"idle\"}")
        );

        db.kv_set("focus_timer", "{\"state\":\"running\"}").unwrap();
        assert_eq!(
            db.kv_get("focus_timer").unwrap().as_deref(),
            Some("{\"state\":\"running\"}")
        );

        db.kv_delete("focus_timer").unwrap();
        assert!(db.kv_get("focus_timer").unwrap().is_none());
    }

    #[test]
    fn records_and_lists_checkins() {
        let db = Database::open_memory().unwrap();
        let now = Utc::now();

        db.record_checkin(8, 75, "On Track", now - chrono::Duration::days(1))
            .unwrap();
        db.record_checkin(4, 30, "Pending Mentor Review", now)
            .unwrap();

        let recent = db.recent_checkins(10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].response_status, "Pending Mentor Review");
    }

    #[test]
    fn stats_count_today() {
        let db = Database::open_memory().unwrap();
        db.record_checkin(9, 80, "On Track", Utc::now()).unwrap();

        let stats = db.stats().unwrap();
        assert_eq!(stats.total_checkins, 1);
        assert_eq!(stats.total_focus_min, 80);
        assert_eq!(stats.today_checkins, 1);
        assert_eq!(stats.today_focus_min, 80);
    }
}
