use crate::errors::DbError;
use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection};

#[derive(Debug)]
pub struct ScrapeRun {
    pub id: i64,
    pub search_url: String,
    pub started_at: NaiveDateTime,
    pub finished_at: Option<NaiveDateTime>,
    pub listings_seen: Option<i64>,
    pub success: bool,
    pub error_message: Option<String>,
}

pub fn start_scrape_run(conn: &Connection, search_url: &str) -> Result<i64, DbError> {
    conn.execute(
        "INSERT INTO scrape_runs (search_url, started_at, success) VALUES (?1, ?2, 0)",
        params![search_url, Utc::now().naive_utc()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn end_scrape_run(
    conn: &Connection,
    run_id: i64,
    listings: usize,
    error: Option<String>,
) -> Result<(), DbError> {
    conn.execute(
        "UPDATE scrape_runs SET finished_at = ?1, listings_seen = ?2, success = ?3, error_message = ?4 WHERE id = ?5",
        params![
            Utc::now().naive_utc(),
            listings as i64,
            error.is_none(),
            error,
            run_id
        ],
    )?;
    Ok(())
}

pub fn get_recent_scrapes(conn: &Connection) -> Result<Vec<ScrapeRun>, DbError> {
    let mut stmt = conn.prepare(
        "SELECT id, search_url, started_at, finished_at, listings_seen, success, error_message FROM scrape_runs ORDER BY id DESC LIMIT 50",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(ScrapeRun {
            id: row.get(0)?,
            search_url: row.get(1)?,
            started_at: row.get(2)?,
            finished_at: row.get(3)?,
            listings_seen: row.get(4)?,
            success: row.get(5)?,
            error_message: row.get(6)?,
        })
    })?;

    let mut runs = Vec::new();
    for r in rows {
        runs.push(r?);
    }
    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::{init_db, Database};

    #[test]
    fn run_is_recorded_start_to_finish() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("runs.sqlite"));
        init_db(&db).unwrap();

        let runs = db
            .with_conn(|conn| {
                let ok = start_scrape_run(conn, "https://x/search?a=1")?;
                end_scrape_run(conn, ok, 240, None)?;

                let failed = start_scrape_run(conn, "https://x/search?a=2")?;
                end_scrape_run(conn, failed, 0, Some("HTTP 403".to_string()))?;

                get_recent_scrapes(conn)
            })
            .unwrap();

        assert_eq!(runs.len(), 2);
        assert!(!runs[0].success);
        assert_eq!(runs[0].error_message.as_deref(), Some("HTTP 403"));
        assert!(runs[1].success);
        assert_eq!(runs[1].listings_seen, Some(240));
        assert!(runs[1].finished_at.is_some());
    }
}
