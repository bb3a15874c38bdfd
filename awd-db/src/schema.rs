//! SQL schema for the in-memory observation store.
//!
//! The schema is applied as a single batch when the store is built.

/// Returns the full SQL schema as a single batch string.
///
/// One table, `observations`, holds one row per (region, date) detection
/// record. `year` and `month` are stored denormalized so the dashboard's
/// region+year filter hits an index instead of parsing dates.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS observations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        region TEXT NOT NULL,
        date TEXT NOT NULL,
        year INTEGER NOT NULL,
        month INTEGER NOT NULL,
        estimated_fire_area REAL NOT NULL,
        pixel_count REAL NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_obs_region_year ON observations(region, year);
    CREATE INDEX IF NOT EXISTS idx_obs_date ON observations(date);
    "#
}
