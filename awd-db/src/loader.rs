//! One-shot population of the observation table.
//!
//! Only reachable from the [`crate::DatasetStore`] constructors; the store
//! never accepts rows after it has been built.

use awd_core::observation::Observation;
use awd_utils::dates::format_date;
use rusqlite::{params, Connection};

/// Insert every observation inside a single transaction.
pub(crate) fn insert_observations(
    conn: &mut Connection,
    observations: &[Observation],
) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO observations
             (region, date, year, month, estimated_fire_area, pixel_count)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for obs in observations {
            stmt.execute(params![
                obs.region.code(),
                format_date(&obs.date),
                obs.year,
                obs.month,
                obs.estimated_fire_area,
                obs.pixel_count,
            ])?;
        }
    }
    tx.commit()?;
    log::info!("store: loaded {} observations", observations.len());
    Ok(())
}
