//! Typed read queries over the observation table.

use crate::models::DatasetSummary;
use crate::DatasetStore;
use awd_core::{observation::Observation, region::RegionCode};
use awd_utils::dates::parse_date;
use rusqlite::{params, types::Type, Row};

fn row_to_observation(row: &Row<'_>) -> rusqlite::Result<Observation> {
    let region_raw: String = row.get(0)?;
    let region: RegionCode = region_raw
        .parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;
    let date_raw: String = row.get(1)?;
    let date = parse_date(&date_raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, e.into()))?;
    Ok(Observation::new(region, date, row.get(2)?, row.get(3)?))
}

impl DatasetStore {
    /// Observations for exactly `region` and `year`, ordered by date.
    ///
    /// Never fails: no match is an empty vector. The store is a fixed
    /// in-memory table, so a SQLite error here is a bug; it is logged and
    /// reported as no data rather than taking down the chart path.
    pub fn query(&self, region: RegionCode, year: i32) -> Vec<Observation> {
        match self.query_observations(region, year) {
            Ok(rows) => rows,
            Err(e) => {
                log::error!("store: query {} {} failed: {:#}", region, year, e);
                Vec::new()
            }
        }
    }

    /// Fallible form of [`query`](Self::query).
    pub fn query_observations(
        &self,
        region: RegionCode,
        year: i32,
    ) -> anyhow::Result<Vec<Observation>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT region, date, estimated_fire_area, pixel_count
             FROM observations
             WHERE region = ?1 AND year = ?2
             ORDER BY date, id",
        )?;
        let rows = stmt
            .query_map(params![region.code(), year], row_to_observation)?
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "store: query {} {} returned {} records",
            region,
            year,
            rows.len()
        );
        Ok(rows)
    }

    /// Distinct observation years, ascending. Feeds the year control.
    pub fn distinct_years(&self) -> anyhow::Result<Vec<i32>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT DISTINCT year FROM observations ORDER BY year")?;
        let years = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<i32>, _>>()?;
        Ok(years)
    }

    /// Regions with at least one observation, in filter-control order.
    pub fn regions(&self) -> anyhow::Result<Vec<RegionCode>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT DISTINCT region FROM observations")?;
        let codes = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RegionCode::ALL
            .into_iter()
            .filter(|r| codes.iter().any(|c| c == r.code()))
            .collect())
    }

    /// Number of loaded observation rows.
    pub fn row_count(&self) -> anyhow::Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM observations", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Row count, years, regions and date span of the table.
    pub fn summary(&self) -> anyhow::Result<DatasetSummary> {
        let (first_date, last_date): (String, String) = self.conn.query_row(
            "SELECT MIN(date), MAX(date) FROM observations",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(DatasetSummary {
            rows: self.row_count()?,
            years: self.distinct_years()?,
            regions: self.regions()?,
            first_date,
            last_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Region,Date,Estimated_fire_area,Count
NSW,1/4/2005,10,4
NSW,1/2/2005,20,6
NSW,2/10/2005,5,1
NSW,3/1/2006,7,2
VI,1/4/2005,99,50
WA,12/31/2004,3,3
";

    fn sample_store() -> DatasetStore {
        DatasetStore::from_csv(SAMPLE).unwrap()
    }

    #[test]
    fn query_filters_region_and_year() {
        let store = sample_store();
        let rows = store.query(RegionCode::NewSouthWales, 2005);
        assert_eq!(rows.len(), 3);
        assert!(rows
            .iter()
            .all(|o| o.region == RegionCode::NewSouthWales && o.year == 2005));
    }

    #[test]
    fn query_orders_by_date() {
        let store = sample_store();
        let rows = store.query(RegionCode::NewSouthWales, 2005);
        let dates: Vec<_> = rows.iter().map(|o| o.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
        assert_eq!(rows[0].estimated_fire_area, 20.0);
    }

    #[test]
    fn query_with_no_match_is_empty() {
        let store = sample_store();
        assert!(store.query(RegionCode::Tasmania, 2005).is_empty());
        assert!(store.query(RegionCode::NewSouthWales, 1999).is_empty());
    }

    #[test]
    fn distinct_years_ascending() {
        let store = sample_store();
        assert_eq!(store.distinct_years().unwrap(), vec![2004, 2005, 2006]);
    }

    #[test]
    fn regions_in_control_order() {
        let store = sample_store();
        assert_eq!(
            store.regions().unwrap(),
            vec![
                RegionCode::NewSouthWales,
                RegionCode::Victoria,
                RegionCode::WesternAustralia
            ]
        );
    }

    #[test]
    fn summary_reports_span() {
        let summary = sample_store().summary().unwrap();
        assert_eq!(summary.rows, 6);
        assert_eq!(summary.first_date, "2004-12-31");
        assert_eq!(summary.last_date, "2006-03-01");
        assert_eq!(summary.years.len(), 3);
    }
}
