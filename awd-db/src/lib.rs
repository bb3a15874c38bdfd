//! Read-only in-memory SQLite store for wildfire observations.
//!
//! The dashboard loads the historical wildfire table exactly once at startup
//! and only ever reads it afterwards. This crate enforces that shape:
//!
//! - The only constructors ([`DatasetStore::from_csv`],
//!   [`DatasetStore::from_observations`]) build and populate the database in
//!   one step; no loader is public, so nothing can mutate the store later.
//! - The connection sits behind an `Rc`, so clones are views over the same
//!   table rather than copies of it.
//! - Queries return owned [`awd_core::observation::Observation`]s ordered by
//!   date; aggregation is left to the caller.
//!
//! # Usage
//!
//! ```rust
//! use awd_core::region::RegionCode;
//! use awd_db::DatasetStore;
//!
//! let store = DatasetStore::from_csv(
//!     "Region,Date,Estimated_fire_area,Count\nNSW,1/4/2005,10,4\n",
//! )
//! .unwrap();
//!
//! let rows = store.query(RegionCode::NewSouthWales, 2005);
//! assert_eq!(rows.len(), 1);
//! assert_eq!(store.distinct_years().unwrap(), vec![2005]);
//! ```

mod loader;
pub mod models;
mod queries;
pub mod schema;

use awd_core::{dataset::parse_observations, error::DataLoadError, observation::Observation};
use rusqlite::Connection;
use std::rc::Rc;

/// Immutable observation table shared by every dashboard reaction.
///
/// Cheap to clone; all clones read the same in-memory connection.
#[derive(Clone)]
pub struct DatasetStore {
    conn: Rc<Connection>,
}

impl DatasetStore {
    /// Normalize the wildfire CSV and load it into a fresh store.
    pub fn from_csv(csv_data: &str) -> Result<Self, DataLoadError> {
        let observations = parse_observations(csv_data)?;
        Self::from_observations(&observations)
    }

    /// Load already-normalized observations into a fresh store.
    pub fn from_observations(observations: &[Observation]) -> Result<Self, DataLoadError> {
        if observations.is_empty() {
            return Err(DataLoadError::Empty);
        }
        let store_err = |e: rusqlite::Error| DataLoadError::Store(e.to_string());
        let mut conn = Connection::open_in_memory().map_err(store_err)?;
        conn.execute_batch(schema::create_schema())
            .map_err(store_err)?;
        loader::insert_observations(&mut conn, observations).map_err(store_err)?;
        Ok(Self {
            conn: Rc::new(conn),
        })
    }
}
