//! Region map snapshots.
//!
//! [`MapSnapshotBuilder::build`] turns a region code into a [`GeoSnapshot`]:
//! a coordinate from a static table (or the fixed default for unknown codes)
//! and a standalone Leaflet HTML document with one marker on it.
//!
//! The document can be handed over in memory or through a well-known file
//! (see [`SnapshotTarget`]). The file is a side channel: the snapshot always
//! carries the content itself, read back under a per-build lock.

pub mod coords;
pub mod document;
pub mod snapshot;

pub use coords::{CoordinateTable, Coordinates, DEFAULT_COORDINATES};
pub use snapshot::{GeoSnapshot, MapSnapshotBuilder, SnapshotTarget, SnapshotWriteError};
