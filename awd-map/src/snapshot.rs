use crate::coords::{CoordinateTable, Coordinates};
use crate::document::render_map_document;
use log::{debug, info};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

/// Default hand-off location for the rendered map.
pub const DEFAULT_SNAPSHOT_PATH: &str = "assets/folium_map.html";

/// The map document could not be written to (or read back from) its
/// hand-off location. Surfaced to the caller: a blank map with no error
/// would look like a valid map of nothing.
#[derive(Error, Debug)]
#[error("failed to write map snapshot to {}: {source}", path.display())]
pub struct SnapshotWriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// How the builder hands the document to the rendering boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotTarget {
    /// Write to this path, then read the content back.
    File(PathBuf),
    /// Return the content directly.
    InMemory,
}

/// A rendered one-marker map for one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoSnapshot {
    pub coordinates: Coordinates,
    /// The region code the marker is labelled with.
    pub marker_label: String,
    /// Standalone HTML document.
    pub document: String,
}

/// Builds [`GeoSnapshot`]s from a [`CoordinateTable`].
pub struct MapSnapshotBuilder {
    table: CoordinateTable,
    target: SnapshotTarget,
    // Held across write and read-back so a build never reads another
    // build's document.
    handoff: Mutex<()>,
}

impl MapSnapshotBuilder {
    pub fn new(table: CoordinateTable, target: SnapshotTarget) -> Self {
        Self {
            table,
            target,
            handoff: Mutex::new(()),
        }
    }

    /// Builder over the default table writing to `path`.
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self::new(CoordinateTable::default(), SnapshotTarget::File(path.into()))
    }

    /// Builder over the default table without a file side channel.
    pub fn in_memory() -> Self {
        Self::new(CoordinateTable::default(), SnapshotTarget::InMemory)
    }

    pub fn target(&self) -> &SnapshotTarget {
        &self.target
    }

    /// Resolve `region`'s coordinate and render its map.
    ///
    /// Unknown regions get the table's default coordinate. Only the file
    /// hand-off can fail.
    pub fn build(&self, region: &str) -> Result<GeoSnapshot, SnapshotWriteError> {
        let coordinates = self.table.lookup(region);
        let rendered = render_map_document(coordinates, region);
        let document = match &self.target {
            SnapshotTarget::InMemory => rendered,
            SnapshotTarget::File(path) => self.hand_off(path, &rendered)?,
        };
        info!(
            "map: snapshot for {} at ({}, {})",
            region, coordinates.lat, coordinates.lon
        );
        Ok(GeoSnapshot {
            coordinates,
            marker_label: region.to_string(),
            document,
        })
    }

    fn hand_off(&self, path: &Path, content: &str) -> Result<String, SnapshotWriteError> {
        let write_err = |source| SnapshotWriteError {
            path: path.to_path_buf(),
            source,
        };
        let _guard = self
            .handoff
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, content).map_err(write_err)?;
        let read_back = std::fs::read_to_string(path).map_err(write_err)?;
        debug!("map: wrote {} bytes to {}", read_back.len(), path.display());
        Ok(read_back)
    }
}
