use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Coordinates { lat, lon }
    }
}

/// Sydney. Used for any region missing from the table.
pub const DEFAULT_COORDINATES: Coordinates = Coordinates::new(-33.8688, 151.2093);

/// A national park per region, chosen as the map focus.
const REGION_COORDINATES: [(&str, Coordinates); 7] = [
    ("NSW", Coordinates::new(-35.4865, 150.0843)), // Morton National Park
    ("NT", Coordinates::new(-13.0923, 131.3076)),  // Litchfield National Park
    ("QL", Coordinates::new(-25.2406, 152.6145)),  // Fraser Island
    ("SA", Coordinates::new(-35.3533, 138.7071)),  // Belair National Park
    ("TA", Coordinates::new(-42.6833, 146.6667)),  // Southwest National Park
    ("VI", Coordinates::new(-37.4333, 145.8667)),  // Yarra Ranges National Park
    ("WA", Coordinates::new(-34.3333, 115.1667)),  // Leeuwin-Naturaliste National Park
];

/// Region code to coordinate mapping with a fixed fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateTable {
    entries: BTreeMap<String, Coordinates>,
    default: Coordinates,
}

impl CoordinateTable {
    /// An empty table; every lookup yields `default`.
    pub fn empty(default: Coordinates) -> Self {
        CoordinateTable {
            entries: BTreeMap::new(),
            default,
        }
    }

    /// Add or replace the coordinate for `region`.
    pub fn with(mut self, region: &str, coords: Coordinates) -> Self {
        self.entries.insert(region.to_string(), coords);
        self
    }

    /// Drop `region`, so it resolves to the default.
    pub fn without(mut self, region: &str) -> Self {
        self.entries.remove(region);
        self
    }

    /// Coordinate for `region`, or the table default.
    pub fn lookup(&self, region: &str) -> Coordinates {
        match self.entries.get(region) {
            Some(coords) => *coords,
            None => {
                warn!("map: no coordinate for region '{}', using default", region);
                self.default
            }
        }
    }

    pub fn default_coordinates(&self) -> Coordinates {
        self.default
    }

    pub fn contains(&self, region: &str) -> bool {
        self.entries.contains_key(region)
    }
}

impl Default for CoordinateTable {
    fn default() -> Self {
        REGION_COORDINATES
            .iter()
            .fold(CoordinateTable::empty(DEFAULT_COORDINATES), |t, (r, c)| {
                t.with(r, *c)
            })
    }
}
