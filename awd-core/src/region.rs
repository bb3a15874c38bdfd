use crate::error::UnknownRegion;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Number of regions covered by the dataset.
pub const REGION_COUNT: usize = 7;

/// An Australian state or territory as coded in the wildfire dataset.
///
/// The dataset abbreviates Queensland as `QL`, Tasmania as `TA` and
/// Victoria as `VI`, which differ from the postal abbreviations.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum RegionCode {
    #[default]
    #[serde(rename = "NSW")]
    NewSouthWales,
    #[serde(rename = "NT")]
    NorthernTerritory,
    #[serde(rename = "QL")]
    Queensland,
    #[serde(rename = "SA")]
    SouthAustralia,
    #[serde(rename = "TA")]
    Tasmania,
    #[serde(rename = "VI")]
    Victoria,
    #[serde(rename = "WA")]
    WesternAustralia,
}

impl RegionCode {
    /// All regions, in the order the filter control lists them.
    pub const ALL: [RegionCode; REGION_COUNT] = [
        RegionCode::NewSouthWales,
        RegionCode::NorthernTerritory,
        RegionCode::Queensland,
        RegionCode::SouthAustralia,
        RegionCode::Tasmania,
        RegionCode::Victoria,
        RegionCode::WesternAustralia,
    ];

    /// The dataset code, e.g. "NSW".
    pub fn code(&self) -> &'static str {
        match self {
            RegionCode::NewSouthWales => "NSW",
            RegionCode::NorthernTerritory => "NT",
            RegionCode::Queensland => "QL",
            RegionCode::SouthAustralia => "SA",
            RegionCode::Tasmania => "TA",
            RegionCode::Victoria => "VI",
            RegionCode::WesternAustralia => "WA",
        }
    }

    /// Human-readable name shown next to the radio control.
    pub fn display_name(&self) -> &'static str {
        match self {
            RegionCode::NewSouthWales => "New South Wales",
            RegionCode::NorthernTerritory => "Northern Territory",
            RegionCode::Queensland => "Queensland",
            RegionCode::SouthAustralia => "South Australia",
            RegionCode::Tasmania => "Tasmania",
            RegionCode::Victoria => "Victoria",
            RegionCode::WesternAustralia => "Western Australia",
        }
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for RegionCode {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        RegionCode::ALL
            .iter()
            .copied()
            .find(|r| r.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownRegion(trimmed.to_string()))
    }
}

impl TryFrom<&str> for RegionCode {
    type Error = UnknownRegion;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}
