use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

// Quantities are kept with a precision of 3 decimals (MB resolution for GB values).
const QUANTITY_SCALE: f64 = 1000.0;

/// Latest result of one submitter. The submitter name is the key of the table
/// and is not repeated here, which keeps the snapshot file format
/// `name -> {cleaned_gb, timestamp, location, starting_gb}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub cleaned_gb: f64,
    pub timestamp: NaiveDateTime,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub starting_gb: f64,
}

/// An entry together with its submitter name, as served by the ranked listing
/// and accepted back by the snapshot sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub name: String,
    #[serde(flatten)]
    pub entry: Entry,
}

impl Entry {
    /// Builds an entry stamped with the current local time.
    pub fn new(cleaned_gb: f64, starting_gb: f64, location: String) -> Self {
        Entry {
            cleaned_gb: round_quantity(cleaned_gb),
            timestamp: now(),
            location,
            starting_gb: round_quantity(starting_gb),
        }
    }
}

/// Rounds to 3 decimals, half away from zero, on the binary value scaled by
/// 1000 rather than on the decimal input: `2.675` is stored as `2.675`.
/// Results beyond the `f64` range come back as infinity.
pub fn round_quantity(value: f64) -> f64 {
    (value * QUANTITY_SCALE).round() / QUANTITY_SCALE
}

// Microsecond precision, matching the snapshot files.
fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(6)
}
