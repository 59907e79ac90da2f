//! CSV zone-catalog loader.
//!
//! # CSV format
//!
//! One row per zone.  Row order within each kind is preserved.
//!
//! ```csv
//! zone_id,kind,display_name
//! 0,pickup,Harbour Warehouse
//! 1,pickup,Bakery
//! 10,dropoff,Old Town
//! 11,dropoff,Station Square
//! ```
//!
//! **`kind`** is `pickup` or `dropoff` (case-insensitive; `deliver` is
//! accepted as an alias for `dropoff`).

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{CoreError, CoreResult, ZoneCatalog, ZoneId, ZoneKind, ZoneRef};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ZoneRecord {
    zone_id:      u32,
    kind:         String,
    display_name: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`ZoneCatalog`] from a CSV file.
pub fn load_zones_csv(path: &Path) -> CoreResult<ZoneCatalog> {
    let file = std::fs::File::open(path)?;
    load_zones_reader(file)
}

/// Like [`load_zones_csv`] but accepts any `Read` source.
///
/// Useful for tests (pass a `std::io::Cursor`) or catalogs embedded in a
/// binary.
pub fn load_zones_reader<R: Read>(reader: R) -> CoreResult<ZoneCatalog> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut pickups = Vec::new();
    let mut dropoffs = Vec::new();

    for result in csv_reader.deserialize::<ZoneRecord>() {
        let row = result.map_err(|e| CoreError::Parse(e.to_string()))?;
        let kind = parse_kind(&row.kind)?;
        let zone = ZoneRef::new(ZoneId(row.zone_id), kind, row.display_name.trim());
        match kind {
            ZoneKind::Pickup  => pickups.push(zone),
            ZoneKind::Dropoff => dropoffs.push(zone),
        }
    }

    ZoneCatalog::new(pickups, dropoffs)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_kind(s: &str) -> CoreResult<ZoneKind> {
    match s.trim().to_ascii_lowercase().as_str() {
        "pickup" => Ok(ZoneKind::Pickup),
        "dropoff" | "deliver" => Ok(ZoneKind::Dropoff),
        other => Err(CoreError::Parse(format!(
            "invalid zone kind {other:?}: expected \"pickup\" or \"dropoff\""
        ))),
    }
}
