//! CSV loader for circular exclusion zones.
//!
//! # CSV format
//!
//! Headerless, one zone per row:
//!
//! ```csv
//! 42.36,-71.06,250
//! 42.37,-71.05,400,1
//! ```
//!
//! Columns are latitude (degrees, north positive), longitude (degrees, east
//! positive), and radius in metres.  An optional fourth column of `1` marks a
//! zone discovered after the incident began; anything else, or no fourth
//! column, means the zone was known in advance.

use std::io::Read;
use std::path::Path;

use sar_core::GeoPoint;

use crate::{CircularZone, GeometryError, GeometryResult};

/// Load circular zones from a CSV file.
pub fn load_zones_csv(path: &Path) -> GeometryResult<Vec<CircularZone>> {
    let file = std::fs::File::open(path).map_err(GeometryError::Io)?;
    load_zones_reader(file)
}

/// Like [`load_zones_csv`] but accepts any `Read` source.
pub fn load_zones_reader<R: Read>(reader: R) -> GeometryResult<Vec<CircularZone>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut zones = Vec::new();
    for (row, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| GeometryError::Parse(e.to_string()))?;
        if record.len() < 3 {
            return Err(GeometryError::Parse(format!(
                "row {}: expected lat,lon,radius_m[,unknown], got {} fields",
                row + 1,
                record.len()
            )));
        }
        let field = |i: usize| -> GeometryResult<f64> {
            record[i].parse::<f64>().map_err(|e| {
                GeometryError::Parse(format!("row {}: field {} {:?}: {e}", row + 1, i + 1, &record[i]))
            })
        };
        let center = GeoPoint::new(field(0)?, field(1)?);
        let radius_m = field(2)?;
        let known = record.get(3) != Some("1");
        zones.push(CircularZone::new(center, radius_m, known)?);
    }
    Ok(zones)
}
