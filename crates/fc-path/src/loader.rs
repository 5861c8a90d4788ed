//! CSV path loader.
//!
//! # CSV format
//!
//! One row per waypoint, in path order.  All rows of the same path share the
//! same `closed` value.
//!
//! ```csv
//! name,x,y,z,in_x,in_y,in_z,out_x,out_y,out_z,closed
//! patrol,0,0,0,,,,,,,1
//! patrol,1000,0,0,,,,,,,1
//! patrol,1000,0,1000,,,,,,,1
//! patrol,0,0,1000,,,,,,,1
//! ```
//!
//! The six control-point columns may be left empty to request auto-generated
//! Catmull-Rom tangents; if any of a waypoint's six control values is
//! present, all six must be.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use fc_core::Vec3;

use crate::path::{PathBuilder, PathData};
use crate::PathError;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct WaypointRecord {
    name:  String,
    x:     f32,
    y:     f32,
    z:     f32,
    in_x:  Option<f32>,
    in_y:  Option<f32>,
    in_z:  Option<f32>,
    out_x: Option<f32>,
    out_y: Option<f32>,
    out_z: Option<f32>,
    closed: u8,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load every path found in a CSV file, keyed by `name`.
///
/// Waypoint order within a path follows row order in the file.
pub fn load_path_csv(path: &Path) -> Result<Vec<PathData>, PathError> {
    let file = std::fs::File::open(path).map_err(PathError::Io)?;
    load_path_reader(file)
}

/// Like [`load_path_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or loading from embedded
/// data.
pub fn load_path_reader<R: Read>(reader: R) -> Result<Vec<PathData>, PathError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    // Buffer rows per path name, preserving first-seen name order.
    let mut order: Vec<String> = Vec::new();
    let mut by_name: HashMap<String, Vec<WaypointRecord>> = HashMap::new();

    for result in csv_reader.deserialize::<WaypointRecord>() {
        let row = result.map_err(|e| PathError::Parse(e.to_string()))?;
        if !by_name.contains_key(&row.name) {
            order.push(row.name.clone());
        }
        by_name.entry(row.name.clone()).or_default().push(row);
    }

    let mut paths = Vec::with_capacity(order.len());
    for name in order {
        let rows = by_name.remove(&name).unwrap_or_default();
        paths.push(build_path(name, rows)?);
    }
    Ok(paths)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn build_path(name: String, rows: Vec<WaypointRecord>) -> Result<PathData, PathError> {
    // All rows for the same path are expected to share `closed`.
    let closed = rows.first().map(|r| r.closed != 0).unwrap_or(false);

    let mut builder = PathBuilder::new(name.clone()).closed(closed);
    for row in rows {
        let pos = Vec3::new(row.x, row.y, row.z);
        builder = match controls_of(&row)? {
            Some((in_c, out_c)) => builder.waypoint_with_controls(pos, in_c, out_c),
            None => builder.waypoint(pos),
        };
    }

    let path = builder.build();
    if !path.is_followable() {
        return Err(PathError::TooFewWaypoints {
            name,
            count: path.waypoints.len(),
        });
    }
    Ok(path)
}

/// Extract the optional control-point pair; all-six-or-none.
fn controls_of(row: &WaypointRecord) -> Result<Option<(Vec3, Vec3)>, PathError> {
    let fields = [row.in_x, row.in_y, row.in_z, row.out_x, row.out_y, row.out_z];
    let present = fields.iter().filter(|f| f.is_some()).count();
    match present {
        0 => Ok(None),
        6 => Ok(Some((
            Vec3::new(row.in_x.unwrap(), row.in_y.unwrap(), row.in_z.unwrap()),
            Vec3::new(row.out_x.unwrap(), row.out_y.unwrap(), row.out_z.unwrap()),
        ))),
        _ => Err(PathError::Parse(format!(
            "path '{}': waypoint control points must be all present or all empty",
            row.name
        ))),
    }
}
