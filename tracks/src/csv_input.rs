use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::point::Pt2D;
use crate::properties::{PropertyMap, PropertyValue};
use crate::time::parse_timestamp;
use crate::trajectory::Trajectory;
use crate::trajectory_point::TrajectoryPoint;

const COLUMNS: [&str; 4] = ["object_id", "timestamp", "x", "y"];

/// Reads one trajectory per object ID. Besides the required columns, anything else becomes a
/// property: a real number if it parses as one, otherwise a string.
pub fn load_csv<R: std::io::Read>(reader: R) -> Result<BTreeMap<String, Trajectory<Pt2D>>> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();

    // Read raw data
    let mut data_per_object: BTreeMap<String, Vec<TrajectoryPoint<Pt2D>>> = BTreeMap::new();
    for (idx, rec) in reader.records().enumerate() {
        // The header is line 1
        let line = idx + 2;
        let rec = rec.with_context(|| format!("reading line {}", line))?;
        let row: Row = rec
            .deserialize(Some(&headers))
            .with_context(|| format!("parsing line {}", line))?;
        let timestamp =
            parse_timestamp(&row.timestamp).with_context(|| format!("parsing line {}", line))?;

        let mut properties = PropertyMap::new();
        for (key, value) in headers.iter().zip(rec.iter()) {
            if COLUMNS.contains(&key) || value.is_empty() {
                continue;
            }
            let value = match value.parse::<f64>() {
                Ok(x) => PropertyValue::Real(x),
                Err(_) => PropertyValue::String(value.to_string()),
            };
            properties.insert(key.to_string(), value);
        }

        let mut pt =
            TrajectoryPoint::new(Pt2D::new(row.x, row.y), row.object_id.clone(), timestamp);
        pt.properties = properties;
        data_per_object
            .entry(row.object_id)
            .or_insert_with(Vec::new)
            .push(pt);
    }

    // Calculate trajectories
    let mut results = BTreeMap::new();
    for (object_id, mut pts) in data_per_object {
        if pts.windows(2).any(|pair| pair[0].timestamp > pair[1].timestamp) {
            warn!("Input for {} isn't sorted by time; reordering it", object_id);
            // Stable, so equal timestamps keep the input order
            pts.sort_by_key(|pt| pt.timestamp);
        }
        let trajectory =
            Trajectory::new(pts).with_context(|| format!("building trajectory for {}", object_id))?;
        results.insert(object_id, trajectory);
    }
    info!("Loaded {} trajectories", results.len());
    Ok(results)
}

#[derive(Deserialize)]
struct Row {
    object_id: String,
    timestamp: String,
    x: f64,
    y: f64,
}
