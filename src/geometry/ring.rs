use geo::{Coord, LineString, Polygon};

use crate::error::{HarvestError, Result};

use super::AxisOrder;

/// Smallest extent, in degrees (about 100 m), the search index accepts on either axis.
pub const GIS_EPSILON: f64 = 0.001;

fn clamp_latitude(latitude: f64) -> f64 {
    latitude.clamp(-90.0, 90.0)
}

/// Builds the rectangle for a geographic bounding box.
///
/// Latitudes are clamped to [-90, 90]. An axis narrower than [`GIS_EPSILON`] is
/// widened by half of it on each side so the result always has a positive area,
/// and latitudes are clamped again after widening. The ring starts at
/// (west, north) and runs (west, south), (east, south), (east, north).
pub fn bounding_box_to_polygon(north: f64, east: f64, south: f64, west: f64) -> Polygon<f64> {
    let mut north = clamp_latitude(north);
    let mut south = clamp_latitude(south);
    let mut east = east;
    let mut west = west;

    if (north - south).abs() < GIS_EPSILON {
        north = clamp_latitude(north + GIS_EPSILON / 2.0);
        south = clamp_latitude(south - GIS_EPSILON / 2.0);
    }
    if (east - west).abs() < GIS_EPSILON {
        west -= GIS_EPSILON / 2.0;
        east += GIS_EPSILON / 2.0;
    }

    let exterior = LineString::from(vec![
        (west, north),
        (west, south),
        (east, south),
        (east, north),
        (west, north),
    ]);
    Polygon::new(exterior, vec![])
}

/// Parses the legacy GML `coordinates` format: `lon,lat[,z] lon,lat[,z] ...`.
///
/// Tuples with fewer than two values are skipped. Any unreadable number makes the
/// whole ring unusable. Empty input gives `None`.
pub fn parse_legacy_coordinate_ring(text: &str) -> Option<LineString<f64>> {
    let mut coords = Vec::new();
    for tuple in text.split_whitespace() {
        let values: Vec<&str> = tuple.split(',').collect();
        if values.len() < 2 {
            continue;
        }
        let lon = values[0].trim().parse::<f64>().ok()?;
        let lat = values[1].trim().parse::<f64>().ok()?;
        if lon.is_nan() || lat.is_nan() {
            return None;
        }
        coords.push(Coord { x: lon, y: lat });
    }

    if coords.is_empty() {
        return None;
    }
    Some(close_ring(coords))
}

/// Parses a flat GML `posList`: whitespace separated numbers, `dimension` per position.
pub fn parse_flat_coordinate_ring(
    text: &str,
    dimension: usize,
    axis_order: AxisOrder,
) -> Result<Option<LineString<f64>>> {
    let positions = read_positions(text, dimension)?;
    let mut coords = Vec::with_capacity(positions.len() + 1);
    for (first, second) in positions {
        coords.push(axis_order.to_coord(first, second));
    }

    if coords.is_empty() {
        return Ok(None);
    }
    Ok(Some(close_ring(coords)))
}

/// Turns a single GML `pos` into a tiny square around it.
///
/// The spatial index merges neighbouring points into oversized shapes, so a point
/// is never indexed as a point.
pub fn single_coordinate_to_square(
    text: &str,
    dimension: usize,
    axis_order: AxisOrder,
) -> Result<Option<Polygon<f64>>> {
    let positions = read_positions(text, dimension)?;
    Ok(positions.first().map(|&(first, second)| {
        let coord = axis_order.to_coord(first, second);
        bounding_box_to_polygon(coord.y, coord.x, coord.y, coord.x)
    }))
}

fn read_positions(text: &str, dimension: usize) -> Result<Vec<(f64, f64)>> {
    let values: Vec<&str> = text.split_whitespace().collect();
    if values.is_empty() || dimension < 2 {
        return Ok(Vec::new());
    }
    let incomplete = values.len() % dimension;
    if incomplete != 0 {
        // the values left over after the last full position
        let rest = &values[values.len() - incomplete..];
        return Err(HarvestError::InvalidCoordinate {
            x: rest[0].to_string(),
            y: rest.get(1).map(|value| value.to_string()).unwrap_or_default(),
        });
    }

    values
        .chunks(dimension)
        .map(|position| {
            let invalid = || HarvestError::InvalidCoordinate {
                x: position[0].to_string(),
                y: position[1].to_string(),
            };
            let first = position[0].parse::<f64>().map_err(|_| invalid())?;
            let second = position[1].parse::<f64>().map_err(|_| invalid())?;
            if first.is_nan() || second.is_nan() {
                return Err(invalid());
            }
            Ok((first, second))
        })
        .collect()
}

fn close_ring(mut coords: Vec<Coord<f64>>) -> LineString<f64> {
    if let (Some(&first), Some(&last)) = (coords.first(), coords.last()) {
        if first != last {
            coords.push(first);
        }
    }
    LineString::new(coords)
}
