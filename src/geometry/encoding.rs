//! WKT reading and writing.
//!
//! The search index compares geometries textually when records are re-harvested,
//! so the output has to be stable: polygons are normalised (shells clockwise, holes
//! counter-clockwise, every ring starting at its smallest coordinate, polygons
//! sorted) before being written.

use std::cmp::Ordering;
use std::fmt::Write;

use geo::{BooleanOps, Coord, Geometry, LineString, MultiPolygon, Polygon, Winding};
use tracing::debug;
use wkt::TryFromWkt;

use crate::error::{HarvestError, Result};

/// Geometry used for records that don't define a usable extent (whole world).
/// `BBOX (west, east, north, south)`
pub const DEFAULT_WKT: &str = "BBOX (-180, 180, 90, -90)";

/// Unions all polygons into a single WKT value.
///
/// A single polygon is only normalised so its vertices are kept exactly.
///
/// # Arguments
///
/// * `polygons` - Extent polygons in (lon, lat) order.
///
/// # Returns
///
/// * `Ok(Some(wkt))` - `POLYGON` when the union is one shape, `MULTIPOLYGON` otherwise.
/// * `Ok(None)` - No polygons were given.
/// * `Err(HarvestError::InvalidGeometry)` - A shell has fewer than 4 points, a
///   coordinate is not finite, or the union came out empty.
pub fn union_polygons(polygons: &[Polygon<f64>]) -> Result<Option<String>> {
    for polygon in polygons {
        validate(polygon)?;
    }

    let merged = match polygons {
        [] => return Ok(None),
        [single] => MultiPolygon::new(vec![single.clone()]),
        [first, rest @ ..] => {
            debug!("Union of {} polygons", polygons.len());
            rest.iter().fold(MultiPolygon::new(vec![first.clone()]), |acc, polygon| {
                acc.union(&MultiPolygon::new(vec![polygon.clone()]))
            })
        }
    };

    if merged.0.is_empty() {
        return Err(HarvestError::InvalidGeometry(
            "union produced an empty geometry".to_string(),
        ));
    }
    Ok(Some(write_multi_polygon(&normalize_multi_polygon(&merged))))
}

fn validate(polygon: &Polygon<f64>) -> Result<()> {
    if polygon.exterior().0.len() < 4 {
        return Err(HarvestError::InvalidGeometry(format!(
            "polygon shell has {} points, at least 4 are required",
            polygon.exterior().0.len()
        )));
    }
    let all_finite = std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .flat_map(|ring| ring.coords())
        .all(|c| c.x.is_finite() && c.y.is_finite());
    if !all_finite {
        return Err(HarvestError::InvalidGeometry(
            "polygon contains non-finite coordinates".to_string(),
        ));
    }
    Ok(())
}

fn compare_coords(a: &Coord<f64>, b: &Coord<f64>) -> Ordering {
    a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y))
}

fn compare_rings(a: &LineString<f64>, b: &LineString<f64>) -> Ordering {
    for (ca, cb) in a.0.iter().zip(b.0.iter()) {
        let ordering = compare_coords(ca, cb);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.0.len().cmp(&b.0.len())
}

fn compare_polygons(a: &Polygon<f64>, b: &Polygon<f64>) -> Ordering {
    compare_rings(a.exterior(), b.exterior()).then_with(|| {
        for (ha, hb) in a.interiors().iter().zip(b.interiors().iter()) {
            let ordering = compare_rings(ha, hb);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        a.interiors().len().cmp(&b.interiors().len())
    })
}

fn normalize_ring(ring: &LineString<f64>, clockwise: bool) -> LineString<f64> {
    let mut coords = ring.0.clone();
    if coords.len() > 1 && coords.first() == coords.last() {
        coords.pop();
    }
    if coords.is_empty() {
        return LineString::new(coords);
    }

    let start = coords
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| compare_coords(a, b))
        .map(|(index, _)| index)
        .unwrap_or(0);
    coords.rotate_left(start);
    coords.push(coords[0]);

    let mut ring = LineString::new(coords);
    if ring.is_ccw() == clockwise {
        ring.0.reverse();
    }
    ring
}

pub fn normalize_polygon(polygon: &Polygon<f64>) -> Polygon<f64> {
    let exterior = normalize_ring(polygon.exterior(), true);
    let mut holes: Vec<LineString<f64>> = polygon
        .interiors()
        .iter()
        .map(|hole| normalize_ring(hole, false))
        .collect();
    holes.sort_by(compare_rings);
    Polygon::new(exterior, holes)
}

pub fn normalize_multi_polygon(multi: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    let mut polygons: Vec<Polygon<f64>> = multi.0.iter().map(normalize_polygon).collect();
    polygons.sort_by(compare_polygons);
    MultiPolygon::new(polygons)
}

fn write_ring(out: &mut String, ring: &LineString<f64>) {
    out.push('(');
    for (index, coord) in ring.coords().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        // f64 Display gives the shortest text that reads back to the same value
        let _ = write!(out, "{} {}", coord.x, coord.y);
    }
    out.push(')');
}

fn write_polygon_body(out: &mut String, polygon: &Polygon<f64>) {
    out.push('(');
    write_ring(out, polygon.exterior());
    for hole in polygon.interiors() {
        out.push_str(", ");
        write_ring(out, hole);
    }
    out.push(')');
}

pub fn write_polygon(polygon: &Polygon<f64>) -> String {
    let mut out = String::from("POLYGON ");
    write_polygon_body(&mut out, polygon);
    out
}

/// Writes `POLYGON` for a single member, `MULTIPOLYGON` otherwise.
pub fn write_multi_polygon(multi: &MultiPolygon<f64>) -> String {
    match multi.0.as_slice() {
        [] => "MULTIPOLYGON EMPTY".to_string(),
        [single] => write_polygon(single),
        polygons => {
            let mut out = String::from("MULTIPOLYGON (");
            for (index, polygon) in polygons.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                write_polygon_body(&mut out, polygon);
            }
            out.push(')');
            out
        }
    }
}

/// Reads a WKT value, including the `BBOX (west, east, north, south)` form.
pub fn read_wkt(text: &str) -> Result<Geometry<f64>> {
    let trimmed = text.trim();
    if let Some(envelope) = parse_bbox(trimmed)? {
        return Ok(Geometry::Polygon(envelope));
    }
    Geometry::try_from_wkt_str(trimmed).map_err(|e| HarvestError::GeometryParse(e.to_string()))
}

fn parse_bbox(text: &str) -> Result<Option<Polygon<f64>>> {
    let Some(rest) = text
        .get(..4)
        .filter(|keyword| keyword.eq_ignore_ascii_case("BBOX"))
        .map(|_| text[4..].trim())
    else {
        return Ok(None);
    };

    let inner = rest
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .ok_or_else(|| HarvestError::GeometryParse(format!("malformed BBOX: {}", text)))?;
    let values = inner
        .split(',')
        .map(|value| value.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<f64>, _>>()
        .map_err(|e| HarvestError::GeometryParse(format!("malformed BBOX {}: {}", text, e)))?;

    let [west, east, north, south] = values[..] else {
        return Err(HarvestError::GeometryParse(format!(
            "BBOX needs 4 values, got {}: {}",
            values.len(),
            text
        )));
    };
    let exterior = LineString::from(vec![
        (west, north),
        (west, south),
        (east, south),
        (east, north),
        (west, north),
    ]);
    Ok(Some(Polygon::new(exterior, vec![])))
}
