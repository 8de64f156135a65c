//! Spatial extent handling: rectangles, GML coordinate lists, union and WKT.

pub mod encoding;
pub mod ring;

use geo::Coord;

pub use encoding::{read_wkt, union_polygons, DEFAULT_WKT};
pub use ring::{
    bounding_box_to_polygon, parse_flat_coordinate_ring, parse_legacy_coordinate_ring,
    single_coordinate_to_square, GIS_EPSILON,
};

/// Order of the two values of a GML position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrder {
    LonLat,
    LatLon,
}

impl AxisOrder {
    pub fn to_coord(self, first: f64, second: f64) -> Coord<f64> {
        match self {
            AxisOrder::LonLat => Coord { x: first, y: second },
            AxisOrder::LatLon => Coord { x: second, y: first },
        }
    }
}
