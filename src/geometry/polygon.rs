use crate::error::{Error, Result};
use crate::geometry::{Geometry, LonLat};

use geo::{Coord, LineString, Polygon};

/// A closed polygon ring needs at least 3 vertices before closure.
pub const MIN_RING_POINTS: usize = 3;

/// Builds an area geometry from a ring structure. A sequence of rings is
/// one level more nested than expected and is retried with its first
/// ring. Rings below the minimum vertex count fail with `DegenerateRing`,
/// which callers treat as skip-and-continue. The count is over raw pairs,
/// duplicate vertices are not collapsed. Winding order and self
/// intersections are left as the query service returned them.
pub fn build_polygon(id: i64, ring: &Geometry) -> Result<Polygon<f64>> {
    match ring {
        Geometry::Ring(r) => polygon_from_points(id, r),
        Geometry::Rings(rr) => polygon_from_points(id, &rr[0]),
        Geometry::Point(_) => Err(Error::DegenerateRing {
            id: id,
            num_points: 1,
        }),
        Geometry::Parts(_) => Err(Error::MalformedGeometry {
            id: id,
            detail: String::from("multipolygon passed to polygon construction"),
        }),
    }
}

fn polygon_from_points(id: i64, points: &[LonLat]) -> Result<Polygon<f64>> {
    if points.len() < MIN_RING_POINTS {
        return Err(Error::DegenerateRing {
            id: id,
            num_points: points.len(),
        });
    }
    let exterior: LineString<f64> = points
        .iter()
        .map(|p| Coord { x: p.lon, y: p.lat })
        .collect();
    // Polygon::new closes an open exterior ring
    Ok(Polygon::new(exterior, Vec::new()))
}
