mod extract;
mod polygon;
mod position;
mod shape;

pub use self::extract::{extract_centroid, extract_ring};
pub use self::polygon::{build_polygon, MIN_RING_POINTS};
pub use self::position::LonLat;
pub use self::shape::Geometry;
