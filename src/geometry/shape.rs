use crate::error::{Error, Result};
use crate::geometry::LonLat;

use serde_json::Value;

/// The nested coordinate structure of a raw element, tagged by nesting
/// depth: a single position, one ring of positions, a sequence of rings
/// (one polygon), or a sequence of polygon parts (multipolygon).
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(LonLat),
    Ring(Vec<LonLat>),
    Rings(Vec<Vec<LonLat>>),
    Parts(Vec<Vec<Vec<LonLat>>>),
}

fn as_lonlat(v: &Value) -> Option<LonLat> {
    if let Some(arr) = v.as_array() {
        if arr.len() == 2 {
            if let (Some(lon), Some(lat)) = (arr[0].as_f64(), arr[1].as_f64()) {
                return Some(LonLat::new(lon, lat));
            }
        }
        return None;
    }
    if let Some(obj) = v.as_object() {
        if let (Some(lon), Some(lat)) = (
            obj.get("lon").and_then(Value::as_f64),
            obj.get("lat").and_then(Value::as_f64),
        ) {
            return Some(LonLat::new(lon, lat));
        }
    }
    None
}

fn malformed(id: i64, detail: &str) -> Error {
    Error::MalformedGeometry {
        id: id,
        detail: String::from(detail),
    }
}

impl Geometry {
    /// Classifies a nested coordinate structure by inspecting its shape
    /// explicitly. Anything deeper than a multipolygon, or with mixed
    /// nesting, is rejected rather than misread.
    pub fn from_coordinates(id: i64, v: &Value) -> Result<Geometry> {
        if let Some(p) = as_lonlat(v) {
            return Ok(Geometry::Point(p));
        }
        let arr = match v.as_array() {
            Some(a) => a,
            None => return Err(malformed(id, "coordinates not a sequence")),
        };
        if arr.is_empty() {
            return Err(malformed(id, "empty coordinate sequence"));
        }

        match Geometry::from_coordinates(id, &arr[0])? {
            Geometry::Point(_) => {
                let mut ring = Vec::with_capacity(arr.len());
                for p in arr {
                    match as_lonlat(p) {
                        Some(q) => ring.push(q),
                        None => return Err(malformed(id, "mixed nesting in ring")),
                    }
                }
                Ok(Geometry::Ring(ring))
            }
            Geometry::Ring(_) => {
                let mut rings = Vec::with_capacity(arr.len());
                for r in arr {
                    match Geometry::from_coordinates(id, r)? {
                        Geometry::Ring(rr) => rings.push(rr),
                        _ => return Err(malformed(id, "mixed nesting in polygon")),
                    }
                }
                Ok(Geometry::Rings(rings))
            }
            Geometry::Rings(_) => {
                let mut parts = Vec::with_capacity(arr.len());
                for p in arr {
                    match Geometry::from_coordinates(id, p)? {
                        Geometry::Rings(rr) => parts.push(rr),
                        _ => return Err(malformed(id, "mixed nesting in multipolygon")),
                    }
                }
                Ok(Geometry::Parts(parts))
            }
            Geometry::Parts(_) => Err(malformed(id, "coordinates nested too deeply")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Geometry;
    use crate::error::Error;
    use crate::geometry::LonLat;
    use serde_json::json;

    #[test]
    fn test_single_pair() {
        let g = Geometry::from_coordinates(1, &json!([16.3, 48.2])).unwrap();
        assert_eq!(g, Geometry::Point(LonLat::new(16.3, 48.2)));
    }

    #[test]
    fn test_ring() {
        let g = Geometry::from_coordinates(1, &json!([[16.0, 48.0], [16.2, 48.2]])).unwrap();
        assert_eq!(
            g,
            Geometry::Ring(vec![LonLat::new(16.0, 48.0), LonLat::new(16.2, 48.2)])
        );
    }

    #[test]
    fn test_rings() {
        let g = Geometry::from_coordinates(1, &json!([[[16.0, 48.0], [16.2, 48.2]]])).unwrap();
        assert_eq!(
            g,
            Geometry::Rings(vec![vec![
                LonLat::new(16.0, 48.0),
                LonLat::new(16.2, 48.2)
            ]])
        );
    }

    #[test]
    fn test_parts() {
        let g =
            Geometry::from_coordinates(1, &json!([[[[16.0, 48.0], [16.2, 48.2]]]])).unwrap();
        assert_eq!(
            g,
            Geometry::Parts(vec![vec![vec![
                LonLat::new(16.0, 48.0),
                LonLat::new(16.2, 48.2)
            ]]])
        );
    }

    #[test]
    fn test_object_positions() {
        let g = Geometry::from_coordinates(
            1,
            &json!([{"lat": 48.0, "lon": 16.0}, {"lat": 48.2, "lon": 16.2}]),
        )
        .unwrap();
        assert_eq!(
            g,
            Geometry::Ring(vec![LonLat::new(16.0, 48.0), LonLat::new(16.2, 48.2)])
        );
    }

    #[test]
    fn test_too_deep_is_malformed() {
        let r = Geometry::from_coordinates(7, &json!([[[[[16.0, 48.0]]]]]));
        assert!(matches!(r, Err(Error::MalformedGeometry { id: 7, .. })));
    }

    #[test]
    fn test_mixed_nesting_is_malformed() {
        let r = Geometry::from_coordinates(8, &json!([[16.0, 48.0], [[16.2, 48.2]]]));
        assert!(matches!(r, Err(Error::MalformedGeometry { id: 8, .. })));
    }

    #[test]
    fn test_empty_is_malformed() {
        let r = Geometry::from_coordinates(9, &json!([]));
        assert!(matches!(r, Err(Error::MalformedGeometry { id: 9, .. })));
    }
}
