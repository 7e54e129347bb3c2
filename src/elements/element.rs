use crate::diagnostic;
use crate::elements::Tag;
use crate::error::{Error, Result};
use crate::geometry::{Geometry, LonLat};
use crate::utils::parse_timestamp;

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Node,
    Way,
    Relation,
}

impl ElementType {
    pub fn from_str(id: i64, s: &str) -> Result<ElementType> {
        match s {
            "node" => Ok(ElementType::Node),
            "way" => Ok(ElementType::Way),
            "relation" => Ok(ElementType::Relation),
            _ => Err(Error::UnsupportedElementType {
                id: id,
                element_type: String::from(s),
            }),
        }
    }
}

/// One feature as returned by the query service, decoded but otherwise
/// untouched: the geometry keeps whatever nesting shape the service sent.
#[derive(Debug, Clone)]
pub struct RawElement {
    pub id: i64,
    pub element_type: ElementType,
    pub timestamp: String,
    pub tags: Vec<Tag>,
    pub geometry: Geometry,
}

impl RawElement {
    pub fn from_json(obj: &Value) -> Result<RawElement> {
        let id = match obj.get("id").and_then(Value::as_i64) {
            Some(i) => i,
            None => {
                return Err(Error::BadResponse(String::from(
                    "element without an id member",
                )))
            }
        };

        let element_type = match obj.get("type").and_then(Value::as_str) {
            Some(s) => ElementType::from_str(id, s)?,
            None => {
                return Err(Error::BadResponse(format!(
                    "element {} without a type member",
                    id
                )))
            }
        };

        let timestamp = match obj.get("timestamp").and_then(Value::as_str) {
            Some(ts) => {
                if parse_timestamp(ts).is_err() {
                    diagnostic!("element {}: unparseable timestamp {:?}", id, ts);
                }
                String::from(ts)
            }
            None => String::new(),
        };

        let mut tags = Vec::new();
        if let Some(tgs) = obj.get("tags").and_then(Value::as_object) {
            for (k, v) in tgs {
                if let Some(s) = v.as_str() {
                    tags.push(Tag::new(k.clone(), String::from(s)));
                }
            }
        }

        let geometry = match obj.get("geometry") {
            Some(g) => {
                // OSMPythonTools style responses wrap the coordinates in a
                // geojson object, plain overpass responses do not
                let coords = if g.is_object() {
                    match g.get("coordinates") {
                        Some(c) => c,
                        None => {
                            return Err(Error::MalformedGeometry {
                                id: id,
                                detail: String::from("geometry object without coordinates"),
                            })
                        }
                    }
                } else {
                    g
                };
                Geometry::from_coordinates(id, coords)?
            }
            None => {
                // bare nodes carry top level lat/lon members instead
                match (
                    obj.get("lon").and_then(Value::as_f64),
                    obj.get("lat").and_then(Value::as_f64),
                ) {
                    (Some(lon), Some(lat)) => Geometry::Point(LonLat::new(lon, lat)),
                    _ => {
                        return Err(Error::MalformedGeometry {
                            id: id,
                            detail: String::from("element without geometry"),
                        })
                    }
                }
            }
        };

        Ok(RawElement {
            id,
            element_type,
            timestamp,
            tags,
            geometry,
        })
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.val.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{ElementType, RawElement};
    use crate::error::Error;
    use crate::geometry::{Geometry, LonLat};
    use serde_json::json;

    #[test]
    fn test_node_from_json() {
        let e = RawElement::from_json(&json!({
            "id": 101, "type": "node", "lat": 48.2, "lon": 16.3,
            "timestamp": "2020-01-01T00:00:00Z",
            "tags": {"power": "plant"}
        }))
        .unwrap();
        assert_eq!(e.id, 101);
        assert_eq!(e.element_type, ElementType::Node);
        assert_eq!(e.timestamp, "2020-01-01T00:00:00Z");
        assert_eq!(e.tag("power"), Some("plant"));
        assert_eq!(e.geometry, Geometry::Point(LonLat::new(16.3, 48.2)));
    }

    #[test]
    fn test_way_from_json_geojson_style() {
        let e = RawElement::from_json(&json!({
            "id": 102, "type": "way",
            "geometry": {"type": "Polygon",
                         "coordinates": [[[16.0, 48.0], [16.2, 48.0], [16.2, 48.2]]]}
        }))
        .unwrap();
        assert_eq!(
            e.geometry,
            Geometry::Rings(vec![vec![
                LonLat::new(16.0, 48.0),
                LonLat::new(16.2, 48.0),
                LonLat::new(16.2, 48.2)
            ]])
        );
    }

    #[test]
    fn test_way_from_json_overpass_style() {
        let e = RawElement::from_json(&json!({
            "id": 103, "type": "way",
            "geometry": [{"lat": 48.0, "lon": 16.0}, {"lat": 48.2, "lon": 16.2}]
        }))
        .unwrap();
        assert_eq!(
            e.geometry,
            Geometry::Ring(vec![LonLat::new(16.0, 48.0), LonLat::new(16.2, 48.2)])
        );
    }

    #[test]
    fn test_unsupported_element_type() {
        let r = RawElement::from_json(&json!({
            "id": 104, "type": "area", "lat": 0.0, "lon": 0.0
        }));
        match r {
            Err(Error::UnsupportedElementType { id, element_type }) => {
                assert_eq!(id, 104);
                assert_eq!(element_type, "area");
            }
            _ => panic!("expected UnsupportedElementType"),
        }
    }

    #[test]
    fn test_missing_geometry() {
        let r = RawElement::from_json(&json!({"id": 105, "type": "node"}));
        assert!(matches!(r, Err(Error::MalformedGeometry { id: 105, .. })));
    }
}
