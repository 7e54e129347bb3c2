use crate::elements::{RawElement, Tag};
use crate::geometry::LonLat;

/// The fixed attribute columns every record carries; tag keys may not
/// shadow them.
pub const RESERVED_COLUMNS: [&str; 4] = ["id", "Lat", "Lon", "timestamp"];

/// One row of the output attribute table.
#[derive(Debug, Clone)]
pub struct FeatureRecord {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    pub timestamp: String,
    pub tags: Vec<Tag>,
}

impl FeatureRecord {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.val.as_str())
    }
}

/// The spatial geometry stored alongside a record: a node's point, or
/// the constructed polygon of a way/relation.
#[derive(Debug, Clone)]
pub enum AreaGeometry {
    Point(geo::Point<f64>),
    Polygon(geo::Polygon<f64>),
}

impl AreaGeometry {
    pub fn is_polygon(&self) -> bool {
        match self {
            AreaGeometry::Point(_) => false,
            AreaGeometry::Polygon(_) => true,
        }
    }
}

/// Merges an element's identity, centroid, timestamp and tags into one
/// flat record. A tag key colliding with a reserved column is namespaced
/// with a `tag_` prefix.
pub fn build_record(element: &RawElement, centroid: &LonLat) -> FeatureRecord {
    let mut tags = Vec::with_capacity(element.tags.len());
    for t in &element.tags {
        if RESERVED_COLUMNS.contains(&t.key.as_str()) {
            tags.push(Tag::new(format!("tag_{}", t.key), t.val.clone()));
        } else {
            tags.push(t.clone());
        }
    }
    FeatureRecord {
        id: element.id,
        lat: centroid.lat,
        lon: centroid.lon,
        timestamp: element.timestamp.clone(),
        tags: tags,
    }
}

#[cfg(test)]
mod tests {
    use super::build_record;
    use crate::elements::RawElement;
    use crate::geometry::extract_centroid;
    use serde_json::json;

    #[test]
    fn test_build_record() {
        let e = RawElement::from_json(&json!({
            "id": 21, "type": "node", "lat": 48.2, "lon": 16.3,
            "timestamp": "2020-01-01T00:00:00Z",
            "tags": {"power": "plant", "name": "Kraftwerk"}
        }))
        .unwrap();
        let c = extract_centroid(&e).unwrap();
        let r = build_record(&e, &c);
        assert_eq!(r.id, 21);
        assert_eq!(r.lat, 48.2);
        assert_eq!(r.lon, 16.3);
        assert_eq!(r.timestamp, "2020-01-01T00:00:00Z");
        assert_eq!(r.tag("power"), Some("plant"));
        assert_eq!(r.tag("name"), Some("Kraftwerk"));
    }

    #[test]
    fn test_reserved_tag_keys_are_namespaced() {
        let e = RawElement::from_json(&json!({
            "id": 22, "type": "node", "lat": 48.2, "lon": 16.3,
            "tags": {"id": "abc", "timestamp": "xyz", "power": "generator"}
        }))
        .unwrap();
        let c = extract_centroid(&e).unwrap();
        let r = build_record(&e, &c);
        assert_eq!(r.tag("tag_id"), Some("abc"));
        assert_eq!(r.tag("tag_timestamp"), Some("xyz"));
        assert_eq!(r.tag("id"), None);
        assert_eq!(r.tag("power"), Some("generator"));
    }
}
