/// Bounding box in WGS84, in the query service's [south, west, north,
/// east] order.
#[derive(Debug, Clone, PartialEq)]
pub struct Bbox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl Bbox {
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Bbox {
        Bbox {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }
}

/// One tag equality selector over nodes, ways and relations within a
/// named area, with geometry and metadata in the output.
pub fn area_query(area_id: i64, key: &str, val: &str, timeout: u64) -> String {
    let mut q = format!(
        "[out:json][timeout:{}];area({})->.searchArea;(",
        timeout, area_id
    );
    for ty in &["node", "way", "relation"] {
        q.push_str(&format!(
            "{}[\"{}\"=\"{}\"](area.searchArea);",
            ty, key, val
        ));
    }
    q.push_str(");out center meta geom;");
    q
}

/// One tag equality selector over ways within a bounding box, geometry
/// only.
pub fn bbox_query(bbox: &Bbox, key: &str, val: &str, timeout: u64) -> String {
    format!(
        "[out:json][timeout:{}];(way[\"{}\"=\"{}\"]({},{},{},{}););out body geom;",
        timeout, key, val, bbox.min_lat, bbox.min_lon, bbox.max_lat, bbox.max_lon
    )
}
