use crate::error::{Error, Result};

use serde::Deserialize;
use std::io::Read;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

// areas derived from ways and relations carry these offsets in the
// query service's id space
const WAY_AREA_OFFSET: i64 = 2400000000;
const RELATION_AREA_OFFSET: i64 = 3600000000;

#[derive(Debug, Deserialize)]
struct Place {
    osm_type: String,
    osm_id: i64,
    display_name: String,
}

/// Resolves an area name to a query service area id via the geocoder,
/// taking the first result that can act as an area. Node results cannot.
pub fn resolve_area(agent: &ureq::Agent, area: &str) -> Result<(i64, String)> {
    let response = agent
        .get(NOMINATIM_URL)
        .query("format", "json")
        .query("q", area)
        .call()?;
    let mut body = String::new();
    response.into_reader().read_to_string(&mut body)?;
    let places: Vec<Place> = serde_json::from_str(&body)?;
    for p in places {
        match p.osm_type.as_str() {
            "way" => return Ok((WAY_AREA_OFFSET + p.osm_id, p.display_name)),
            "relation" => return Ok((RELATION_AREA_OFFSET + p.osm_id, p.display_name)),
            _ => {}
        }
    }
    Err(Error::AreaNotFound(String::from(area)))
}
