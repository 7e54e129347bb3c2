use crate::elements::RawElement;
use crate::error::{Error, Result};
use crate::geometry::{build_polygon, extract_ring};
use crate::output::write_polygon_shapefile;
use crate::overpass::{bbox_query, Bbox, OverpassClient, DEFAULT_URL};
use crate::utils::LogTimes;
use crate::{diagnostic, message};

use geo::Polygon;
use std::fs;
use std::path::Path;

pub const BBOX_QUERY_TIMEOUT: u64 = 1200;

/// The tag selector the bounding box variant queries for.
pub const BBOX_SELECTOR: (&str, &str) = ("plant:source", "solar");

/// WGS84 bounds of an existing layer, read from the shapefile header.
/// A projected source layer would feed metres into the query as degrees,
/// so anything but a geographic WGS84 `.prj` sidecar is refused. A layer
/// without the sidecar is taken to be WGS84 already.
pub fn layer_bounds(shape: &Path) -> Result<Bbox> {
    check_wgs84_crs(shape)?;
    let reader = shapefile::ShapeReader::from_path(shape)?;
    let bbox = &reader.header().bbox;
    Ok(Bbox::new(bbox.min.y, bbox.min.x, bbox.max.y, bbox.max.x))
}

fn check_wgs84_crs(shape: &Path) -> Result<()> {
    let prj = shape.with_extension("prj");
    if !prj.exists() {
        diagnostic!("{}: no prj sidecar, assuming wgs84", prj.display());
        return Ok(());
    }
    let wkt = fs::read_to_string(&prj)?;
    if wkt.trim_start().starts_with("GEOGCS") && wkt.contains("WGS") {
        Ok(())
    } else {
        Err(Error::UnsupportedCrs(prj))
    }
}

/// Builds a polygon from every returned element, applying the same
/// minimum vertex skip policy as the area fetch. Geometry only, no
/// attribute table.
pub fn collect_polygons(elements: &[RawElement]) -> Result<Vec<Polygon<f64>>> {
    let mut res = Vec::new();
    for e in elements {
        let ring = match extract_ring(e)? {
            Some(r) => r,
            None => {
                diagnostic!("element {}: point geometry, skipped", e.id);
                continue;
            }
        };
        match build_polygon(e.id, &ring) {
            Ok(p) => res.push(p),
            Err(Error::DegenerateRing { id, num_points }) => {
                diagnostic!("element {}: degenerate ring ({} points), skipped", id, num_points);
            }
            Err(err) => return Err(err),
        }
    }
    Ok(res)
}

/// Fetches solar park outlines within the bounding box of an existing
/// layer and writes them as `solarparks2.shp` beside the input.
pub fn run_fetch_bbox(shape: &str, timeout: u64) -> Result<()> {
    let mut tms = LogTimes::new();

    let shape_path = Path::new(shape);
    let bbox = layer_bounds(shape_path)?;
    message!("bbox: {:?}", bbox);
    tms.add("read source layer");

    let client = OverpassClient::new(DEFAULT_URL, timeout);
    let (key, val) = BBOX_SELECTOR;
    let elements = client.query(&bbox_query(&bbox, key, val, timeout))?;
    message!("number of elements: {}", elements.len());
    tms.add("fetch");

    let polygons = collect_polygons(&elements)?;
    message!("{} polygons", polygons.len());
    let out = shape_path.with_file_name("solarparks2.shp");
    write_polygon_shapefile(&polygons, &out)?;
    tms.add("write output");
    message!("{}", tms);
    Ok(())
}
