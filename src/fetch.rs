use crate::elements::RawElement;
use crate::error::{Error, Result};
use crate::features::{build_record, AreaGeometry, FeatureTableAssembler};
use crate::geometry::{build_polygon, extract_centroid, extract_ring};
use crate::logging::messenger;
use crate::output::write_layer;
use crate::overpass::{area_query, resolve_area, OverpassClient, DEFAULT_URL};
use crate::utils::LogTimes;
use crate::{diagnostic, message};

use std::path::Path;

pub const AREA_QUERY_TIMEOUT: u64 = 60;

/// The (key, values) selector passes one run fetches.
pub const SELECTORS: [(&str, &[&str]); 1] = [("power", &["plant", "generator"])];

/// Folds one batch of raw elements into the assembler. Site relations
/// are filtered out, degenerate rings are skipped with a diagnostic,
/// anything else malformed aborts the run.
pub fn process_elements(
    elements: &[RawElement],
    assembler: &mut FeatureTableAssembler,
) -> Result<()> {
    let progress = messenger().start_progress_percent("processing elements");
    for (i, e) in elements.iter().enumerate() {
        progress.progress_percent(100.0 * (i as f64) / (elements.len() as f64));

        // site relations group other elements and would double count
        if e.tag("type") == Some("site") {
            diagnostic!("element {}: site relation, skipped", e.id);
            continue;
        }

        let centroid = extract_centroid(e)?;
        let geometry = match extract_ring(e)? {
            None => AreaGeometry::Point(geo::Point::new(centroid.lon, centroid.lat)),
            Some(ring) => match build_polygon(e.id, &ring) {
                Ok(p) => AreaGeometry::Polygon(p),
                Err(Error::DegenerateRing { id, num_points }) => {
                    diagnostic!("element {}: degenerate ring ({} points), skipped", id, num_points);
                    continue;
                }
                Err(err) => return Err(err),
            },
        };

        let record = build_record(e, &centroid);
        if !assembler.append(record, geometry) {
            diagnostic!("element {}: duplicate id, skipped", e.id);
        }
    }
    progress.finish();
    Ok(())
}

/// Fetches all selector passes for a named area and writes the combined
/// feature table and geometry layer.
pub fn run_fetch(area: &str, path: &str, dedup: bool, timeout: u64) -> Result<()> {
    let mut tms = LogTimes::new();

    let client = OverpassClient::new(DEFAULT_URL, timeout);
    let (area_id, display_name) = resolve_area(client.agent(), area)?;
    message!("area: {} [{}], id: {}", area, display_name, area_id);
    tms.add("resolve area");

    let mut assembler = FeatureTableAssembler::new(dedup);
    for (key, values) in SELECTORS.iter() {
        for val in values.iter() {
            message!("fetching {} = {}", key, val);
            let elements = client.query(&area_query(area_id, key, val, timeout))?;
            message!("number of elements: {}", elements.len());
            process_elements(&elements, &mut assembler)?;
            tms.add(&format!("fetch {}={}", key, val));
        }
    }

    let table = assembler.finish();
    message!("{} features, {} columns", table.len(), table.columns.len());
    write_layer(&table, Path::new(path), area)?;
    tms.add("write output");
    message!("{}", tms);
    Ok(())
}
