use crate::elements::{ElementType, RawElement};
use crate::error::{Error, Result};
use crate::geometry::{Geometry, LonLat};

/// The representative coordinate of an element: a node's own position,
/// otherwise the unweighted arithmetic mean of the element's ring points
/// (all first rings combined, for a relation).
pub fn extract_centroid(element: &RawElement) -> Result<LonLat> {
    let centroid = match (&element.element_type, &element.geometry) {
        (_, Geometry::Point(p)) => p.clone(),
        (ElementType::Node, _) => {
            return Err(Error::MalformedGeometry {
                id: element.id,
                detail: String::from("node with a non point geometry"),
            })
        }
        _ => mean_point(element.id, &combined_points(element)?)?,
    };
    if !centroid.is_valid() {
        return Err(Error::MalformedGeometry {
            id: element.id,
            detail: format!("centroid out of range: {:?}", centroid),
        });
    }
    Ok(centroid)
}

/// The ring structure polygon construction works from: a way's own
/// coordinate sequence, or the first polygon part of a relation. `None`
/// for geometries that are already a single point.
pub fn extract_ring(element: &RawElement) -> Result<Option<Geometry>> {
    match (&element.element_type, &element.geometry) {
        (_, Geometry::Point(_)) => Ok(None),
        (ElementType::Node, _) => Err(Error::MalformedGeometry {
            id: element.id,
            detail: String::from("node with a non point geometry"),
        }),
        (ElementType::Way, Geometry::Ring(r)) => Ok(Some(Geometry::Ring(r.clone()))),
        (ElementType::Way, Geometry::Rings(rr)) => Ok(Some(Geometry::Rings(rr.clone()))),
        (ElementType::Way, Geometry::Parts(_)) => Err(Error::MalformedGeometry {
            id: element.id,
            detail: String::from("way geometry nested as a multipolygon"),
        }),
        (ElementType::Relation, Geometry::Ring(r)) => Ok(Some(Geometry::Ring(r.clone()))),
        (ElementType::Relation, Geometry::Rings(rr)) => Ok(Some(Geometry::Rings(rr.clone()))),
        (ElementType::Relation, Geometry::Parts(parts)) => {
            Ok(Some(Geometry::Rings(parts[0].clone())))
        }
    }
}

/// The point sequence the centroid is averaged over. Inner rings and
/// multipolygon topology are discarded: only the first ring of each
/// polygon part contributes.
fn combined_points(element: &RawElement) -> Result<Vec<LonLat>> {
    match (&element.element_type, &element.geometry) {
        (_, Geometry::Point(p)) => Ok(vec![p.clone()]),
        (_, Geometry::Ring(r)) => Ok(r.clone()),
        (ElementType::Way, Geometry::Rings(rr)) => Ok(rr[0].clone()),
        (ElementType::Way, Geometry::Parts(_)) => Err(Error::MalformedGeometry {
            id: element.id,
            detail: String::from("way geometry nested as a multipolygon"),
        }),
        (ElementType::Relation, Geometry::Rings(rr)) => Ok(rr[0].clone()),
        (ElementType::Relation, Geometry::Parts(parts)) => {
            let mut points = Vec::new();
            for p in parts {
                points.extend(p[0].iter().cloned());
            }
            Ok(points)
        }
        (ElementType::Node, _) => Err(Error::MalformedGeometry {
            id: element.id,
            detail: String::from("node with a non point geometry"),
        }),
    }
}

fn mean_point(id: i64, points: &[LonLat]) -> Result<LonLat> {
    if points.is_empty() {
        return Err(Error::MalformedGeometry {
            id: id,
            detail: String::from("empty ring"),
        });
    }
    let mut lon = 0.0;
    let mut lat = 0.0;
    for p in points {
        lon += p.lon;
        lat += p.lat;
    }
    Ok(LonLat::new(
        lon / (points.len() as f64),
        lat / (points.len() as f64),
    ))
}
