use crate::features::{AreaGeometry, FeatureRecord, RESERVED_COLUMNS};

use std::collections::HashSet;

/// Accumulates records and their geometries in insertion order across
/// all selector passes. Elements returned by more than one pass appear
/// more than once unless id deduplication is switched on.
pub struct FeatureTableAssembler {
    records: Vec<FeatureRecord>,
    geometries: Vec<AreaGeometry>,
    seen_ids: HashSet<i64>,
    dedup: bool,
}

impl FeatureTableAssembler {
    pub fn new(dedup: bool) -> FeatureTableAssembler {
        FeatureTableAssembler {
            records: Vec::new(),
            geometries: Vec::new(),
            seen_ids: HashSet::new(),
            dedup: dedup,
        }
    }

    /// Appends one row and its geometry. Returns false when dedup is on
    /// and the id was already added by an earlier pass.
    pub fn append(&mut self, record: FeatureRecord, geometry: AreaGeometry) -> bool {
        if self.dedup && !self.seen_ids.insert(record.id) {
            return false;
        }
        self.records.push(record);
        self.geometries.push(geometry);
        true
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Computes the tag column union (reserved columns first, then tag
    /// keys in first seen order) and freezes the table.
    pub fn finish(self) -> FeatureTable {
        let mut columns: Vec<String> = RESERVED_COLUMNS.iter().map(|c| String::from(*c)).collect();
        let mut seen: HashSet<String> = columns.iter().cloned().collect();
        for r in &self.records {
            for t in &r.tags {
                if seen.insert(t.key.clone()) {
                    columns.push(t.key.clone());
                }
            }
        }
        FeatureTable {
            columns: columns,
            records: self.records,
            geometries: self.geometries,
        }
    }
}

/// The finished attribute table and its parallel geometry collection,
/// paired 1:1 by position. Read only once handed to the writer.
pub struct FeatureTable {
    pub columns: Vec<String>,
    pub records: Vec<FeatureRecord>,
    pub geometries: Vec<AreaGeometry>,
}

impl FeatureTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::FeatureTableAssembler;
    use crate::elements::Tag;
    use crate::features::{AreaGeometry, FeatureRecord};

    fn record(id: i64, tags: &[(&str, &str)]) -> FeatureRecord {
        FeatureRecord {
            id: id,
            lat: 48.0,
            lon: 16.0,
            timestamp: String::from("2020-01-01T00:00:00Z"),
            tags: tags
                .iter()
                .map(|(k, v)| Tag::new(String::from(*k), String::from(*v)))
                .collect(),
        }
    }

    fn point() -> AreaGeometry {
        AreaGeometry::Point(geo::Point::new(16.0, 48.0))
    }

    #[test]
    fn test_column_union() {
        let mut asm = FeatureTableAssembler::new(false);
        asm.append(record(1, &[("power", "plant")]), point());
        asm.append(record(2, &[("power", "generator"), ("name", "x")]), point());
        asm.append(record(3, &[]), point());
        let table = asm.finish();
        assert_eq!(table.columns, vec!["id", "Lat", "Lon", "timestamp", "power", "name"]);
        assert_eq!(table.len(), 3);
        // rows and geometries stay paired
        assert_eq!(table.records.len(), table.geometries.len());
        // a row without a tag has no value in that column
        assert_eq!(table.records[2].tag("power"), None);
    }

    #[test]
    fn test_no_dedup_keeps_duplicates() {
        let mut asm = FeatureTableAssembler::new(false);
        assert!(asm.append(record(1, &[("power", "plant")]), point()));
        assert!(asm.append(record(1, &[("power", "generator")]), point()));
        assert_eq!(asm.len(), 2);
    }

    #[test]
    fn test_dedup_drops_repeated_ids() {
        let mut asm = FeatureTableAssembler::new(true);
        assert!(asm.append(record(1, &[("power", "plant")]), point()));
        assert!(!asm.append(record(1, &[("power", "generator")]), point()));
        assert!(asm.append(record(2, &[]), point()));
        let table = asm.finish();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].id, 1);
        assert_eq!(table.records[1].id, 2);
    }
}
