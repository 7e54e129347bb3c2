use crate::diagnostic;
use crate::error::{Error, Result};
use crate::features::FeatureTable;
use crate::message;

use shapefile::dbase::{FieldName, FieldValue, Record as DbfRecord, TableWriterBuilder};
use std::convert::TryFrom;
use std::fs;
use std::path::Path;

// the .prj sidecar every layer is tagged with (EPSG:4326)
pub const WGS84_WKT: &str = "GEOGCS[\"GCS_WGS_1984\",DATUM[\"D_WGS_1984\",\
SPHEROID[\"WGS_1984\",6378137.0,298.257223563]],PRIMEM[\"Greenwich\",0.0],\
UNIT[\"Degree\",0.0174532925199433]]";

const DBF_NAME_LIMIT: usize = 10;

/// Writes the finished table as `power.shp` (+ sidecars) and `power.csv`
/// into a fresh directory named after the run. Fails before writing
/// anything when the directory already exists.
pub fn write_layer(table: &FeatureTable, path: &Path, dataname: &str) -> Result<()> {
    let dir = path.join(dataname);
    if dir.exists() {
        return Err(Error::OutputDirectoryExists(dir));
    }
    fs::create_dir_all(&dir)?;

    write_point_shapefile(table, &dir.join("power.shp"))?;
    message!("saving csv");
    write_csv(table, &dir.join("power.csv"))?;
    message!("finished saving");
    Ok(())
}

/// Attribute names truncated to the dbf limit, uniquified with a counter
/// where truncation collides. Full names go to the csv only.
pub fn dbf_field_names(columns: &[String]) -> Vec<String> {
    let mut res: Vec<String> = Vec::with_capacity(columns.len());
    for c in columns {
        let mut name: String = c.chars().take(DBF_NAME_LIMIT).collect();
        let mut suffix = 1;
        while res.contains(&name) {
            let tail = format!("_{}", suffix);
            let base: String = c.chars().take(DBF_NAME_LIMIT - tail.len()).collect();
            name = format!("{}{}", base, tail);
            suffix += 1;
        }
        res.push(name);
    }
    res
}

fn field_name(name: &str) -> Result<FieldName> {
    FieldName::try_from(name).map_err(|_| Error::InvalidFieldName(String::from(name)))
}

/// One point per record, at the record's representative coordinate. The
/// shapefile format holds a single shape type per layer, so records whose
/// constructed geometry is a polygon are stored by their centroid here.
fn write_point_shapefile(table: &FeatureTable, filename: &Path) -> Result<()> {
    let collapsed = table.geometries.iter().filter(|g| g.is_polygon()).count();
    if collapsed > 0 {
        diagnostic!(
            "{} polygon geometries stored as centroid points in {}",
            collapsed,
            filename.display()
        );
    }

    let names = dbf_field_names(&table.columns);
    let mut builder = TableWriterBuilder::new();
    for (name, column) in names.iter().zip(table.columns.iter()) {
        builder = match column.as_str() {
            "id" => builder.add_numeric_field(field_name(name)?, 20, 0),
            "Lat" | "Lon" => builder.add_numeric_field(field_name(name)?, 20, 9),
            _ => builder.add_character_field(field_name(name)?, 128),
        };
    }

    let mut writer = shapefile::Writer::from_path(filename, builder)?;
    for r in &table.records {
        let shape = shapefile::Point::new(r.lon, r.lat);
        let mut rec = DbfRecord::default();
        for (name, column) in names.iter().zip(table.columns.iter()) {
            let value = match column.as_str() {
                "id" => FieldValue::Numeric(Some(r.id as f64)),
                "Lat" => FieldValue::Numeric(Some(r.lat)),
                "Lon" => FieldValue::Numeric(Some(r.lon)),
                "timestamp" => FieldValue::Character(Some(r.timestamp.clone())),
                _ => FieldValue::Character(r.tag(column).map(String::from)),
            };
            rec.insert(name.clone(), value);
        }
        writer.write_shape_and_record(&shape, &rec)?;
    }

    fs::write(filename.with_extension("prj"), WGS84_WKT)?;
    Ok(())
}

fn write_csv(table: &FeatureTable, filename: &Path) -> Result<()> {
    let mut w = csv::Writer::from_path(filename)?;
    w.write_record(&table.columns)?;
    for r in &table.records {
        let mut row: Vec<String> = Vec::with_capacity(table.columns.len());
        for c in &table.columns {
            row.push(match c.as_str() {
                "id" => r.id.to_string(),
                "Lat" => r.lat.to_string(),
                "Lon" => r.lon.to_string(),
                "timestamp" => r.timestamp.clone(),
                _ => String::from(r.tag(c).unwrap_or("")),
            });
        }
        w.write_record(&row)?;
    }
    w.flush()?;
    Ok(())
}

/// Geometry-only polygon layer for the bounding box variant.
pub fn write_polygon_shapefile(polygons: &[geo::Polygon<f64>], filename: &Path) -> Result<()> {
    let builder = TableWriterBuilder::new().add_numeric_field(field_name("id")?, 20, 0);
    let mut writer = shapefile::Writer::from_path(filename, builder)?;
    for (i, poly) in polygons.iter().enumerate() {
        let points: Vec<shapefile::Point> = poly
            .exterior()
            .coords()
            .map(|c| shapefile::Point::new(c.x, c.y))
            .collect();
        let shape = shapefile::Polygon::new(shapefile::PolygonRing::Outer(points));
        let mut rec = DbfRecord::default();
        rec.insert(String::from("id"), FieldValue::Numeric(Some(i as f64)));
        writer.write_shape_and_record(&shape, &rec)?;
    }
    fs::write(filename.with_extension("prj"), WGS84_WKT)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{dbf_field_names, write_layer, write_polygon_shapefile};
    use crate::elements::Tag;
    use crate::error::Error;
    use crate::features::{AreaGeometry, FeatureRecord, FeatureTableAssembler};
    use std::fs;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("osmpower_test_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn sample_table() -> crate::features::FeatureTable {
        let mut asm = FeatureTableAssembler::new(false);
        asm.append(
            FeatureRecord {
                id: 1,
                lat: 48.2,
                lon: 16.3,
                timestamp: String::from("2020-01-01T00:00:00Z"),
                tags: vec![Tag::new(String::from("power"), String::from("plant"))],
            },
            AreaGeometry::Point(geo::Point::new(16.3, 48.2)),
        );
        asm.append(
            FeatureRecord {
                id: 2,
                lat: 48.0,
                lon: 16.0,
                timestamp: String::new(),
                tags: vec![Tag::new(String::from("name"), String::from("x"))],
            },
            AreaGeometry::Point(geo::Point::new(16.0, 48.0)),
        );
        asm.finish()
    }

    #[test]
    fn test_dbf_field_names_truncate_and_uniquify() {
        let cols = vec![
            String::from("id"),
            String::from("generator:source"),
            String::from("generator:sort"),
        ];
        let names = dbf_field_names(&cols);
        assert_eq!(names[0], "id");
        assert_eq!(names[1], "generator:");
        assert_eq!(names[2], "generato_1");
        assert!(names[1].chars().count() <= 10);
    }

    #[test]
    fn test_dbf_field_names_stay_within_limit_past_nine_collisions() {
        let cols: Vec<String> = (0..12).map(|i| format!("generator:{}", i)).collect();
        let names = dbf_field_names(&cols);
        assert_eq!(names[0], "generator:");
        assert_eq!(names[9], "generato_9");
        assert_eq!(names[10], "generat_10");
        assert_eq!(names[11], "generat_11");
        for n in &names {
            assert!(n.chars().count() <= 10);
        }
        let unique: std::collections::HashSet<&String> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn test_write_layer() {
        let base = scratch_dir("write_layer");
        let table = sample_table();
        write_layer(&table, &base, "vienna").unwrap();
        let dir = base.join("vienna");
        assert!(dir.join("power.shp").exists());
        assert!(dir.join("power.dbf").exists());
        assert!(dir.join("power.prj").exists());
        assert!(dir.join("power.csv").exists());

        let mut rdr = csv::Reader::from_path(dir.join("power.csv")).unwrap();
        let header: Vec<String> = rdr.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(header, vec!["id", "Lat", "Lon", "timestamp", "power", "name"]);
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "1");
        assert_eq!(&rows[0][4], "plant");
        assert_eq!(&rows[0][5], "");
        assert_eq!(&rows[1][4], "");
        assert_eq!(&rows[1][5], "x");

        let shapes = shapefile::read_shapes(dir.join("power.shp")).unwrap();
        assert_eq!(shapes.len(), 2);
        match &shapes[0] {
            shapefile::Shape::Point(p) => {
                assert_eq!(p.x, 16.3);
                assert_eq!(p.y, 48.2);
            }
            _ => panic!("expected point"),
        }
    }

    #[test]
    fn test_existing_output_directory_fails() {
        let base = scratch_dir("dir_exists");
        let table = sample_table();
        write_layer(&table, &base, "vienna").unwrap();
        match write_layer(&table, &base, "vienna") {
            Err(Error::OutputDirectoryExists(_)) => {}
            _ => panic!("expected OutputDirectoryExists"),
        }
    }

    #[test]
    fn test_write_polygon_shapefile() {
        let base = scratch_dir("polygons");
        let poly = geo::Polygon::new(
            geo::LineString::from(vec![(16.0, 48.0), (16.2, 48.0), (16.2, 48.2)]),
            Vec::new(),
        );
        let out = base.join("solarparks2.shp");
        write_polygon_shapefile(&[poly], &out).unwrap();
        let shapes = shapefile::read_shapes(&out).unwrap();
        assert_eq!(shapes.len(), 1);
        assert!(matches!(shapes[0], shapefile::Shape::Polygon(_)));
    }
}
