use super::{district_source::DistrictRows, DatasetError};
use crate::model::district::FieldMapping;
use geo::{Geometry, MultiPolygon};
use std::{collections::HashMap, path::Path};
use wkt::TryFromWkt;

/// reads districts from a CSV file containing a WKT geometry column. every
/// other column is available to the field mapping by its header name.
pub fn read_csv(
    filepath: &str,
    geometry_column: &str,
    mapping: &FieldMapping,
) -> Result<DistrictRows, DatasetError> {
    let read_error = |e: csv::Error| DatasetError::ReadError {
        filepath: filepath.to_string(),
        error: e.to_string(),
    };
    let mut reader = csv::Reader::from_path(Path::new(filepath)).map_err(read_error)?;
    let header_record = reader.headers().map_err(read_error)?.clone();
    let headers = header_record
        .iter()
        .enumerate()
        .map(|(i, s)| (s.trim().to_string(), i))
        .collect::<HashMap<_, _>>();
    let geometry_idx = *headers
        .get(geometry_column)
        .ok_or_else(|| DatasetError::MissingColumn {
            filepath: filepath.to_string(),
            column: geometry_column.to_string(),
        })?;

    reader
        .records()
        .enumerate()
        .map(|(idx, row)| {
            let row = row.map_err(read_error)?;
            let geometry_error = |message: String| DatasetError::GeometryError {
                filepath: filepath.to_string(),
                row: idx,
                message,
            };
            let geometry_str = row
                .get(geometry_idx)
                .ok_or_else(|| geometry_error(String::from("missing geometry value")))?;
            let geometry: Geometry<f64> = Geometry::try_from_wkt_str(geometry_str)
                .map_err(|e| geometry_error(e.to_string()))?;
            let polygonal = into_multipolygon(geometry).map_err(geometry_error)?;
            let record = mapping.record(|name| {
                headers
                    .get(name)
                    .and_then(|i| row.get(*i))
                    .map(String::from)
            });
            Ok((polygonal, record))
        })
        .collect::<Result<Vec<_>, DatasetError>>()
}

/// accepts POLYGON and MULTIPOLYGON geometries only.
pub(super) fn into_multipolygon(geometry: Geometry<f64>) -> Result<MultiPolygon<f64>, String> {
    match geometry {
        Geometry::Polygon(p) => Ok(MultiPolygon::new(vec![p])),
        Geometry::MultiPolygon(mp) => Ok(mp),
        Geometry::Point(_) => Err(String::from("unexpected Point geometry type")),
        Geometry::Line(_) => Err(String::from("unexpected Line geometry type")),
        Geometry::LineString(_) => Err(String::from("unexpected LineString geometry type")),
        Geometry::MultiPoint(_) => Err(String::from("unexpected MultiPoint geometry type")),
        Geometry::MultiLineString(_) => {
            Err(String::from("unexpected MultiLineString geometry type"))
        }
        Geometry::GeometryCollection(_) => {
            Err(String::from("unexpected GeometryCollection geometry type"))
        }
        Geometry::Rect(r) => Ok(MultiPolygon::new(vec![r.to_polygon()])),
        Geometry::Triangle(t) => Ok(MultiPolygon::new(vec![t.to_polygon()])),
    }
}
