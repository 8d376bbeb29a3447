use super::{district_source::DistrictRows, DatasetError};
use crate::model::{district::FieldMapping, Crs};
use geo::MultiPolygon;
use shapefile::{dbase::FieldValue, Shape};
use std::path::Path;

/// reads polygons and attributes from a shapefile, along with the CRS
/// declared by its `.prj` sidecar, if any.
pub fn read_shapefile(
    filepath: &str,
    mapping: &FieldMapping,
) -> Result<(DistrictRows, Option<Crs>), DatasetError> {
    let rows = shapefile::read(filepath).map_err(|e| DatasetError::ReadError {
        filepath: filepath.to_string(),
        error: e.to_string(),
    })?;

    let mut processed = Vec::with_capacity(rows.len());
    for (idx, (shape, record)) in rows.into_iter().enumerate() {
        let geometry = shape_to_multipolygon(shape).map_err(|message| DatasetError::GeometryError {
            filepath: filepath.to_string(),
            row: idx,
            message,
        })?;
        let district = mapping.record(|name| record.get(name).and_then(field_value_string));
        processed.push((geometry, district));
    }
    let crs = read_prj(filepath)?;
    Ok((processed, crs))
}

fn shape_to_multipolygon(shape: Shape) -> Result<MultiPolygon<f64>, String> {
    match shape {
        Shape::Polygon(polygon) => polygon
            .try_into()
            .map_err(|e| format!("failed to convert polygon: {e}")),
        Shape::PolygonM(polygon) => polygon
            .try_into()
            .map_err(|e| format!("failed to convert polygon: {e}")),
        Shape::PolygonZ(polygon) => polygon
            .try_into()
            .map_err(|e| format!("failed to convert polygon: {e}")),
        other => Err(format!(
            "unexpected shape type {}, must be polygonal",
            other.shapetype()
        )),
    }
}

/// dBase values as text. numbers keep their shortest representation and
/// dates are written as YYYY-MM-DD.
fn field_value_string(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Character(s) => s.clone(),
        FieldValue::Memo(s) => Some(s.clone()),
        FieldValue::Numeric(n) => n.map(|n| n.to_string()),
        FieldValue::Float(f) => f.map(|f| f.to_string()),
        FieldValue::Double(d) => Some(d.to_string()),
        FieldValue::Integer(i) => Some(i.to_string()),
        FieldValue::Currency(c) => Some(c.to_string()),
        FieldValue::Logical(b) => b.map(|b| b.to_string()),
        FieldValue::Date(d) => {
            d.map(|d| format!("{:04}-{:02}-{:02}", d.year(), d.month(), d.day()))
        }
        _ => None,
    }
}

/// the CRS named by the `.prj` sidecar. a missing sidecar declares nothing,
/// one naming an unsupported CRS is an error.
fn read_prj(filepath: &str) -> Result<Option<Crs>, DatasetError> {
    let prj = Path::new(filepath).with_extension("prj");
    let Ok(wkt) = std::fs::read_to_string(&prj) else {
        return Ok(None);
    };
    match Crs::from_prj(&wkt) {
        Some(crs) => Ok(Some(crs)),
        None => Err(DatasetError::UnsupportedCrs {
            filepath: prj.to_string_lossy().to_string(),
            declared: wkt.trim().to_string(),
        }),
    }
}
