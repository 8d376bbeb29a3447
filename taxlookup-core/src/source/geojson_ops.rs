use super::{csv_ops::into_multipolygon, district_source::DistrictRows, DatasetError};
use crate::model::{district::FieldMapping, Crs};
use geojson::{FeatureCollection, GeoJson};
use serde_json::Value;

/// reads districts from a GeoJSON file.
pub fn read_geojson(
    filepath: &str,
    mapping: &FieldMapping,
) -> Result<(DistrictRows, Option<Crs>), DatasetError> {
    let text = std::fs::read_to_string(filepath).map_err(|e| DatasetError::ReadError {
        filepath: filepath.to_string(),
        error: e.to_string(),
    })?;
    parse_geojson(&text, filepath, mapping)
}

/// parses a FeatureCollection (or a single Feature). features without a
/// geometry are skipped. the CRS is WGS84 unless a legacy `crs` member
/// names another one.
pub fn parse_geojson(
    text: &str,
    filepath: &str,
    mapping: &FieldMapping,
) -> Result<(DistrictRows, Option<Crs>), DatasetError> {
    let geojson = text.parse::<GeoJson>().map_err(|e| DatasetError::ReadError {
        filepath: filepath.to_string(),
        error: e.to_string(),
    })?;
    let collection = match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        GeoJson::Feature(feature) => FeatureCollection {
            bbox: None,
            features: vec![feature],
            foreign_members: None,
        },
        GeoJson::Geometry(_) => {
            return Err(DatasetError::ReadError {
                filepath: filepath.to_string(),
                error: String::from("expected a Feature or FeatureCollection, found a bare Geometry"),
            })
        }
    };
    let crs = declared_crs(&collection, filepath)?;

    let mut rows = Vec::with_capacity(collection.features.len());
    for (idx, feature) in collection.features.into_iter().enumerate() {
        let Some(geometry) = feature.geometry else {
            log::warn!("skipping feature {idx} of '{filepath}' with no geometry");
            continue;
        };
        let geometry_error = |message: String| DatasetError::GeometryError {
            filepath: filepath.to_string(),
            row: idx,
            message,
        };
        let geometry = geo::Geometry::<f64>::try_from(geometry)
            .map_err(|e| geometry_error(e.to_string()))?;
        let polygonal = into_multipolygon(geometry).map_err(geometry_error)?;
        let properties = feature.properties.unwrap_or_default();
        let record = mapping.record(|name| properties.get(name).and_then(json_value_string));
        rows.push((polygonal, record));
    }
    Ok((rows, crs))
}

/// pre-RFC 7946 files may carry `"crs": {"properties": {"name": ...}}`.
/// without one, coordinates are WGS84. a declared CRS other than WGS84 or
/// Web Mercator is an error.
fn declared_crs(
    collection: &FeatureCollection,
    filepath: &str,
) -> Result<Option<Crs>, DatasetError> {
    let member = collection
        .foreign_members
        .as_ref()
        .and_then(|members| members.get("crs"))
        .filter(|crs| !crs.is_null());
    let Some(member) = member else {
        return Ok(Some(Crs::Wgs84));
    };
    let unsupported = |declared: String| DatasetError::UnsupportedCrs {
        filepath: filepath.to_string(),
        declared,
    };
    let name = member
        .pointer("/properties/name")
        .and_then(Value::as_str)
        .ok_or_else(|| unsupported(member.to_string()))?;
    // e.g. "urn:ogc:def:crs:EPSG::3857" or "urn:ogc:def:crs:OGC:1.3:CRS84"
    let code = name.rsplit(':').next().unwrap_or(name);
    code.parse::<Crs>()
        .map(Some)
        .map_err(|_| unsupported(name.to_string()))
}

fn json_value_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
