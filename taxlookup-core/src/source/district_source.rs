use super::{csv_ops, geojson_ops, shapefile_ops, DatasetError, DistrictDataset};
use crate::model::{
    district::{District, DistrictRecord, FieldMapping},
    Crs,
};
use geo::MultiPolygon;
use kdam::tqdm;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// polygons paired with their attributes, in the source CRS
pub(super) type DistrictRows = Vec<(MultiPolygon<f64>, DistrictRecord)>;

/// source of the tax district polygon dataset
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum DistrictSource {
    /// ESRI shapefile. the CRS is taken from the sibling `.prj` file when present.
    Shapefile { file: String },
    /// CSV file with a WKT geometry column. remaining columns are attributes.
    Csv {
        file: String,
        geometry_column: String,
    },
    /// GeoJSON FeatureCollection with polygonal features.
    #[serde(rename = "geojson")]
    GeoJson { file: String },
}

impl DistrictSource {
    pub const DEFAULT_GEOMETRY_COLUMN: &str = "geometry";

    /// picks the source type from the file extension.
    pub fn from_path(file: &str, geometry_column: &str) -> Result<DistrictSource, DatasetError> {
        let extension = Path::new(file)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match extension.as_deref() {
            Some("shp") => Ok(DistrictSource::Shapefile {
                file: file.to_string(),
            }),
            Some("csv") => Ok(DistrictSource::Csv {
                file: file.to_string(),
                geometry_column: geometry_column.to_string(),
            }),
            Some("geojson") | Some("json") => Ok(DistrictSource::GeoJson {
                file: file.to_string(),
            }),
            _ => Err(DatasetError::UnsupportedFileType(file.to_string())),
        }
    }

    pub fn file(&self) -> &str {
        match self {
            DistrictSource::Shapefile { file } => file,
            DistrictSource::Csv { file, .. } => file,
            DistrictSource::GeoJson { file } => file,
        }
    }

    /// reads the districts and reprojects them to WGS84.
    ///
    /// # Arguments
    /// * `assumed_crs` - CRS to use when the source does not declare one
    /// * `mapping` - source field names for each district attribute
    pub fn build(
        &self,
        assumed_crs: Crs,
        mapping: &FieldMapping,
    ) -> Result<DistrictDataset, DatasetError> {
        let (rows, declared_crs) = match self {
            DistrictSource::Shapefile { file } => shapefile_ops::read_shapefile(file, mapping)?,
            DistrictSource::Csv {
                file,
                geometry_column,
            } => (
                csv_ops::read_csv(file, geometry_column, mapping)?,
                None,
            ),
            DistrictSource::GeoJson { file } => geojson_ops::read_geojson(file, mapping)?,
        };
        if rows.is_empty() {
            return Err(DatasetError::Empty(self.file().to_string()));
        }
        let source_crs = match declared_crs {
            Some(crs) => crs,
            None => {
                log::warn!(
                    "no coordinate reference system declared by '{}', assuming {assumed_crs}",
                    self.file()
                );
                assumed_crs
            }
        };
        log::info!(
            "read {} districts from '{}' ({source_crs})",
            rows.len(),
            self.file()
        );
        let total = rows.len();
        let rows_iter = tqdm!(
            rows.into_iter(),
            total = total,
            desc = "reproject districts"
        );
        let districts = rows_iter
            .map(|(geometry, record)| District::new(source_crs.to_wgs84(geometry), record))
            .collect();
        Ok(DistrictDataset {
            districts,
            source_crs,
            source: self.file().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Contains, Point};
    use std::path::PathBuf;

    fn fixture(name: &str) -> String {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("test")
            .join(name)
            .to_string_lossy()
            .to_string()
    }

    #[test]
    fn test_from_path_by_extension() {
        assert!(matches!(
            DistrictSource::from_path("CDTFA_SalesandUseTaxRates.shp", "geometry"),
            Ok(DistrictSource::Shapefile { .. })
        ));
        assert!(matches!(
            DistrictSource::from_path("districts.GEOJSON", "geometry"),
            Ok(DistrictSource::GeoJson { .. })
        ));
        match DistrictSource::from_path("districts.csv", "wkt") {
            Ok(DistrictSource::Csv {
                geometry_column, ..
            }) => assert_eq!(geometry_column, "wkt"),
            other => panic!("expected csv source, found {other:?}"),
        }
        assert!(matches!(
            DistrictSource::from_path("CDTFA_TaxDistricts.gpkg", "geometry"),
            Err(DatasetError::UnsupportedFileType(_))
        ));
    }

    #[test]
    fn test_build_csv_in_wgs84() {
        let source = DistrictSource::from_path(&fixture("districts.csv"), "geometry")
            .expect("test invariant failed");
        let dataset = source
            .build(Crs::Wgs84, &FieldMapping::default())
            .expect("test failed");
        assert_eq!(dataset.districts.len(), 3);
        assert_eq!(dataset.source_crs, Crs::Wgs84);
        let downtown = Point::new(-121.49, 38.58);
        let first = &dataset.districts[0];
        assert!(first.geometry.contains(&downtown));
        assert_eq!(first.record.city.as_deref(), Some("Sacramento"));
        assert_eq!(first.record.rate, Some(8.75));
    }

    #[test]
    fn test_build_csv_reprojects_assumed_mercator() {
        let source = DistrictSource::Csv {
            file: fixture("districts_mercator.csv"),
            geometry_column: String::from("geometry"),
        };
        let dataset = source
            .build(Crs::WebMercator, &FieldMapping::default())
            .expect("test failed");
        assert_eq!(dataset.source_crs, Crs::WebMercator);
        let downtown = Point::new(-121.49, 38.58);
        assert!(dataset.districts[0].geometry.contains(&downtown));
    }

    #[test]
    fn test_build_geojson() {
        let source = DistrictSource::GeoJson {
            file: fixture("districts.geojson"),
        };
        // GeoJSON declares WGS84, the assumed CRS is ignored
        let dataset = source
            .build(Crs::WebMercator, &FieldMapping::default())
            .expect("test failed");
        assert_eq!(dataset.source_crs, Crs::Wgs84);
        assert_eq!(dataset.districts.len(), 2);
        assert_eq!(
            dataset.districts[1].record.county.as_deref(),
            Some("Sacramento")
        );
        assert_eq!(dataset.districts[1].record.city, None);
    }

    #[test]
    fn test_missing_file() {
        let source = DistrictSource::Shapefile {
            file: fixture("does_not_exist.shp"),
        };
        let result = source.build(Crs::WebMercator, &FieldMapping::default());
        assert!(matches!(result, Err(DatasetError::ReadError { .. })));
    }

    #[test]
    fn test_deserialize_tagged_source() {
        let source: DistrictSource =
            serde_json::from_str(r#"{"type": "geojson", "file": "districts.geojson"}"#)
                .expect("test failed");
        assert_eq!(
            source,
            DistrictSource::GeoJson {
                file: String::from("districts.geojson")
            }
        );
    }
}
