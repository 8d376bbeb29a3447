use super::{indexed_district::IndexedDistrict, IndexSummary};
use crate::{
    model::{district::District, Crs},
    source::{DatasetError, DistrictDataset},
};
use geo::{Closest, ClosestPoint, Contains, Intersects, MultiPolygon, Point};
use rstar::{RTree, AABB};

/// spatial index over tax district polygons in WGS84.
///
/// built once at startup and shared read-only between requests. queries
/// return districts in dataset order, so when polygons overlap the first
/// row in the source file wins.
pub struct DistrictIndex {
    districts: Vec<District>,
    rtree: RTree<IndexedDistrict>,
    source: String,
    source_crs: Crs,
}

impl DistrictIndex {
    pub fn new(dataset: DistrictDataset) -> Result<DistrictIndex, DatasetError> {
        let DistrictDataset {
            districts,
            source_crs,
            source,
        } = dataset;
        let entries = districts
            .iter()
            .enumerate()
            .filter_map(|(idx, district)| {
                let entry = IndexedDistrict::new(&district.geometry, idx);
                if entry.is_none() {
                    log::warn!("district {idx} of '{source}' has an empty geometry and is not indexed");
                }
                entry
            })
            .collect::<Vec<_>>();
        if entries.is_empty() {
            return Err(DatasetError::Empty(source));
        }
        let rtree = RTree::bulk_load(entries);
        Ok(DistrictIndex {
            districts,
            rtree,
            source,
            source_crs,
        })
    }

    pub fn len(&self) -> usize {
        self.districts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }

    /// the first district whose polygon contains the point. points on a
    /// district boundary are not contained by it.
    pub fn containing(&self, point: &Point<f64>) -> Option<&District> {
        self.candidates(&point_envelope(point))
            .into_iter()
            .find(|d| d.geometry.contains(point))
    }

    /// every district touching the point, boundary included. when none
    /// does, every district within `tolerance` degrees of the point, which
    /// catches geocoded points that land in slivers between polygons.
    pub fn near(&self, point: &Point<f64>, tolerance: f64) -> Vec<&District> {
        let intersecting = self
            .candidates(&point_envelope(point))
            .into_iter()
            .filter(|d| d.geometry.intersects(point))
            .collect::<Vec<_>>();
        if !intersecting.is_empty() || tolerance <= 0.0 {
            return intersecting;
        }
        let envelope = AABB::from_corners(
            [point.x() - tolerance, point.y() - tolerance],
            [point.x() + tolerance, point.y() + tolerance],
        );
        self.candidates(&envelope)
            .into_iter()
            .filter(|d| distance_to(&d.geometry, point) <= tolerance)
            .collect()
    }

    pub fn summary(&self) -> IndexSummary {
        let polygons = self.districts.iter().map(|d| d.geometry.0.len()).sum();
        let envelope = self.rtree.root().envelope();
        let (lower, upper) = (envelope.lower(), envelope.upper());
        IndexSummary {
            source: self.source.clone(),
            source_crs: self.source_crs,
            districts: self.districts.len(),
            polygons,
            bounds: [lower[0], lower[1], upper[0], upper[1]],
            first_record: self.districts.first().map(|d| d.record.clone()),
        }
    }

    /// districts whose bounding box intersects the envelope, in dataset order
    fn candidates(&self, envelope: &AABB<[f64; 2]>) -> Vec<&District> {
        let mut indices = self
            .rtree
            .locate_in_envelope_intersecting(envelope)
            .map(|entry| entry.index)
            .collect::<Vec<_>>();
        indices.sort_unstable();
        indices
            .into_iter()
            .filter_map(|idx| self.districts.get(idx))
            .collect()
    }
}

fn point_envelope(point: &Point<f64>) -> AABB<[f64; 2]> {
    AABB::from_point([point.x(), point.y()])
}

/// planar distance in degrees from a point to the nearest edge of a polygon.
fn distance_to(geometry: &MultiPolygon<f64>, point: &Point<f64>) -> f64 {
    geometry
        .iter()
        .map(|polygon| match polygon.closest_point(point) {
            Closest::Intersection(_) => 0.0,
            Closest::SinglePoint(p) => (p.x() - point.x()).hypot(p.y() - point.y()),
            Closest::Indeterminate => f64::INFINITY,
        })
        .fold(f64::INFINITY, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::district::DistrictRecord;
    use geo::Rect;

    fn district(name: &str, city: Option<&str>, min: (f64, f64), max: (f64, f64)) -> District {
        let rect = Rect::new(min, max);
        District::new(
            MultiPolygon::new(vec![rect.to_polygon()]),
            DistrictRecord {
                jurisdiction: Some(name.to_string()),
                county: Some(String::from("Sacramento")),
                city: city.map(String::from),
                rate: Some(8.75),
                effective_date: None,
            },
        )
    }

    fn test_index() -> DistrictIndex {
        let dataset = DistrictDataset {
            districts: vec![
                district("SACRAMENTO", Some("Sacramento"), (-121.6, 38.4), (-121.3, 38.7)),
                district("UNINCORPORATED", None, (-121.3, 38.4), (-121.0, 38.7)),
                // disjoint, leaves a 0.0002 degree sliver to the east
                district("FOLSOM", Some("Folsom"), (-120.9998, 38.4), (-120.9, 38.7)),
            ],
            source_crs: Crs::Wgs84,
            source: String::from("test"),
        };
        DistrictIndex::new(dataset).expect("test invariant failed")
    }

    fn jurisdictions(districts: &[&District]) -> Vec<String> {
        districts
            .iter()
            .filter_map(|d| d.record.jurisdiction.clone())
            .collect()
    }

    #[test]
    fn test_containing_interior_point() {
        let index = test_index();
        let result = index
            .containing(&Point::new(-121.49, 38.58))
            .expect("test failed");
        assert_eq!(result.record.jurisdiction.as_deref(), Some("SACRAMENTO"));
    }

    #[test]
    fn test_containing_outside_all() {
        let index = test_index();
        assert!(index.containing(&Point::new(-118.24, 34.05)).is_none());
    }

    #[test]
    fn test_boundary_is_not_contained() {
        let index = test_index();
        let shared_edge = Point::new(-121.3, 38.5);
        assert!(index.containing(&shared_edge).is_none());
        let near = index.near(&shared_edge, 0.0005);
        assert_eq!(jurisdictions(&near), vec!["SACRAMENTO", "UNINCORPORATED"]);
    }

    #[test]
    fn test_near_falls_back_to_tolerance() {
        let index = test_index();
        let sliver = Point::new(-120.9999, 38.5);
        assert!(index.containing(&sliver).is_none());
        let near = index.near(&sliver, 0.0005);
        assert_eq!(jurisdictions(&near), vec!["UNINCORPORATED", "FOLSOM"]);
        assert!(index.near(&sliver, 0.0).is_empty());
    }

    #[test]
    fn test_near_outside_tolerance() {
        let index = test_index();
        assert!(index.near(&Point::new(-120.0, 38.5), 0.0005).is_empty());
    }

    #[test]
    fn test_summary() {
        let index = test_index();
        let summary = index.summary();
        assert_eq!(summary.districts, 3);
        assert_eq!(summary.polygons, 3);
        assert_eq!(summary.bounds, [-121.6, 38.4, -120.9, 38.7]);
        assert_eq!(
            summary.first_record.and_then(|r| r.jurisdiction).as_deref(),
            Some("SACRAMENTO")
        );
    }

    #[test]
    fn test_empty_dataset_is_rejected() {
        let dataset = DistrictDataset {
            districts: vec![],
            source_crs: Crs::Wgs84,
            source: String::from("empty"),
        };
        assert!(matches!(
            DistrictIndex::new(dataset),
            Err(DatasetError::Empty(_))
        ));
    }
}
