use geo::{BoundingRect, MultiPolygon};
use rstar::{RTreeObject, AABB};

/// an entry in the district spatial index: the bounding box of a district
/// polygon and the position of that district in the dataset.
pub struct IndexedDistrict {
    pub envelope: AABB<[f64; 2]>,
    pub index: usize,
}

impl IndexedDistrict {
    /// returns `None` for an empty geometry, which cannot be indexed.
    pub fn new(geometry: &MultiPolygon<f64>, index: usize) -> Option<IndexedDistrict> {
        let rect = geometry.bounding_rect()?;
        let envelope = AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]);
        Some(IndexedDistrict { envelope, index })
    }
}

impl RTreeObject for IndexedDistrict {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}
