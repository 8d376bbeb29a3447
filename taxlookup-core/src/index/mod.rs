mod district_index;
mod index_summary;
mod indexed_district;

pub use district_index::DistrictIndex;
pub use index_summary::IndexSummary;
