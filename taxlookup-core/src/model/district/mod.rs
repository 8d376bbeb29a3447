mod district;
mod district_record;
mod field_mapping;

pub use district::District;
pub use district_record::DistrictRecord;
pub use field_mapping::FieldMapping;
