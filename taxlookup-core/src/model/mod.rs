pub mod crs;
pub mod district;
pub mod jurisdiction;

pub use crs::Crs;
