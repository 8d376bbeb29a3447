mod comparison;
pub mod jurisdiction_ops;

pub use comparison::Comparison;
