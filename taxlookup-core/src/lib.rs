//! Core library for the California sales & use tax district lookup.
//!
//! Loads CDTFA tax district polygons into a spatial index, geocodes street
//! addresses, and decides whether an address lies inside a claimed city or
//! county jurisdiction.
pub mod geocode;
pub mod index;
pub mod model;
pub mod source;
pub mod validate;
