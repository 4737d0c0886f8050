//! Fishcat Geo - geometry conversions and the containment resolver
//!
//! The geometric half of the catalog: conversions between the canonical
//! geometry types and the `geo` crate, the pure point-in-polygon containment
//! resolver, and an R-tree index over digitized unit boundaries.

pub mod containment;
pub mod convert;
pub mod index;

pub use containment::containing_units;
pub use index::BoundaryIndex;
