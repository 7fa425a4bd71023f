//! Composition of the code fragments substituted into templates.
//!
//! - `scalar`: fragments of a scalar quantity
//! - `vector`: fragments of a vector quantity at one dimensionality

pub mod scalar;
pub mod vector;

pub use scalar::ScalarFragments;
pub use vector::VectorFragments;
