//! Quantity catalogue
//!
//! This module contains the catalogue components:
//! - `types`: Scalar and vector definitions with their sentinel values
//! - `loader`: Catalogue file loading and reference lookup
//! - `validation`: Checks run once after parsing

pub mod loader;
pub mod types;
pub mod validation;


// Re-export commonly used types for convenience
pub use loader::{Catalogue, CatalogueFormat};
pub use types::{
    BaseList, PowerRelation, QuantityRef, ScalarDefinition, Symbol, UnitBias, UnitEntry,
    UnitList, UnitName, VectorDefinition,
};
