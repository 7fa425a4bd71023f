//! Catalogue loading and lookup

use crate::catalogue::types::{ScalarDefinition, VectorDefinition};
use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::ioutils;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

/// Every quantity known to a generation run, in file order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Catalogue {
    #[serde(default)]
    pub scalars: IndexMap<String, ScalarDefinition>,
    #[serde(default)]
    pub vectors: IndexMap<String, VectorDefinition>,
}

/// Storage format of a catalogue file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogueFormat {
    Json,
    Yaml,
}

impl CatalogueFormat {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(CatalogueFormat::Json),
            Some("yaml") | Some("yml") => Ok(CatalogueFormat::Yaml),
            _ => Err(Error::InvalidCatalogue(format!(
                "'{}' is neither a .json nor a .yaml/.yml file",
                path.display_string()
            ))),
        }
    }
}

impl Catalogue {
    /// Reads, parses and validates the catalogue at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = CatalogueFormat::from_path(path)?;
        log::debug!("Loading catalogue from '{}'", path.display());

        let content = ioutils::read_to_string(path)?;
        let catalogue = Self::parse(&content, format)?;

        log::info!(
            "Loaded {} scalar and {} vector quantities from '{}'",
            catalogue.scalars.len(),
            catalogue.vectors.len(),
            path.display()
        );
        Ok(catalogue)
    }

    /// Parses and validates catalogue text.
    pub fn parse(content: &str, format: CatalogueFormat) -> Result<Self> {
        let catalogue: Catalogue = match format {
            CatalogueFormat::Json => serde_json::from_str(content)?,
            CatalogueFormat::Yaml if content.trim().is_empty() => Catalogue::default(),
            CatalogueFormat::Yaml => serde_yaml::from_str(content)?,
        };
        catalogue.validate()?;
        Ok(catalogue)
    }

    /// Looks up a scalar referenced by `quantity` through `field`.
    pub fn scalar(&self, quantity: &str, field: &str, reference: &str) -> Result<&ScalarDefinition> {
        self.scalars.get(reference).ok_or_else(|| Error::UnknownQuantity {
            quantity: quantity.to_string(),
            field: field.to_string(),
            section: "scalar".to_string(),
            reference: reference.to_string(),
        })
    }

    /// Looks up a vector referenced by `quantity` through `field`.
    pub fn vector(&self, quantity: &str, field: &str, reference: &str) -> Result<&VectorDefinition> {
        self.vectors.get(reference).ok_or_else(|| Error::UnknownQuantity {
            quantity: quantity.to_string(),
            field: field.to_string(),
            section: "vector".to_string(),
            reference: reference.to_string(),
        })
    }
}
