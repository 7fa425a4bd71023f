use crate::catalogue::{Catalogue, ScalarDefinition, VectorDefinition};
use crate::compose::{scalar, vector, ScalarFragments, VectorFragments};
use crate::error::{Error, Result};
use crate::naming::QuantityNames;
use crate::template::sections::SectionToggles;
use regex::Regex;

const COMMA_IF_INTERFACE: &str = "#CommaIfInterface#";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragments {
    Scalar(ScalarFragments),
    Vector(VectorFragments),
}

/// Everything substituted into the template of one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateContext {
    pub fragments: Fragments,
    pub names: QuantityNames,
}

impl TemplateContext {
    pub fn for_scalar(catalogue: &Catalogue, name: &str, definition: &ScalarDefinition) -> Result<Self> {
        Ok(Self {
            fragments: Fragments::Scalar(scalar::compose(catalogue, name, definition)?),
            names: QuantityNames::for_scalar(name, definition)?,
        })
    }

    pub fn for_vector(
        catalogue: &Catalogue,
        name: &str,
        definition: &VectorDefinition,
        dimensionality: u8,
    ) -> Result<Self> {
        Ok(Self {
            fragments: Fragments::Vector(vector::compose(catalogue, name, definition, dimensionality)?),
            names: QuantityNames::for_vector(catalogue, name, definition, dimensionality)?,
        })
    }

    /// Output quantity name, with the dimensionality for vectors.
    pub fn quantity(&self) -> &str {
        &self.names.quantity
    }

    /// Sections kept for this file; scalar templates have none.
    pub fn section_toggles(&self) -> SectionToggles {
        match &self.fragments {
            Fragments::Scalar(_) => SectionToggles::new(),
            Fragments::Vector(fragments) => fragments.section_toggles(),
        }
    }

    fn placeholders(&self) -> Vec<(&'static str, &str)> {
        match &self.fragments {
            Fragments::Scalar(fragments) => fragments.placeholders(),
            Fragments::Vector(fragments) => fragments.placeholders(),
        }
    }

    fn interfaces(&self) -> &str {
        match &self.fragments {
            Fragments::Scalar(fragments) => &fragments.interfaces,
            Fragments::Vector(fragments) => &fragments.interfaces,
        }
    }

    /// Replaces every placeholder of `text`, fragments first and then names.
    ///
    /// # Returns
    /// * `Err(Error::UnresolvedPlaceholder)` - If a `#Word#` placeholder is left over
    pub fn substitute(&self, text: &str) -> Result<String> {
        let mut text = if self.interfaces().is_empty() {
            text.replace(&format!("{COMMA_IF_INTERFACE}\n"), "").replace(COMMA_IF_INTERFACE, "")
        } else {
            text.replace(COMMA_IF_INTERFACE, ",")
        };

        for (token, fragment) in self.placeholders() {
            text = text.replace(token, fragment);
        }
        let text = self.names.substitute(&text);

        let leftovers = unresolved_placeholders(&text)?;
        if !leftovers.is_empty() {
            return Err(Error::UnresolvedPlaceholder {
                quantity: self.quantity().to_string(),
                placeholders: leftovers.join(", "),
            });
        }
        Ok(text)
    }
}

/// Distinct `#Word#` placeholders of `text`, in order of appearance.
///
/// `#newline#` and the documentation markers are not placeholders.
pub fn unresolved_placeholders(text: &str) -> Result<Vec<String>> {
    let placeholder = Regex::new(r"#([A-Za-z][A-Za-z0-9_]*)#")?;
    let mut found: Vec<String> = Vec::new();
    for captures in placeholder.captures_iter(text) {
        let token = &captures[0];
        if token == crate::constants::markers::NEWLINE || found.iter().any(|known| known == token) {
            continue;
        }
        found.push(token.to_string());
    }
    Ok(found)
}
