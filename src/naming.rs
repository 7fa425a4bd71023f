//! Name derivation and small text utilities shared by the composers

use crate::catalogue::{
    Catalogue, ScalarDefinition, Symbol, UnitBias, UnitEntry, UnitList, UnitName,
    VectorDefinition,
};
use crate::constants::sentinels;
use crate::error::{Error, Result};

const AXES: [&str; 3] = ["X", "Y", "Z"];

/// Resolves the plural form of a unit name from its plural pattern.
///
/// Patterns:
/// - `=`: identical to the singular
/// - `Feet`: no `+`, taken literally
/// - `+s`: suffix appended to the singular
/// - `[Metre]+s`: every occurrence of the target gets the suffix
/// - `+s [Metre]`: every occurrence of the target gets the prefix
/// - `[oo]+=ee`: every occurrence of the target is replaced
///
/// # Examples
/// ```
/// use quantigen::naming::resolve_plural;
///
/// assert_eq!(resolve_plural("metre", "="), "metre");
/// assert_eq!(resolve_plural("metre", "+s"), "metres");
/// assert_eq!(resolve_plural("foot-pound", "[oo]+=ee"), "feet-pound");
/// ```
pub fn resolve_plural(singular: &str, pattern: &str) -> String {
    if pattern == sentinels::IDENTICAL_PLURAL {
        return singular.to_string();
    }
    let Some((before, after)) = pattern.split_once('+') else {
        return pattern.to_string();
    };
    let Some(target) = bracket_target(pattern) else {
        return format!("{singular}{after}");
    };
    if target.is_empty() {
        return format!("{singular}{after}");
    }

    if before.contains('[') {
        match after.strip_prefix('=') {
            Some(replacement) => singular.replace(target, replacement),
            None => singular.replace(target, &format!("{target}{after}")),
        }
    } else {
        let prefix = after.split(' ').next().unwrap_or_default();
        singular.replace(target, &format!("{prefix}{target}"))
    }
}

fn bracket_target(pattern: &str) -> Option<&str> {
    let (_, rest) = pattern.split_once('[')?;
    Some(rest.split_once(']').map_or(rest, |(target, _)| target))
}

/// Lower-cases only the first character of `text`.
///
/// # Returns
/// * `Err(Error::InvalidInput)` - If `text` is empty
pub fn lower_case_first(text: &str) -> Result<String> {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => Ok(first.to_lowercase().chain(chars).collect()),
        None => Err(Error::InvalidInput("cannot lower-case the first letter of an empty name".into())),
    }
}

/// Names of the components of a vector with the given dimensionality.
pub fn axis_names(dimensionality: u8) -> &'static [&'static str] {
    &AXES[..usize::from(dimensionality).min(AXES.len())]
}

/// Unit type name of a scalar quantity.
pub fn derive_unit_name(name: &str, scalar: &ScalarDefinition) -> String {
    match &scalar.unit {
        UnitName::Named(unit) => unit.clone(),
        UnitName::Derived | UnitName::Component => format!("UnitOf{name}"),
    }
}

/// Name of the vector quantity a scalar is the magnitude of.
pub fn derive_vector_name<'a>(name: &'a str, scalar: &'a ScalarDefinition) -> Option<&'a str> {
    scalar.vector.as_ref().map(|vector| vector.resolve(name))
}

/// Name of the scalar quantity describing each component of a vector.
pub fn derive_component_name<'a>(name: &'a str, vector: &'a VectorDefinition) -> Option<&'a str> {
    vector.component.as_ref().map(|component| component.resolve(name))
}

/// The component scalar of `vector`, looked up in the catalogue.
pub fn component_of<'a>(
    catalogue: &'a Catalogue,
    name: &'a str,
    vector: &'a VectorDefinition,
) -> Result<Option<(&'a str, &'a ScalarDefinition)>> {
    match derive_component_name(name, vector) {
        Some(component) => {
            let scalar = catalogue.scalar(name, "component", component)?;
            Ok(Some((component, scalar)))
        }
        None => Ok(None),
    }
}

/// Unit type name of a vector quantity.
pub fn derive_vector_unit_name(catalogue: &Catalogue, name: &str, vector: &VectorDefinition) -> Result<String> {
    match &vector.unit {
        UnitName::Named(unit) => Ok(unit.clone()),
        UnitName::Derived => Ok(format!("UnitOf{name}")),
        UnitName::Component => {
            let (component, scalar) = require_component(catalogue, name, vector, "unit")?;
            Ok(derive_unit_name(component, scalar))
        }
    }
}

/// Abbreviation of a scalar quantity.
pub fn derive_symbol(name: &str, scalar: &ScalarDefinition) -> Result<String> {
    match &scalar.symbol {
        Symbol::Literal(symbol) => Ok(symbol.clone()),
        Symbol::BaseUnits => scalar.base_units.clone().ok_or_else(|| {
            Error::InvalidCatalogue(format!("quantity '{name}': symbol refers to unset 'baseUnits'"))
        }),
        Symbol::Component => Err(Error::InvalidCatalogue(format!(
            "quantity '{name}': a scalar has no component to take its symbol from"
        ))),
    }
}

/// Abbreviation of a vector quantity.
pub fn derive_vector_symbol(catalogue: &Catalogue, name: &str, vector: &VectorDefinition) -> Result<String> {
    match &vector.symbol {
        Symbol::Literal(symbol) => Ok(symbol.clone()),
        Symbol::Component => {
            let (component, scalar) = require_component(catalogue, name, vector, "symbol")?;
            derive_symbol(component, scalar)
        }
        Symbol::BaseUnits => Err(Error::InvalidCatalogue(format!(
            "quantity '{name}': a vector cannot take its symbol from 'baseUnits'"
        ))),
    }
}

/// Units of a vector quantity, inherited from the component when requested.
pub fn derive_vector_units<'a>(
    catalogue: &'a Catalogue,
    name: &'a str,
    vector: &'a VectorDefinition,
) -> Result<&'a [UnitEntry]> {
    match &vector.units {
        UnitList::Listed(units) => Ok(units),
        UnitList::Component => {
            let (_, scalar) = require_component(catalogue, name, vector, "units")?;
            Ok(&scalar.units)
        }
    }
}

/// Whether the unit of a vector quantity carries a bias term.
pub fn derive_vector_unit_bias(catalogue: &Catalogue, name: &str, vector: &VectorDefinition) -> Result<bool> {
    match vector.unit_bias {
        UnitBias::Fixed(bias) => Ok(bias),
        UnitBias::Component => {
            let (_, scalar) = require_component(catalogue, name, vector, "unitBias")?;
            Ok(scalar.unit_bias)
        }
    }
}

fn require_component<'a>(
    catalogue: &'a Catalogue,
    name: &'a str,
    vector: &'a VectorDefinition,
    field: &str,
) -> Result<(&'a str, &'a ScalarDefinition)> {
    component_of(catalogue, name, vector)?.ok_or_else(|| {
        Error::InvalidCatalogue(format!(
            "quantity '{name}': '{field}' refers to '{}' but no component quantity is set",
            sentinels::COMPONENT
        ))
    })
}

/// Singular and plural names of every unit, rendered as `[A, B]` lists.
pub fn unit_list_texts(units: &[UnitEntry]) -> (String, String) {
    let units: Vec<_> = units.iter().filter(|unit| !unit.separator).collect();
    let singular: Vec<_> = units.iter().map(|unit| unit.singular.clone()).collect();
    let plural: Vec<_> = units.iter().map(|unit| resolve_plural(&unit.singular, &unit.plural)).collect();
    (format!("[{}]", singular.join(", ")), format!("[{}]", plural.join(", ")))
}

/// Simple derived names substituted into templates and documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityNames {
    /// Quantity name, with the dimensionality appended for vectors.
    pub quantity: String,
    /// `quantity` with a lower-case first letter, for parameter names.
    pub quantity_variable: String,
    pub unit: String,
    pub unit_variable: String,
    pub abbreviation: String,
    pub component: Option<String>,
    pub squared_component: Option<String>,
    pub dimensionality: Option<u8>,
}

impl QuantityNames {
    pub fn for_scalar(name: &str, scalar: &ScalarDefinition) -> Result<Self> {
        let unit = derive_unit_name(name, scalar);
        Ok(Self {
            quantity: name.to_string(),
            quantity_variable: lower_case_first(name)?,
            unit_variable: lower_case_first(&unit)?,
            unit,
            abbreviation: derive_symbol(name, scalar)?,
            component: None,
            squared_component: None,
            dimensionality: None,
        })
    }

    pub fn for_vector(
        catalogue: &Catalogue,
        name: &str,
        vector: &VectorDefinition,
        dimensionality: u8,
    ) -> Result<Self> {
        let unit = derive_vector_unit_name(catalogue, name, vector)?;
        let component = component_of(catalogue, name, vector)?;
        let quantity = format!("{name}{dimensionality}");
        Ok(Self {
            quantity_variable: lower_case_first(&quantity)?,
            quantity,
            unit_variable: lower_case_first(&unit)?,
            unit,
            abbreviation: derive_vector_symbol(catalogue, name, vector)?,
            component: Some(component.map_or("Scalar", |(component, _)| component).to_string()),
            squared_component: Some(
                component
                    .and_then(|(_, scalar)| scalar.square.as_deref())
                    .unwrap_or("Scalar")
                    .to_string(),
            ),
            dimensionality: Some(dimensionality),
        })
    }

    /// Placeholder tokens and their values.
    pub fn substitutions(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("#UnitVariable#", self.unit_variable.clone()),
            ("#Abbreviation#", self.abbreviation.clone()),
            ("#Quantity#", self.quantity.clone()),
            ("#quantity#", self.quantity_variable.clone()),
            ("#Unit#", self.unit.clone()),
        ];
        if let Some(squared) = &self.squared_component {
            pairs.push(("#SquaredComponent#", squared.clone()));
        }
        if let Some(component) = &self.component {
            pairs.push(("#Component#", component.clone()));
        }
        if let Some(dimensionality) = self.dimensionality {
            pairs.push(("#Dimensionality#", dimensionality.to_string()));
        }
        pairs
    }

    /// Replaces every name placeholder in `text`.
    pub fn substitute(&self, text: &str) -> String {
        self.substitutions()
            .iter()
            .fold(text.to_string(), |text, (token, value)| text.replace(token, value))
    }
}
