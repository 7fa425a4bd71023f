//! Structural and referential checks run right after a catalogue is parsed

use crate::catalogue::loader::Catalogue;
use crate::catalogue::types::{
    BaseList, ScalarDefinition, Symbol, UnitEntry, UnitList, UnitName, VectorDefinition,
};
use crate::error::{Error, Result};
use std::collections::HashSet;

impl Catalogue {
    /// Checks every reference and structural constraint of the catalogue.
    ///
    /// # Returns
    /// * `Ok(())` - If generation can rely on every lookup succeeding
    /// * `Err(Error::UnknownQuantity)` - If a reference names a missing quantity
    /// * `Err(Error::InvalidCatalogue)` - If a definition is malformed
    pub fn validate(&self) -> Result<()> {
        for (name, scalar) in &self.scalars {
            self.validate_scalar(name, scalar)?;
        }
        for (name, vector) in &self.vectors {
            self.validate_vector(name, vector)?;
        }
        Ok(())
    }

    fn validate_scalar(&self, name: &str, scalar: &ScalarDefinition) -> Result<()> {
        if scalar.unit == UnitName::Component {
            return Err(invalid(name, "a scalar has no component to take its unit from"));
        }
        match &scalar.symbol {
            Symbol::Component => {
                return Err(invalid(name, "a scalar has no component to take its symbol from"))
            }
            Symbol::BaseUnits if scalar.base_units.is_none() => {
                return Err(invalid(name, "symbol refers to 'baseUnits', which is not set"))
            }
            _ => {}
        }

        validate_units(name, &scalar.units)?;

        if let Some(si) = &scalar.si {
            if scalar.si_unit().is_none() {
                return Err(invalid(name, &format!("SI unit '{si}' is not one of its units")));
            }
        }

        if let BaseList::Listed(bases) = &scalar.bases {
            validate_units(name, bases)?;
            for base in bases.iter().filter(|base| !base.separator) {
                let declared = scalar.units.iter().any(|unit| unit.singular == base.singular);
                if !declared {
                    return Err(invalid(
                        name,
                        &format!("base '{}' is not one of its units", base.singular),
                    ));
                }
            }
        }

        for (relation, related) in scalar.relations() {
            if related == name {
                return Err(invalid(
                    name,
                    &format!("'{}' refers to the quantity itself", relation.field()),
                ));
            }
            let related_scalar = self.scalar(name, relation.field(), related)?;
            if related_scalar.si_unit().is_none() {
                return Err(invalid(
                    related,
                    &format!(
                        "an SI unit is required since '{name}' refers to it through '{}'",
                        relation.field()
                    ),
                ));
            }
        }

        for shared in &scalar.shares_unit {
            self.scalar(name, "sharesUnit", shared)?;
        }

        if let Some(vector) = &scalar.vector {
            self.vector(name, "vector", vector.resolve(name))?;
        }

        Ok(())
    }

    fn validate_vector(&self, name: &str, vector: &VectorDefinition) -> Result<()> {
        if vector.dimensionalities.is_empty() {
            log::warn!("Vector quantity '{name}' declares no dimensionalities and produces no files");
        }
        let mut seen = HashSet::new();
        for dimensionality in &vector.dimensionalities {
            if !(1..=3).contains(dimensionality) {
                return Err(invalid(
                    name,
                    &format!("dimensionality {dimensionality} is outside 1..=3"),
                ));
            }
            if !seen.insert(dimensionality) {
                return Err(invalid(name, &format!("dimensionality {dimensionality} is listed twice")));
            }
        }

        match &vector.component {
            Some(component) => {
                self.scalar(name, "component", component.resolve(name))?;
            }
            None if vector.inherits_from_component() => {
                return Err(invalid(
                    name,
                    "fields refer to '[component]' but no component quantity is set",
                ));
            }
            None => {}
        }

        if vector.symbol == Symbol::BaseUnits {
            return Err(invalid(name, "a vector cannot take its symbol from 'baseUnits'"));
        }

        if let UnitList::Listed(units) = &vector.units {
            validate_units(name, units)?;
        }

        for shared in &vector.shares_unit {
            self.vector(name, "sharesUnit", shared)?;
        }

        Ok(())
    }
}

fn validate_units(name: &str, units: &[UnitEntry]) -> Result<()> {
    for unit in units.iter().filter(|unit| !unit.separator) {
        if unit.singular.is_empty() {
            return Err(invalid(name, "a unit entry has no singular name"));
        }
        if unit.plural.is_empty() {
            return Err(invalid(
                name,
                &format!("unit '{}' has an empty plural pattern", unit.singular),
            ));
        }
    }
    Ok(())
}

fn invalid(quantity: &str, reason: &str) -> Error {
    Error::InvalidCatalogue(format!("quantity '{quantity}': {reason}"))
}

