use crate::catalogue::{Catalogue, VectorDefinition};
use crate::error::Result;
use crate::naming::{
    axis_names, component_of, derive_vector_unit_bias, derive_vector_unit_name, derive_vector_units,
    resolve_plural,
};
use crate::template::SectionToggles;

/// Per-axis patterns joined with `, `; `{N}` is the axis name, `{n}` its lower-case form.
const COMPONENT_PATTERNS: [(&str, &str); 21] = [
    ("#ComponentsDefinition#", "double {N}"),
    ("#Components#", "{N}"),
    ("#ZeroComponents#", "0"),
    ("#DoubleDefinition#", "double {n}"),
    ("#TupleAccess#", "components.{n}"),
    ("#ComponentsFormatting#", "{{N}}"),
    ("#NegateComponents#", "-{N}"),
    ("#NegateA#", "-a.{N}"),
    ("#ComponentsTimesFactor#", "{N} * factor"),
    ("#ComponentsDividedByDivisor#", "{N} / divisor"),
    ("#ComponentsRemainderDivisor#", "{N} % divisor"),
    ("#VectorATimesScalarB#", "a.{N} * b"),
    ("#ScalarATimesVectorB#", "a * b.{N}"),
    ("#ADividedByB#", "a.{N} / b"),
    ("#ARemainderB#", "a.{N} % b"),
    ("#aAccess#", "a.{N}"),
    ("#ComponentsTimesFactorMagnitude#", "{N} * factor.Magnitude"),
    ("#ComponentsDividedByDivisorMagnitude#", "{N} / divisor.Magnitude"),
    ("#VectorATimesScalarBMagnitude#", "a.{N} * b.Magnitude"),
    ("#ScalarAMagnitudeTimesVectorB#", "a.Magnitude * b.{N}"),
    ("#ADividedByBMagnitude#", "a.{N} / b.Magnitude"),
];

const BIASED_FROM_UNIT: &str = "({n} * #UnitVariable#.Prefix.Scale + #UnitVariable#.Bias) * #UnitVariable#.BaseScale";
const UNBIASED_FROM_UNIT: &str = "{n} * #UnitVariable#.Factor";

/// Every fragment a vector template may refer to, for one dimensionality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VectorFragments {
    pub dimensionality: u8,
    /// Per-axis component lists keyed by placeholder.
    pub components: Vec<(&'static str, String)>,
    pub components_from_unit: String,
    pub components_to_unit: String,
    pub interfaces: String,
    pub shared_units: String,
    pub units: String,
    pub additive: String,
    pub has_component: bool,
    pub component_has_square: bool,
}

impl VectorFragments {
    /// Placeholder tokens paired with their fragment.
    pub fn placeholders(&self) -> Vec<(&'static str, &str)> {
        let mut placeholders: Vec<(&'static str, &str)> =
            self.components.iter().map(|(token, text)| (*token, text.as_str())).collect();
        placeholders.extend([
            ("#ComponentsFromUnit#", self.components_from_unit.as_str()),
            ("#ComponentsToUnit#", &self.components_to_unit),
            ("#Interfaces#", &self.interfaces),
            ("#SharedUnits#", &self.shared_units),
            ("#Units#", &self.units),
            ("#Additive#", &self.additive),
        ]);
        placeholders
    }

    /// Optional template sections kept or removed for this vector.
    pub fn section_toggles(&self) -> SectionToggles {
        SectionToggles::new()
            .with("ComponentMagnitude", self.has_component)
            .with("ComponentNormalization", self.has_component)
            .with("DoubleMagnitude", !self.has_component)
            .with("DoubleNormalization", !self.has_component)
            .with("QuantitySquaredMagnitude", self.component_has_square)
            .with("DoubleSquaredMagnitude", !self.component_has_square)
            .with("Vector3", self.dimensionality == 3)
    }
}

/// Composes every fragment of a vector quantity at one dimensionality.
pub fn compose(
    catalogue: &Catalogue,
    name: &str,
    vector: &VectorDefinition,
    dimensionality: u8,
) -> Result<VectorFragments> {
    let component = component_of(catalogue, name, vector)?;
    let biased = derive_vector_unit_bias(catalogue, name, vector)?;

    Ok(VectorFragments {
        dimensionality,
        components: compose_components(dimensionality),
        components_from_unit: compose_components_from_unit(dimensionality, biased),
        components_to_unit: compose_components_to_unit(biased),
        interfaces: compose_interfaces(vector),
        shared_units: compose_shared_units(catalogue, name, vector, dimensionality)?,
        units: compose_units(catalogue, name, vector)?,
        additive: compose_additive(vector, dimensionality),
        has_component: component.is_some(),
        component_has_square: component.is_some_and(|(_, scalar)| scalar.square.is_some()),
    })
}

fn per_axis(dimensionality: u8, pattern: &str) -> String {
    axis_names(dimensionality)
        .iter()
        .map(|axis| {
            pattern
                .replace("{N}", axis)
                .replace("{n}", &axis.to_lowercase())
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Every per-axis component list.
///
/// # Examples
/// ```
/// use quantigen::compose::vector::compose_components;
///
/// let components = compose_components(2);
/// assert!(components.contains(&("#NegateA#", "-a.X, -a.Y".to_string())));
/// ```
pub fn compose_components(dimensionality: u8) -> Vec<(&'static str, String)> {
    COMPONENT_PATTERNS
        .iter()
        .map(|(token, pattern)| (*token, per_axis(dimensionality, pattern)))
        .collect()
}

pub fn compose_components_from_unit(dimensionality: u8, biased: bool) -> String {
    per_axis(dimensionality, if biased { BIASED_FROM_UNIT } else { UNBIASED_FROM_UNIT })
}

pub fn compose_components_to_unit(biased: bool) -> String {
    if biased {
        "(vector / #UnitVariable#.BaseScale - Vector#Dimensionality#.Ones * #UnitVariable#.Bias) / #UnitVariable#.Prefix.Scale"
            .to_string()
    } else {
        "vector / #UnitVariable#.Factor".to_string()
    }
}

/// Addable and subtractable vector interfaces, without the final separator.
pub fn compose_interfaces(vector: &VectorDefinition) -> String {
    let mut interfaces = Vec::new();
    if vector.additive {
        interfaces.push("\tIAddableVector#Dimensionality#<#Quantity#, #Quantity#>");
    }
    if vector.subtractive {
        interfaces.push("\tISubtractableVector#Dimensionality#<#Quantity#, #Quantity#>");
    }
    interfaces.join(",\n")
}

/// Accessors of the components in each unit.
pub fn compose_units(catalogue: &Catalogue, name: &str, vector: &VectorDefinition) -> Result<String> {
    let unit = derive_vector_unit_name(catalogue, name, vector)?;
    let mut text = String::new();
    for entry in derive_vector_units(catalogue, name, vector)? {
        if entry.separator {
            text.push('\n');
            continue;
        }
        text.push_str(&format!(
            "\tpublic Vector#Dimensionality# {} => InUnit({unit}.{});\n",
            resolve_plural(&entry.singular, &entry.plural),
            entry.singular
        ));
    }
    Ok(text)
}

/// `As<Other><N>()` conversions to shared-unit vectors that exist at this dimensionality.
pub fn compose_shared_units(
    catalogue: &Catalogue,
    name: &str,
    vector: &VectorDefinition,
    dimensionality: u8,
) -> Result<String> {
    let components = axis_names(dimensionality).join(", ");
    let mut text = String::new();
    for shared in &vector.shares_unit {
        let other = catalogue.vector(name, "sharesUnit", shared)?;
        if !other.dimensionalities.contains(&dimensionality) {
            log::debug!("'{name}{dimensionality}' shares its unit with '{shared}', which has no {dimensionality}-dimensional form");
            continue;
        }
        text.push_str(&format!(
            "\tpublic {shared}#Dimensionality# As{shared}#Dimensionality#() => new({components});\n"
        ));
    }
    Ok(text)
}

/// Component-wise add and subtract methods and operators.
pub fn compose_additive(vector: &VectorDefinition, dimensionality: u8) -> String {
    let mut text = String::new();
    if vector.additive {
        text.push_str(&format!(
            "\tpublic #Quantity# Add(#Quantity# term) => new({});\n",
            per_axis(dimensionality, "{N} + term.{N}")
        ));
    }
    if vector.subtractive {
        text.push_str(&format!(
            "\tpublic #Quantity# Subtract(#Quantity# term) => new({});\n",
            per_axis(dimensionality, "{N} - term.{N}")
        ));
    }
    if vector.additive {
        text.push_str(&format!(
            "\tpublic static #Quantity# operator +(#Quantity# a, #Quantity# b) => new({});\n",
            per_axis(dimensionality, "a.{N} + b.{N}")
        ));
    }
    if vector.subtractive {
        text.push_str(&format!(
            "\tpublic static #Quantity# operator -(#Quantity# a, #Quantity# b) => new({});\n",
            per_axis(dimensionality, "a.{N} - b.{N}")
        ));
    }
    text
}
