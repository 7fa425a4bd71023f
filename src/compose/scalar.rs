use crate::catalogue::{Catalogue, PowerRelation, ScalarDefinition};
use crate::error::Result;
use crate::naming::{
    axis_names, derive_unit_name, derive_vector_name, lower_case_first, resolve_plural,
    unit_list_texts,
};

/// Every fragment a scalar template may refer to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScalarFragments {
    pub interfaces: String,
    pub shared_units: String,
    pub convertible: String,
    pub magnitude_from_unit_double: String,
    pub magnitude_from_unit_scalar: String,
    pub magnitude_to_unit: String,
    pub bases: String,
    pub from: String,
    pub units: String,
    pub additive: String,
    pub cancels: String,
    pub to_vector: String,
    pub powers: String,
    pub inversion_operator_double: String,
    pub inversion_operator_scalar: String,
    pub singular_units: String,
    pub plural_units: String,
    pub singular_bases: String,
    pub plural_bases: String,
}

impl ScalarFragments {
    /// Placeholder tokens paired with their fragment.
    pub fn placeholders(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("#Interfaces#", &self.interfaces),
            ("#SharedUnits#", &self.shared_units),
            ("#Convertible#", &self.convertible),
            ("#MagnitudeFromUnitDouble#", &self.magnitude_from_unit_double),
            ("#MagnitudeFromUnitScalar#", &self.magnitude_from_unit_scalar),
            ("#MagnitudeToUnit#", &self.magnitude_to_unit),
            ("#Bases#", &self.bases),
            ("#From#", &self.from),
            ("#Units#", &self.units),
            ("#Additive#", &self.additive),
            ("#Cancels#", &self.cancels),
            ("#ToVector#", &self.to_vector),
            ("#Powers#", &self.powers),
            ("#InversionOperatorDouble#", &self.inversion_operator_double),
            ("#InversionOperatorScalar#", &self.inversion_operator_scalar),
            ("#SingularUnits#", &self.singular_units),
            ("#PluralUnits#", &self.plural_units),
            ("#SingularBases#", &self.singular_bases),
            ("#PluralBases#", &self.plural_bases),
        ]
    }
}

/// Composes every fragment of a scalar quantity.
pub fn compose(catalogue: &Catalogue, name: &str, scalar: &ScalarDefinition) -> Result<ScalarFragments> {
    let (singular_units, plural_units) = unit_list_texts(&scalar.units);
    let (singular_bases, plural_bases) = unit_list_texts(scalar.bases());
    Ok(ScalarFragments {
        interfaces: compose_interfaces(catalogue, name, scalar)?,
        shared_units: compose_shared_units(scalar),
        convertible: compose_convertible(scalar),
        magnitude_from_unit_double: compose_magnitude_from_unit_double(scalar),
        magnitude_from_unit_scalar: compose_magnitude_from_unit_scalar(scalar),
        magnitude_to_unit: compose_magnitude_to_unit(scalar),
        bases: compose_bases(name, scalar),
        from: compose_from(catalogue, name, scalar)?,
        units: compose_units(name, scalar),
        additive: compose_additive(scalar),
        cancels: compose_cancels(scalar),
        to_vector: compose_to_vector(catalogue, name, scalar)?,
        powers: compose_powers(scalar),
        inversion_operator_double: compose_inversion_operator(name, scalar, "double", "DivideDoubleOperatorRHS"),
        inversion_operator_scalar: compose_inversion_operator(name, scalar, "Scalar", "DivideScalarOperatorRHS"),
        singular_units,
        plural_units,
        singular_bases,
        plural_bases,
    })
}

/// The associated vector and its dimensionalities, empty when there is none.
fn vector_dimensionalities<'a>(
    catalogue: &'a Catalogue,
    name: &'a str,
    scalar: &'a ScalarDefinition,
) -> Result<Option<(&'a str, &'a [u8])>> {
    match derive_vector_name(name, scalar) {
        Some(vector) => {
            let definition = catalogue.vector(name, "vector", vector)?;
            Ok(Some((vector, &definition.dimensionalities)))
        }
        None => Ok(None),
    }
}

/// Capability interfaces, one per line, without the final separator.
pub fn compose_interfaces(catalogue: &Catalogue, name: &str, scalar: &ScalarDefinition) -> Result<String> {
    let mut interfaces: Vec<String> = scalar
        .relations()
        .map(|(relation, related)| format!("{}<{related}>", relation.interface()))
        .collect();

    if scalar.additive {
        interfaces.push("IAddableScalarQuantity<#Quantity#, #Quantity#>".to_string());
    }
    if scalar.subtractive {
        interfaces.push("ISubtractableScalarQuantity<#Quantity#, #Quantity#>".to_string());
    }
    if scalar.cancels {
        interfaces.push("IDivisibleScalarQuantity<Scalar, #Quantity#>".to_string());
    }
    if let Some((vector, dimensionalities)) = vector_dimensionalities(catalogue, name, scalar)? {
        for dimensionality in dimensionalities {
            interfaces.push(format!(
                "IVector{dimensionality}izableScalarQuantity<{vector}{dimensionality}>"
            ));
        }
    }

    Ok(interfaces
        .iter()
        .map(|interface| format!("\t{interface}"))
        .collect::<Vec<_>>()
        .join(",\n"))
}

/// Named constants such as `OneMetre`, one per base unit.
pub fn compose_bases(name: &str, scalar: &ScalarDefinition) -> String {
    let unit = derive_unit_name(name, scalar);
    let mut text = String::new();
    for base in scalar.bases() {
        if base.separator {
            text.push('\n');
            continue;
        }
        let singular = &base.singular;
        text.push_str(&format!("\t#Document:One{singular}#\n"));
        text.push_str(&format!(
            "\tpublic static {name} One{singular} {{ get; }} = new(1, {unit}.{singular});\n"
        ));
    }
    text
}

/// Constructors from each related quantity, undoing the relation.
pub fn compose_from(catalogue: &Catalogue, name: &str, scalar: &ScalarDefinition) -> Result<String> {
    let mut text = String::new();
    for (relation, related) in scalar.relations() {
        let related_scalar = catalogue.scalar(name, relation.field(), related)?;
        let accessor = match related_scalar.si_unit() {
            Some(si) => format!("In{}", resolve_plural(&si.singular, &si.plural)),
            None => "Magnitude".to_string(),
        };
        let variable = lower_case_first(related)?;
        let magnitude = relation.inverse_operation(&format!("{variable}.{accessor}"));

        text.push_str(&format!("\t#Document:{}#\n", relation.from_tag()));
        text.push_str(&format!(
            "\tpublic static #Quantity# From({related} {variable}) => new({magnitude});\n"
        ));
    }
    Ok(text)
}

/// Accessors of the magnitude in each unit.
pub fn compose_units(name: &str, scalar: &ScalarDefinition) -> String {
    let unit = derive_unit_name(name, scalar);
    let mut text = String::new();
    for entry in &scalar.units {
        if entry.separator {
            text.push('\n');
            continue;
        }
        let plural = resolve_plural(&entry.singular, &entry.plural);
        text.push_str(&format!("\t#Document:In{plural}#\n"));
        text.push_str(&format!(
            "\tpublic Scalar In{plural} => InUnit({unit}.{});\n",
            entry.singular
        ));
    }
    text
}

/// Methods producing each related quantity.
pub fn compose_powers(scalar: &ScalarDefinition) -> String {
    let mut text = String::new();
    for (relation, related) in scalar.relations() {
        let method = relation.method();
        text.push_str(&format!("\t#Document:{method}#\n"));
        text.push_str(&format!("\tpublic {related} {method}() => {related}.From(this);\n"));
    }
    text
}

/// `x / quantity` operator for an invertible quantity, with `left` as type of `x`.
pub fn compose_inversion_operator(name: &str, scalar: &ScalarDefinition, left: &str, tag: &str) -> String {
    match scalar.relation(PowerRelation::Invert) {
        Some(inverse) => format!(
            "\t#Document:{tag}#\n\tpublic static {inverse} operator /({left} x, {name} y) => x * y.Invert();\n"
        ),
        None => String::new(),
    }
}

pub fn compose_magnitude_from_unit_double(scalar: &ScalarDefinition) -> String {
    if scalar.unit_bias {
        "(magnitude * #UnitVariable#.Prefix.Scale + #UnitVariable#.Bias) * #UnitVariable#.BaseScale".to_string()
    } else {
        "magnitude * #UnitVariable#.Factor".to_string()
    }
}

pub fn compose_magnitude_from_unit_scalar(scalar: &ScalarDefinition) -> String {
    if scalar.unit_bias {
        "(magnitude.Magnitude * #UnitVariable#.Prefix.Scale + #UnitVariable#.Bias) * #UnitVariable#.BaseScale"
            .to_string()
    } else {
        "magnitude.Magnitude * #UnitVariable#.Factor".to_string()
    }
}

pub fn compose_magnitude_to_unit(scalar: &ScalarDefinition) -> String {
    if scalar.unit_bias {
        "(magnitude / #UnitVariable#.BaseScale - #UnitVariable#.Bias) / #UnitVariable#.Prefix.Scale".to_string()
    } else {
        "magnitude / #UnitVariable#.Factor".to_string()
    }
}

/// `As<Other>` accessors for quantities sharing the unit.
pub fn compose_shared_units(scalar: &ScalarDefinition) -> String {
    scalar
        .shares_unit
        .iter()
        .map(|shared| format!("\tpublic {shared} As{shared} => new(Magnitude);\n"))
        .collect()
}

/// Documented `As<Other>` accessors for quantities sharing the unit.
pub fn compose_convertible(scalar: &ScalarDefinition) -> String {
    let mut text = String::new();
    for shared in &scalar.shares_unit {
        text.push_str(&format!("\t#Document:AsShared(quantity = #Quantity#, sharedQuantity = {shared})#\n"));
        text.push_str(&format!("\tpublic {shared} As{shared} => new(Magnitude);\n"));
    }
    text
}

/// Add and subtract methods and operators, each governed by its own flag.
pub fn compose_additive(scalar: &ScalarDefinition) -> String {
    let mut text = String::new();
    if scalar.additive {
        text.push_str("\t#Document:AddMethod#\n");
        text.push_str("\tpublic #Quantity# Add(#Quantity# term) => new(Magnitude + term.Magnitude);\n");
    }
    if scalar.subtractive {
        text.push_str("\t#Document:SubtractMethod#\n");
        text.push_str("\tpublic #Quantity# Subtract(#Quantity# term) => new(Magnitude - term.Magnitude);\n");
    }
    if scalar.additive {
        text.push_str("\t#Document:AddOperator#\n");
        text.push_str("\tpublic static #Quantity# operator +(#Quantity# x, #Quantity# y) => x.Add(y);\n");
    }
    if scalar.subtractive {
        text.push_str("\t#Document:SubtractOperator#\n");
        text.push_str("\tpublic static #Quantity# operator -(#Quantity# x, #Quantity# y) => x.Subtract(y);\n");
    }
    text
}

/// Division of two values of the quantity into a plain `Scalar`.
pub fn compose_cancels(scalar: &ScalarDefinition) -> String {
    if !scalar.cancels {
        return String::new();
    }
    [
        "\t#Document:CancelsMethod#\n",
        "\tpublic Scalar Divide(#Quantity# divisor) => new(Magnitude / divisor.Magnitude);\n",
        "\t#Document:CancelsOperator#\n",
        "\tpublic static Scalar operator /(#Quantity# x, #Quantity# y) => x.Divide(y);\n",
    ]
    .concat()
}

/// Multiplication with plain vectors and tuples into the associated vector quantity.
pub fn compose_to_vector(catalogue: &Catalogue, name: &str, scalar: &ScalarDefinition) -> Result<String> {
    let Some((vector, dimensionalities)) = vector_dimensionalities(catalogue, name, scalar)? else {
        return Ok(String::new());
    };

    let mut methods = String::new();
    let mut operators = String::new();
    for &dimensionality in dimensionalities {
        let target = format!("{vector}{dimensionality}");
        let axes: Vec<String> = axis_names(dimensionality).iter().map(|axis| axis.to_lowercase()).collect();
        let tuple = axes.iter().map(|axis| format!("double {axis}")).collect::<Vec<_>>().join(", ");
        let scaled = axes
            .iter()
            .map(|axis| format!("Magnitude * vector.{axis}"))
            .collect::<Vec<_>>()
            .join(", ");

        methods.push_str(&format!("\t#Document:MultiplyVector{dimensionality}Method#\n"));
        methods.push_str(&format!(
            "\tpublic {target} Multiply(Vector{dimensionality} vector) #newline#=> new(vector * Magnitude);\n"
        ));
        methods.push_str(&format!("\t#Document:MultiplyTuple{dimensionality}Method#\n"));
        methods.push_str(&format!(
            "\tpublic {target} Multiply(({tuple}) vector) #newline#=> new({scaled});\n"
        ));

        operators.push_str(&format!("\t#Document:MultiplyVector{dimensionality}OperatorLHS#\n"));
        operators.push_str(&format!(
            "\tpublic static {target} operator *(#Quantity# a, Vector{dimensionality} b) #newline#=> a.Multiply(b);\n"
        ));
        operators.push_str(&format!("\t#Document:MultiplyVector{dimensionality}OperatorRHS#\n"));
        operators.push_str(&format!(
            "\tpublic static {target} operator *(Vector{dimensionality} a, #Quantity# b) #newline#=> b.Multiply(a);\n"
        ));
        operators.push_str(&format!("\t#Document:MultiplyTuple{dimensionality}OperatorLHS#\n"));
        operators.push_str(&format!(
            "\tpublic static {target} operator *(#Quantity# a, ({tuple}) b) #newline#=> a.Multiply(b);\n"
        ));
        operators.push_str(&format!("\t#Document:MultiplyTuple{dimensionality}OperatorRHS#\n"));
        operators.push_str(&format!(
            "\tpublic static {target} operator *(({tuple}) a, #Quantity# b) #newline#=> b.Multiply(a);\n"
        ));
    }
    Ok(methods + &operators)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{BaseList, QuantityRef, Symbol, UnitEntry, UnitName, VectorDefinition};

    fn length() -> ScalarDefinition {
        let mut length = ScalarDefinition::new(UnitName::Named("UnitOfLength".into()), Symbol::Literal("l".into()));
        length.si = Some("Metre".into());
        length.units = vec![
            UnitEntry::new("Metre", "+s"),
            UnitEntry::separator(),
            UnitEntry::new("Foot", "[oo]+=ee"),
        ];
        length
    }

    fn catalogue() -> Catalogue {
        let mut catalogue = Catalogue::default();
        let mut length = length();
        length.square = Some("Area".into());
        length.vector = Some(QuantityRef::Named("Displacement".into()));
        catalogue.scalars.insert("Length".into(), length);

        let mut area = ScalarDefinition::new(UnitName::Derived, Symbol::Literal("A".into()));
        area.si = Some("SquareMetre".into());
        area.units = vec![UnitEntry::new("SquareMetre", "+s")];
        area.square_root = Some("Length".into());
        catalogue.scalars.insert("Area".into(), area);

        let mut displacement = VectorDefinition::new(UnitName::Named("UnitOfLength".into()), Symbol::Literal("d".into()));
        displacement.dimensionalities = vec![2, 3];
        catalogue.vectors.insert("Displacement".into(), displacement);
        catalogue
    }

    #[test]
    fn additive_only_emits_add_fragments() {
        let mut scalar = length();
        scalar.additive = true;
        let text = compose_additive(&scalar);
        assert!(text.contains("Add(#Quantity# term)"));
        assert!(text.contains("operator +("));
        assert!(!text.contains("Subtract"));
        assert_eq!(text.matches("#Document:").count(), 2);
    }

    #[test]
    fn additive_combinations() {
        let mut scalar = length();
        assert_eq!(compose_additive(&scalar), "");

        scalar.subtractive = true;
        let text = compose_additive(&scalar);
        assert!(text.contains("Subtract(#Quantity# term)"));
        assert!(text.contains("operator -("));
        assert!(!text.contains("Add"));

        scalar.additive = true;
        let text = compose_additive(&scalar);
        let order: Vec<_> = ["AddMethod", "SubtractMethod", "AddOperator", "SubtractOperator"]
            .iter()
            .map(|tag| text.find(tag).unwrap())
            .collect();
        assert!(order.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn interfaces_join_without_trailing_separator() {
        let catalogue = catalogue();
        let mut scalar = catalogue.scalars["Length"].clone();
        scalar.additive = true;
        let text = compose_interfaces(&catalogue, "Length", &scalar).unwrap();
        assert_eq!(
            text,
            "\tISquarableScalarQuantity<Area>,\n\tIAddableScalarQuantity<#Quantity#, #Quantity#>,\n\tIVector2izableScalarQuantity<Displacement2>,\n\tIVector3izableScalarQuantity<Displacement3>"
        );

        assert_eq!(compose_interfaces(&catalogue, "Length", &length()).unwrap(), "");
    }

    #[test]
    fn bases_and_units_handle_separators() {
        let mut scalar = length();
        scalar.bases = BaseList::Listed(vec![UnitEntry::new("Metre", "+s")]);
        assert_eq!(
            compose_bases("Length", &scalar),
            "\t#Document:OneMetre#\n\tpublic static Length OneMetre { get; } = new(1, UnitOfLength.Metre);\n"
        );

        let units = compose_units("Length", &scalar);
        assert_eq!(
            units,
            "\t#Document:InMetres#\n\tpublic Scalar InMetres => InUnit(UnitOfLength.Metre);\n\n\t#Document:InFeet#\n\tpublic Scalar InFeet => InUnit(UnitOfLength.Foot);\n"
        );
    }

    #[test]
    fn from_applies_the_inverse_operation() {
        let catalogue = catalogue();
        let text = compose_from(&catalogue, "Length", &catalogue.scalars["Length"]).unwrap();
        assert_eq!(
            text,
            "\t#Document:FromSquare#\n\tpublic static #Quantity# From(Area area) => new(Math.Sqrt(area.InSquareMetres));\n"
        );

        let text = compose_from(&catalogue, "Area", &catalogue.scalars["Area"]).unwrap();
        assert!(text.contains("new(Math.Pow(length.InMetres, 2))"));
        assert!(text.contains("#Document:FromSquareRoot#"));
    }

    #[test]
    fn powers_delegate_to_related_quantity() {
        let catalogue = catalogue();
        assert_eq!(
            compose_powers(&catalogue.scalars["Length"]),
            "\t#Document:Square#\n\tpublic Area Square() => Area.From(this);\n"
        );
    }

    #[test]
    fn inversion_operators_need_invert() {
        let mut scalar = length();
        assert_eq!(compose_inversion_operator("Length", &scalar, "double", "DivideDoubleOperatorRHS"), "");
        scalar.invert = Some("SpatialFrequency".into());
        assert_eq!(
            compose_inversion_operator("Length", &scalar, "Scalar", "DivideScalarOperatorRHS"),
            "\t#Document:DivideScalarOperatorRHS#\n\tpublic static SpatialFrequency operator /(Scalar x, Length y) => x * y.Invert();\n"
        );
    }

    #[test]
    fn cancels_emits_terminated_operator() {
        let mut scalar = length();
        assert_eq!(compose_cancels(&scalar), "");
        scalar.cancels = true;
        assert!(compose_cancels(&scalar).ends_with("=> x.Divide(y);\n"));
    }

    #[test]
    fn to_vector_emits_six_members_per_dimensionality() {
        let catalogue = catalogue();
        let text = compose_to_vector(&catalogue, "Length", &catalogue.scalars["Length"]).unwrap();
        assert_eq!(text.matches("public").count(), 12);
        assert!(text.contains("\tpublic Displacement2 Multiply((double x, double y) vector) #newline#=> new(Magnitude * vector.x, Magnitude * vector.y);\n"));
        assert!(text.contains("operator *((double x, double y, double z) a, #Quantity# b)"));
        assert!(text.find("MultiplyTuple3Method").unwrap() < text.find("MultiplyVector2OperatorLHS").unwrap());

        assert_eq!(compose_to_vector(&catalogue, "Area", &catalogue.scalars["Area"]).unwrap(), "");
    }

    #[test]
    fn magnitude_conversions_follow_bias() {
        let mut scalar = length();
        assert_eq!(compose_magnitude_to_unit(&scalar), "magnitude / #UnitVariable#.Factor");
        scalar.unit_bias = true;
        assert!(compose_magnitude_from_unit_double(&scalar).contains("#UnitVariable#.Bias"));
        assert!(compose_magnitude_from_unit_scalar(&scalar).starts_with("(magnitude.Magnitude"));
    }

    #[test]
    fn shared_units() {
        let mut scalar = length();
        scalar.shares_unit = vec!["Distance".into()];
        assert_eq!(compose_shared_units(&scalar), "\tpublic Distance AsDistance => new(Magnitude);\n");
    }

    #[test]
    fn composes_unit_lists() {
        let catalogue = catalogue();
        let fragments = compose(&catalogue, "Length", &catalogue.scalars["Length"]).unwrap();
        assert_eq!(fragments.singular_units, "[Metre, Foot]");
        assert_eq!(fragments.plural_units, "[Metres, Feet]");
        assert_eq!(fragments.placeholders().len(), 19);
    }

    #[test]
    fn composes_base_lists() {
        let mut catalogue = catalogue();
        let fragments = compose(&catalogue, "Length", &catalogue.scalars["Length"]).unwrap();
        assert_eq!(fragments.singular_bases, "[Metre, Foot]");
        assert_eq!(fragments.plural_bases, "[Metres, Feet]");

        if let Some(length) = catalogue.scalars.get_mut("Length") {
            length.bases = BaseList::Listed(vec![UnitEntry::new("Foot", "[oo]+=ee")]);
        }
        let fragments = compose(&catalogue, "Length", &catalogue.scalars["Length"]).unwrap();
        assert_eq!(fragments.singular_bases, "[Foot]");
        assert_eq!(fragments.plural_bases, "[Feet]");
    }

    #[test]
    fn convertible_accessors_are_documented() {
        let mut scalar = length();
        assert_eq!(compose_convertible(&scalar), "");
        scalar.shares_unit = vec!["Distance".into()];
        assert_eq!(
            compose_convertible(&scalar),
            "\t#Document:AsShared(quantity = #Quantity#, sharedQuantity = Distance)#\n\tpublic Distance AsDistance => new(Magnitude);\n"
        );
    }
}
