//! Quantity definitions as they appear in a catalogue file

use crate::constants::sentinels;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Name of the unit type a quantity is expressed in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum UnitName {
    /// `[UnitOf]`: `UnitOf` followed by the quantity name.
    Derived,
    /// `[component]`: the unit of the vector's component quantity.
    Component,
    Named(String),
}

impl From<String> for UnitName {
    fn from(value: String) -> Self {
        match value.as_str() {
            sentinels::UNIT_OF => UnitName::Derived,
            sentinels::COMPONENT => UnitName::Component,
            _ => UnitName::Named(value),
        }
    }
}

/// Abbreviation shown in formatted output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Symbol {
    /// `[baseUnits]`: the `baseUnits` field of the quantity.
    BaseUnits,
    /// `[component]`: the symbol of the vector's component quantity.
    Component,
    Literal(String),
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        match value.as_str() {
            sentinels::BASE_UNITS => Symbol::BaseUnits,
            sentinels::COMPONENT => Symbol::Component,
            _ => Symbol::Literal(value),
        }
    }
}

/// A single unit a quantity can be expressed in, or a visual gap between units.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UnitEntry {
    #[serde(default)]
    pub singular: String,
    /// Plural pattern, see [`crate::naming::resolve_plural`].
    #[serde(default = "get_default_plural")]
    pub plural: String,
    #[serde(default)]
    pub separator: bool,
}

impl UnitEntry {
    pub fn new(singular: &str, plural: &str) -> Self {
        Self { singular: singular.to_string(), plural: plural.to_string(), separator: false }
    }

    pub fn separator() -> Self {
        Self { singular: String::new(), plural: get_default_plural(), separator: true }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntries {
    Sentinel(String),
    Listed(Vec<UnitEntry>),
}

/// Units of a vector quantity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawEntries")]
pub enum UnitList {
    /// `[component]`: the units of the component quantity.
    Component,
    Listed(Vec<UnitEntry>),
}

impl TryFrom<RawEntries> for UnitList {
    type Error = String;

    fn try_from(value: RawEntries) -> Result<Self, Self::Error> {
        match value {
            RawEntries::Sentinel(s) if s == sentinels::COMPONENT => Ok(UnitList::Component),
            RawEntries::Sentinel(s) => {
                Err(format!("expected a list of units or '{}', found '{s}'", sentinels::COMPONENT))
            }
            RawEntries::Listed(units) => Ok(UnitList::Listed(units)),
        }
    }
}

impl Default for UnitList {
    fn default() -> Self {
        UnitList::Listed(Vec::new())
    }
}

/// Units that get a named constant such as `OneMetre`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(try_from = "RawEntries")]
pub enum BaseList {
    /// `[units]`
    #[default]
    SameAsUnits,
    Listed(Vec<UnitEntry>),
}

impl TryFrom<RawEntries> for BaseList {
    type Error = String;

    fn try_from(value: RawEntries) -> Result<Self, Self::Error> {
        match value {
            RawEntries::Sentinel(s) if s == sentinels::UNITS => Ok(BaseList::SameAsUnits),
            RawEntries::Sentinel(s) => {
                Err(format!("expected a list of units or '{}', found '{s}'", sentinels::UNITS))
            }
            RawEntries::Listed(units) => Ok(BaseList::Listed(units)),
        }
    }
}

/// Reference from one quantity to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityRef {
    /// `[name]`: the quantity with the same name in the other section.
    SameName,
    Named(String),
}

impl QuantityRef {
    /// Name of the referenced quantity, given the name of the quantity holding the reference.
    pub fn resolve<'a>(&'a self, owner: &'a str) -> &'a str {
        match self {
            QuantityRef::SameName => owner,
            QuantityRef::Named(name) => name,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawReference {
    Name(String),
    Flag(bool),
}

/// Accepts a name, `false` or `null`.
fn optional_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Option::<RawReference>::deserialize(deserializer)? {
        Some(RawReference::Name(name)) if !name.is_empty() => Ok(Some(name)),
        Some(RawReference::Name(_)) | Some(RawReference::Flag(false)) | None => Ok(None),
        Some(RawReference::Flag(true)) => {
            Err(D::Error::custom("expected a quantity name or 'false', found 'true'"))
        }
    }
}

fn optional_ref<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<QuantityRef>, D::Error> {
    Ok(optional_name(deserializer)?.map(|name| {
        if name == sentinels::NAME {
            QuantityRef::SameName
        } else {
            QuantityRef::Named(name)
        }
    }))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBias {
    Flag(bool),
    Sentinel(String),
}

/// Whether a vector's unit carries a bias term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawBias")]
pub enum UnitBias {
    Fixed(bool),
    /// `[component]`: same as the component quantity.
    Component,
}

impl TryFrom<RawBias> for UnitBias {
    type Error = String;

    fn try_from(value: RawBias) -> Result<Self, Self::Error> {
        match value {
            RawBias::Flag(flag) => Ok(UnitBias::Fixed(flag)),
            RawBias::Sentinel(s) if s == sentinels::COMPONENT => Ok(UnitBias::Component),
            RawBias::Sentinel(s) => {
                Err(format!("expected a boolean or '{}', found '{s}'", sentinels::COMPONENT))
            }
        }
    }
}

impl Default for UnitBias {
    fn default() -> Self {
        UnitBias::Fixed(false)
    }
}

/// Power and inverse relationships between scalar quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerRelation {
    Invert,
    Square,
    Cube,
    SquareRoot,
    CubeRoot,
}

impl PowerRelation {
    pub const ALL: [PowerRelation; 5] = [
        PowerRelation::Invert,
        PowerRelation::Square,
        PowerRelation::Cube,
        PowerRelation::SquareRoot,
        PowerRelation::CubeRoot,
    ];

    /// Catalogue field holding the relation.
    pub fn field(self) -> &'static str {
        match self {
            PowerRelation::Invert => "invert",
            PowerRelation::Square => "square",
            PowerRelation::Cube => "cube",
            PowerRelation::SquareRoot => "squareRoot",
            PowerRelation::CubeRoot => "cubeRoot",
        }
    }

    /// Method name, also used as documentation tag.
    pub fn method(self) -> &'static str {
        match self {
            PowerRelation::Invert => "Invert",
            PowerRelation::Square => "Square",
            PowerRelation::Cube => "Cube",
            PowerRelation::SquareRoot => "SquareRoot",
            PowerRelation::CubeRoot => "CubeRoot",
        }
    }

    /// Capability interface implemented by a quantity having this relation.
    pub fn interface(self) -> &'static str {
        match self {
            PowerRelation::Invert => "IInvertibleScalarQuantity",
            PowerRelation::Square => "ISquarableScalarQuantity",
            PowerRelation::Cube => "ICubableScalarQuantity",
            PowerRelation::SquareRoot => "ISquareRootableScalarQuantity",
            PowerRelation::CubeRoot => "ICubeRootableScalarQuantity",
        }
    }

    /// Documentation tag of the constructor from the related quantity.
    pub fn from_tag(self) -> &'static str {
        match self {
            PowerRelation::Invert => "FromInverse",
            PowerRelation::Square => "FromSquare",
            PowerRelation::Cube => "FromCube",
            PowerRelation::SquareRoot => "FromSquareRoot",
            PowerRelation::CubeRoot => "FromCubeRoot",
        }
    }

    /// Wraps `operand` in the operation undoing this relation.
    ///
    /// A quantity whose square is `Area` is built from an `Area` by taking a square root.
    pub fn inverse_operation(self, operand: &str) -> String {
        match self {
            PowerRelation::Invert => format!("1 / {operand}"),
            PowerRelation::Square => format!("Math.Sqrt({operand})"),
            PowerRelation::Cube => format!("Math.Cbrt({operand})"),
            PowerRelation::SquareRoot => format!("Math.Pow({operand}, 2)"),
            PowerRelation::CubeRoot => format!("Math.Pow({operand}, 3)"),
        }
    }
}

/// Definition of a scalar quantity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalarDefinition {
    pub unit: UnitName,
    pub symbol: Symbol,
    #[serde(default)]
    pub base_units: Option<String>,
    /// Singular name of the SI unit.
    #[serde(rename = "SI", default, deserialize_with = "optional_name")]
    pub si: Option<String>,
    #[serde(default)]
    pub units: Vec<UnitEntry>,
    #[serde(default)]
    pub bases: BaseList,
    #[serde(default, deserialize_with = "optional_name")]
    pub invert: Option<String>,
    #[serde(default, deserialize_with = "optional_name")]
    pub square: Option<String>,
    #[serde(default, deserialize_with = "optional_name")]
    pub cube: Option<String>,
    #[serde(default, deserialize_with = "optional_name")]
    pub square_root: Option<String>,
    #[serde(default, deserialize_with = "optional_name")]
    pub cube_root: Option<String>,
    #[serde(default)]
    pub additive: bool,
    #[serde(default)]
    pub subtractive: bool,
    #[serde(default)]
    pub cancels: bool,
    #[serde(default)]
    pub unit_bias: bool,
    #[serde(default)]
    pub shares_unit: Vec<String>,
    #[serde(default, deserialize_with = "optional_ref")]
    pub vector: Option<QuantityRef>,
}

impl ScalarDefinition {
    /// Creates a definition with the given unit and symbol and every optional field unset.
    pub fn new(unit: UnitName, symbol: Symbol) -> Self {
        Self {
            unit,
            symbol,
            base_units: None,
            si: None,
            units: Vec::new(),
            bases: BaseList::default(),
            invert: None,
            square: None,
            cube: None,
            square_root: None,
            cube_root: None,
            additive: false,
            subtractive: false,
            cancels: false,
            unit_bias: false,
            shares_unit: Vec::new(),
            vector: None,
        }
    }

    /// The quantity related through `relation`, if any.
    pub fn relation(&self, relation: PowerRelation) -> Option<&str> {
        match relation {
            PowerRelation::Invert => self.invert.as_deref(),
            PowerRelation::Square => self.square.as_deref(),
            PowerRelation::Cube => self.cube.as_deref(),
            PowerRelation::SquareRoot => self.square_root.as_deref(),
            PowerRelation::CubeRoot => self.cube_root.as_deref(),
        }
    }

    /// Every set relation with the related quantity, in declaration order.
    pub fn relations(&self) -> impl Iterator<Item = (PowerRelation, &str)> {
        PowerRelation::ALL
            .into_iter()
            .filter_map(|relation| self.relation(relation).map(|name| (relation, name)))
    }

    /// Units that get a named constant.
    pub fn bases(&self) -> &[UnitEntry] {
        match &self.bases {
            BaseList::SameAsUnits => &self.units,
            BaseList::Listed(bases) => bases,
        }
    }

    /// The unit entry designated as SI unit.
    pub fn si_unit(&self) -> Option<&UnitEntry> {
        let si = self.si.as_deref()?;
        self.units.iter().find(|unit| !unit.separator && unit.singular == si)
    }
}

/// Definition of a vector quantity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorDefinition {
    #[serde(default)]
    pub dimensionalities: Vec<u8>,
    #[serde(default, deserialize_with = "optional_ref")]
    pub component: Option<QuantityRef>,
    pub unit: UnitName,
    pub symbol: Symbol,
    #[serde(default)]
    pub units: UnitList,
    #[serde(default)]
    pub unit_bias: UnitBias,
    #[serde(default)]
    pub additive: bool,
    #[serde(default)]
    pub subtractive: bool,
    #[serde(default)]
    pub shares_unit: Vec<String>,
}

impl VectorDefinition {
    /// Creates a definition with the given unit and symbol and every optional field unset.
    pub fn new(unit: UnitName, symbol: Symbol) -> Self {
        Self {
            dimensionalities: Vec::new(),
            component: None,
            unit,
            symbol,
            units: UnitList::default(),
            unit_bias: UnitBias::default(),
            additive: false,
            subtractive: false,
            shares_unit: Vec::new(),
        }
    }

    /// Whether any field delegates to the component quantity.
    pub fn inherits_from_component(&self) -> bool {
        self.unit == UnitName::Component
            || self.symbol == Symbol::Component
            || self.units == UnitList::Component
            || self.unit_bias == UnitBias::Component
    }
}

fn get_default_plural() -> String {
    sentinels::IDENTICAL_PLURAL.to_string()
}
