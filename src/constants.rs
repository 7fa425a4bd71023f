//! Constants used throughout quantigen

/// Default destination directory for generated files
pub const DEFAULT_DESTINATION: &str = "generated";

/// Default location of the quantity catalogue
pub const DEFAULT_DEFINITIONS: &str = "generation/definitions.yaml";

/// Default scalar template
pub const DEFAULT_SCALAR_TEMPLATE: &str = "generation/templates/Scalar.txt";

/// Default vector template
pub const DEFAULT_VECTOR_TEMPLATE: &str = "generation/templates/Vector.txt";

/// Default directory holding the documentation sources
pub const DEFAULT_DOCUMENTATION: &str = "generation/documentation";

/// Default extension of generated files
pub const DEFAULT_EXTENSION: &str = "g.cs";

/// Extension of documentation source files
pub const DOCUMENTATION_EXTENSION: &str = "txt";

/// Name of the documentation source used when a quantity has no own entry
pub const GENERIC_DOCUMENTATION: &str = "Generic";

/// Column budget used when wrapping at break markers
pub const LINE_WIDTH: usize = 175;

/// Upper bound on documentation passes before expansion is considered cyclic
pub const DOCUMENTATION_PASS_LIMIT: usize = 50;

/// Indentation replacing each tab of the templates
pub const INDENT: &str = "    ";

/// Comment prefix of documentation lines in generated files
pub const COMMENT_PREFIX: &str = "/// ";

/// Markers recognised in templates and documentation sources
pub mod markers {
    pub const NEWLINE: &str = "#newline#";
    pub const DOCUMENT: &str = "#Document:";
    pub const DOCUMENT_END: &str = "#/Document:";
    pub const PARAM: &str = "#Param:";
    pub const PARAMETER_NOT_SPECIFIED: &str = "ParameterNotSpecified";
}

/// Sentinels used by the catalogue in place of explicit values
pub mod sentinels {
    pub const UNIT_OF: &str = "[UnitOf]";
    pub const NAME: &str = "[name]";
    pub const COMPONENT: &str = "[component]";
    pub const BASE_UNITS: &str = "[baseUnits]";
    pub const UNITS: &str = "[units]";
    pub const IDENTICAL_PLURAL: &str = "=";
}

/// Exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
