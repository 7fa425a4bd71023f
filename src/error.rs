use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON catalogue. Original error: {0}")]
    JSONParseError(#[from] serde_json::Error),

    #[error("Failed to parse YAML catalogue. Original error: {0}")]
    YAMLParseError(#[from] serde_yaml::Error),

    #[error("Failed to walk documentation directory. Original error: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Invalid pattern. Original error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Invalid input: {0}.")]
    InvalidInput(String),

    #[error("Invalid catalogue: {0}.")]
    InvalidCatalogue(String),

    /// A reference in the catalogue names a quantity that is not defined.
    #[error("Quantity '{quantity}' refers to unknown {section} quantity '{reference}' through '{field}'.")]
    UnknownQuantity { quantity: String, field: String, section: String, reference: String },

    #[error("Cannot proceed: destination directory '{destination}' is not empty. Use --destroy to replace its contents.")]
    DestinationNotEmpty { destination: String },

    #[error("Template '{template}' uses unknown section '{section}'.")]
    UnknownSection { template: String, section: String },

    #[error("Template for '{quantity}' has unresolved placeholders: {placeholders}.")]
    UnresolvedPlaceholder { quantity: String, placeholders: String },

    /// Expansion kept finding tags after the pass limit, which means a tag refers to itself.
    #[error("Documentation of '{quantity}' did not converge after {passes} passes; a documentation tag is probably cyclic.")]
    DocumentationPassLimit { quantity: String, passes: usize },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias for Results with quantigen's Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
