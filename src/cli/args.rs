use crate::constants::{
    exit_codes, verbosity, DEFAULT_DEFINITIONS, DEFAULT_DESTINATION, DEFAULT_DOCUMENTATION,
    DEFAULT_EXTENSION, DEFAULT_SCALAR_TEMPLATE, DEFAULT_VECTOR_TEMPLATE,
};
use crate::format::LineEnding;
use clap::{error::ErrorKind, CommandFactory, Parser};
use log::LevelFilter;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// CLI arguments for quantigen.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory receiving the generated files; its previous contents are replaced.
    #[arg(long, default_value = DEFAULT_DESTINATION)]
    pub destination: PathBuf,

    /// Quantity catalogue (`.yaml`, `.yml` or `.json`).
    #[arg(long, default_value = DEFAULT_DEFINITIONS)]
    pub definitions: PathBuf,

    /// Template of scalar quantities.
    #[arg(long = "scalarTemplate", alias = "scalar-template", default_value = DEFAULT_SCALAR_TEMPLATE)]
    pub scalar_template: PathBuf,

    /// Template of vector quantities.
    #[arg(long = "vectorTemplate", alias = "vector-template", default_value = DEFAULT_VECTOR_TEMPLATE)]
    pub vector_template: PathBuf,

    /// Directory of documentation sources.
    #[arg(long, default_value = DEFAULT_DOCUMENTATION)]
    pub documentation: PathBuf,

    /// Allow replacing a destination that is not empty.
    #[arg(long)]
    pub destroy: bool,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Generate and report without touching the filesystem.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Line terminator of generated files.
    #[arg(long = "line-endings", value_enum, default_value_t = LineEnding::Lf)]
    pub line_endings: LineEnding,

    /// Extension of generated files.
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    pub extension: String,
}

/// Parse command line arguments with custom handling for missing required inputs.
pub fn get_args() -> Args {
    Args::try_parse().unwrap_or_else(|e| {
        if e.kind() == ErrorKind::MissingRequiredArgument {
            let mut command = Args::command().help_template(HELP_TEMPLATE);
            if let Err(print_err) = command.print_help() {
                eprintln!("Failed to display help information: {print_err}");
            } else {
                println!();
            }
            std::process::exit(exit_codes::FAILURE);
        } else {
            e.exit();
        }
    })
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_verbose_flags_to_log_filters() {
        assert_eq!(get_log_level_from_verbose(verbosity::OFF), LevelFilter::Error);
        assert_eq!(get_log_level_from_verbose(verbosity::INFO), LevelFilter::Info);
        assert_eq!(get_log_level_from_verbose(verbosity::DEBUG), LevelFilter::Debug);
        assert_eq!(get_log_level_from_verbose(verbosity::TRACE), LevelFilter::Trace);
        assert_eq!(get_log_level_from_verbose(verbosity::TRACE + 1), LevelFilter::Trace);
    }

    #[test]
    fn defaults_point_at_generation_directory() {
        let args = Args::parse_from(["quantigen"]);
        assert_eq!(args.destination, PathBuf::from("generated"));
        assert_eq!(args.definitions, PathBuf::from("generation/definitions.yaml"));
        assert_eq!(args.scalar_template, PathBuf::from("generation/templates/Scalar.txt"));
        assert_eq!(args.vector_template, PathBuf::from("generation/templates/Vector.txt"));
        assert_eq!(args.documentation, PathBuf::from("generation/documentation"));
        assert_eq!(args.extension, "g.cs");
        assert_eq!(args.line_endings, LineEnding::Lf);
        assert!(!args.destroy);
        assert!(!args.dry_run);
    }

    #[test]
    fn parses_full_feature_flags() {
        let args = Args::parse_from([
            "quantigen",
            "--destination",
            "out",
            "--definitions",
            "defs.json",
            "--scalarTemplate",
            "s.txt",
            "--vector-template",
            "v.txt",
            "--documentation",
            "docs",
            "--destroy",
            "-vvv",
            "--dry-run",
            "--line-endings",
            "crlf",
            "--extension",
            "cs",
        ]);
        assert_eq!(args.destination, PathBuf::from("out"));
        assert_eq!(args.definitions, PathBuf::from("defs.json"));
        assert_eq!(args.scalar_template, PathBuf::from("s.txt"));
        assert_eq!(args.vector_template, PathBuf::from("v.txt"));
        assert_eq!(args.documentation, PathBuf::from("docs"));
        assert!(args.destroy);
        assert_eq!(args.verbose, 3);
        assert!(args.dry_run);
        assert_eq!(args.line_endings, LineEnding::Crlf);
        assert_eq!(args.extension, "cs");
    }

    #[test]
    fn rejects_unknown_line_ending() {
        assert!(Args::try_parse_from(["quantigen", "--line-endings", "cr"]).is_err());
    }
}
