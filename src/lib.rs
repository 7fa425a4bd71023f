/// Handles argument parsing.
pub mod cli;

/// Defines custom error types.
pub mod error;

/// Constants used throughout quantigen.
pub mod constants;

/// Quantity catalogue model, loading and validation.
pub mod catalogue;

/// Name derivation shared by the fragment composers.
pub mod naming;

/// Code fragments composed from catalogue entries.
pub mod compose;

/// Documentation lookup and tag expansion.
pub mod documentation;

/// Line wrapping, blank-line collapse and line endings.
pub mod format;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// Core template processing orchestration.
pub mod template;

/// Extension traits for standard library types.
pub mod ext;
