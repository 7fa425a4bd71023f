use std::path::Path;

use crate::error::{Error, Result};

/// Extension trait for Path to provide convenient string conversion methods
pub trait PathExt {
    /// Returns the file name without its last extension.
    ///
    /// Documentation sources are keyed by this stem, so `docs/Length.txt` belongs to `Length`.
    ///
    /// # Examples
    /// ```
    /// use quantigen::ext::PathExt;
    /// use std::path::Path;
    ///
    /// assert_eq!(Path::new("docs/Length.txt").file_stem_checked().unwrap(), "Length");
    /// ```
    fn file_stem_checked(&self) -> Result<&str>;

    /// Whether the path ends in the given extension, compared case-insensitively.
    fn has_extension(&self, extension: &str) -> bool;

    /// Converts a path to a String using display(), which always succeeds
    /// but may use replacement characters for invalid Unicode.
    fn display_string(&self) -> String;
}

impl PathExt for Path {
    fn file_stem_checked(&self) -> Result<&str> {
        let stem = self.file_stem().ok_or_else(|| {
            Error::InvalidInput(format!("'{}' does not name a file", self.display()))
        })?;
        stem.to_str().ok_or_else(|| {
            Error::Other(anyhow::anyhow!(
                "File name of '{}' contains invalid Unicode characters",
                self.display()
            ))
        })
    }

    fn has_extension(&self, extension: &str) -> bool {
        self.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
    }

    fn display_string(&self) -> String {
        self.display().to_string()
    }
}
