use crate::constants::{DOCUMENTATION_EXTENSION, GENERIC_DOCUMENTATION};
use crate::error::{Error, Result};
use crate::ext::PathExt;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Trait for reading raw documentation text from different sources.
pub trait DocumentationSource {
    /// Loads the documentation text of a quantity.
    ///
    /// # Returns
    /// * `Ok(None)` - If the quantity has no documentation of its own
    fn load(&self, quantity: &str) -> Result<Option<String>>;

    /// Loads the generic text consulted when a quantity lacks a tag.
    fn load_generic(&self) -> Result<Option<String>>;
}

/// Documentation stored as `<Quantity>.txt` files anywhere below a directory.
#[derive(Debug)]
pub struct DirectorySource {
    root: PathBuf,
    files: HashMap<String, PathBuf>,
}

impl DirectorySource {
    /// Indexes every documentation file below `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Error::InvalidInput(format!(
                "documentation directory '{}' does not exist",
                root.display()
            )));
        }

        let mut files: HashMap<String, PathBuf> = HashMap::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || !path.has_extension(DOCUMENTATION_EXTENSION) {
                continue;
            }
            let quantity = path.file_stem_checked()?.to_string();
            if let Some(previous) = files.get(&quantity) {
                log::warn!(
                    "Ignoring '{}': documentation of '{quantity}' was already found in '{}'",
                    path.display(),
                    previous.display()
                );
                continue;
            }
            log::trace!("Found documentation of '{quantity}' in '{}'", path.display());
            files.insert(quantity, path.to_path_buf());
        }

        log::debug!("Indexed {} documentation files below '{}'", files.len(), root.display());
        Ok(Self { root: root.to_path_buf(), files })
    }

    /// Number of documentation files found.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl DocumentationSource for DirectorySource {
    fn load(&self, quantity: &str) -> Result<Option<String>> {
        match self.files.get(quantity) {
            Some(path) => {
                log::debug!("Reading documentation of '{quantity}' from '{}'", path.display());
                Ok(Some(std::fs::read_to_string(path)?))
            }
            None => Ok(None),
        }
    }

    fn load_generic(&self) -> Result<Option<String>> {
        let path = self.root.join(format!("{GENERIC_DOCUMENTATION}.{DOCUMENTATION_EXTENSION}"));
        if path.is_file() {
            Ok(Some(std::fs::read_to_string(path)?))
        } else {
            self.load(GENERIC_DOCUMENTATION)
        }
    }
}

/// Documentation held in memory, keyed by quantity name.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    generic: Option<String>,
    quantities: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_generic(mut self, text: &str) -> Self {
        self.generic = Some(text.to_string());
        self
    }

    pub fn with_quantity(mut self, quantity: &str, text: &str) -> Self {
        self.quantities.insert(quantity.to_string(), text.to_string());
        self
    }
}

impl DocumentationSource for MemorySource {
    fn load(&self, quantity: &str) -> Result<Option<String>> {
        Ok(self.quantities.get(quantity).cloned())
    }

    fn load_generic(&self) -> Result<Option<String>> {
        Ok(self.generic.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn indexes_nested_files_by_stem() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("scalars/kinematics")).unwrap();
        fs::write(dir.path().join("Generic.txt"), "generic").unwrap();
        fs::write(dir.path().join("scalars/kinematics/Speed.txt"), "speed").unwrap();
        fs::write(dir.path().join("scalars/Length.txt"), "length").unwrap();
        fs::write(dir.path().join("scalars/notes.md"), "ignored").unwrap();

        let source = DirectorySource::new(dir.path()).unwrap();
        assert_eq!(source.len(), 3);
        assert_eq!(source.load("Speed").unwrap().as_deref(), Some("speed"));
        assert_eq!(source.load("Length").unwrap().as_deref(), Some("length"));
        assert_eq!(source.load("notes").unwrap(), None);
        assert_eq!(source.load("Time").unwrap(), None);
        assert_eq!(source.load_generic().unwrap().as_deref(), Some("generic"));
    }

    #[test]
    fn duplicate_stems_keep_the_first_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("a/Length.txt"), "first").unwrap();
        fs::write(dir.path().join("b/Length.txt"), "second").unwrap();

        let source = DirectorySource::new(dir.path()).unwrap();
        assert_eq!(source.len(), 1);
        assert_eq!(source.load("Length").unwrap().as_deref(), Some("first"));
    }

    #[test]
    fn missing_generic_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path()).unwrap();
        assert!(source.is_empty());
        assert_eq!(source.load_generic().unwrap(), None);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = DirectorySource::new(dir.path().join("absent"));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn memory_source() {
        let source = MemorySource::new().with_generic("g").with_quantity("Length", "l");
        assert_eq!(source.load("Length").unwrap().as_deref(), Some("l"));
        assert_eq!(source.load("Area").unwrap(), None);
        assert_eq!(source.load_generic().unwrap().as_deref(), Some("g"));
    }
}
