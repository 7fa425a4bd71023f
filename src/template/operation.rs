use std::path::PathBuf;

/// A change to the destination directory resulting from a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOperation {
    Write { target: PathBuf, content: String, target_exists: bool },
    /// A file of the previous destination that the new output no longer contains.
    Remove { target: PathBuf },
}

impl TemplateOperation {
    /// Returns the target path for this operation, used for error context.
    pub fn target_path(&self) -> &PathBuf {
        match self {
            TemplateOperation::Write { target, .. } => target,
            TemplateOperation::Remove { target } => target,
        }
    }

    /// Returns a brief description of this operation for error messages.
    pub fn error_context(&self) -> String {
        match self {
            TemplateOperation::Write { target, .. } => format!("write '{}'", target.display()),
            TemplateOperation::Remove { target } => format!("remove '{}'", target.display()),
        }
    }

    /// Gets a message describing the operation.
    ///
    /// # Arguments
    /// * `dry_run` - Whether this is a dry run (no actual file operations)
    ///
    /// # Returns
    /// * `String` - A descriptive message about the operation
    pub fn get_message(&self, dry_run: bool) -> String {
        let prefix = if dry_run { "[DRY RUN] " } else { "" };

        match self {
            TemplateOperation::Write { target, target_exists, .. } => {
                if *target_exists {
                    format!("{}Writing to '{}' (replacing existing file)", prefix, target.display())
                } else {
                    format!("{}Writing to '{}'", prefix, target.display())
                }
            }
            TemplateOperation::Remove { target } => {
                format!("{}Removing '{}' (no longer generated)", prefix, target.display())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_operation_replace_message() {
        let target = PathBuf::from("/tmp/generated/Length.g.cs");
        let expected = format!("Writing to '{}' (replacing existing file)", target.display());

        let write = TemplateOperation::Write { target, content: String::new(), target_exists: true };
        assert_eq!(write.get_message(false), expected);
    }

    #[test]
    fn write_operation_basic_message() {
        let target = PathBuf::from("/tmp/generated/Length.g.cs");
        let expected = format!("Writing to '{}'", target.display());

        let write = TemplateOperation::Write { target, content: String::new(), target_exists: false };
        assert_eq!(write.get_message(false), expected);
    }

    #[test]
    fn remove_operation_message() {
        let target = PathBuf::from("/tmp/generated/Old.g.cs");
        let remove = TemplateOperation::Remove { target: target.clone() };
        assert_eq!(remove.get_message(false), format!("Removing '{}' (no longer generated)", target.display()));
        assert_eq!(remove.target_path(), &target);
    }

    #[test]
    fn test_dry_run_messages() {
        let write = TemplateOperation::Write {
            target: PathBuf::from("/tmp/generated/Time.g.cs"),
            content: String::new(),
            target_exists: false,
        };
        let dry_run_message = write.get_message(true);
        let normal_message = write.get_message(false);

        assert!(dry_run_message.starts_with("[DRY RUN] "));
        assert!(!normal_message.starts_with("[DRY RUN] "));
        assert_eq!(dry_run_message, format!("[DRY RUN] {}", normal_message));
    }

    #[test]
    fn error_context_includes_target() {
        let write = TemplateOperation::Write {
            target: PathBuf::from("/output/Length.g.cs"),
            content: "content".to_string(),
            target_exists: false,
        };
        let context = write.error_context();
        assert!(context.contains("write"));
        assert!(context.contains("/output/Length.g.cs"));
    }
}
