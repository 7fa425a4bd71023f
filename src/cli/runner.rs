use crate::{
    catalogue::Catalogue,
    cli::Args,
    documentation::DirectorySource,
    error::Result,
    ioutils::{get_output_dir, plan_operations, read_to_string, stage, swap_into},
    template::{GeneratedFile, Generator, GeneratorOptions, TemplateOperation},
};
use std::path::Path;

/// Main CLI runner that orchestrates the entire generation workflow
pub struct Runner {
    args: Args,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    /// Executes the complete generation workflow
    ///
    /// Nothing is written unless every file was generated.
    pub fn run(self) -> Result<()> {
        let destination = get_output_dir(&self.args.destination, self.args.destroy)?;

        let catalogue = Catalogue::load(&self.args.definitions)?;
        let files = self.generate(&catalogue)?;

        let operations = plan_operations(&destination, &files)?;
        self.report(&operations);
        if self.args.dry_run {
            println!("[DRY RUN] Would generate {} files in {}.", files.len(), destination.display());
            return Ok(());
        }

        self.write(&destination, &operations)?;
        println!("Generated {} files in {}.", files.len(), destination.display());
        Ok(())
    }

    /// Generates every file in memory
    fn generate(&self, catalogue: &Catalogue) -> Result<Vec<GeneratedFile>> {
        let scalar_template = read_to_string(&self.args.scalar_template)?;
        let vector_template = read_to_string(&self.args.vector_template)?;
        let source = DirectorySource::new(&self.args.documentation)?;
        if source.is_empty() {
            log::warn!("No documentation found below '{}'", self.args.documentation.display());
        }
        let options = GeneratorOptions {
            extension: self.args.extension.clone(),
            line_ending: self.args.line_endings,
            ..Default::default()
        };

        let mut generator = Generator::new(catalogue, &scalar_template, &vector_template, source, options)?;
        let files = generator.generate_all()?;
        if !generator.diagnostics().is_empty() {
            log::warn!("Documentation has {} problems, see messages above", generator.diagnostics().len());
        }
        Ok(files)
    }

    /// Logs every planned change
    fn report(&self, operations: &[TemplateOperation]) {
        for operation in operations {
            log::info!("{}", operation.get_message(self.args.dry_run));
        }
    }

    /// Stages the output next to the destination and swaps it in
    fn write(&self, destination: &Path, operations: &[TemplateOperation]) -> Result<()> {
        let staged = stage(destination, operations)?;
        swap_into(staged, destination)
    }
}

/// Main entry point for CLI execution
pub fn run(args: Args) -> Result<()> {
    let runner = Runner::new(args);
    runner.run()
}
