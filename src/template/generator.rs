use crate::catalogue::Catalogue;
use crate::constants::{DEFAULT_EXTENSION, DOCUMENTATION_PASS_LIMIT, INDENT, LINE_WIDTH};
use crate::documentation::{Diagnostic, DocumentationExpander, DocumentationResolver, DocumentationSource};
use crate::error::Result;
use crate::format::{collapse_blank_lines, normalize_line_endings, wrap_long_lines, LineEnding};
use crate::template::context::TemplateContext;
use crate::template::sections::Template;

/// Settings of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub line_width: usize,
    pub pass_limit: usize,
    /// Extension of generated files, without the leading dot.
    pub extension: String,
    pub line_ending: LineEnding,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            line_width: LINE_WIDTH,
            pass_limit: DOCUMENTATION_PASS_LIMIT,
            extension: DEFAULT_EXTENSION.to_string(),
            line_ending: LineEnding::default(),
        }
    }
}

/// A generated source file, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Quantity name, with the dimensionality for vectors.
    pub quantity: String,
    pub file_name: String,
    pub content: String,
}

/// Expands catalogue quantities into source files.
pub struct Generator<'c, S: DocumentationSource> {
    catalogue: &'c Catalogue,
    scalar_template: Template,
    vector_template: Template,
    resolver: DocumentationResolver<S>,
    options: GeneratorOptions,
    diagnostics: Vec<Diagnostic>,
}

impl<'c, S: DocumentationSource> Generator<'c, S> {
    pub fn new(
        catalogue: &'c Catalogue,
        scalar_template: &str,
        vector_template: &str,
        source: S,
        options: GeneratorOptions,
    ) -> Result<Self> {
        Ok(Self {
            catalogue,
            scalar_template: Template::parse("Scalar", &normalize_line_endings(scalar_template, LineEnding::Lf))?,
            vector_template: Template::parse("Vector", &normalize_line_endings(vector_template, LineEnding::Lf))?,
            resolver: DocumentationResolver::new(source)?,
            options,
            diagnostics: Vec::new(),
        })
    }

    /// Documentation problems found so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Generates every scalar, then every vector at each of its dimensionalities, in catalogue order.
    pub fn generate_all(&mut self) -> Result<Vec<GeneratedFile>> {
        let mut files = Vec::new();
        for name in self.catalogue.scalars.keys() {
            files.push(self.generate_scalar(name)?);
        }
        for name in self.catalogue.vectors.keys() {
            files.extend(self.generate_vector(name)?);
        }
        log::info!(
            "Generated {} files with {} documentation diagnostics",
            files.len(),
            self.diagnostics.len()
        );
        Ok(files)
    }

    pub fn generate_scalar(&mut self, name: &str) -> Result<GeneratedFile> {
        let catalogue = self.catalogue;
        let definition = catalogue.scalar(name, "scalar", name)?;
        log::debug!("Generating scalar '{name}'");
        let context = TemplateContext::for_scalar(catalogue, name, definition)?;
        let text = self.scalar_template.render(&context.section_toggles())?;
        self.finish(name, &context, &text)
    }

    /// Generates one file per dimensionality of the vector.
    pub fn generate_vector(&mut self, name: &str) -> Result<Vec<GeneratedFile>> {
        let catalogue = self.catalogue;
        let definition = catalogue.vector(name, "vector", name)?;
        if definition.dimensionalities.is_empty() {
            log::warn!("Vector '{name}' has no dimensionalities, nothing is generated for it");
        }

        let mut files = Vec::with_capacity(definition.dimensionalities.len());
        for &dimensionality in &definition.dimensionalities {
            log::debug!("Generating vector '{name}{dimensionality}'");
            let context = TemplateContext::for_vector(catalogue, name, definition, dimensionality)?;
            let text = self.vector_template.render(&context.section_toggles())?;
            files.push(self.finish(name, &context, &text)?);
        }
        Ok(files)
    }

    /// Substitutes placeholders, expands documentation and formats the result.
    ///
    /// Documentation is looked up under `documented`, the name without dimensionality.
    fn finish(&mut self, documented: &str, context: &TemplateContext, rendered: &str) -> Result<GeneratedFile> {
        let substituted = context.substitute(rendered)?.replace('\t', INDENT);

        let outcome = DocumentationExpander::new(&mut self.resolver)
            .with_pass_limit(self.options.pass_limit)
            .expand(documented, &context.names, &substituted)?;
        self.diagnostics.extend(outcome.diagnostics);

        let wrapped = wrap_long_lines(&outcome.text, self.options.line_width);
        let content = normalize_line_endings(&collapse_blank_lines(&wrapped), self.options.line_ending);

        let quantity = context.quantity().to_string();
        Ok(GeneratedFile {
            file_name: format!("{quantity}.{}", self.options.extension),
            quantity,
            content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::CatalogueFormat;
    use crate::documentation::{DiagnosticKind, MemorySource};
    use crate::error::Error;

    const CATALOGUE: &str = "
scalars:
  Length:
    unit: UnitOfLength
    symbol: l
    SI: Metre
    units:
      - singular: Metre
        plural: +s
    additive: true
    vector: Displacement
  Time:
    unit: '[UnitOf]'
    symbol: t
    units:
      - singular: Second
        plural: +s
vectors:
  Displacement:
    dimensionalities: [2, 3]
    component: Length
    unit: '[component]'
    symbol: '[component]'
    units: '[component]'
";

    const SCALAR: &str = "\
#Document:Header#
public readonly record struct #Quantity# :
\tIScalarQuantity#CommaIfInterface#
#Interfaces#
{
#Units#


#Additive#
}
";

    const VECTOR: &str = "\
#Document:Header#
public readonly record struct #Quantity#(#ComponentsDefinition#)
{
#ComponentMagnitude#
\tpublic #Component# Magnitude => new(#Components#);
#/ComponentMagnitude#
#DoubleMagnitude#
\tpublic double Magnitude => 0;
#/DoubleMagnitude#
#QuantitySquaredMagnitude#
\tpublic #SquaredComponent# SquaredMagnitude => new(0);
#/QuantitySquaredMagnitude#
#DoubleSquaredMagnitude#
\tpublic double SquaredMagnitude => 0;
#/DoubleSquaredMagnitude#
#ComponentNormalization#
#/ComponentNormalization#
#DoubleNormalization#
#/DoubleNormalization#
#Vector3#
\tpublic #Quantity# Cross(#Quantity# other) => new(0, 0, 0);
#/Vector3#
}
";

    const GENERIC: &str = "\
#Document:Header#
/// <summary>A #Quantity# in #Unit#.</summary>
#/Document:Header#
#Document:InUnit(unit)#
/// <summary>The magnitude in #Param:unit#.</summary>
#/Document:InUnit#
";

    fn generator(catalogue: &Catalogue) -> Generator<'_, MemorySource> {
        let source = MemorySource::new()
            .with_generic(GENERIC)
            .with_quantity("Length", "#Document:Header#\n/// <summary>How long something is.</summary>\n#/Document:Header#\n");
        Generator::new(catalogue, SCALAR, VECTOR, source, GeneratorOptions::default()).unwrap()
    }

    fn catalogue() -> Catalogue {
        Catalogue::parse(CATALOGUE, CatalogueFormat::Yaml).unwrap()
    }

    #[test]
    fn generates_scalar_file() {
        let catalogue = catalogue();
        let mut generator = generator(&catalogue);
        let file = generator.generate_scalar("Length").unwrap();
        assert_eq!(file.file_name, "Length.g.cs");
        assert_eq!(
            file.content,
            "\
/// <summary>How long something is.</summary>
public readonly record struct Length :
    IScalarQuantity,
    IAddableScalarQuantity<Length, Length>,
    IVector2izableScalarQuantity<Displacement2>,
    IVector3izableScalarQuantity<Displacement3>
{
    /// <summary>The magnitude in Metres.</summary>
    public Scalar InMetres => InUnit(UnitOfLength.Metre);

    public Length Add(Length term) => new(Magnitude + term.Magnitude);
    public static Length operator +(Length x, Length y) => x.Add(y);

}
"
        );
        assert!(generator.diagnostics().iter().any(|diagnostic| diagnostic.tag == "AddMethod"));
    }

    #[test]
    fn unresolved_tags_are_diagnosed() {
        let catalogue = catalogue();
        let source = MemorySource::new();
        let mut generator = Generator::new(&catalogue, SCALAR, VECTOR, source, GeneratorOptions::default()).unwrap();
        let file = generator.generate_scalar("Time").unwrap();
        assert!(!file.content.contains("#Document:"));
        assert!(file.content.starts_with("public readonly record struct Time :\n    IScalarQuantity\n{"));
        assert!(generator
            .diagnostics()
            .iter()
            .any(|diagnostic| diagnostic.tag == "Header" && diagnostic.kind == DiagnosticKind::UnresolvedTag));
    }

    #[test]
    fn one_vector_file_per_dimensionality() {
        let catalogue = catalogue();
        let mut generator = generator(&catalogue);
        let files = generator.generate_vector("Displacement").unwrap();
        let names: Vec<_> = files.iter().map(|file| file.file_name.as_str()).collect();
        assert_eq!(names, vec!["Displacement2.g.cs", "Displacement3.g.cs"]);

        assert!(files[0].content.starts_with("/// <summary>A Displacement2 in UnitOfLength.</summary>\n"));
        assert!(files[0].content.contains("public readonly record struct Displacement2(double X, double Y)"));
        assert!(files[0].content.contains("    public Length Magnitude => new(X, Y);"));
        assert!(files[0].content.contains("    public double SquaredMagnitude => 0;"));
        assert!(!files[0].content.contains("Cross"));
        assert!(!files[0].content.contains("#"));
        assert!(files[1].content.contains("    public Displacement3 Cross(Displacement3 other)"));
    }

    #[test]
    fn generates_everything_in_catalogue_order() {
        let catalogue = catalogue();
        let mut generator = generator(&catalogue);
        let files = generator.generate_all().unwrap();
        let quantities: Vec<_> = files.iter().map(|file| file.quantity.as_str()).collect();
        assert_eq!(quantities, vec!["Length", "Time", "Displacement2", "Displacement3"]);
    }

    #[test]
    fn line_endings_and_extension_are_configurable() {
        let catalogue = catalogue();
        let options =
            GeneratorOptions { extension: "cs".to_string(), line_ending: LineEnding::Crlf, ..Default::default() };
        let source = MemorySource::new().with_generic(GENERIC);
        let mut generator = Generator::new(&catalogue, SCALAR, VECTOR, source, options).unwrap();
        let file = generator.generate_scalar("Time").unwrap();
        assert_eq!(file.file_name, "Time.cs");
        assert!(file.content.contains("\r\n"));
        assert!(!file.content.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn cyclic_documentation_fails() {
        let catalogue = catalogue();
        let source = MemorySource::new()
            .with_generic("#Document:Header#\n/// Again:\n#Document:Header#\n#/Document:Header#\n");
        let mut generator = Generator::new(&catalogue, SCALAR, VECTOR, source, GeneratorOptions::default()).unwrap();
        assert!(matches!(generator.generate_scalar("Time"), Err(Error::DocumentationPassLimit { .. })));
    }

    #[test]
    fn unknown_quantity_is_an_error() {
        let catalogue = catalogue();
        let mut generator = generator(&catalogue);
        assert!(matches!(generator.generate_scalar("Mass"), Err(Error::UnknownQuantity { .. })));
    }
}
