//! End-to-end builder generation.
//!
//! [`generate_source`] runs the pure pipeline on in-memory text; a
//! [`Generator`] adds reading the source file and writing the result next
//! to it.

use camino::{Utf8Path, Utf8PathBuf};

use crate::emit::{
    BuilderPlan, GeneratedSource, ResolvedImports, check_setter_names, emit_builder,
};
use crate::error::BuildergenError;
use crate::fields::extract_fields;
use crate::fs_helpers::{read_source, split_parent};
use crate::imports::ImportTable;
use crate::output::write_generated;
use crate::syntax::{LookupError, SourceUnit};

/// File name used when no output name is given.
pub const DEFAULT_OUTPUT_NAME: &str = "builder.go";

/// Inputs for a single generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Go file declaring the target type.
    pub source: Utf8PathBuf,
    /// Name of the struct to build.
    pub type_name: String,
    /// Output file name, resolved against the source file's directory.
    pub output_name: String,
}

impl GeneratorConfig {
    /// Creates a configuration writing to [`DEFAULT_OUTPUT_NAME`].
    #[must_use]
    pub fn new(source: impl Into<Utf8PathBuf>, type_name: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            type_name: type_name.into(),
            output_name: DEFAULT_OUTPUT_NAME.to_owned(),
        }
    }

    /// Replaces the output file name.
    #[must_use]
    pub fn with_output_name(mut self, output_name: impl Into<String>) -> Self {
        self.output_name = output_name.into();
        self
    }

    /// Directory the builder is written into.
    ///
    /// # Errors
    ///
    /// Returns [`BuildergenError::Io`] when the source path has no file name.
    pub fn output_dir(&self) -> Result<Utf8PathBuf, BuildergenError> {
        split_parent(&self.source).map(|(parent, _)| parent)
    }
}

/// Runs the generator for one configuration.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Creates a generator for `config`.
    #[must_use]
    pub const fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Reads the source file and returns the builder text without writing it.
    ///
    /// # Errors
    ///
    /// Returns any [`BuildergenError`] raised while reading, parsing or
    /// analysing the source.
    #[tracing::instrument(
        level = "debug",
        skip(self),
        fields(source = %self.config.source, type_name = %self.config.type_name)
    )]
    pub fn render(&self) -> Result<GeneratedSource, BuildergenError> {
        let text = read_source(&self.config.source)?;
        generate_source(&text, &self.config.type_name, &self.config.source)
    }

    /// Generates the builder and writes it beside the source file.
    ///
    /// Nothing is written unless every analysis stage succeeds.
    ///
    /// # Errors
    ///
    /// Returns any [`BuildergenError`] raised by [`Generator::render`] or by
    /// the output sink.
    #[tracing::instrument(
        level = "debug",
        skip(self),
        fields(source = %self.config.source, output = %self.config.output_name)
    )]
    pub fn generate(&self) -> Result<Utf8PathBuf, BuildergenError> {
        let source = self.render()?;
        let out_dir = self.config.output_dir()?;
        write_generated(&out_dir, &self.config.output_name, &source)
    }
}

/// Generates builder text for `type_name` from Go source `text`.
///
/// `origin` is only used to label errors.
///
/// # Errors
///
/// Returns [`BuildergenError::Parse`], [`BuildergenError::TypeNotFound`],
/// [`BuildergenError::NotAStruct`], [`BuildergenError::EmptyStruct`],
/// [`BuildergenError::UnsupportedTypeExpression`],
/// [`BuildergenError::SetterCollision`] or
/// [`BuildergenError::UnresolvedImport`].
pub fn generate_source(
    text: &str,
    type_name: &str,
    origin: &Utf8Path,
) -> Result<GeneratedSource, BuildergenError> {
    let unit = SourceUnit::parse(text).map_err(|err| BuildergenError::Parse {
        path: origin.to_path_buf(),
        message: err.to_string(),
    })?;
    let imports = ImportTable::from_specs(unit.imports());
    tracing::debug!(package = unit.package(), imports = imports.len(), "parsed source");

    let decl = unit.find_struct(type_name).map_err(|err| match err {
        LookupError::NotFound => BuildergenError::TypeNotFound {
            type_name: type_name.to_owned(),
            path: origin.to_path_buf(),
        },
        LookupError::NotAStruct => BuildergenError::NotAStruct {
            type_name: type_name.to_owned(),
            path: origin.to_path_buf(),
        },
    })?;

    let extracted = extract_fields(decl)?;
    check_setter_names(&extracted.fields)?;
    let resolved = ResolvedImports::resolve(&imports, &extracted.namespaces)?;
    Ok(emit_builder(&BuilderPlan {
        package: unit.package(),
        type_name,
        fields: &extracted.fields,
        imports: &resolved,
    }))
}
