//! Command-line interface definitions for `buildergen`.

use camino::Utf8PathBuf;
use clap::Parser;

use buildergen::{DEFAULT_OUTPUT_NAME, GeneratorConfig};

/// Parsed CLI arguments for `buildergen`.
///
/// Each option may also be supplied through a `BUILDERGEN_` environment
/// variable; flags on the command line take precedence.
#[derive(Debug, Parser)]
#[command(name = "buildergen")]
#[command(about = "Generate a chainable builder for a Go struct type")]
#[command(
    long_about = "Generate a chainable builder for a Go struct type.\n\n\
    The builder is written next to the source file, for example:\n\n    \
    buildergen --source ./core/user/user.go --type User -o user_builder.go\n\n\
    writes ./core/user/user_builder.go with a UserBuilder type."
)]
#[command(version)]
pub struct Args {
    /// Path to the Go file containing the type definition.
    #[arg(long, value_name = "path", env = "BUILDERGEN_SOURCE")]
    pub source: Utf8PathBuf,
    /// Name of the struct type to generate a builder for.
    #[arg(long = "type", value_name = "Name", env = "BUILDERGEN_TYPE")]
    pub type_name: String,
    /// File name for the builder, created in the source file's directory.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "file",
        env = "BUILDERGEN_OUTPUT",
        default_value = DEFAULT_OUTPUT_NAME
    )]
    pub output: String,
    /// Print the builder to standard output instead of writing a file.
    #[arg(long = "stdout")]
    pub should_print: bool,
    /// Log pipeline progress to standard error.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Converts the parsed arguments into a generator configuration.
    #[must_use]
    pub fn to_config(&self) -> GeneratorConfig {
        GeneratorConfig::new(self.source.clone(), self.type_name.clone())
            .with_output_name(self.output.clone())
    }
}
