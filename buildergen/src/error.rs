//! Error types for `buildergen`.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced by the builder generation pipeline.
///
/// Every variant is terminal for a run: nothing is retried and no output
/// file is written once one of these is returned.
#[derive(Debug, Error)]
pub enum BuildergenError {
    /// The source file could not be parsed or lacks a package clause.
    #[error("failed to parse {path}: {message}")]
    Parse {
        /// Source file that failed to parse.
        path: Utf8PathBuf,
        /// Description of the syntax problem.
        message: String,
    },

    /// No top-level declaration carries the requested name.
    #[error("type '{type_name}' not found in {path}")]
    TypeNotFound {
        /// Requested type name.
        type_name: String,
        /// Source file that was searched.
        path: Utf8PathBuf,
    },

    /// The requested declaration exists but is not a struct type.
    #[error("type '{type_name}' in {path} is not a struct")]
    NotAStruct {
        /// Requested type name.
        type_name: String,
        /// Source file holding the declaration.
        path: Utf8PathBuf,
    },

    /// The struct declares no fields, so there is nothing to build.
    #[error("struct '{type_name}' has no fields")]
    EmptyStruct {
        /// Requested type name.
        type_name: String,
    },

    /// A field type uses syntax the generator cannot reproduce.
    #[error("field '{field}' uses an unsupported type expression ({kind})")]
    UnsupportedTypeExpression {
        /// Field whose type could not be reconstructed.
        field: String,
        /// Syntax kind that was rejected.
        kind: String,
    },

    /// Two fields map to the same setter, or a setter would shadow an accessor.
    #[error("field '{field}' maps to setter '{setter}', which is already taken")]
    SetterCollision {
        /// Field whose setter could not be declared.
        field: String,
        /// Setter name already in use.
        setter: String,
    },

    /// A field type references a namespace with no matching import.
    #[error("namespace '{namespace}' is referenced by a field but never imported")]
    UnresolvedImport {
        /// Namespace identifier used in a qualified type.
        namespace: String,
    },

    /// Reading the source or writing the builder failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path involved in the failed operation.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
