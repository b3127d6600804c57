//! Library interface for `buildergen`.
//!
//! `buildergen` reads a Go source file, finds one struct declaration and
//! emits a companion builder type: a constructor, one chainable setter per
//! field and the `P()`/`V()` accessors returning the built value.
//!
//! ```
//! use buildergen::generate_source;
//! use camino::Utf8Path;
//!
//! let text = "package shop\n\ntype Item struct {\n\tsku string\n}\n";
//! let source = generate_source(text, "Item", Utf8Path::new("shop/item.go"))?;
//! assert!(source.as_str().contains("func (b *ItemBuilder) Sku(sku string) *ItemBuilder {"));
//! # Ok::<(), buildergen::BuildergenError>(())
//! ```

pub mod emit;
pub mod error;
pub mod fields;
mod fs_helpers;
pub mod generator;
pub mod imports;
pub mod output;
pub mod syntax;
pub mod types;

pub use emit::GeneratedSource;
pub use error::BuildergenError;
pub use generator::{DEFAULT_OUTPUT_NAME, Generator, GeneratorConfig, generate_source};
