//! Test helpers shared across crates.
//!
//! [`go`] stages Go sources in throwaway directories; [`text`] pulls the
//! interesting lines out of generated builders so assertions stay short.

pub mod go;
pub mod text;
