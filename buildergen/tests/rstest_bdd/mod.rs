//! `rstest-bdd` suite for `buildergen`.
//!
//! The modules provide the scenario fixture, step registrations and the
//! bindings to the feature files under `tests/features`.

mod fixtures;
mod scenarios;
mod steps;
