//! Fixtures shared by the `buildergen` behavioural scenarios.

use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use test_helpers::go::GoWorkspace;

/// Scenario state threaded through generator steps.
#[derive(Debug, Default, ScenarioState)]
pub struct GeneratorContext {
    /// Temporary tree holding the Go sources.
    pub workspace: Slot<GoWorkspace>,
    /// Source file the next run reads.
    pub source: Slot<Utf8PathBuf>,
    /// Builder text from the last successful run.
    pub output: Slot<String>,
    /// Error message from the last failed run.
    pub failure: Slot<String>,
}

/// Provides an empty scenario context.
#[fixture]
pub fn generator_context() -> GeneratorContext {
    GeneratorContext::default()
}
