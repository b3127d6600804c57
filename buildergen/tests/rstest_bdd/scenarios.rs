//! Binds the `buildergen` feature files to the step registry.

use super::fixtures::{GeneratorContext, generator_context};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/generate_builder.feature",
    fixtures = [generator_context: GeneratorContext]
);
scenarios!(
    "tests/features/generation_failures.feature",
    fixtures = [generator_context: GeneratorContext]
);
