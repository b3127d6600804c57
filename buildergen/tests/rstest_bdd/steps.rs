//! Step definitions for `buildergen` behavioural tests.

use buildergen::{Generator, GeneratorConfig};
use camino::Utf8PathBuf;
use rstest_bdd_macros::{given, then, when};
use test_helpers::go::{GoWorkspace, UNBUILDABLE_SOURCE, USER_SOURCE};
use test_helpers::text::{import_clauses, method_names, unquote};

use super::fixtures::GeneratorContext;

/// Error type for step definition failures.
pub type StepError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for step definition operations.
pub type StepResult<T> = Result<T, StepError>;

fn stage_source(ctx: &GeneratorContext, path: &str, text: &str) -> StepResult<()> {
    let workspace = GoWorkspace::new()?;
    let source = workspace.write(unquote(path), text)?;
    ctx.source.set(source);
    ctx.workspace.set(workspace);
    Ok(())
}

fn source_path(ctx: &GeneratorContext) -> StepResult<Utf8PathBuf> {
    ctx.source
        .with_ref(Clone::clone)
        .ok_or_else(|| "a source file should be staged".into())
}

fn with_workspace<T>(
    ctx: &GeneratorContext,
    f: impl FnOnce(&GoWorkspace) -> std::io::Result<T>,
) -> StepResult<T> {
    ctx.workspace
        .with_ref(f)
        .ok_or("a workspace should be staged")?
        .map_err(Into::into)
}

fn output(ctx: &GeneratorContext) -> StepResult<String> {
    ctx.output.with_ref(Clone::clone).ok_or_else(|| {
        let failure = ctx.failure.with_ref(Clone::clone).unwrap_or_default();
        format!("generation should have succeeded: {failure}").into()
    })
}

fn builder_methods(output: &str) -> StepResult<Vec<String>> {
    let builder = output
        .lines()
        .find_map(|line| line.strip_prefix("type "))
        .and_then(|rest| rest.split_once(' '))
        .map(|(name, _)| name.to_owned())
        .ok_or("output should declare a builder type")?;
    Ok(method_names(output, &builder))
}

fn expected_list(list: &str) -> Vec<String> {
    unquote(list)
        .split(',')
        .map(|item| item.trim().to_owned())
        .collect()
}

#[given("a Go workspace with the user source at {path}")]
fn user_source(generator_context: &GeneratorContext, path: String) -> StepResult<()> {
    stage_source(generator_context, &path, USER_SOURCE)
}

#[given("a Go workspace with the unbuildable source at {path}")]
fn unbuildable_source(generator_context: &GeneratorContext, path: String) -> StepResult<()> {
    stage_source(generator_context, &path, UNBUILDABLE_SOURCE)
}

#[given("a stale file at {path}")]
fn stale_file(generator_context: &GeneratorContext, path: String) -> StepResult<()> {
    with_workspace(generator_context, |workspace| {
        workspace.write(unquote(&path), "// stale builder\n")
    })?;
    Ok(())
}

#[when("I generate a builder for {type_name} into {output}")]
fn generate(
    generator_context: &GeneratorContext,
    type_name: String,
    output: String,
) -> StepResult<()> {
    let config = GeneratorConfig::new(source_path(generator_context)?, unquote(&type_name))
        .with_output_name(unquote(&output));
    match Generator::new(config).generate() {
        Ok(written) => {
            let text = std::fs::read_to_string(&written)?;
            generator_context.output.set(text);
        }
        Err(err) => generator_context.failure.set(err.to_string()),
    }
    Ok(())
}

#[when("I render a builder for {type_name}")]
fn render(generator_context: &GeneratorContext, type_name: String) -> StepResult<()> {
    let config = GeneratorConfig::new(source_path(generator_context)?, unquote(&type_name));
    let source = Generator::new(config).render()?;
    generator_context.output.set(source.into_string());
    Ok(())
}

#[then("the file {path} exists")]
fn file_exists(generator_context: &GeneratorContext, path: String) -> StepResult<()> {
    let exists = generator_context
        .workspace
        .with_ref(|workspace| workspace.exists(unquote(&path)))
        .ok_or("a workspace should be staged")?;
    assert!(exists, "{path} should exist");
    Ok(())
}

#[then("the builder declares methods {methods}")]
fn builder_declares_methods(generator_context: &GeneratorContext, methods: String) -> StepResult<()> {
    let text = output(generator_context)?;
    assert!(!text.contains("stale"), "output should replace the stale file");
    assert_eq!(builder_methods(&text)?, expected_list(&methods));
    Ok(())
}

#[then("the builder imports only {path}")]
fn builder_imports_only(generator_context: &GeneratorContext, path: String) -> StepResult<()> {
    let text = output(generator_context)?;
    assert_eq!(import_clauses(&text), vec![format!("\"{}\"", unquote(&path))]);
    Ok(())
}

#[then("generation fails mentioning {message}")]
fn generation_fails(generator_context: &GeneratorContext, message: String) -> StepResult<()> {
    let failure = generator_context
        .failure
        .with_ref(Clone::clone)
        .ok_or("generation should have failed")?;
    assert!(
        failure.contains(unquote(&message)),
        "unexpected failure: {failure}"
    );
    assert!(generator_context.output.is_empty(), "no builder should be produced");
    Ok(())
}

#[then("the directory {dir} contains only {file}")]
fn directory_contains_only(
    generator_context: &GeneratorContext,
    dir: String,
    file: String,
) -> StepResult<()> {
    let names = with_workspace(generator_context, |workspace| workspace.list(unquote(&dir)))?;
    assert_eq!(names, vec![unquote(&file).to_owned()]);
    Ok(())
}
