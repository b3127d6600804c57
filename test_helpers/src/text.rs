//! Text helpers for inspecting generated builders.

/// Strips one layer of matching single or double quotes from a value.
#[must_use]
pub fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    if let Some(stripped) = trimmed.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        return stripped;
    }
    if let Some(stripped) = trimmed
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
    {
        return stripped;
    }
    trimmed
}

/// Names of the methods declared on `builder`, in output order.
///
/// Only single-line method headers of the form `func (r *Builder) Name(` are
/// recognised, which is the shape the generator emits.
#[must_use]
pub fn method_names(output: &str, builder: &str) -> Vec<String> {
    let receiver = format!(" *{builder}) ");
    output
        .lines()
        .filter_map(|line| line.strip_prefix("func ("))
        .filter_map(|rest| rest.split_once(receiver.as_str()).map(|(_, tail)| tail))
        .filter_map(|tail| tail.split_once('(').map(|(name, _)| name.to_owned()))
        .collect()
}

/// Import clauses in the order they appear, without the `import` keyword.
#[must_use]
pub fn import_clauses(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.strip_prefix("import "))
        .map(str::to_owned)
        .collect()
}
