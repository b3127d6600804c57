//! Reconstruction of field type text from [`TypeExpr`] nodes.
//!
//! Rendering is the only place a namespace becomes eligible for the
//! generated import block: every qualified identifier rendered is recorded,
//! once, in first-reference order.

use thiserror::Error;

use crate::syntax::{ChanDir, FuncSignature, ParamGroup, TypeExpr};

/// A type expression the renderer refuses to reproduce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported type expression ({kind})")]
pub struct TypeError {
    /// Syntax kind of the rejected node.
    pub kind: String,
}

/// Insertion-ordered set of namespaces referenced by rendered types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferencedNamespaces {
    names: Vec<String>,
}

impl ReferencedNamespaces {
    /// Records `namespace` unless it was already seen.
    pub fn record(&mut self, namespace: &str) {
        if !self.contains(namespace) {
            self.names.push(namespace.to_owned());
        }
    }

    /// Whether `namespace` has been recorded.
    #[must_use]
    pub fn contains(&self, namespace: &str) -> bool {
        self.names.iter().any(|name| name == namespace)
    }

    /// Namespaces in first-reference order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of distinct namespaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no namespace has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Renders type expressions while accumulating referenced namespaces.
#[derive(Debug, Default)]
pub struct TypeRenderer {
    namespaces: ReferencedNamespaces,
}

impl TypeRenderer {
    /// Creates a renderer with an empty namespace set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `expr` as Go type text.
    ///
    /// # Errors
    ///
    /// Returns a [`TypeError`] naming the first unsupported node met.
    pub fn render(&mut self, expr: &TypeExpr) -> Result<String, TypeError> {
        let text = match expr {
            TypeExpr::Named(name) => name.clone(),
            TypeExpr::Qualified { namespace, name } => {
                self.namespaces.record(namespace);
                format!("{namespace}.{name}")
            }
            TypeExpr::Pointer(inner) => format!("*{}", self.render(inner)?),
            TypeExpr::Slice(elem) => format!("[]{}", self.render(elem)?),
            TypeExpr::Array { len, elem } => format!("[{len}]{}", self.render(elem)?),
            TypeExpr::Map { key, value } => {
                let key_text = self.render(key)?;
                format!("map[{key_text}]{}", self.render(value)?)
            }
            TypeExpr::Chan { dir, elem } => {
                let prefix = match dir {
                    ChanDir::Both => "chan ",
                    ChanDir::Receive => "<-chan ",
                    ChanDir::Send => "chan<- ",
                };
                format!("{prefix}{}", self.render(elem)?)
            }
            TypeExpr::Func(signature) => self.render_func(signature)?,
            TypeExpr::Unsupported { kind } => return Err(TypeError { kind: kind.clone() }),
        };
        Ok(text)
    }

    /// Namespaces recorded so far.
    #[must_use]
    pub const fn namespaces(&self) -> &ReferencedNamespaces {
        &self.namespaces
    }

    /// Consumes the renderer, returning the recorded namespaces.
    #[must_use]
    pub fn into_namespaces(self) -> ReferencedNamespaces {
        self.namespaces
    }

    fn render_func(&mut self, signature: &FuncSignature) -> Result<String, TypeError> {
        let params = self.render_groups(&signature.params)?;
        let mut text = format!("func({params})");
        if signature.results.is_empty() {
            return Ok(text);
        }
        let results = self.render_groups(&signature.results)?;
        let needs_parens = signature.results.len() > 1
            || signature.results.iter().any(|group| !group.names.is_empty());
        text.push(' ');
        if needs_parens {
            text.push('(');
            text.push_str(&results);
            text.push(')');
        } else {
            text.push_str(&results);
        }
        Ok(text)
    }

    fn render_groups(&mut self, groups: &[ParamGroup]) -> Result<String, TypeError> {
        let rendered = groups
            .iter()
            .map(|group| self.render_group(group))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rendered.join(", "))
    }

    fn render_group(&mut self, group: &ParamGroup) -> Result<String, TypeError> {
        let rendered = self.render(&group.ty)?;
        let ty = if group.variadic {
            format!("...{rendered}")
        } else {
            rendered
        };
        if group.names.is_empty() {
            Ok(ty)
        } else {
            Ok(format!("{} {ty}", group.names.join(",")))
        }
    }
}
