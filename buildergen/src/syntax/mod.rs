//! Go source model and declaration lookup.
//!
//! Source text is parsed with the tree-sitter Go grammar and lowered into an
//! owned [`SourceUnit`]. Only the parts the builder generator needs survive
//! lowering: the package name, the import specs and the top-level type
//! specs, each kept in file order.

mod lower;


use thiserror::Error;

/// Errors raised while turning source text into a [`SourceUnit`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// The Go grammar could not be loaded into the parser.
    #[error("failed to load the Go grammar: {0}")]
    Grammar(String),
    /// The parser gave up without producing a tree.
    #[error("parser produced no syntax tree")]
    NoTree,
    /// The tree contains an error or missing node.
    #[error("syntax error at line {line}, column {column} near `{near}`")]
    Invalid {
        /// One-based line of the first error node.
        line: usize,
        /// One-based column of the first error node.
        column: usize,
        /// Source text covered by the error node, truncated.
        near: String,
    },
    /// A declaration lacks a component the grammar normally guarantees.
    #[error("incomplete {what} at line {line}")]
    Incomplete {
        /// The missing component.
        what: &'static str,
        /// One-based line of the enclosing declaration.
        line: usize,
    },
    /// The file has no package clause, or the clause names nothing.
    #[error("name of package is not specified")]
    MissingPackage,
}

/// Reasons a struct lookup can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No top-level type carries the requested name.
    #[error("type definition not found")]
    NotFound,
    /// A type with the requested name exists but is not a struct.
    #[error("type is not a struct")]
    NotAStruct,
}

/// One parsed Go source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    package: String,
    imports: Vec<ImportSpec>,
    types: Vec<TypeSpec>,
}

impl SourceUnit {
    /// Parses Go source text.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] when the text does not parse cleanly or has
    /// no package clause.
    pub fn parse(text: &str) -> Result<Self, SyntaxError> {
        let tree = lower::parse_tree(text)?;
        lower::lower_unit(&tree, text)
    }

    /// Name declared by the package clause.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Import specs in file order.
    #[must_use]
    pub fn imports(&self) -> &[ImportSpec] {
        &self.imports
    }

    /// Top-level type specs in file order.
    #[must_use]
    pub fn types(&self) -> &[TypeSpec] {
        &self.types
    }

    /// Finds the first top-level type named `name` and returns it when it is
    /// a struct.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotFound`] when no type has that name and
    /// [`LookupError::NotAStruct`] when the first match is anything else.
    pub fn find_struct(&self, name: &str) -> Result<&StructDecl, LookupError> {
        let spec = self
            .types
            .iter()
            .find(|spec| spec.name == name)
            .ok_or(LookupError::NotFound)?;
        match &spec.body {
            TypeBody::Struct(decl) => Ok(decl),
            TypeBody::Alias | TypeBody::Other { .. } => Err(LookupError::NotAStruct),
        }
    }
}

/// A single import spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// Explicit local name: an identifier, `_` or `.`.
    pub alias: Option<String>,
    /// Import path without its surrounding quotes.
    pub path: String,
}

impl ImportSpec {
    /// The path wrapped in double quotes, as it appears in an import clause.
    #[must_use]
    pub fn quoted_path(&self) -> String {
        format!("\"{}\"", self.path)
    }
}

/// A top-level `type` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    /// Declared type name.
    pub name: String,
    /// What the name is bound to.
    pub body: TypeBody,
}

/// Right-hand side of a type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeBody {
    /// A non-generic struct type.
    Struct(StructDecl),
    /// An alias declaration (`type A = B`).
    Alias,
    /// Any other definition, tagged with its syntax kind.
    Other {
        /// Syntax kind of the definition.
        kind: String,
    },
}

/// A struct type with its field declarations in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    /// Name of the declared type.
    pub name: String,
    /// Field declarations in source order.
    pub fields: Vec<FieldDecl>,
}

/// One field declaration line, possibly naming several fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Declared names; empty for an embedded field.
    pub names: Vec<String>,
    /// Declared type.
    pub ty: TypeExpr,
}

impl FieldDecl {
    /// Names this declaration introduces.
    ///
    /// An embedded field is named after its type identifier, so `*pkg.Base`
    /// introduces `Base`.
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        if self.names.is_empty() {
            self.ty.embedded_name().into_iter().collect()
        } else {
            self.names.iter().map(String::as_str).collect()
        }
    }
}

/// Direction of a channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    /// `chan T`
    Both,
    /// `<-chan T`
    Receive,
    /// `chan<- T`
    Send,
}

/// A type expression as written in a field or parameter declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A plain identifier such as `int` or `User`.
    Named(String),
    /// A package-qualified identifier such as `time.Duration`.
    Qualified {
        /// Package alias on the left of the dot.
        namespace: String,
        /// Exported identifier on the right of the dot.
        name: String,
    },
    /// `*T`
    Pointer(Box<TypeExpr>),
    /// `[]T`
    Slice(Box<TypeExpr>),
    /// `[N]T`, with the length expression kept verbatim.
    Array {
        /// Length expression text.
        len: String,
        /// Element type.
        elem: Box<TypeExpr>,
    },
    /// `map[K]V`
    Map {
        /// Key type.
        key: Box<TypeExpr>,
        /// Value type.
        value: Box<TypeExpr>,
    },
    /// `chan T`, `<-chan T` or `chan<- T`.
    Chan {
        /// Channel direction.
        dir: ChanDir,
        /// Element type.
        elem: Box<TypeExpr>,
    },
    /// A function signature type.
    Func(FuncSignature),
    /// Syntax the generator does not reproduce, tagged with its kind.
    Unsupported {
        /// Tree-sitter node kind.
        kind: String,
    },
}

impl TypeExpr {
    /// Identifier an embedded field of this type is known by.
    #[must_use]
    pub fn embedded_name(&self) -> Option<&str> {
        match self {
            Self::Named(name) | Self::Qualified { name, .. } => Some(name),
            Self::Pointer(inner) => inner.embedded_name(),
            _ => None,
        }
    }
}

/// Parameters and results of a function type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuncSignature {
    /// Parameter groups in order.
    pub params: Vec<ParamGroup>,
    /// Result groups in order.
    pub results: Vec<ParamGroup>,
}

/// Names sharing one type inside a parameter or result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamGroup {
    /// Declared names; empty for unnamed parameters.
    pub names: Vec<String>,
    /// Shared type.
    pub ty: TypeExpr,
    /// Whether the group is a trailing `...T` parameter.
    pub variadic: bool,
}

impl ParamGroup {
    /// An unnamed, non-variadic group.
    #[must_use]
    pub const fn unnamed(ty: TypeExpr) -> Self {
        Self {
            names: Vec::new(),
            ty,
            variadic: false,
        }
    }
}
