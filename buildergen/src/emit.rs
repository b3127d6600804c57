//! Builder source synthesis.
//!
//! Output layout is fixed: package clause, imports, builder type,
//! constructor, one setter per field in declaration order, then the `P()`
//! and `V()` accessors. The same plan always yields byte-identical text.

use std::collections::BTreeSet;

use crate::error::BuildergenError;
use crate::fields::FieldDescriptor;
use crate::imports::ImportTable;
use crate::types::ReferencedNamespaces;

const RECEIVER_CANDIDATES: [&str; 3] = ["b", "builder", "bldr"];
const ACCESSORS: [&str; 2] = ["P", "V"];

/// Import clauses for every referenced namespace, in first-reference order.
///
/// The only way to obtain a value is [`ResolvedImports::resolve`], which
/// fails unless every namespace has an import, so emitted code never
/// references an unimported package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedImports {
    clauses: Vec<String>,
}

impl ResolvedImports {
    /// Resolves each referenced namespace against the import table.
    ///
    /// # Errors
    ///
    /// Returns [`BuildergenError::UnresolvedImport`] for the first namespace
    /// with no usable import.
    pub fn resolve(
        table: &ImportTable,
        namespaces: &ReferencedNamespaces,
    ) -> Result<Self, BuildergenError> {
        let mut clauses: Vec<String> = Vec::with_capacity(namespaces.len());
        for namespace in namespaces.iter() {
            let entry = table
                .resolve(namespace)
                .ok_or_else(|| BuildergenError::UnresolvedImport {
                    namespace: namespace.to_owned(),
                })?;
            if !clauses.iter().any(|clause| clause == entry.clause()) {
                clauses.push(entry.clause().to_owned());
            }
        }
        Ok(Self { clauses })
    }

    /// Clause texts in emission order.
    pub fn clauses(&self) -> impl Iterator<Item = &str> {
        self.clauses.iter().map(String::as_str)
    }
}

/// Everything the emitter needs to write a builder.
#[derive(Debug, Clone, Copy)]
pub struct BuilderPlan<'a> {
    /// Package the builder is declared in.
    pub package: &'a str,
    /// Name of the target struct.
    pub type_name: &'a str,
    /// Fields in declaration order.
    pub fields: &'a [FieldDescriptor],
    /// Imports required by the field types.
    pub imports: &'a ResolvedImports,
}

/// Emitted Go source for one builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSource {
    text: String,
}

impl GeneratedSource {
    /// The emitted text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consumes the source, returning the emitted text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }
}

/// Name of the builder type generated for `type_name`.
#[must_use]
pub fn builder_name(type_name: &str) -> String {
    format!("{type_name}Builder")
}

/// Setter method name for `field`: the first character in title case, the
/// rest untouched.
#[must_use]
pub fn setter_name(field: &str) -> String {
    let mut chars = field.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut name = String::with_capacity(field.len() + 2);
    match title_case(first) {
        Some(titled) => name.push_str(titled),
        None => name.extend(first.to_uppercase()),
    }
    name.push_str(chars.as_str());
    name
}

/// Checks that every field gets its own setter and none shadows an accessor.
///
/// # Errors
///
/// Returns [`BuildergenError::SetterCollision`] for the first field whose
/// setter name is `P`, `V` or the setter of an earlier field.
pub fn check_setter_names(fields: &[FieldDescriptor]) -> Result<(), BuildergenError> {
    let mut taken: BTreeSet<String> = ACCESSORS.iter().map(|&name| name.to_owned()).collect();
    for field in fields {
        let setter = setter_name(&field.name);
        if !taken.insert(setter.clone()) {
            return Err(BuildergenError::SetterCollision {
                field: field.name.clone(),
                setter,
            });
        }
    }
    Ok(())
}

/// Title-case forms that differ from the upper-case mapping.
const fn title_case(ch: char) -> Option<&'static str> {
    match ch {
        'Ǆ' | 'ǅ' | 'ǆ' => Some("ǅ"),
        'Ǉ' | 'ǈ' | 'ǉ' => Some("ǈ"),
        'Ǌ' | 'ǋ' | 'ǌ' => Some("ǋ"),
        'Ǳ' | 'ǲ' | 'ǳ' => Some("ǲ"),
        'ß' => Some("Ss"),
        _ => None,
    }
}

/// Picks a receiver name that no setter parameter shadows.
fn receiver_name(fields: &[FieldDescriptor]) -> String {
    let is_free = |candidate: &str| fields.iter().all(|field| field.name != candidate);
    if let Some(candidate) = RECEIVER_CANDIDATES
        .into_iter()
        .find(|&candidate| is_free(candidate))
    {
        return candidate.to_owned();
    }
    (0_usize..)
        .map(|n| format!("b{n}"))
        .find(|candidate| is_free(candidate.as_str()))
        .unwrap_or_default()
}

/// Writes the builder source for `plan`.
#[must_use]
pub fn emit_builder(plan: &BuilderPlan<'_>) -> GeneratedSource {
    let type_name = plan.type_name;
    let builder = builder_name(type_name);
    let receiver = receiver_name(plan.fields);
    let mut text = String::with_capacity(512 + plan.fields.len() * 128);

    text.push_str(&format!("package {}\n\n", plan.package));

    let mut has_imports = false;
    for clause in plan.imports.clauses() {
        text.push_str(&format!("import {clause}\n"));
        has_imports = true;
    }
    if has_imports {
        text.push('\n');
    }

    text.push_str(&format!(
        "type {builder} struct {{\n\tinstance *{type_name}\n}}\n"
    ));
    text.push_str(&format!(
        "\nfunc {type_name}Build() *{builder} {{\n\treturn &{builder}{{\n\t\tinstance: &{type_name}{{}},\n\t}}\n}}\n"
    ));

    for field in plan.fields {
        let name = &field.name;
        text.push_str(&format!(
            "\nfunc ({receiver} *{builder}) {setter}({name} {ty}) *{builder} {{\n\t{receiver}.instance.{name} = {name}\n\treturn {receiver}\n}}\n",
            setter = setter_name(name),
            ty = field.type_text,
        ));
    }

    text.push_str(&format!(
        "\nfunc ({receiver} *{builder}) P() *{type_name} {{\n\treturn {receiver}.instance\n}}\n"
    ));
    text.push_str(&format!(
        "\nfunc ({receiver} *{builder}) V() {type_name} {{\n\treturn *{receiver}.instance\n}}\n"
    ));

    tracing::debug!(
        builder = %builder,
        setters = plan.fields.len(),
        bytes = text.len(),
        "emitted builder source"
    );
    GeneratedSource { text }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::ImportSpec;
    use rstest::{fixture, rstest};

    fn field(name: &str, type_text: &str) -> FieldDescriptor {
        FieldDescriptor {
            name: name.to_owned(),
            type_text: type_text.to_owned(),
        }
    }

    #[fixture]
    fn user_fields() -> Vec<FieldDescriptor> {
        vec![field("name", "string"), field("created", "time.Time")]
    }

    fn namespaces(names: &[&str]) -> ReferencedNamespaces {
        let mut set = ReferencedNamespaces::default();
        for name in names {
            set.record(name);
        }
        set
    }

    fn table(specs: &[(Option<&str>, &str)]) -> ImportTable {
        let lowered: Vec<ImportSpec> = specs
            .iter()
            .map(|(alias, path)| ImportSpec {
                alias: alias.map(str::to_owned),
                path: (*path).to_owned(),
            })
            .collect();
        ImportTable::from_specs(&lowered)
    }

    #[rstest]
    #[case("name", "Name")]
    #[case("Name", "Name")]
    #[case("éclair", "Éclair")]
    #[case("ǆungla", "ǅungla")]
    #[case("straße", "Straße")]
    #[case("ßeta", "Sseta")]
    #[case("_hidden", "_hidden")]
    #[case("userID", "UserID")]
    fn setter_names_title_case_the_first_character(#[case] field: &str, #[case] expected: &str) {
        assert_eq!(setter_name(field), expected);
    }

    #[rstest]
    fn emits_full_builder(user_fields: Vec<FieldDescriptor>) {
        let imports = ResolvedImports::resolve(&table(&[(None, "time")]), &namespaces(&["time"]))
            .expect("resolve imports");
        let plan = BuilderPlan {
            package: "user",
            type_name: "User",
            fields: &user_fields,
            imports: &imports,
        };

        let expected = "package user

import \"time\"

type UserBuilder struct {
\tinstance *User
}

func UserBuild() *UserBuilder {
\treturn &UserBuilder{
\t\tinstance: &User{},
\t}
}

func (b *UserBuilder) Name(name string) *UserBuilder {
\tb.instance.name = name
\treturn b
}

func (b *UserBuilder) Created(created time.Time) *UserBuilder {
\tb.instance.created = created
\treturn b
}

func (b *UserBuilder) P() *User {
\treturn b.instance
}

func (b *UserBuilder) V() User {
\treturn *b.instance
}
";
        assert_eq!(emit_builder(&plan).as_str(), expected);
    }

    #[rstest]
    fn omits_import_block_without_namespaces(user_fields: Vec<FieldDescriptor>) {
        let imports = ResolvedImports::default();
        let plan = BuilderPlan {
            package: "user",
            type_name: "User",
            fields: &user_fields,
            imports: &imports,
        };

        let source = emit_builder(&plan);

        assert!(source.as_str().starts_with("package user\n\ntype UserBuilder struct {"));
        assert!(!source.as_str().contains("import"));
    }

    #[rstest]
    fn receiver_avoids_field_named_b() {
        let fields = vec![field("a", "int"), field("b", "int")];
        let imports = ResolvedImports::default();
        let plan = BuilderPlan {
            package: "p",
            type_name: "Pair",
            fields: &fields,
            imports: &imports,
        };

        let source = emit_builder(&plan);

        assert!(source.as_str().contains(
            "func (builder *PairBuilder) B(b int) *PairBuilder {\n\tbuilder.instance.b = b\n\treturn builder\n}"
        ));
    }

    #[rstest]
    #[case(&["b"], "builder")]
    #[case(&["b", "builder"], "bldr")]
    #[case(&["b", "builder", "bldr", "b0"], "b1")]
    fn receiver_name_skips_taken_candidates(#[case] taken: &[&str], #[case] expected: &str) {
        let fields: Vec<_> = taken.iter().map(|name| field(name, "int")).collect();

        assert_eq!(receiver_name(&fields), expected);
    }

    #[rstest]
    #[case::same_title(&["name", "Name"], "Name", "Name")]
    #[case::pointer_accessor(&["id", "p"], "p", "P")]
    #[case::value_accessor(&["V"], "V", "V")]
    fn setter_collisions_are_rejected(
        #[case] names: &[&str],
        #[case] field_name: &str,
        #[case] setter_name: &str,
    ) {
        let fields: Vec<_> = names.iter().map(|name| field(name, "int")).collect();

        let err = check_setter_names(&fields).expect_err("should collide");

        assert!(matches!(
            err,
            BuildergenError::SetterCollision { ref field, ref setter }
                if field == field_name && setter == setter_name
        ));
    }

    #[rstest]
    fn distinct_setters_pass(user_fields: Vec<FieldDescriptor>) {
        assert!(check_setter_names(&user_fields).is_ok());
    }

    #[rstest]
    fn resolve_keeps_first_reference_order() {
        let imports = ResolvedImports::resolve(
            &table(&[(None, "time"), (Some("pb"), "github.com/acme/proto")]),
            &namespaces(&["pb", "time"]),
        )
        .expect("resolve imports");

        assert_eq!(
            imports.clauses().collect::<Vec<_>>(),
            vec!["pb \"github.com/acme/proto\"", "\"time\""]
        );
    }

    #[rstest]
    fn resolve_rejects_unimported_namespace() {
        let err = ResolvedImports::resolve(&table(&[(Some("_"), "pb")]), &namespaces(&["pb"]))
            .expect_err("should fail");

        assert!(matches!(err, BuildergenError::UnresolvedImport { ref namespace } if namespace == "pb"));
    }
}
