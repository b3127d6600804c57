//! Field extraction for the target struct.

use crate::error::BuildergenError;
use crate::syntax::StructDecl;
use crate::types::{ReferencedNamespaces, TypeRenderer};

const BLANK: &str = "_";

/// A single struct field and its reconstructed type text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name as declared.
    pub name: String,
    /// Go type text used for the setter parameter.
    pub type_text: String,
}

/// Fields of the target struct plus every namespace their types reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    /// Descriptors in declaration order.
    pub fields: Vec<FieldDescriptor>,
    /// Namespaces in first-reference order.
    pub namespaces: ReferencedNamespaces,
}

/// Walks the field declarations of `decl` in source order.
///
/// A declaration such as `x, y int` yields one descriptor per name; an
/// embedded field is named after its type. Blank `_` fields cannot be
/// assigned and are skipped.
///
/// # Errors
///
/// Returns [`BuildergenError::UnsupportedTypeExpression`] when a field type
/// cannot be reproduced and [`BuildergenError::EmptyStruct`] when the struct
/// yields no fields.
pub fn extract_fields(decl: &StructDecl) -> Result<ExtractedFields, BuildergenError> {
    let mut renderer = TypeRenderer::new();
    let mut fields = Vec::new();

    for field in &decl.fields {
        let declared = field.field_names();
        let names: Vec<&str> = declared.iter().copied().filter(|&name| name != BLANK).collect();
        if names.is_empty() && !declared.is_empty() {
            continue;
        }
        let type_text = renderer.render(&field.ty).map_err(|err| {
            let label = if names.is_empty() {
                "embedded field".to_owned()
            } else {
                names.join(", ")
            };
            BuildergenError::UnsupportedTypeExpression {
                field: label,
                kind: err.kind,
            }
        })?;
        fields.extend(names.into_iter().map(|name| FieldDescriptor {
            name: name.to_owned(),
            type_text: type_text.clone(),
        }));
    }

    if fields.is_empty() {
        return Err(BuildergenError::EmptyStruct {
            type_name: decl.name.clone(),
        });
    }
    tracing::debug!(
        type_name = %decl.name,
        fields = fields.len(),
        namespaces = renderer.namespaces().len(),
        "extracted struct fields"
    );
    Ok(ExtractedFields {
        fields,
        namespaces: renderer.into_namespaces(),
    })
}
