//! Lowering from the tree-sitter concrete syntax tree into owned nodes.

use tree_sitter::{Node, Parser, Tree};

use super::{
    ChanDir, FieldDecl, FuncSignature, ImportSpec, ParamGroup, SourceUnit, StructDecl, SyntaxError,
    TypeBody, TypeExpr, TypeSpec,
};

const NEAR_LIMIT: usize = 32;

pub(super) fn parse_tree(text: &str) -> Result<Tree, SyntaxError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|err| SyntaxError::Grammar(err.to_string()))?;
    parser.parse(text, None).ok_or(SyntaxError::NoTree)
}

pub(super) fn lower_unit(tree: &Tree, text: &str) -> Result<SourceUnit, SyntaxError> {
    let root = tree.root_node();
    let lowerer = Lowerer { source: text };
    if let Some(bad) = first_error(root) {
        return Err(lowerer.invalid(bad));
    }

    let mut clause = None;
    let mut imports = Vec::new();
    let mut types = Vec::new();
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        match child.kind() {
            "package_clause" => clause = lowerer.package_name(child),
            "import_declaration" => lowerer.collect_imports(child, &mut imports),
            "type_declaration" => lowerer.collect_types(child, &mut types)?,
            _ => {}
        }
    }

    let package = clause
        .filter(|name| !name.is_empty())
        .ok_or(SyntaxError::MissingPackage)?;
    tracing::trace!(%package, imports = imports.len(), types = types.len(), "lowered source unit");
    Ok(SourceUnit {
        package,
        imports,
        types,
    })
}

/// Depth-first search for the first error or missing node.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if !node.has_error() {
        return None;
    }
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error).or(Some(node))
}

fn line_of(node: Node<'_>) -> usize {
    node.start_position().row + 1
}

struct Lowerer<'src> {
    source: &'src str,
}

impl<'src> Lowerer<'src> {
    fn text(&self, node: Node<'_>) -> &'src str {
        self.source.get(node.byte_range()).unwrap_or_default()
    }

    fn invalid(&self, node: Node<'_>) -> SyntaxError {
        let position = node.start_position();
        let near = if node.is_missing() {
            format!("missing {}", node.kind())
        } else {
            self.text(node).chars().take(NEAR_LIMIT).collect()
        };
        SyntaxError::Invalid {
            line: position.row + 1,
            column: position.column + 1,
            near,
        }
    }

    fn field(&self, node: Node<'_>, name: &str) -> Option<&'src str> {
        node.child_by_field_name(name).map(|child| self.text(child))
    }

    fn package_name(&self, clause: Node<'_>) -> Option<String> {
        let mut cursor = clause.walk();
        clause
            .named_children(&mut cursor)
            .find(|child| child.kind() == "package_identifier")
            .map(|ident| self.text(ident).to_owned())
    }

    fn collect_imports(&self, decl: Node<'_>, out: &mut Vec<ImportSpec>) {
        let mut cursor = decl.walk();
        for child in decl.named_children(&mut cursor) {
            match child.kind() {
                "import_spec" => out.extend(self.import_spec(child)),
                "import_spec_list" => {
                    let mut list_cursor = child.walk();
                    out.extend(
                        child
                            .named_children(&mut list_cursor)
                            .filter(|spec| spec.kind() == "import_spec")
                            .filter_map(|spec| self.import_spec(spec)),
                    );
                }
                _ => {}
            }
        }
    }

    fn import_spec(&self, spec: Node<'_>) -> Option<ImportSpec> {
        let path = self.field(spec, "path")?;
        Some(ImportSpec {
            alias: self.field(spec, "name").map(str::to_owned),
            path: path.trim_matches(|ch| ch == '"' || ch == '`').to_owned(),
        })
    }

    fn collect_types(&self, decl: Node<'_>, out: &mut Vec<TypeSpec>) -> Result<(), SyntaxError> {
        let mut cursor = decl.walk();
        let specs: Vec<_> = decl
            .named_children(&mut cursor)
            .filter(|child| matches!(child.kind(), "type_spec" | "type_alias"))
            .collect();
        for spec in specs {
            let name = self
                .field(spec, "name")
                .ok_or_else(|| SyntaxError::Incomplete {
                    what: "type name",
                    line: line_of(spec),
                })?
                .to_owned();
            let body = if spec.kind() == "type_alias" {
                TypeBody::Alias
            } else {
                self.type_body(spec, &name)?
            };
            out.push(TypeSpec { name, body });
        }
        Ok(())
    }

    fn type_body(&self, spec: Node<'_>, name: &str) -> Result<TypeBody, SyntaxError> {
        let ty = spec
            .child_by_field_name("type")
            .ok_or_else(|| SyntaxError::Incomplete {
                what: "type definition",
                line: line_of(spec),
            })?;
        if ty.kind() != "struct_type" {
            return Ok(TypeBody::Other {
                kind: ty.kind().to_owned(),
            });
        }
        if spec.child_by_field_name("type_parameters").is_some() {
            return Ok(TypeBody::Other {
                kind: "generic struct_type".to_owned(),
            });
        }
        Ok(TypeBody::Struct(StructDecl {
            name: name.to_owned(),
            fields: self.struct_fields(ty)?,
        }))
    }

    fn struct_fields(&self, struct_type: Node<'_>) -> Result<Vec<FieldDecl>, SyntaxError> {
        let mut cursor = struct_type.walk();
        let Some(list) = struct_type
            .named_children(&mut cursor)
            .find(|child| child.kind() == "field_declaration_list")
        else {
            return Ok(Vec::new());
        };
        let mut list_cursor = list.walk();
        let declarations: Vec<_> = list
            .named_children(&mut list_cursor)
            .filter(|child| child.kind() == "field_declaration")
            .collect();
        declarations
            .into_iter()
            .map(|declaration| self.field_decl(declaration))
            .collect()
    }

    fn field_decl(&self, declaration: Node<'_>) -> Result<FieldDecl, SyntaxError> {
        let ty_node = declaration
            .child_by_field_name("type")
            .ok_or_else(|| SyntaxError::Incomplete {
                what: "field type",
                line: line_of(declaration),
            })?;
        let names = self.names(declaration);
        let mut ty = self.type_expr(ty_node);
        // Embedded `*T` keeps its star as a sibling token rather than a pointer_type node.
        if names.is_empty() && has_token(declaration, "*") {
            ty = TypeExpr::Pointer(Box::new(ty));
        }
        Ok(FieldDecl { names, ty })
    }

    fn names(&self, node: Node<'_>) -> Vec<String> {
        let mut cursor = node.walk();
        node.children_by_field_name("name", &mut cursor)
            .map(|name| self.text(name).to_owned())
            .collect()
    }

    fn type_expr(&self, node: Node<'_>) -> TypeExpr {
        match node.kind() {
            "type_identifier" | "identifier" => TypeExpr::Named(self.text(node).to_owned()),
            "qualified_type" => match (self.field(node, "package"), self.field(node, "name")) {
                (Some(namespace), Some(name)) => TypeExpr::Qualified {
                    namespace: namespace.to_owned(),
                    name: name.to_owned(),
                },
                _ => unsupported(node),
            },
            "pointer_type" => self.wrap(first_named(node), TypeExpr::Pointer, node),
            "slice_type" => self.wrap(node.child_by_field_name("element"), TypeExpr::Slice, node),
            "parenthesized_type" => {
                first_named(node).map_or_else(|| unsupported(node), |inner| self.type_expr(inner))
            }
            "array_type" => match (self.field(node, "length"), node.child_by_field_name("element")) {
                (Some(len), Some(elem)) => TypeExpr::Array {
                    len: len.to_owned(),
                    elem: Box::new(self.type_expr(elem)),
                },
                _ => unsupported(node),
            },
            "map_type" => match (
                node.child_by_field_name("key"),
                node.child_by_field_name("value"),
            ) {
                (Some(key), Some(value)) => TypeExpr::Map {
                    key: Box::new(self.type_expr(key)),
                    value: Box::new(self.type_expr(value)),
                },
                _ => unsupported(node),
            },
            "channel_type" => node.child_by_field_name("value").map_or_else(
                || unsupported(node),
                |elem| TypeExpr::Chan {
                    dir: chan_dir(node),
                    elem: Box::new(self.type_expr(elem)),
                },
            ),
            "function_type" => TypeExpr::Func(self.signature(node)),
            _ => unsupported(node),
        }
    }

    fn wrap(
        &self,
        inner: Option<Node<'_>>,
        build: fn(Box<TypeExpr>) -> TypeExpr,
        outer: Node<'_>,
    ) -> TypeExpr {
        inner.map_or_else(
            || unsupported(outer),
            |node| build(Box::new(self.type_expr(node))),
        )
    }

    fn signature(&self, func: Node<'_>) -> FuncSignature {
        let params = func
            .child_by_field_name("parameters")
            .map(|list| self.param_groups(list))
            .unwrap_or_default();
        let results = match func.child_by_field_name("result") {
            Some(list) if list.kind() == "parameter_list" => self.param_groups(list),
            Some(single) => vec![ParamGroup::unnamed(self.type_expr(single))],
            None => Vec::new(),
        };
        FuncSignature { params, results }
    }

    fn param_groups(&self, list: Node<'_>) -> Vec<ParamGroup> {
        let mut cursor = list.walk();
        let declarations: Vec<_> = list.named_children(&mut cursor).collect();
        declarations
            .into_iter()
            .filter_map(|declaration| {
                let variadic = match declaration.kind() {
                    "parameter_declaration" => false,
                    "variadic_parameter_declaration" => true,
                    _ => return None,
                };
                let ty = declaration
                    .child_by_field_name("type")
                    .map_or_else(|| unsupported(declaration), |ty| self.type_expr(ty));
                Some(ParamGroup {
                    names: self.names(declaration),
                    ty,
                    variadic,
                })
            })
            .collect()
    }
}

fn unsupported(node: Node<'_>) -> TypeExpr {
    TypeExpr::Unsupported {
        kind: node.kind().to_owned(),
    }
}

fn first_named(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).find(|child| !child.is_extra())
}

fn has_token(node: Node<'_>, token: &str) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token)
}

fn chan_dir(node: Node<'_>) -> ChanDir {
    let mut cursor = node.walk();
    let tokens: Vec<&str> = node
        .children(&mut cursor)
        .filter(|child| !child.is_named())
        .map(|child| child.kind())
        .collect();
    match tokens.as_slice() {
        ["<-", "chan", ..] => ChanDir::Receive,
        ["chan", "<-", ..] => ChanDir::Send,
        _ => ChanDir::Both,
    }
}
