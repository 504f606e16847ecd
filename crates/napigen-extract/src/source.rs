//! Source-text front end.
//!
//! Parses TypeScript with tree-sitter and collects decorated classes and
//! static methods. Only annotation text is read; method bodies and
//! initializers are ignored.

use crate::builder::{Extraction, IrBuilder};
use crate::error::{ExtractError, ExtractResult};
use crate::raw::{RawExport, RawField, RawParam, RawSchema, RawStruct};
use napigen_core::{Markers, SourceLocation};
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser};

/// A frontend source file and its contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub contents: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    pub fn read(path: impl AsRef<Path>) -> ExtractResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(path, contents))
    }
}

/// Parse every file and build one IR from all of their declarations.
///
/// Struct references resolve across files. The returned extraction may carry
/// error diagnostics; call [`Extraction::into_result`] to reject them.
pub fn parse_from_source(files: &[SourceFile], markers: &Markers) -> ExtractResult<Extraction> {
    let mut parser = Parser::new();
    parser
        .set_language(&arborium_typescript::language().into())
        .map_err(|e| ExtractError::Grammar(e.to_string()))?;

    let mut raw = RawSchema::new();
    for file in files {
        tracing::debug!("parsing {}", file.path.display());
        raw.extend(collect_declarations(&mut parser, file, markers)?);
    }

    Ok(IrBuilder::new().build(raw))
}

fn collect_declarations(
    parser: &mut Parser,
    file: &SourceFile,
    markers: &Markers,
) -> ExtractResult<RawSchema> {
    let file_name = file.path.display().to_string();
    let tree = parser
        .parse(&file.contents, None)
        .ok_or_else(|| ExtractError::Grammar(format!("failed to parse {file_name}")))?;

    let root = tree.root_node();
    if root.has_error() {
        let node = first_error(root).unwrap_or(root);
        let position = node.start_position();
        let snippet: String = node
            .utf8_text(file.contents.as_bytes())
            .unwrap_or("")
            .chars()
            .take(40)
            .collect();
        return Err(ExtractError::Syntax {
            file: file_name,
            line: position.row + 1,
            column: position.column + 1,
            snippet,
        });
    }

    let ctx = ExtractContext {
        source: &file.contents,
        file: &file_name,
        markers,
    };
    Ok(ctx.extract(root))
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error())
        .find_map(first_error)
}

/// Statement block of `namespace X {}`, `module X {}` or `declare module "x" {}`
fn module_body(node: Node) -> Option<Node> {
    match node.kind() {
        "internal_module" | "module" => node.child_by_field_name("body"),
        "expression_statement" | "ambient_declaration" => {
            let mut cursor = node.walk();
            let body = node.named_children(&mut cursor).find_map(module_body);
            body
        }
        _ => None,
    }
}

struct ExtractContext<'a> {
    source: &'a str,
    file: &'a str,
    markers: &'a Markers,
}

impl<'a> ExtractContext<'a> {
    fn node_text(&self, node: Node) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn location(&self, node: Node) -> Option<SourceLocation> {
        let position = node.start_position();
        Some(SourceLocation::new(
            self.file,
            position.row + 1,
            position.column + 1,
        ))
    }

    fn extract(&self, root: Node) -> RawSchema {
        let mut schema = RawSchema::new();
        self.extract_statements(root, &mut schema);
        schema
    }

    /// Walk one statement list, descending into namespace and module bodies
    fn extract_statements(&self, parent: Node, schema: &mut RawSchema) {
        let mut pending_docs = Vec::new();

        let mut cursor = parent.walk();
        for child in parent.children(&mut cursor) {
            match child.kind() {
                "comment" => pending_docs = self.doc_comment(child),
                "class_declaration" | "abstract_class_declaration" => {
                    let docs = std::mem::take(&mut pending_docs);
                    self.extract_class(child, Vec::new(), docs, schema);
                }
                "export_statement" => {
                    if let Some(decl) = child.child_by_field_name("declaration") {
                        if matches!(
                            decl.kind(),
                            "class_declaration" | "abstract_class_declaration"
                        ) {
                            let docs = std::mem::take(&mut pending_docs);
                            self.extract_class(decl, self.decorators_of(child), docs, schema);
                        } else if let Some(body) = module_body(decl) {
                            self.extract_statements(body, schema);
                        }
                    }
                    pending_docs.clear();
                }
                _ => {
                    if let Some(body) = module_body(child) {
                        self.extract_statements(body, schema);
                    }
                    pending_docs.clear();
                }
            }
        }
    }

    fn extract_class(
        &self,
        node: Node,
        mut decorators: Vec<String>,
        docs: Vec<String>,
        schema: &mut RawSchema,
    ) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let Some(body) = node.child_by_field_name("body") else {
            return;
        };
        let class_name = self.node_text(name_node).to_string();

        decorators.extend(self.decorators_of(node));
        let is_struct = decorators.iter().any(|d| self.markers.is_struct(d));

        let mut fields = Vec::new();
        let mut pending_decorators = Vec::new();
        let mut pending_docs = Vec::new();

        let mut cursor = body.walk();
        for member in body.children(&mut cursor) {
            match member.kind() {
                "comment" => pending_docs = self.doc_comment(member),
                "decorator" => {
                    if let Some(name) = self.decorator_name(member) {
                        pending_decorators.push(name);
                    }
                }
                "public_field_definition" => {
                    let docs = std::mem::take(&mut pending_docs);
                    pending_decorators.clear();
                    if is_struct
                        && !self.is_static(member)
                        && let Some(field) = self.extract_field(member, docs)
                    {
                        fields.push(field);
                    }
                }
                "method_definition" => {
                    let docs = std::mem::take(&mut pending_docs);
                    let mut method_decorators = std::mem::take(&mut pending_decorators);
                    method_decorators.extend(self.decorators_of(member));
                    if let Some(export) =
                        self.extract_method(member, &class_name, &method_decorators, docs)
                    {
                        schema.exports.push(export);
                    }
                }
                _ if member.is_named() => {
                    pending_docs.clear();
                    pending_decorators.clear();
                }
                _ => {}
            }
        }

        if is_struct {
            schema.structs.push(RawStruct {
                name: class_name,
                fields,
                docs,
                location: self.location(name_node),
            });
        }
    }

    fn extract_field(&self, node: Node, docs: Vec<String>) -> Option<RawField> {
        let name_node = node.child_by_field_name("name")?;
        let name = strip_quotes(self.node_text(name_node)).to_string();
        let type_text = node
            .child_by_field_name("type")
            .and_then(|annotation| self.annotation_text(annotation));

        Some(RawField {
            name,
            type_text,
            optional: self.has_token(node, "?"),
            docs,
            location: self.location(name_node),
        })
    }

    fn extract_method(
        &self,
        node: Node,
        class_name: &str,
        decorators: &[String],
        docs: Vec<String>,
    ) -> Option<RawExport> {
        let sync_marker = decorators.iter().any(|d| self.markers.is_export(d));
        let async_marker = decorators.iter().any(|d| self.markers.is_async_export(d));
        if !sync_marker && !async_marker {
            return None;
        }

        let name_node = node.child_by_field_name("name")?;
        let params = node
            .child_by_field_name("parameters")
            .map(|params| self.extract_params(params))
            .unwrap_or_default();
        let return_text = node
            .child_by_field_name("return_type")
            .and_then(|annotation| self.annotation_text(annotation));

        Some(RawExport {
            owning_class: Some(class_name.to_string()),
            method_name: self.node_text(name_node).to_string(),
            is_static: self.is_static(node),
            sync_marker,
            async_marker,
            params,
            return_text,
            docs,
            location: self.location(name_node),
        })
    }

    fn extract_params(&self, node: Node) -> Vec<RawParam> {
        let mut params = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if !matches!(child.kind(), "required_parameter" | "optional_parameter") {
                continue;
            }
            let name = child
                .child_by_field_name("pattern")
                .filter(|pattern| pattern.kind() == "identifier")
                .map(|pattern| self.node_text(pattern).to_string())
                .unwrap_or_else(|| "param".to_string());
            let type_text = child
                .child_by_field_name("type")
                .and_then(|annotation| self.annotation_text(annotation));
            params.push(RawParam { name, type_text });
        }
        params
    }

    /// Text of the type inside a `type_annotation` (after the colon)
    fn annotation_text(&self, annotation: Node) -> Option<String> {
        let mut cursor = annotation.walk();
        let ty = annotation.named_children(&mut cursor).next()?;
        Some(self.node_text(ty).trim().to_string())
    }

    fn decorators_of(&self, node: Node) -> Vec<String> {
        let mut cursor = node.walk();
        node.children(&mut cursor)
            .filter(|child| child.kind() == "decorator")
            .filter_map(|decorator| self.decorator_name(decorator))
            .collect()
    }

    /// `@Name`, `@Name(...)` and `@ns.Name(...)` all yield `Name`
    fn decorator_name(&self, node: Node) -> Option<String> {
        let mut cursor = node.walk();
        let expr = node.named_children(&mut cursor).next()?;
        let callee = match expr.kind() {
            "call_expression" => expr.child_by_field_name("function")?,
            _ => expr,
        };
        let name_node = match callee.kind() {
            "member_expression" => callee.child_by_field_name("property")?,
            _ => callee,
        };
        Some(self.node_text(name_node).to_string())
    }

    fn is_static(&self, node: Node) -> bool {
        self.has_token(node, "static")
    }

    fn has_token(&self, node: Node, token: &str) -> bool {
        let mut cursor = node.walk();
        node.children(&mut cursor)
            .any(|child| !child.is_named() && child.kind() == token)
    }

    /// Lines of a `/** ... */` comment; empty for any other comment
    fn doc_comment(&self, node: Node) -> Vec<String> {
        let text = self.node_text(node);
        let Some(inner) = text.strip_prefix("/**").and_then(|s| s.strip_suffix("*/")) else {
            return Vec::new();
        };
        inner
            .lines()
            .map(|line| line.trim().trim_start_matches('*').trim())
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn strip_quotes(text: &str) -> &str {
    text.trim_matches(|c| c == '"' || c == '\'')
}
