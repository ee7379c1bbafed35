//! Python API surface extraction using tree-sitter
//!
//! Extracts a structural snapshot of a source file's declarations:
//! - Function definitions with parameter and return annotations
//! - Class definitions with their docstrings
//!
//! The walk is flat: nested declarations are captured under their bare
//! name, and a later declaration with the same name overwrites an
//! earlier one while keeping its position in the surface.

use super::ExtractError;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Sentinel used when a parameter or return type carries no annotation
const ANY: &str = "Any";

/// An insertion-ordered map of declaration name to structural metadata
pub type ApiSurface = IndexMap<String, Declaration>;

/// Kind of extracted declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    Function,
    Class,
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclKind::Function => write!(f, "function"),
            DeclKind::Class => write!(f, "class"),
        }
    }
}

/// One named declaration extracted from a source unit
///
/// Only functions carry a signature; classes are captured shallowly as
/// their docstring alone, so a class can never differ by signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Declaration {
    Function { signature: Signature, doc: String },
    Class { doc: String },
}

impl Declaration {
    /// Kind of this declaration
    pub fn kind(&self) -> DeclKind {
        match self {
            Declaration::Function { .. } => DeclKind::Function,
            Declaration::Class { .. } => DeclKind::Class,
        }
    }

    /// Signature, present only for functions
    pub fn signature(&self) -> Option<&Signature> {
        match self {
            Declaration::Function { signature, .. } => Some(signature),
            Declaration::Class { .. } => None,
        }
    }

    /// Attached documentation text, empty when absent
    pub fn doc(&self) -> &str {
        match self {
            Declaration::Function { doc, .. } => doc,
            Declaration::Class { doc } => doc,
        }
    }
}

/// A function parameter with its declared annotation (or `Any`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub annotation: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, annotation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotation: annotation.into(),
        }
    }
}

/// An ordered function signature
///
/// Renders canonically as `"(p1: T1, p2: T2) -> R"`; two signatures are
/// equal exactly when their canonical renderings are equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<Parameter>,
    pub returns: String,
}

impl Signature {
    pub fn new(params: Vec<Parameter>, returns: impl Into<String>) -> Self {
        Self {
            params,
            returns: returns.into(),
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|p| format!("{}: {}", p.name, p.annotation))
            .collect();
        write!(f, "({}) -> {}", params.join(", "), self.returns)
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Extracts API surfaces from Python source text
pub struct ApiExtractor {
    parser: tree_sitter::Parser,
}

impl ApiExtractor {
    /// Create a new extractor with the Python grammar loaded
    pub fn new() -> Result<Self, ExtractError> {
        let mut parser = tree_sitter::Parser::new();
        let language: tree_sitter::Language = tree_sitter_python::LANGUAGE.into();
        parser.set_language(&language)?;
        Ok(Self { parser })
    }

    /// Extract the API surface of a source unit
    ///
    /// Empty or whitespace-only text yields an empty surface. Malformed
    /// syntax also yields an empty surface after logging a diagnostic;
    /// callers that need to tell the two apart use [`try_extract`].
    ///
    /// [`try_extract`]: ApiExtractor::try_extract
    pub fn extract(&mut self, source: &str) -> ApiSurface {
        match self.try_extract(source) {
            Ok(surface) => surface,
            Err(e) => {
                tracing::warn!("extraction failed: {}", e);
                ApiSurface::new()
            }
        }
    }

    /// Extract the API surface, surfacing parse failures as errors
    pub fn try_extract(&mut self, source: &str) -> Result<ApiSurface, ExtractError> {
        if source.trim().is_empty() {
            return Ok(ApiSurface::new());
        }

        let tree = self
            .parser
            .parse(source, None)
            .ok_or(ExtractError::NoTree)?;

        if tree.root_node().has_error() {
            return Err(ExtractError::Syntax);
        }

        let mut surface = ApiSurface::new();
        self.walk(tree.root_node(), source, &mut surface);
        Ok(surface)
    }

    /// Pre-order walk over the whole tree
    ///
    /// Recursion continues into function and class bodies, so nested
    /// declarations land in the same flat surface under their bare name.
    fn walk(&self, node: tree_sitter::Node, source: &str, surface: &mut ApiSurface) {
        match node.kind() {
            "function_definition" => {
                if let Some((name, decl)) = self.function_declaration(node, source) {
                    surface.insert(name, decl);
                }
            }
            "class_definition" => {
                if let Some((name, decl)) = self.class_declaration(node, source) {
                    surface.insert(name, decl);
                }
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.walk(child, source, surface);
        }
    }

    /// Extract a function declaration
    fn function_declaration(
        &self,
        node: tree_sitter::Node,
        source: &str,
    ) -> Option<(String, Declaration)> {
        let name_node = node.child_by_field_name("name")?;
        let name = name_node.utf8_text(source.as_bytes()).ok()?.to_string();

        let signature = self.function_signature(node, source);
        let doc = self.docstring(node, source);

        Some((name, Declaration::Function { signature, doc }))
    }

    /// Extract a class declaration
    ///
    /// Deliberately shallow: docstring only, no member enumeration and
    /// no base-class capture. Methods are picked up by the flat walk
    /// under their own names.
    fn class_declaration(
        &self,
        node: tree_sitter::Node,
        source: &str,
    ) -> Option<(String, Declaration)> {
        let name_node = node.child_by_field_name("name")?;
        let name = name_node.utf8_text(source.as_bytes()).ok()?.to_string();

        let doc = self.docstring(node, source);

        Some((name, Declaration::Class { doc }))
    }

    /// Build the signature of a function node
    ///
    /// Parameters are collected left to right with their declared
    /// annotation or `Any`. Splat parameters (`*args`, `**kwargs`) and
    /// the bare `*` / `/` separators are skipped.
    fn function_signature(&self, node: tree_sitter::Node, source: &str) -> Signature {
        let mut params = Vec::new();

        if let Some(parameters) = node.child_by_field_name("parameters") {
            let mut cursor = parameters.walk();
            for param in parameters.named_children(&mut cursor) {
                match param.kind() {
                    "identifier" => {
                        if let Ok(name) = param.utf8_text(source.as_bytes()) {
                            params.push(Parameter::new(name, ANY));
                        }
                    }
                    "typed_parameter" => {
                        // name is the first named child; skip splat forms
                        let name = param
                            .named_child(0)
                            .filter(|n| n.kind() == "identifier")
                            .and_then(|n| n.utf8_text(source.as_bytes()).ok());
                        if let Some(name) = name {
                            let annotation = param
                                .child_by_field_name("type")
                                .and_then(|n| n.utf8_text(source.as_bytes()).ok())
                                .unwrap_or(ANY);
                            params.push(Parameter::new(name, annotation));
                        }
                    }
                    "default_parameter" | "typed_default_parameter" => {
                        let name = param
                            .child_by_field_name("name")
                            .filter(|n| n.kind() == "identifier")
                            .and_then(|n| n.utf8_text(source.as_bytes()).ok());
                        if let Some(name) = name {
                            let annotation = param
                                .child_by_field_name("type")
                                .and_then(|n| n.utf8_text(source.as_bytes()).ok())
                                .unwrap_or(ANY);
                            params.push(Parameter::new(name, annotation));
                        }
                    }
                    _ => {}
                }
            }
        }

        let returns = node
            .child_by_field_name("return_type")
            .and_then(|n| n.utf8_text(source.as_bytes()).ok())
            .unwrap_or(ANY)
            .to_string();

        Signature { params, returns }
    }

    /// Extract the docstring of a function or class node
    ///
    /// Only the first statement of the body counts, and only when it is
    /// a string expression. Returns the empty string when absent.
    fn docstring(&self, node: tree_sitter::Node, source: &str) -> String {
        let body = match node.child_by_field_name("body") {
            Some(body) => body,
            None => return String::new(),
        };

        let mut cursor = body.walk();
        if let Some(first) = body.named_children(&mut cursor).next() {
            if first.kind() == "expression_statement" {
                let mut inner_cursor = first.walk();
                for child in first.named_children(&mut inner_cursor) {
                    if child.kind() == "string" {
                        if let Ok(text) = child.utf8_text(source.as_bytes()) {
                            return strip_string_delimiters(text);
                        }
                    }
                }
            }
        }

        String::new()
    }
}

/// Remove string prefixes and quote delimiters from a raw string literal
fn strip_string_delimiters(raw: &str) -> String {
    let raw = raw.trim_start_matches(|c| "rRbBuUfF".contains(c));
    for delim in ["\"\"\"", "'''", "\"", "'"] {
        if raw.len() >= delim.len() * 2 && raw.starts_with(delim) && raw.ends_with(delim) {
            return raw[delim.len()..raw.len() - delim.len()].trim().to_string();
        }
    }
    raw.trim().to_string()
}
