//! API surface extraction module
//!
//! This module parses Python source text into a structural snapshot of
//! its declarations (functions and classes) using tree-sitter.

pub mod api;

pub use api::{ApiExtractor, ApiSurface, DeclKind, Declaration, Parameter, Signature};

use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors produced while extracting an API surface
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The Python grammar could not be loaded into the parser
    #[error("failed to load the Python grammar")]
    Grammar(#[from] tree_sitter::LanguageError),

    /// The parser returned no syntax tree at all
    #[error("parser produced no syntax tree")]
    NoTree,

    /// The source text is not syntactically valid Python
    #[error("source contains syntax errors")]
    Syntax,
}

/// Compute the structural fingerprint of a declaration
///
/// The fingerprint is stable across runs: two declarations with the same
/// kind, signature, and documentation hash to the same value.
pub fn fingerprint(decl: &Declaration) -> String {
    let mut hasher = Sha256::new();
    hasher.update(decl.kind().to_string().as_bytes());
    hasher.update([0]);
    if let Some(signature) = decl.signature() {
        hasher.update(signature.to_string().as_bytes());
    }
    hasher.update([0]);
    hasher.update(decl.doc().as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_stable() {
        let decl = Declaration::Class {
            doc: "A thing.".to_string(),
        };
        assert_eq!(fingerprint(&decl), fingerprint(&decl.clone()));
    }

    #[test]
    fn test_fingerprint_changes_with_doc() {
        let a = Declaration::Class {
            doc: "Old.".to_string(),
        };
        let b = Declaration::Class {
            doc: "New.".to_string(),
        };
        assert_ne!(fingerprint(&a), fingerprint(&b));
    }
}
