//! Change-set computation between two API surfaces
//!
//! Compares two structural snapshots of a file and produces an ordered
//! list of semantic differences: added, removed, and modified
//! declarations.

mod engine;

pub use engine::diff;

use serde::Serialize;

/// Kind of detected change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Declaration present only in the new surface
    Added,
    /// Declaration present only in the old surface
    Removed,
    /// Declaration present in both, with a differing sub-field
    Modified,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeKind::Added => write!(f, "added"),
            ChangeKind::Removed => write!(f, "removed"),
            ChangeKind::Modified => write!(f, "modified"),
        }
    }
}

/// One detected difference between two API surfaces
#[derive(Debug, Clone, Serialize)]
pub struct ChangeRecord {
    /// Kind of change
    pub kind: ChangeKind,
    /// Name of the affected declaration
    pub name: String,
    /// Human-readable summary of the change
    pub description: String,
}

impl ChangeRecord {
    /// Create a new change record
    pub fn new(kind: ChangeKind, name: &str, description: String) -> Self {
        Self {
            kind,
            name: name.to_string(),
            description,
        }
    }
}
