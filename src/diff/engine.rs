//! The diff algorithm over two API surfaces

use super::{ChangeKind, ChangeRecord};
use crate::extract::{ApiSurface, Declaration};

/// Compute the change-set between two API surfaces
///
/// Pure function of its inputs; never fails. Three passes run in a fixed
/// order, so the result groups all added records before all removed
/// records before all modified records. Within each group, records
/// follow the surface's insertion order.
///
/// A declaration present in both surfaces is checked with first-match
/// priority: kind change, then signature change, then documentation
/// change. Only the first differing sub-field is reported.
pub fn diff(old: &ApiSurface, new: &ApiSurface) -> Vec<ChangeRecord> {
    let mut changes = Vec::new();

    for (name, decl) in new {
        if !old.contains_key(name) {
            let description = match decl {
                Declaration::Function { signature, .. } => {
                    format!("New function with signature: {}", signature)
                }
                Declaration::Class { .. } => "New class".to_string(),
            };
            changes.push(ChangeRecord::new(ChangeKind::Added, name, description));
        }
    }

    for (name, decl) in old {
        if !new.contains_key(name) {
            changes.push(ChangeRecord::new(
                ChangeKind::Removed,
                name,
                format!("Removed {}", decl.kind()),
            ));
        }
    }

    for (name, new_decl) in new {
        let old_decl = match old.get(name) {
            Some(decl) => decl,
            None => continue,
        };

        if old_decl.kind() != new_decl.kind() {
            changes.push(ChangeRecord::new(
                ChangeKind::Modified,
                name,
                format!("Changed from {} to {}", old_decl.kind(), new_decl.kind()),
            ));
            continue;
        }

        // signatures exist only on functions; a class pair always
        // compares equal here and falls through to the doc check
        if let (Some(old_sig), Some(new_sig)) = (old_decl.signature(), new_decl.signature()) {
            if old_sig != new_sig {
                changes.push(ChangeRecord::new(
                    ChangeKind::Modified,
                    name,
                    format!("Signature changed from {} to {}", old_sig, new_sig),
                ));
                continue;
            }
        }

        if old_decl.doc() != new_decl.doc() {
            changes.push(ChangeRecord::new(
                ChangeKind::Modified,
                name,
                "Documentation updated".to_string(),
            ));
        }
    }

    changes
}
