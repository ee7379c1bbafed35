//! Report rendering and delivery
//!
//! Turns a change-set into a titled, labeled report and hands it to a
//! pluggable sink. Issue-tracker backends live behind the [`ReportSink`]
//! trait; the shipped implementation prints to the console.

use crate::diff::{ChangeKind, ChangeRecord};
use crate::extract::{ApiSurface, Declaration};
use crate::repo::Config;
use anyhow::Result;
use std::path::Path;

/// A rendered report ready for delivery
#[derive(Debug, Clone)]
pub struct Report {
    /// Report title
    pub title: String,
    /// Rendered body text
    pub body: String,
    /// Category labels
    pub labels: Vec<String>,
}

/// Destination for rendered reports
pub trait ReportSink {
    /// Deliver a report
    fn submit(&self, report: &Report) -> Result<()>;
}

/// Sink that prints reports to standard output
pub struct ConsoleSink;

impl ReportSink for ConsoleSink {
    fn submit(&self, report: &Report) -> Result<()> {
        println!("{}", report.title);
        println!("{}", "=".repeat(report.title.len()));
        println!("Labels: {}\n", report.labels.join(", "));
        println!("{}", report.body);
        Ok(())
    }
}

/// Build a report for a file whose API surface changed
pub fn build_change_report(
    file: &Path,
    changes: &[ChangeRecord],
    new_surface: &ApiSurface,
    config: &Config,
) -> Report {
    let title = format!("Documentation update needed for {}", file.display());

    let mut body = String::new();
    body.push_str(&format!(
        "The file `{}` has been modified. Please review and update the \
         documentation for the following changes:\n\n",
        file.display()
    ));

    for change in changes {
        body.push_str(&format!(
            "- {:?}: {} ({})\n",
            change.kind, change.name, change.description
        ));
    }
    body.push('\n');

    // full snippets for added functions so the reader does not have to
    // open the source to document them
    for change in changes.iter().filter(|c| c.kind == ChangeKind::Added) {
        if let Some(Declaration::Function { signature, doc }) = new_surface.get(&change.name) {
            body.push_str(&format!("```python\n{}{}\n", change.name, signature));
            if !doc.is_empty() {
                body.push_str(&format!("\"\"\"{}\"\"\"\n", doc));
            }
            body.push_str("```\n\n");
        }
    }

    push_update_steps(&mut body, file, config);

    Report {
        title,
        body,
        labels: config.labels.clone(),
    }
}

/// Build a report for a file that has no previous version
///
/// Lists the full extracted surface instead of a diff.
pub fn build_first_version_report(file: &Path, surface: &ApiSurface, config: &Config) -> Report {
    let title = format!("Documentation update needed for {}", file.display());

    let mut body = String::new();
    body.push_str(&format!(
        "The file `{}` is new. Please document the following declarations:\n\n",
        file.display()
    ));

    for (name, decl) in surface {
        match decl {
            Declaration::Function { signature, doc } => {
                body.push_str(&format!("```python\n{}{}\n", name, signature));
                if !doc.is_empty() {
                    body.push_str(&format!("\"\"\"{}\"\"\"\n", doc));
                }
                body.push_str("```\n\n");
            }
            Declaration::Class { .. } => {
                body.push_str(&format!("- class {}\n\n", name));
            }
        }
    }

    push_update_steps(&mut body, file, config);

    Report {
        title,
        body,
        labels: config.labels.clone(),
    }
}

fn push_update_steps(body: &mut String, file: &Path, config: &Config) {
    body.push_str("Steps to update the documentation:\n");
    body.push_str(&format!("1. Review the changes in `{}`\n", file.display()));
    body.push_str(&format!(
        "2. Update the corresponding documentation in `{}`\n",
        config.docs_path(file)
    ));
    body.push_str("3. Create a pull request with the documentation updates\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{Parameter, Signature};

    fn added_function_surface() -> ApiSurface {
        let mut surface = ApiSurface::new();
        surface.insert(
            "greet".to_string(),
            Declaration::Function {
                signature: Signature::new(vec![Parameter::new("name", "str")], "str"),
                doc: "Say hello.".to_string(),
            },
        );
        surface
    }

    #[test]
    fn test_change_report_lists_changes_and_snippets() {
        let changes = vec![ChangeRecord::new(
            ChangeKind::Added,
            "greet",
            "New function with signature: (name: str) -> str".to_string(),
        )];
        let surface = added_function_surface();
        let config = Config::default();

        let report = build_change_report(Path::new("src/api/users.py"), &changes, &surface, &config);

        assert!(report.title.contains("src/api/users.py"));
        assert!(report.body.contains("- Added: greet"));
        assert!(report.body.contains("greet(name: str) -> str"));
        assert!(report.body.contains("Say hello."));
        assert!(report.body.contains("src/api/users.md"));
        assert_eq!(report.labels, config.labels);
    }

    #[test]
    fn test_first_version_report_lists_surface() {
        let mut surface = added_function_surface();
        surface.insert(
            "Greeter".to_string(),
            Declaration::Class {
                doc: "Greets.".to_string(),
            },
        );
        let config = Config::default();

        let report = build_first_version_report(Path::new("new.py"), &surface, &config);

        assert!(report.body.contains("is new"));
        assert!(report.body.contains("greet(name: str) -> str"));
        assert!(report.body.contains("class Greeter"));
    }
}
