//! Repository configuration for apidrift

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file at the repository root
const CONFIG_FILE: &str = ".apidrift.toml";

/// Configuration for a repository being analyzed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Labels attached to generated reports
    #[serde(default = "default_labels")]
    pub labels: Vec<String>,

    /// Where the documentation page for a source file lives;
    /// `{stem}` is replaced with the file stem
    #[serde(default = "default_docs_path_template")]
    pub docs_path_template: String,
}

fn default_labels() -> Vec<String> {
    vec!["documentation".to_string(), "readme".to_string()]
}

fn default_docs_path_template() -> String {
    "src/api/{stem}.md".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            labels: default_labels(),
            docs_path_template: default_docs_path_template(),
        }
    }
}

impl Config {
    /// Load configuration from the repository root or return defaults
    pub fn load_or_default(repo_root: &Path) -> Result<Self> {
        let config_path = repo_root.join(CONFIG_FILE);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the repository root
    pub fn save(&self, repo_root: &Path) -> Result<()> {
        let config_path = repo_root.join(CONFIG_FILE);
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    /// Resolve the documentation path for a source file
    pub fn docs_path(&self, file: &Path) -> String {
        let stem = file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown");
        self.docs_path_template.replace("{stem}", stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.labels.is_empty());
        assert!(config.docs_path_template.contains("{stem}"));
    }

    #[test]
    fn test_docs_path_substitution() {
        let config = Config::default();
        assert_eq!(
            config.docs_path(Path::new("src/api/users.py")),
            "src/api/users.md"
        );
    }

    #[test]
    fn test_load_or_default_roundtrip() {
        let dir = tempfile::tempdir().unwrap();

        let missing = Config::load_or_default(dir.path()).unwrap();
        assert_eq!(missing.labels, Config::default().labels);

        let mut custom = Config::default();
        custom.labels = vec!["docs".to_string()];
        custom.save(dir.path()).unwrap();

        let loaded = Config::load_or_default(dir.path()).unwrap();
        assert_eq!(loaded.labels, vec!["docs".to_string()]);
    }
}
