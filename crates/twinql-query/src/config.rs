//! Builder configuration
//!
//! Defaults for the root aliases and logging behaviour of a
//! [`QueryBuilder`](crate::QueryBuilder). Loadable from TOML; every field is
//! optional in the document.
//!
//! ```toml
//! twin_alias = "t"
//! relationship_alias = "r"
//! log_rendered = true
//! ```

use crate::alias::validate_alias;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;
use twinql_core::{QueryError, Result};

/// Query builder configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Root alias for `FROM DIGITALTWINS` queries
    pub twin_alias: String,
    /// Root alias for `FROM RELATIONSHIPS` queries
    pub relationship_alias: String,
    /// Emit a debug event with the full query text whenever one is rendered
    pub log_rendered: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            twin_alias: "twin".to_string(),
            relationship_alias: "relationship".to_string(),
            log_rendered: false,
        }
    }
}

impl QueryConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)
            .map_err(|e| QueryError::config(format!("Failed to parse: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            QueryError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        debug!("Loaded query config from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Both root aliases must be usable as unquoted aliases.
    pub fn validate(&self) -> Result<()> {
        for (field, alias) in [
            ("twin_alias", &self.twin_alias),
            ("relationship_alias", &self.relationship_alias),
        ] {
            validate_alias(field, alias).map_err(|e| QueryError::config(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_is_valid() {
        let config = QueryConfig::default();
        assert_eq!(config.twin_alias, "twin");
        assert_eq!(config.relationship_alias, "relationship");
        assert!(!config.log_rendered);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_document() {
        let config = QueryConfig::from_toml_str("twin_alias = \"t\"").unwrap();
        assert_eq!(config.twin_alias, "t");
        assert_eq!(config.relationship_alias, "relationship");
    }

    #[test]
    fn test_full_document() {
        let config = QueryConfig::from_toml_str(
            r#"
            twin_alias = "device"
            relationship_alias = "edge"
            log_rendered = true
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            QueryConfig {
                twin_alias: "device".to_string(),
                relationship_alias: "edge".to_string(),
                log_rendered: true,
            }
        );
    }

    #[test]
    fn test_invalid_alias_rejected() {
        let err = QueryConfig::from_toml_str("relationship_alias = \"select\"").unwrap_err();
        match err {
            QueryError::Config { message } => assert!(message.contains("relationship_alias")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            QueryConfig::from_toml_str("twin_alias = "),
            Err(QueryError::Config { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "twin_alias = \"asset\"").unwrap();

        let config = QueryConfig::load(file.path()).unwrap();
        assert_eq!(config.twin_alias, "asset");
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            QueryConfig::load("/nonexistent/twinql/query.toml"),
            Err(QueryError::Config { .. })
        ));
    }
}
