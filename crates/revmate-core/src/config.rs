use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RevmateError;

/// Top-level configuration loaded from `.revmate.toml`.
///
/// Every field has a default, so an absent or empty file yields a fully
/// usable configuration.
///
/// # Examples
///
/// ```
/// use revmate_core::RevmateConfig;
///
/// let config = RevmateConfig::default();
/// assert_eq!(config.walk.max_depth, 100);
/// assert_eq!(config.report.size_threshold, 200);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RevmateConfig {
    /// History-walk settings for reviewer attribution.
    #[serde(default)]
    pub walk: WalkConfig,
    /// Report rendering settings.
    #[serde(default)]
    pub report: ReportConfig,
}

impl RevmateConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RevmateError::Io`] if the file cannot be read, or
    /// [`RevmateError::Toml`] if the content is not valid TOML.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use revmate_core::RevmateConfig;
    /// use std::path::Path;
    ///
    /// let config = RevmateConfig::from_file(Path::new(".revmate.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, RevmateError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`RevmateError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use revmate_core::RevmateConfig;
    ///
    /// let toml = r#"
    /// [walk]
    /// max_depth = 50
    /// "#;
    /// let config = RevmateConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.walk.max_depth, 50);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, RevmateError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}

/// Settings that bound the attribution walk through history.
///
/// # Examples
///
/// ```
/// use revmate_core::WalkConfig;
///
/// let config = WalkConfig::default();
/// assert_eq!(config.per_file_cap, 4);
/// assert_eq!(config.author_blacklist_prefixes, vec!["jenkins".to_string()]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkConfig {
    /// Maximum number of commits visited by the walk (default: 100).
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Maximum attributing commits recorded per file (default: 4).
    #[serde(default = "default_per_file_cap")]
    pub per_file_cap: usize,
    /// Author email prefixes whose commits never attribute (default:
    /// `["jenkins"]`, the usual service-account prefix).
    #[serde(default = "default_blacklist_prefixes")]
    pub author_blacklist_prefixes: Vec<String>,
}

fn default_max_depth() -> usize {
    100
}

fn default_per_file_cap() -> usize {
    4
}

fn default_blacklist_prefixes() -> Vec<String> {
    vec!["jenkins".into()]
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            per_file_cap: default_per_file_cap(),
            author_blacklist_prefixes: default_blacklist_prefixes(),
        }
    }
}

/// Settings for rendering the outward-facing report.
///
/// # Examples
///
/// ```
/// use revmate_core::ReportConfig;
///
/// let config = ReportConfig::default();
/// assert_eq!(config.size_threshold, 200);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Changed-line count above which the report flags the commit as
    /// possibly too large for an effective review (default: 200, after
    /// Cohen 2006).
    #[serde(default = "default_size_threshold")]
    pub size_threshold: u64,
}

fn default_size_threshold() -> u64 {
    200
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            size_threshold: default_size_threshold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = RevmateConfig::default();
        assert_eq!(config.walk.max_depth, 100);
        assert_eq!(config.walk.per_file_cap, 4);
        assert_eq!(config.walk.author_blacklist_prefixes, vec!["jenkins"]);
        assert_eq!(config.report.size_threshold, 200);
    }

    #[test]
    fn parse_minimal_toml() {
        let toml = r#"
[walk]
max_depth = 25
per_file_cap = 2
"#;
        let config = RevmateConfig::from_toml(toml).unwrap();
        assert_eq!(config.walk.max_depth, 25);
        assert_eq!(config.walk.per_file_cap, 2);
        // Untouched sections keep their defaults
        assert_eq!(config.walk.author_blacklist_prefixes, vec!["jenkins"]);
        assert_eq!(config.report.size_threshold, 200);
    }

    #[test]
    fn parse_full_toml() {
        let toml = r#"
[walk]
max_depth = 500
per_file_cap = 8
author_blacklist_prefixes = ["jenkins", "ci-bot", "noreply"]

[report]
size_threshold = 400
"#;
        let config = RevmateConfig::from_toml(toml).unwrap();
        assert_eq!(config.walk.max_depth, 500);
        assert_eq!(config.walk.per_file_cap, 8);
        assert_eq!(
            config.walk.author_blacklist_prefixes,
            vec!["jenkins", "ci-bot", "noreply"]
        );
        assert_eq!(config.report.size_threshold, 400);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let config = RevmateConfig::from_toml("").unwrap();
        assert_eq!(config.walk.max_depth, 100);
        assert_eq!(config.walk.per_file_cap, 4);
    }

    #[test]
    fn invalid_toml_returns_error() {
        let result = RevmateConfig::from_toml("{{invalid}}");
        assert!(result.is_err());
    }

    #[test]
    fn blacklist_can_be_emptied() {
        let toml = r#"
[walk]
author_blacklist_prefixes = []
"#;
        let config = RevmateConfig::from_toml(toml).unwrap();
        assert!(config.walk.author_blacklist_prefixes.is_empty());
    }
}
