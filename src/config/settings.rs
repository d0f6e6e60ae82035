//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.
//! Every field has a default, so an empty object (or no file at all) yields
//! a working configuration against the public UniProt and AlphaFold services.

use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use crate::error::ConfigError;

/// Upper bound UniProt accepts for the `size` search parameter.
const MAX_UNIPROT_PAGE_SIZE: usize = 500;

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Registry endpoints, timeouts and search behaviour.
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Output formatting settings.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.registry.validate()?;
        self.display.validate()
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        message: message.into(),
    }
}

/// UniProt and AlphaFold registry settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Base URL of the UniProtKB REST API.
    /// Default: `https://rest.uniprot.org/uniprotkb`
    #[serde(default = "default_uniprot_base_url")]
    pub uniprot_base_url: String,

    /// Base URL of the AlphaFold prediction API.
    /// Default: `https://alphafold.ebi.ac.uk/api`
    #[serde(default = "default_alphafold_api_url")]
    pub alphafold_api_url: String,

    /// Base URL of the browsable AlphaFold entry pages.
    /// Default: `https://alphafold.ebi.ac.uk/entry`
    #[serde(default = "default_alphafold_entry_url")]
    pub alphafold_entry_url: String,

    /// Organism searched first before falling back to all organisms.
    /// Default: "Homo sapiens"
    #[serde(default = "default_target_organism")]
    pub target_organism: String,

    /// Maximum number of search results requested and displayed.
    #[serde(default = "default_max_search_results")]
    pub max_search_results: usize,

    /// Timeout for UniProt requests in seconds.
    #[serde(default = "default_uniprot_timeout_secs")]
    pub uniprot_timeout_secs: u64,

    /// Timeout for AlphaFold requests in seconds.
    #[serde(default = "default_alphafold_timeout_secs")]
    pub alphafold_timeout_secs: u64,
}

impl RegistryConfig {
    /// Timeout applied to every UniProt request.
    #[must_use]
    pub const fn uniprot_timeout(&self) -> Duration {
        Duration::from_secs(self.uniprot_timeout_secs)
    }

    /// Timeout applied to every AlphaFold request.
    #[must_use]
    pub const fn alphafold_timeout(&self) -> Duration {
        Duration::from_secs(self.alphafold_timeout_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("uniprot_base_url", &self.uniprot_base_url),
            ("alphafold_api_url", &self.alphafold_api_url),
            ("alphafold_entry_url", &self.alphafold_entry_url),
        ] {
            Url::parse(value)
                .map_err(|e| invalid(format!("registry.{field} '{value}' is not a valid URL: {e}")))?;
        }

        if self.target_organism.trim().is_empty() {
            return Err(invalid("registry.target_organism cannot be empty"));
        }

        if !(1..=MAX_UNIPROT_PAGE_SIZE).contains(&self.max_search_results) {
            return Err(invalid(format!(
                "registry.max_search_results must be between 1 and {MAX_UNIPROT_PAGE_SIZE}, got {}",
                self.max_search_results
            )));
        }

        if self.uniprot_timeout_secs == 0 {
            return Err(invalid("registry.uniprot_timeout_secs must be greater than 0"));
        }
        if self.alphafold_timeout_secs == 0 {
            return Err(invalid("registry.alphafold_timeout_secs must be greater than 0"));
        }

        Ok(())
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            uniprot_base_url: default_uniprot_base_url(),
            alphafold_api_url: default_alphafold_api_url(),
            alphafold_entry_url: default_alphafold_entry_url(),
            target_organism: default_target_organism(),
            max_search_results: default_max_search_results(),
            uniprot_timeout_secs: default_uniprot_timeout_secs(),
            alphafold_timeout_secs: default_alphafold_timeout_secs(),
        }
    }
}

fn default_uniprot_base_url() -> String {
    "https://rest.uniprot.org/uniprotkb".to_string()
}

fn default_alphafold_api_url() -> String {
    "https://alphafold.ebi.ac.uk/api".to_string()
}

fn default_alphafold_entry_url() -> String {
    "https://alphafold.ebi.ac.uk/entry".to_string()
}

fn default_target_organism() -> String {
    "Homo sapiens".to_string()
}

const fn default_max_search_results() -> usize {
    5
}

const fn default_uniprot_timeout_secs() -> u64 {
    10
}

const fn default_alphafold_timeout_secs() -> u64 {
    30
}

/// Sequence display settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    /// Sequences longer than this are summarised by length only.
    #[serde(default = "default_sequence_display_limit")]
    pub sequence_display_limit: usize,

    /// Residues per line when a sequence is shown in full.
    #[serde(default = "default_sequence_line_length")]
    pub sequence_line_length: usize,
}

impl DisplayConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.sequence_line_length == 0 {
            return Err(invalid("display.sequence_line_length must be greater than 0"));
        }
        Ok(())
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            sequence_display_limit: default_sequence_display_limit(),
            sequence_line_length: default_sequence_line_length(),
        }
    }
}

const fn default_sequence_display_limit() -> usize {
    500
}

const fn default_sequence_line_length() -> usize {
    60
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let json = r"{}";
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.registry.target_organism, "Homo sapiens");
        assert_eq!(config.registry.max_search_results, 5);
    }

    #[test]
    fn parse_full_config() {
        let json = r#"{
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "_comment": "Test config",
            "registry": {
                "uniprot_base_url": "http://localhost:9000/uniprotkb",
                "alphafold_api_url": "http://localhost:9000/api",
                "alphafold_entry_url": "http://localhost:9000/entry",
                "target_organism": "Mus musculus",
                "max_search_results": 10,
                "uniprot_timeout_secs": 5,
                "alphafold_timeout_secs": 15
            },
            "display": {
                "sequence_display_limit": 1000,
                "sequence_line_length": 80
            },
            "logging": {
                "level": "debug"
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.registry.uniprot_base_url,
            "http://localhost:9000/uniprotkb"
        );
        assert_eq!(config.registry.target_organism, "Mus musculus");
        assert_eq!(config.registry.max_search_results, 10);
        assert_eq!(config.registry.uniprot_timeout(), Duration::from_secs(5));
        assert_eq!(config.registry.alphafold_timeout(), Duration::from_secs(15));
        assert_eq!(config.display.sequence_display_limit, 1000);
        assert_eq!(config.display.sequence_line_length, 80);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn registry_config_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.uniprot_base_url, "https://rest.uniprot.org/uniprotkb");
        assert_eq!(config.alphafold_api_url, "https://alphafold.ebi.ac.uk/api");
        assert_eq!(config.alphafold_entry_url, "https://alphafold.ebi.ac.uk/entry");
        assert_eq!(config.uniprot_timeout(), Duration::from_secs(10));
        assert_eq!(config.alphafold_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn display_config_defaults() {
        let config = DisplayConfig::default();
        assert_eq!(config.sequence_display_limit, 500);
        assert_eq!(config.sequence_line_length, 60);
    }

    #[test]
    fn logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "warn");
    }

    #[test]
    fn reject_invalid_url() {
        let json = r#"{ "registry": { "uniprot_base_url": "not a url" } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("uniprot_base_url"));
    }

    #[test]
    fn reject_zero_search_results() {
        let json = r#"{ "registry": { "max_search_results": 0 } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_oversized_search_results() {
        let json = r#"{ "registry": { "max_search_results": 501 } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_zero_timeout() {
        let json = r#"{ "registry": { "alphafold_timeout_secs": 0 } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_blank_organism() {
        let json = r#"{ "registry": { "target_organism": "  " } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_zero_line_length() {
        let json = r#"{ "display": { "sequence_line_length": 0 } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_unknown_fields() {
        let json = r#"{
            "unknown_field": "value"
        }"#;

        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
