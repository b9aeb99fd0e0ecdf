// src/config.rs
//! Resource locations and the analyzer endpoint.
//! Lookup order: explicit path via env var, then the default path, then
//! built-in defaults. Supports TOML or JSON, decided by extension with a
//! TOML-first fallback.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/resources.toml";
pub const ENV_CONFIG_PATH: &str = "SENTIMENT_RESOURCES_PATH";
pub const ENV_ANALYZER_URL: &str = "SENTIMENT_ANALYZER_URL";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResourceConfig {
    pub arsenl: PathBuf,
    pub arasenti: PathBuf,
    pub dahl: PathBuf,
    pub emojis: PathBuf,
    pub negation: PathBuf,
    pub ngrams_dir: PathBuf,
    /// Analyzer endpoint; absent means run with the offline echo analyzer.
    pub analyzer_url: Option<String>,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            arsenl: PathBuf::from("resources/lexicons/ArSenL.txt"),
            arasenti: PathBuf::from("resources/lexicons/AraSenTi.txt"),
            dahl: PathBuf::from("resources/lexicons/DAHL.txt"),
            emojis: PathBuf::from("resources/lexicons/Emojis.csv"),
            negation: PathBuf::from("resources/Negation.txt"),
            ngrams_dir: PathBuf::from("resources/ngrams"),
            analyzer_url: None,
        }
    }
}

impl ResourceConfig {
    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self::parse(&content, &ext)
    }

    fn parse(content: &str, hint_ext: &str) -> Result<Self> {
        if hint_ext == "json" {
            return serde_json::from_str(content).context("parsing JSON config");
        }
        if let Ok(config) = toml::from_str(content) {
            return Ok(config);
        }
        serde_json::from_str(content)
            .map_err(|err| anyhow!("config is neither valid TOML nor JSON: {err}"))
    }

    /// Env var override, then the default path, then built-in defaults. A
    /// broken config file warns and falls back instead of aborting the run.
    pub fn load_default() -> Self {
        let path = std::env::var(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        let mut config = if path.exists() {
            match Self::load_from(&path) {
                Ok(config) => config,
                Err(err) => {
                    warn!(
                        target: "config",
                        path = %path.display(),
                        error = %err,
                        "unusable config; using built-in defaults"
                    );
                    Self::default()
                }
            }
        } else {
            Self::default()
        };
        if let Ok(url) = std::env::var(ENV_ANALYZER_URL) {
            if !url.is_empty() {
                config.analyzer_url = Some(url);
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_config_overrides_paths() {
        let config = ResourceConfig::parse(
            "arsenl = \"lex/arsenl.txt\"\nanalyzer_url = \"http://localhost:8223\"\n",
            "toml",
        )
        .unwrap();
        assert_eq!(config.arsenl, PathBuf::from("lex/arsenl.txt"));
        assert_eq!(
            config.analyzer_url.as_deref(),
            Some("http://localhost:8223")
        );
        // Unset keys keep their defaults.
        assert_eq!(config.negation, ResourceConfig::default().negation);
    }

    #[test]
    fn json_config_is_accepted_too() {
        let config =
            ResourceConfig::parse("{\"dahl\": \"lex/dahl.tsv\"}", "json").unwrap();
        assert_eq!(config.dahl, PathBuf::from("lex/dahl.tsv"));
    }

    #[test]
    fn garbage_is_an_error_not_a_panic() {
        assert!(ResourceConfig::parse("]{[ not a config", "toml").is_err());
    }
}
