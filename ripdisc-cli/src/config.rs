use crate::Args;
use ripdisc_core::DEFAULT_ATTACH_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Yaml(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// YAML config file structure. Every key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigYaml {
    /// MusicBrainz "attach CD TOC" endpoint (e.g. a test server)
    pub attach_base_url: Option<String>,
    pub output: Option<OutputFormat>,
    /// Also print the legacy CDDB id
    #[serde(default)]
    pub cddb: bool,
}

/// Resolved settings: CLI flags over config file over defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub attach_base_url: String,
    pub output: OutputFormat,
    pub cddb: bool,
    pub artist: Option<String>,
    pub release: Option<String>,
}

impl ConfigYaml {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Yaml(format!("{}: {}", path.display(), e)))
    }
}

impl Config {
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let yaml = match &args.config {
            Some(path) => {
                info!("Loading config from {}", path.display());
                ConfigYaml::from_file(path)?
            }
            None => ConfigYaml::default(),
        };
        Self::resolve(yaml, args)
    }

    fn resolve(yaml: ConfigYaml, args: &Args) -> Result<Self, ConfigError> {
        let attach_base_url = args
            .attach_base_url
            .clone()
            .or(yaml.attach_base_url)
            .unwrap_or_else(|| DEFAULT_ATTACH_BASE_URL.to_string());
        if !attach_base_url.starts_with("http://") && !attach_base_url.starts_with("https://") {
            return Err(ConfigError::Config(format!(
                "attach_base_url must be an http(s) URL, got '{}'",
                attach_base_url
            )));
        }
        Ok(Self {
            attach_base_url,
            output: args.output.or(yaml.output).unwrap_or_default(),
            cddb: args.cddb || yaml.cddb,
            artist: args.artist.clone().filter(|s| !s.is_empty()),
            release: args.release.clone().filter(|s| !s.is_empty()),
        })
    }
}
