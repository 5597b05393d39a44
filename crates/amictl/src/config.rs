//! Layered configuration
//!
//! Loads settings from multiple sources with the following precedence (low to high):
//! 1. Built-in defaults
//! 2. Config file (`--config`, else `<config dir>/amictl/config.yaml`)
//! 3. Environment variables and CLI flags (merged by clap)

use crate::cli::{Cli, OutputFormat};
use anyhow::{Context, Result};
use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use camino::{Utf8Path, Utf8PathBuf};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::debug;

const CONFIG_FILE: &str = "config.yaml";

/// Effective amictl settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub output: OutputFormat,
    pub region: Option<String>,
    pub profile: Option<String>,
    /// Kubernetes version used when `--k8s-version` is not given
    pub k8s_version: Option<String>,
}

impl Settings {
    /// Resolve settings for an invocation
    pub fn load(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => Some(Self::load_file(path)?),
            None => match default_config_path() {
                Some(path) if path.exists() => Some(Self::load_file(&path)?),
                _ => None,
            },
        };
        Ok(file.unwrap_or_default().merge_cli(cli))
    }

    /// Parse a YAML config file
    pub fn load_file(path: &Utf8Path) -> Result<Self> {
        debug!("Loading config from {}", path);
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        serde_yaml_ng::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))
    }

    /// Overlay values given on the command line or in the environment
    fn merge_cli(mut self, cli: &Cli) -> Self {
        if let Some(output) = cli.output {
            self.output = output;
        }
        if cli.region.is_some() {
            self.region = cli.region.clone();
        }
        if cli.profile.is_some() {
            self.profile = cli.profile.clone();
        }
        self
    }

    /// Load AWS SDK config: explicit region first, then the default provider chain
    pub async fn sdk_config(&self) -> SdkConfig {
        let region = RegionProviderChain::first_try(self.region.clone().map(Region::new))
            .or_default_provider();

        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);
        if let Some(profile) = &self.profile {
            loader = loader.profile_name(profile);
        }
        loader.load().await
    }
}

/// `<config dir>/amictl/config.yaml` for the current platform
pub fn default_config_path() -> Option<Utf8PathBuf> {
    let dirs = ProjectDirs::from("", "", "amictl")?;
    Utf8PathBuf::from_path_buf(dirs.config_dir().join(CONFIG_FILE)).ok()
}
