//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `KINDLE_*` environment variables, `__` between sections
//!    (`KINDLE_OUTPUT__FORMAT=json`, `KINDLE_DISCOVERY__EXTENSIONS=json,ign`)
//! 3. The file given with `--config`, or else `.kindle.toml` in the current
//!    directory over the per-user file from [`AppConfig::config_path`]
//! 4. Built-in defaults (always present)

use std::path::PathBuf;

use anyhow::{Context as _, bail};
use config::{Config, Environment, File, FileFormat, Source};
use serde::{Deserialize, Serialize};
use tracing::debug;

use kindle_adapters::source::DEFAULT_EXTENSIONS;

use crate::cli::OutputFormat;

/// Name of the per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = ".kindle.toml";

const ENV_PREFIX: &str = "KINDLE";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Output settings.
    pub output: OutputConfig,
    /// Directory discovery settings.
    pub discovery: DiscoveryConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// `auto`, `human`, `plain` or `json`.
    pub format: String,
    pub no_color: bool,
    pub show_warnings: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "auto".into(),
            no_color: false,
            show_warnings: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub extensions: Vec<String>,
    pub follow_links: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            follow_links: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from files and the environment over defaults.
    ///
    /// An explicit `config_file` must exist; the default locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_with(config_file, Self::environment())
    }

    fn load_with(config_file: Option<&PathBuf>, env: Environment) -> anyhow::Result<Self> {
        let builder = Config::builder();

        let builder = match config_file {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                builder.add_source(toml_file(path.clone(), true))
            }
            None => builder
                .add_source(toml_file(Self::config_path(), false))
                .add_source(toml_file(PathBuf::from(LOCAL_CONFIG_FILE), false)),
        };

        let config: Self = builder
            .add_source(env)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Failed to parse configuration")?;

        config.check()?;
        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("discovery.extensions")
    }

    fn check(&self) -> anyhow::Result<()> {
        if OutputFormat::from_config(&self.output.format).is_none() {
            bail!(
                "output.format must be one of auto, human, plain, json (got '{}')",
                self.output.format
            );
        }
        if self.discovery.extensions.iter().all(|e| e.trim().is_empty()) {
            bail!("discovery.extensions must name at least one extension");
        }
        Ok(())
    }

    /// The configured output format.
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_config(&self.output.format).unwrap_or_default()
    }

    /// Path to the default per-user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.kindle.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "kindle", "kindle")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Look up a dotted key, as printed by `kindle config get`.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "output.format" => self.output.format.clone(),
            "output.no_color" => self.output.no_color.to_string(),
            "output.show_warnings" => self.output.show_warnings.to_string(),
            "discovery.extensions" => self.discovery.extensions.join(","),
            "discovery.follow_links" => self.discovery.follow_links.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Every supported key, in display order.
    pub const KEYS: &'static [&'static str] = &[
        "output.format",
        "output.no_color",
        "output.show_warnings",
        "discovery.extensions",
        "discovery.follow_links",
    ];
}

fn toml_file(path: PathBuf, required: bool) -> impl Source + Send + Sync + 'static {
    File::from(path).format(FileFormat::Toml).required(required)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::environment().source(Some(map))
    }

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("kindle.toml");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.output.format, "auto");
        assert!(cfg.output.show_warnings);
        assert_eq!(cfg.discovery.extensions, vec!["json", "ign", "toml"]);
        assert!(!cfg.discovery.follow_links);
    }

    #[test]
    fn file_values_override_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[output]\nformat = \"json\"\n");

        let cfg = AppConfig::load_with(Some(&path), env(&[])).unwrap();
        assert_eq!(cfg.output_format(), OutputFormat::Json);
        assert!(cfg.output.show_warnings);
    }

    #[test]
    fn environment_overrides_file() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[output]\nformat = \"json\"\n");

        let cfg = AppConfig::load_with(
            Some(&path),
            env(&[
                ("KINDLE_OUTPUT__FORMAT", "plain"),
                ("KINDLE_DISCOVERY__EXTENSIONS", "ign,json"),
                ("KINDLE_DISCOVERY__FOLLOW_LINKS", "true"),
            ]),
        )
        .unwrap();
        assert_eq!(cfg.output_format(), OutputFormat::Plain);
        assert_eq!(cfg.discovery.extensions, vec!["ign", "json"]);
        assert!(cfg.discovery.follow_links);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("absent.toml");
        assert!(AppConfig::load_with(Some(&missing), env(&[])).is_err());
    }

    #[test]
    fn unknown_output_format_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[output]\nformat = \"yaml\"\n");
        let err = AppConfig::load_with(Some(&path), env(&[])).unwrap_err();
        assert!(err.to_string().contains("output.format"));
    }

    #[test]
    fn get_known_and_unknown_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("output.no_color").as_deref(), Some("false"));
        assert_eq!(cfg.get("discovery.extensions").as_deref(), Some("json,ign,toml"));
        assert_eq!(cfg.get("does.not.exist"), None);
        for key in AppConfig::KEYS {
            assert!(cfg.get(key).is_some(), "{key}");
        }
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
