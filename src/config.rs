use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub api: ApiConfig,
  /// Production runs never fall back to the local snapshot
  #[serde(default)]
  pub production: bool,
  #[serde(default)]
  pub fallback: FallbackConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
  /// Root URL; `/api/products` is appended to it
  #[serde(default = "default_api_url")]
  pub url: String,
  /// Per-request timeout. No timeout when unset.
  pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      url: default_api_url(),
      timeout_secs: None,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FallbackConfig {
  /// JSON file served when the remote read fails outside production.
  /// The sample dataset built into the binary is used when unset.
  pub path: Option<PathBuf>,
}

fn default_api_url() -> String {
  DEFAULT_API_URL.to_string()
}

/// Runtime configuration that decides whether a failed read may be
/// papered over with the dev snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
  Production,
  #[default]
  Development,
}

impl Environment {
  pub fn is_production(self) -> bool {
    self == Environment::Production
  }
}

impl Config {
  /// Load configuration from file, then apply environment overrides.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./catalog.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/catalog-cache/config.yaml
  ///
  /// Without a file the defaults are used.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    let config = match path {
      Some(p) => Self::load_from_path(&p)?,
      None => Config::default(),
    };

    config.with_env_overrides(|key| std::env::var(key).ok())
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("catalog.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("catalog-cache").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::parse(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  pub fn parse(contents: &str) -> Result<Self> {
    let config: Config = serde_yaml::from_str(contents)?;
    Ok(config)
  }

  /// Apply `CATALOG_API_URL` and `CATALOG_PRODUCTION` on top of the file.
  fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    if let Some(url) = lookup("CATALOG_API_URL") {
      self.api.url = url;
    }

    if let Some(flag) = lookup("CATALOG_PRODUCTION") {
      self.production = match flag.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => true,
        "0" | "false" | "no" | "" => false,
        other => return Err(eyre!("Invalid CATALOG_PRODUCTION value: {}", other)),
      };
    }

    Ok(self)
  }

  pub fn environment(&self) -> Environment {
    if self.production {
      Environment::Production
    } else {
      Environment::Development
    }
  }
}
