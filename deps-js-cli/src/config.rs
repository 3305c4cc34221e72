use deps_js::AllowList;
use deps_js::ResolveOptions;
use serde::Deserialize;
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

/// Resolution settings, from a JSON config file and/or the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  pub allowed_packages: Vec<String>,
  /// Seed the allow list with Node.js built-in modules.
  pub builtins: bool,
  pub max_files: Option<NonZeroUsize>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      allowed_packages: Vec::new(),
      builtins: true,
      max_files: None,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawConfig {
  #[serde(default)]
  allowed_packages: Option<Vec<String>>,
  #[serde(default)]
  builtins: Option<bool>,
  #[serde(default)]
  max_files: Option<NonZeroUsize>,
}

pub fn load_config(path: &Path) -> Result<Config, String> {
  let text = fs::read_to_string(path)
    .map_err(|err| format!("failed to read config {}: {err}", path.display()))?;
  parse_config(&text).map_err(|err| format!("invalid config {}: {err}", path.display()))
}

fn parse_config(text: &str) -> Result<Config, serde_json::Error> {
  let raw: RawConfig = serde_json::from_str(text)?;
  let defaults = Config::default();
  Ok(Config {
    allowed_packages: raw.allowed_packages.unwrap_or_default(),
    builtins: raw.builtins.unwrap_or(defaults.builtins),
    max_files: raw.max_files,
  })
}

impl Config {
  pub fn into_options(self) -> ResolveOptions {
    let mut allow = if self.builtins {
      AllowList::node_builtins()
    } else {
      AllowList::new()
    };
    allow.extend(self.allowed_packages);
    ResolveOptions {
      allow,
      max_files: self.max_files,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::parse_config;
  use super::Config;

  #[test]
  fn missing_keys_fall_back_to_defaults() {
    assert_eq!(parse_config("{}").unwrap(), Config::default());
  }

  #[test]
  fn reads_camel_case_keys() {
    let config =
      parse_config(r#"{ "allowedPackages": ["lodash"], "builtins": false, "maxFiles": 10 }"#)
        .unwrap();
    assert_eq!(config.allowed_packages, ["lodash"]);
    assert!(!config.builtins);
    assert_eq!(config.max_files.map(|n| n.get()), Some(10));

    let options = config.into_options();
    assert!(options.allow.contains("lodash"));
    assert!(!options.allow.contains("fs"));
    assert_eq!(options.max_files.map(|n| n.get()), Some(10));
  }

  #[test]
  fn rejects_zero_max_files() {
    let err = parse_config(r#"{ "maxFiles": 0 }"#).unwrap_err();
    assert!(err.is_data(), "{err}");
  }

  #[test]
  fn rejects_unknown_keys() {
    assert!(parse_config(r#"{ "allowed": [] }"#).is_err());
  }
}
