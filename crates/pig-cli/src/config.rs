//! Optional `pig.toml` configuration.
//!
//! ```toml
//! [validation]
//! checks = ["uniqueIds", "valueRanges"]
//!
//! [import]
//! max_package_bytes = 1048576
//! ```
//!
//! Command-line flags win over the file; the file wins over built-in
//! defaults.

use pig_model::PackageLimits;
use pig_validate::{CheckId, ValidationOptions};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "pig.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub validation: ValidationSection,
    pub import: ImportSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationSection {
    pub checks: Option<Vec<CheckId>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportSection {
    pub max_package_bytes: Option<usize>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {message}")]
    Io { path: String, message: String },

    #[error("invalid config {path}: {message}")]
    Parse { path: String, message: String },
}

/// Effective settings for one `pig check` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub options: ValidationOptions,
    pub limits: PackageLimits,
}

impl Config {
    /// Load `explicit` if given (it must exist), otherwise `pig.toml` in the
    /// working directory if present, otherwise defaults.
    pub fn load(explicit: Option<&str>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_path(Path::new(path)),
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.is_file() {
                    Self::load_path(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn load_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        toml::from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.message().to_string(),
        })
    }

    pub fn resolve(&self, cli_checks: Vec<CheckId>, cli_max_bytes: Option<usize>) -> Settings {
        let checks = if cli_checks.is_empty() {
            self.validation.checks.clone()
        } else {
            Some(cli_checks)
        };
        let max_package_bytes = cli_max_bytes
            .or(self.import.max_package_bytes)
            .unwrap_or(PackageLimits::default().max_package_bytes);
        Settings {
            options: ValidationOptions {
                check_constraints: checks,
            },
            limits: PackageLimits { max_package_bytes },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pig_model::DEFAULT_MAX_PACKAGE_BYTES;

    fn parse(text: &str) -> Config {
        toml::from_str(text).expect("config should parse")
    }

    #[test]
    fn empty_config_uses_defaults() {
        let settings = parse("").resolve(Vec::new(), None);
        assert_eq!(settings.options, ValidationOptions::all());
        assert_eq!(settings.limits.max_package_bytes, DEFAULT_MAX_PACKAGE_BYTES);
    }

    #[test]
    fn file_values_apply_without_flags() {
        let config = parse(
            r#"
            [validation]
            checks = ["valueRanges", "uniqueIds"]

            [import]
            max_package_bytes = 1024
            "#,
        );
        let settings = config.resolve(Vec::new(), None);
        assert_eq!(
            settings.options.selected(),
            vec![CheckId::UniqueIds, CheckId::ValueRanges]
        );
        assert_eq!(settings.limits.max_package_bytes, 1024);
    }

    #[test]
    fn flags_override_file() {
        let config = parse(
            r#"
            [validation]
            checks = ["valueRanges"]

            [import]
            max_package_bytes = 1024
            "#,
        );
        let settings = config.resolve(vec![CheckId::EligibleLinks], Some(64));
        assert_eq!(settings.options.selected(), vec![CheckId::EligibleLinks]);
        assert_eq!(settings.limits.max_package_bytes, 64);
    }

    #[test]
    fn unknown_check_is_rejected() {
        let error = toml::from_str::<Config>("[validation]\nchecks = [\"noCycles\"]\n")
            .expect_err("unknown check id must fail");
        assert!(error.message().contains("noCycles"));
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(toml::from_str::<Config>("[validation]\nfail_fast = false\n").is_err());
    }
}
