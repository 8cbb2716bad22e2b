//! Configuration file support.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/nntm/config.toml`.
//! Concentrations in the file use the units of the command line: nM for
//! strands and mM for cations.

use crate::{
    Conditions, Error, Result, SaltCorrection,
    util::{milli, nano},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a parameter table directory
pub const PARAMETER_DIR_VAR: &str = "NNDIR";

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub conditions: ConditionsConfig,

    #[serde(default)]
    pub salt: SaltCorrection,

    #[serde(default)]
    pub parameters: ParametersConfig,
}

/// Default buffer conditions
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConditionsConfig {
    /// Celsius
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// nM
    #[serde(default = "default_primer")]
    pub primer: f64,

    /// nM
    #[serde(default = "default_template")]
    pub template: f64,

    /// mM
    #[serde(default = "default_monovalent")]
    pub monovalent: f64,

    /// mM
    #[serde(default)]
    pub divalent: f64,

    /// mM
    #[serde(default)]
    pub dntp: f64,
}

impl Default for ConditionsConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            primer: default_primer(),
            template: default_template(),
            monovalent: default_monovalent(),
            divalent: 0.0,
            dntp: 0.0,
        }
    }
}

impl ConditionsConfig {
    /// Convert to molar conditions
    pub fn to_conditions(&self) -> Conditions {
        Conditions {
            temperature: self.temperature,
            primer: nano(self.primer),
            template: nano(self.template),
            monovalent: milli(self.monovalent),
            divalent: milli(self.divalent),
            dntp: milli(self.dntp),
        }
    }
}

/// Where to find nearest-neighbor tables
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct ParametersConfig {
    /// Directory holding `nn_match.csv` and `nn_mismatch.csv`
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl ParametersConfig {
    /// The configured directory, else `$NNDIR`, else none (built-in tables).
    pub fn resolve_dir(&self) -> Option<PathBuf> {
        self.dir.clone().or_else(|| {
            std::env::var_os(PARAMETER_DIR_VAR)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        })
    }
}

// Default value functions
fn default_temperature() -> f64 {
    65.0
}

fn default_primer() -> f64 {
    300.0
}

fn default_template() -> f64 {
    1.38e-15
}

fn default_monovalent() -> f64 {
    100.0
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            path => {
                tracing::info!("No config file found at {:?}, using defaults", path);
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.check()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join("nntm").join("config.toml"))
    }

    fn check(&self) -> Result<()> {
        let salt = &self.salt;
        if !(salt.divalent_factor.is_finite() && salt.divalent_factor >= 0.0) {
            return Err(Error::Config(format!(
                "salt.divalent_factor must be a non-negative number, got {}",
                salt.divalent_factor
            )));
        }
        if !(salt.max_divalent.is_finite() && salt.max_divalent > 0.0) {
            return Err(Error::Config(format!(
                "salt.max_divalent must be positive, got {}",
                salt.max_divalent
            )));
        }
        if !salt.entropy_slope.is_finite() {
            return Err(Error::Config("salt.entropy_slope must be finite".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.conditions.to_conditions(), Conditions::default());
        assert_eq!(config.salt, SaltCorrection::default());
        assert!(config.parameters.dir.is_none());
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[conditions]
monovalent = 50
divalent = 1.5

[parameters]
dir = "/opt/nn"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        let conditions = config.conditions.to_conditions();
        assert_relative_eq!(conditions.monovalent, 0.05);
        assert_relative_eq!(conditions.divalent, 1.5e-3);
        assert_eq!(conditions.temperature, 65.0); // default
        assert_eq!(config.salt.divalent_factor, 120.0); // default
        assert_eq!(config.parameters.resolve_dir(), Some(PathBuf::from("/opt/nn")));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[salt]\nmax_divalent = 0.5\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.salt.max_divalent, 0.5);
    }

    #[test]
    fn test_rejects_bad_salt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[salt]\nmax_divalent = -1.0\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }
}
