use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_HYDRATION_KEY: &str = "globalState";
pub const DEFAULT_ROUTER_STATE_KEY: &str = "router";

/// Errors from loading a hydration configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("`{0}` must not be empty")]
    EmptyKey(&'static str),
}

/// Where the snapshot lives and which slot holds route state.
///
/// Missing fields in a config file fall back to the defaults, so a file may
/// override just one of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HydrationConfig {
    /// Storage key of the Persistence Record.
    pub hydration_key: String,
    /// Reserved feature name of the router slot.
    pub router_state_key: String,
}

impl Default for HydrationConfig {
    fn default() -> Self {
        Self {
            hydration_key: DEFAULT_HYDRATION_KEY.into(),
            router_state_key: DEFAULT_ROUTER_STATE_KEY.into(),
        }
    }
}

impl HydrationConfig {
    pub fn with_hydration_key(mut self, key: impl Into<String>) -> Self {
        self.hydration_key = key.into();
        self
    }

    pub fn with_router_state_key(mut self, key: impl Into<String>) -> Self {
        self.router_state_key = key.into();
        self
    }

    /// Parse a YAML document, merging it over the defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty mapping.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hydration_key.is_empty() {
            return Err(ConfigError::EmptyKey("hydration_key"));
        }
        if self.router_state_key.is_empty() {
            return Err(ConfigError::EmptyKey("router_state_key"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = HydrationConfig::default();
        assert_eq!(config.hydration_key, "globalState");
        assert_eq!(config.router_state_key, "router");
    }

    #[test]
    fn partial_yaml_overrides_one_field() {
        let config = HydrationConfig::from_yaml_str("hydration_key: ngrxGlobalState\n").unwrap();
        assert_eq!(config.hydration_key, "ngrxGlobalState");
        assert_eq!(config.router_state_key, "router");
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(
            HydrationConfig::from_yaml_str("  \n").unwrap(),
            HydrationConfig::default()
        );
    }

    #[test]
    fn unknown_fields_rejected() {
        assert!(matches!(
            HydrationConfig::from_yaml_str("hydration_keys: typo\n"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn empty_key_rejected() {
        assert!(matches!(
            HydrationConfig::from_yaml_str("router_state_key: \"\"\n"),
            Err(ConfigError::EmptyKey("router_state_key"))
        ));
    }

    #[test]
    fn load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("shell.yaml");
        std::fs::write(&path, "router_state_key: nav\n").unwrap();
        let config = HydrationConfig::load(&path).unwrap();
        assert_eq!(config, HydrationConfig::default().with_router_state_key("nav"));
    }
}
