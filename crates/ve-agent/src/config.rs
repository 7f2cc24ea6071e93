//! Edge agent configuration, loadable from TOML.

use std::collections::HashMap;

use serde::Deserialize;
use ve_protocol::ChannelId;

/// Top-level configuration for the `ve-agent` binary.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// Path to the decoder manifest JSON file.
    pub manifest_path: String,
    /// Paths to collection scheme JSON files, one scheme per file.
    pub scheme_paths: Vec<String>,
    /// CAN interface name -> channel id, wired once at startup.
    #[serde(default)]
    pub can_interfaces: HashMap<String, ChannelId>,
}

impl AgentConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_minimal_config() {
        let toml = r#"
manifest_path = "/etc/ve-agent/manifest.json"
scheme_paths = ["/etc/ve-agent/schemes/default.json"]
"#;
        let config: AgentConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.manifest_path, "/etc/ve-agent/manifest.json");
        assert_eq!(config.scheme_paths.len(), 1);
        assert!(config.can_interfaces.is_empty());
    }

    #[test]
    fn deserialize_with_can_interfaces() {
        let toml = r#"
manifest_path = "/etc/ve-agent/manifest.json"
scheme_paths = ["/etc/ve-agent/schemes/default.json", "/etc/ve-agent/schemes/extra.json"]

[can_interfaces]
can0 = 0
can1 = 1
"#;
        let config: AgentConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.scheme_paths.len(), 2);
        assert_eq!(config.can_interfaces.get("can0"), Some(&0));
        assert_eq!(config.can_interfaces.get("can1"), Some(&1));
    }
}
