use crate::Platform;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Settings of the hardware simulation. Every field is optional in the
/// config file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Number of cycles to run.
    pub cycles: u32,
    /// Log progress every this many cycles. Zero disables it.
    pub report_interval: u32,
    /// Cycles after this one also run port and interrupt processing.
    pub advanced_after: u32,
    /// The error path fires once the hardware state exceeds this.
    pub error_threshold: u32,
    pub platform: Platform,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cycles: 1000,
            report_interval: 100,
            advanced_after: 500,
            error_threshold: 950,
            platform: Platform::default(),
        }
    }
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid simulation config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        tracing::info!("Loading config file: {:?}", path);
        let json = fs::read_to_string(path)
            .with_context(|| format!("could not read config file {}", path.display()))?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HW_PLATFORM;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(SimConfig::from_json("{}").unwrap(), SimConfig::default());
    }

    #[test]
    fn test_partial_platform_override() {
        let config =
            SimConfig::from_json(r#"{ "cycles": 20, "platform": { "dma_memory_size": 128 } }"#)
                .unwrap();
        assert_eq!(config.cycles, 20);
        assert_eq!(config.report_interval, 100);
        assert_eq!(config.platform.dma_memory_size, 128);
        assert_eq!(config.platform.mmio_base, HW_PLATFORM.mmio_base);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let err = SimConfig::from_json(r#"{ "cycle": 20 }"#).unwrap_err();
        assert!(format!("{err:#}").contains("unknown field"));
    }
}
