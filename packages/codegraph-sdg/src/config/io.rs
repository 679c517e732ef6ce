//! Configuration I/O
//!
//! YAML schema types; loading and export live on `SdgConfig`.

use super::stage_configs::{ControlDependenceConfig, SlicingConfig, SummaryConfig};
use serde::{Deserialize, Serialize};

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    pub version: u32,

    /// Base preset
    pub preset: String,

    /// Fine-grained overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<ConfigOverrides>,
}

/// Whole-stage overrides; omitted fields take balanced defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_dependence: Option<ControlDependenceConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slicing: Option<SlicingConfig>,
}

#[cfg(test)]
mod tests {
    use crate::config::error::ConfigError;
    use crate::config::{ControlDependenceAlgorithm, Preset, SdgConfig, SlicingAlgorithmKind};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = SdgConfig::preset(Preset::Balanced).slicing(|c| c.max_depth(Some(50)));

        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("preset: balanced"));
        assert!(yaml.contains("max_depth: 50"));

        let back = SdgConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_yaml_loading() {
        let temp_file = write_temp(
            r#"
version: 1
preset: fast
overrides:
  control_dependence:
    algorithm: naive
  slicing:
    algorithm: classic
    max_depth: 12
"#,
        );

        let config = SdgConfig::from_yaml(temp_file.path()).unwrap();
        assert_eq!(config.get_preset(), Preset::Fast);
        assert_eq!(
            config.control_dependence_config().algorithm,
            ControlDependenceAlgorithm::Naive
        );
        assert_eq!(config.slicing_config().algorithm, SlicingAlgorithmKind::Classic);
        assert_eq!(config.slicing_config().max_depth, Some(12));
    }

    #[test]
    fn test_yaml_missing_version() {
        let temp_file = write_temp("preset: fast\n");
        assert!(SdgConfig::from_yaml(temp_file.path()).is_err());
    }

    #[test]
    fn test_yaml_unsupported_version() {
        let temp_file = write_temp("version: 2\npreset: fast\n");
        let result = SdgConfig::from_yaml(temp_file.path());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::UnsupportedVersion { .. }
        ));
    }

    #[test]
    fn test_yaml_unknown_preset() {
        let result = SdgConfig::from_yaml_str("version: 1\npreset: turbo\n");
        assert!(matches!(result.unwrap_err(), ConfigError::UnknownPreset(_)));
    }

    #[test]
    fn test_yaml_overrides_are_validated() {
        let result = SdgConfig::from_yaml_str(
            "version: 1\npreset: balanced\noverrides:\n  summary:\n    max_iterations: 0\n",
        );
        assert!(matches!(result.unwrap_err(), ConfigError::Range { .. }));
    }
}
