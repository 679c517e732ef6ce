//! Aggregate configuration of the dependence-graph engine

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigExportV1, ConfigOverrides};
use super::preset::Preset;
use super::stage_configs::{ControlDependenceConfig, SlicingConfig, SummaryConfig};
use super::validation::Validatable;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdgConfig {
    preset: Preset,
    control_dependence: ControlDependenceConfig,
    summary: SummaryConfig,
    slicing: SlicingConfig,
}

impl SdgConfig {
    /// Start from a preset
    pub fn preset(preset: Preset) -> Self {
        Self {
            preset,
            control_dependence: ControlDependenceConfig::from_preset(preset),
            summary: SummaryConfig::from_preset(preset),
            slicing: SlicingConfig::from_preset(preset),
        }
    }

    /// Override control-dependence settings (closure-based)
    pub fn control_dependence<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ControlDependenceConfig) -> ControlDependenceConfig,
    {
        self.control_dependence = f(self.control_dependence);
        self
    }

    /// Override summary-arc settings (closure-based)
    pub fn summary<F>(mut self, f: F) -> Self
    where
        F: FnOnce(SummaryConfig) -> SummaryConfig,
    {
        self.summary = f(self.summary);
        self
    }

    /// Override slicing settings (closure-based)
    pub fn slicing<F>(mut self, f: F) -> Self
    where
        F: FnOnce(SlicingConfig) -> SlicingConfig,
    {
        self.slicing = f(self.slicing);
        self
    }

    /// Validate every stage
    pub fn build(self) -> ConfigResult<Self> {
        self.validate()?;
        Ok(self)
    }

    pub fn get_preset(&self) -> Preset {
        self.preset
    }

    pub fn control_dependence_config(&self) -> &ControlDependenceConfig {
        &self.control_dependence
    }

    pub fn summary_config(&self) -> &SummaryConfig {
        &self.summary
    }

    pub fn slicing_config(&self) -> &SlicingConfig {
        &self.slicing
    }

    /// Load from a YAML file (schema v1)
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        if export.version != 1 {
            return Err(ConfigError::UnsupportedVersion {
                found: export.version,
                supported: vec![1],
            });
        }

        let preset = Preset::from_str(&export.preset)
            .map_err(|_| ConfigError::UnknownPreset(export.preset.clone()))?;

        let mut config = Self::preset(preset);
        if let Some(overrides) = export.overrides {
            if let Some(cd) = overrides.control_dependence {
                config.control_dependence = cd;
            }
            if let Some(summary) = overrides.summary {
                config.summary = summary;
            }
            if let Some(slicing) = overrides.slicing {
                config.slicing = slicing;
            }
        }

        config.build()
    }

    /// Export as YAML (schema v1), every stage written out
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: 1,
            preset: self.preset.as_str().to_string(),
            overrides: Some(ConfigOverrides {
                control_dependence: Some(self.control_dependence.clone()),
                summary: Some(self.summary.clone()),
                slicing: Some(self.slicing.clone()),
            }),
        };

        serde_yaml::to_string(&export).map_err(ConfigError::Yaml)
    }
}

impl Validatable for SdgConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.control_dependence.validate()?;
        self.summary.validate()?;
        self.slicing.validate()
    }

    fn config_name(&self) -> &'static str {
        "SdgConfig"
    }
}

impl Default for SdgConfig {
    fn default() -> Self {
        Self::preset(Preset::Balanced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SlicingAlgorithmKind, SummaryAlgorithm};

    #[test]
    fn test_preset_build() {
        for preset in [Preset::Fast, Preset::Balanced, Preset::Thorough, Preset::Custom] {
            let config = SdgConfig::preset(preset).build().unwrap();
            assert_eq!(config.get_preset(), preset);
        }
    }

    #[test]
    fn test_stage_override() {
        let config = SdgConfig::preset(Preset::Balanced)
            .summary(|c| c.algorithm(SummaryAlgorithm::Naive))
            .slicing(|c| c.include_control(false))
            .build()
            .unwrap();
        assert_eq!(config.summary_config().algorithm, SummaryAlgorithm::Naive);
        assert!(!config.slicing_config().include_control);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let result = SdgConfig::preset(Preset::Fast)
            .slicing(|c| c.include_control(false))
            .build();
        assert!(result.is_err());

        let ok = SdgConfig::preset(Preset::Fast)
            .slicing(|c| c.algorithm(SlicingAlgorithmKind::Classic).include_control(false))
            .build();
        assert!(ok.is_ok());
    }
}
