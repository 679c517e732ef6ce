//! Configuration System
//!
//! 3-tier configuration:
//! - Level 1: Preset - one-liner
//! - Level 2: Stage override - closure-based partial adjustment
//! - Level 3: YAML - complete control
//!
//! # Examples
//!
//! ```rust,ignore
//! use codegraph_sdg::config::{SdgConfig, Preset};
//!
//! let config = SdgConfig::preset(Preset::Fast).build()?;
//!
//! let config = SdgConfig::preset(Preset::Balanced)
//!     .slicing(|c| c.max_depth(Some(64)).include_control(false))
//!     .build()?;
//!
//! let config = SdgConfig::from_yaml("slicing.yaml")?;
//! ```

pub mod error;
pub mod io;
pub mod preset;
pub mod sdg_config;
pub mod stage_configs;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use preset::Preset;
pub use sdg_config::SdgConfig;
pub use stage_configs::{
    ControlDependenceAlgorithm, ControlDependenceConfig, SlicingAlgorithmKind, SlicingConfig,
    SummaryAlgorithm, SummaryConfig,
};
pub use validation::Validatable;
