//! Stage-specific configuration types
//!
//! One struct per pipeline stage, each with preset defaults, builder setters
//! and validation.

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use super::validation::Validatable;
use serde::{Deserialize, Serialize};

// ============================================================================
// Control Dependence Configuration
// ============================================================================

/// Control-dependence algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlDependenceAlgorithm {
    /// Pairwise postdominance checks, O(V³) and worse
    Naive,
    /// Immediate-postdominator tree, O(V+E) after the tree
    PostdominatorTree,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlDependenceConfig {
    pub algorithm: ControlDependenceAlgorithm,

    /// Drop the dependence of a jump on another jump with the same destination
    pub prune_redundant_jumps: bool,

    /// Also run the other algorithm and fail on disagreement
    pub cross_check: bool,
}

impl ControlDependenceConfig {
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Fast | Preset::Balanced | Preset::Custom => Self {
                algorithm: ControlDependenceAlgorithm::PostdominatorTree,
                prune_redundant_jumps: false,
                cross_check: false,
            },
            Preset::Thorough => Self {
                algorithm: ControlDependenceAlgorithm::PostdominatorTree,
                prune_redundant_jumps: false,
                cross_check: true,
            },
        }
    }

    /// Builder: Set algorithm
    pub fn algorithm(mut self, v: ControlDependenceAlgorithm) -> Self {
        self.algorithm = v;
        self
    }

    /// Builder: Set prune_redundant_jumps
    pub fn prune_redundant_jumps(mut self, v: bool) -> Self {
        self.prune_redundant_jumps = v;
        self
    }

    /// Builder: Set cross_check
    pub fn cross_check(mut self, v: bool) -> Self {
        self.cross_check = v;
        self
    }
}

impl Validatable for ControlDependenceConfig {
    fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "ControlDependenceConfig"
    }
}

impl Default for ControlDependenceConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

// ============================================================================
// Summary Arc Configuration
// ============================================================================

/// Summary-arc algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryAlgorithm {
    /// One pass per procedure, no transitive facts through nested calls
    Naive,
    /// Worklist over the call graph until no pair set grows
    FixedPoint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    pub algorithm: SummaryAlgorithm,

    /// Worklist pops before the fixed point gives up (1..=1000000)
    pub max_iterations: usize,
}

impl SummaryConfig {
    pub fn from_preset(preset: Preset) -> Self {
        let max_iterations = match preset {
            Preset::Fast => 10_000,
            Preset::Balanced | Preset::Custom => 100_000,
            Preset::Thorough => 1_000_000,
        };
        Self {
            algorithm: SummaryAlgorithm::FixedPoint,
            max_iterations,
        }
    }

    /// Builder: Set algorithm
    pub fn algorithm(mut self, v: SummaryAlgorithm) -> Self {
        self.algorithm = v;
        self
    }

    /// Builder: Set max_iterations
    pub fn max_iterations(mut self, v: usize) -> Self {
        self.max_iterations = v;
        self
    }
}

impl Validatable for SummaryConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_iterations == 0 || self.max_iterations > 1_000_000 {
            return Err(ConfigError::range_with_hint(
                "max_iterations",
                self.max_iterations,
                1,
                1_000_000,
                "The fixed point needs at least one pass per procedure",
            ));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "SummaryConfig"
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

// ============================================================================
// Slicing Configuration
// ============================================================================

/// Slicing traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlicingAlgorithmKind {
    /// Two-phase backward traversal
    Classic,
    /// Classic traversal that stops at pseudo-predicates whose target is already in
    PseudoPredicate,
}

impl SlicingAlgorithmKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "classic" => Some(Self::Classic),
            "pseudo-predicate" | "pseudopredicate" => Some(Self::PseudoPredicate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::PseudoPredicate => "pseudo-predicate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlicingConfig {
    pub algorithm: SlicingAlgorithmKind,

    /// Traversal depth bound (1..=100000); `None` = unbounded.
    /// A bounded slice is an approximation and may miss dependences.
    pub max_depth: Option<usize>,

    /// Include control dependencies (false = Thin Slicing)
    pub include_control: bool,

    /// LRU cache capacity of `ProgramSlicer` (0 = disabled)
    pub cache_capacity: usize,
}

impl SlicingConfig {
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Fast => Self {
                algorithm: SlicingAlgorithmKind::PseudoPredicate,
                max_depth: None,
                include_control: true,
                cache_capacity: 64,
            },
            Preset::Balanced | Preset::Custom => Self {
                algorithm: SlicingAlgorithmKind::Classic,
                max_depth: None,
                include_control: true,
                cache_capacity: 256,
            },
            Preset::Thorough => Self {
                algorithm: SlicingAlgorithmKind::Classic,
                max_depth: None,
                include_control: true,
                cache_capacity: 1024,
            },
        }
    }

    /// Builder: Set algorithm
    pub fn algorithm(mut self, v: SlicingAlgorithmKind) -> Self {
        self.algorithm = v;
        self
    }

    /// Builder: Set max_depth
    pub fn max_depth(mut self, v: Option<usize>) -> Self {
        self.max_depth = v;
        self
    }

    /// Builder: Set include_control (false = Thin Slicing)
    pub fn include_control(mut self, v: bool) -> Self {
        self.include_control = v;
        self
    }

    /// Builder: Set cache_capacity
    pub fn cache_capacity(mut self, v: usize) -> Self {
        self.cache_capacity = v;
        self
    }
}

impl Validatable for SlicingConfig {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(depth) = self.max_depth {
            if depth == 0 || depth > 100_000 {
                return Err(ConfigError::range_with_hint(
                    "max_depth",
                    depth,
                    1,
                    100_000,
                    "Use null for an unbounded (exact) slice",
                ));
            }
        }
        if self.algorithm == SlicingAlgorithmKind::PseudoPredicate && !self.include_control {
            return Err(ConfigError::Conflict {
                issue: "pseudo-predicate slicing prunes along control dependence, which thin slicing skips"
                    .to_string(),
                fix: "use the classic algorithm for thin slices".to_string(),
            });
        }
        if self.cache_capacity > 1_000_000 {
            return Err(ConfigError::range_with_hint(
                "cache_capacity",
                self.cache_capacity,
                0,
                1_000_000,
                "Cached slices are kept in memory",
            ));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "SlicingConfig"
    }
}

impl Default for SlicingConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}
