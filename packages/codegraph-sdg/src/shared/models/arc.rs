//! Arc taxonomy.
//!
//! One closed enum instead of an arc class per kind; every consumer matches
//! on [`ArcKind`] directly.

use super::{ActionKind, ActionRef};
use crate::errors::{Result, SdgError};
use serde::{Deserialize, Serialize};

/// Flavour of a control-dependence arc.
///
/// The conditional kinds come from front ends that translate exception
/// constructs; traversal treats all three alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlDependenceKind {
    Unconditional,
    #[serde(rename = "cc1")]
    Conditional1,
    #[serde(rename = "cc2")]
    Conditional2,
}

/// Direction of a parameter arc across a procedure boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterDirection {
    /// actual-in → formal-in
    Input,
    /// formal-out → actual-out
    Output,
}

/// Payload of a data-dependence arc
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataDependence {
    pub variable: String,
    pub source: ActionRef,
    pub target: ActionRef,
}

impl DataDependence {
    /// Checked constructor.
    ///
    /// Only definition → usage and declaration → definition are meaningful;
    /// any other pairing is a programming error.
    pub fn between(
        variable: impl Into<String>,
        source: ActionRef,
        source_kind: ActionKind,
        target: ActionRef,
        target_kind: ActionKind,
    ) -> Result<Self> {
        let variable = variable.into();
        match (source_kind, target_kind) {
            (ActionKind::Definition, ActionKind::Usage)
            | (ActionKind::Declaration, ActionKind::Definition) => Ok(DataDependence {
                variable,
                source,
                target,
            }),
            _ => Err(SdgError::MalformedDataDependence {
                variable,
                source_kind: source_kind.as_str(),
                target_kind: target_kind.as_str(),
            }),
        }
    }
}

/// Arc kinds of CFG, PDG and SDG
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArcKind {
    /// CFG successor; non-executable arcs are the virtual fallthrough of pseudo-predicates
    ControlFlow { executable: bool },
    ControlDependence(ControlDependenceKind),
    DataDependence(DataDependence),
    /// Always-traversed tree edge (call node to its parameter nodes)
    Structural,
    /// Call node → callee entry
    Call,
    ParameterInOut(ParameterDirection),
    /// Callee return formal → call return node
    Return,
    /// Actual-in → actual-out of the same call site
    Summary,
}

impl ArcKind {
    pub fn executable_flow() -> Self {
        ArcKind::ControlFlow { executable: true }
    }

    pub fn control() -> Self {
        ArcKind::ControlDependence(ControlDependenceKind::Unconditional)
    }

    pub fn is_control_flow(&self) -> bool {
        matches!(self, ArcKind::ControlFlow { .. })
    }

    pub fn is_executable_flow(&self) -> bool {
        matches!(self, ArcKind::ControlFlow { executable: true })
    }

    pub fn is_control_dependence(&self) -> bool {
        matches!(self, ArcKind::ControlDependence(_))
    }

    pub fn is_data_dependence(&self) -> bool {
        matches!(self, ArcKind::DataDependence(_))
    }

    pub fn is_summary(&self) -> bool {
        matches!(self, ArcKind::Summary)
    }

    /// Enters a callee: call and parameter-in arcs
    pub fn is_interprocedural_input(&self) -> bool {
        matches!(
            self,
            ArcKind::Call | ArcKind::ParameterInOut(ParameterDirection::Input)
        )
    }

    /// Leaves a callee: parameter-out and return arcs
    pub fn is_interprocedural_output(&self) -> bool {
        matches!(
            self,
            ArcKind::Return | ArcKind::ParameterInOut(ParameterDirection::Output)
        )
    }

    pub fn is_interprocedural(&self) -> bool {
        matches!(
            self,
            ArcKind::Call | ArcKind::ParameterInOut(_) | ArcKind::Return
        )
    }

    /// Dependence arcs that stay inside one procedure
    pub fn is_intraprocedural_dependence(&self) -> bool {
        matches!(
            self,
            ArcKind::ControlDependence(_)
                | ArcKind::DataDependence(_)
                | ArcKind::Structural
                | ArcKind::Summary
        )
    }

    pub fn variable(&self) -> Option<&str> {
        match self {
            ArcKind::DataDependence(dd) => Some(dd.variable.as_str()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArcKind::ControlFlow { executable: true } => "control_flow",
            ArcKind::ControlFlow { executable: false } => "non_executable_flow",
            ArcKind::ControlDependence(_) => "control_dependence",
            ArcKind::DataDependence(_) => "data_dependence",
            ArcKind::Structural => "structural",
            ArcKind::Call => "call",
            ArcKind::ParameterInOut(ParameterDirection::Input) => "parameter_in",
            ArcKind::ParameterInOut(ParameterDirection::Output) => "parameter_out",
            ArcKind::Return => "return",
            ArcKind::Summary => "summary",
        }
    }
}
