//! JSON program description.
//!
//! ```json
//! {
//!   "procedures": [{
//!     "name": "f",
//!     "parameters": [{ "name": "x" }],
//!     "nodes": [
//!       { "key": "s1", "label": "y = x", "line": 2,
//!         "actions": [{ "kind": "usage", "variable": "x" },
//!                     { "kind": "definition", "variable": "y" }] }
//!     ],
//!     "edges": [{ "from": "entry", "to": "s1" }, { "from": "s1", "to": "exit" }]
//!   }]
//! }
//! ```
//!
//! Node keys are local to their procedure; `entry` and `exit` are reserved for
//! the nodes every procedure gets.

use crate::errors::{Result, SdgError};
use crate::features::flow_graph::{Program, ProgramBuilder};
use crate::shared::models::{
    CallSite, ControlDependenceKind, NodeId, Parameter, Signature, VariableAction,
};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

const ENTRY_KEY: &str = "entry";
const EXIT_KEY: &str = "exit";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgramDescription {
    pub procedures: Vec<ProcedureDescription>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcedureDescription {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub returns_value: bool,
    #[serde(default)]
    pub nodes: Vec<NodeDescription>,
    #[serde(default)]
    pub edges: Vec<EdgeDescription>,
    #[serde(default)]
    pub conditional_dependences: Vec<ConditionalDescription>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDescription {
    pub key: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    /// In evaluation order
    #[serde(default)]
    pub actions: Vec<VariableAction>,
    #[serde(default)]
    pub calls: Vec<CallSite>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeDescription {
    pub from: String,
    pub to: String,
    /// `false` for the virtual fallthrough of an unconditional jump
    #[serde(default = "executable_by_default")]
    pub executable: bool,
}

fn executable_by_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConditionalDescription {
    pub from: String,
    pub to: String,
    pub kind: ControlDependenceKind,
}

/// Node ids by (procedure, key)
#[derive(Debug, Clone, Default)]
pub struct NodeKeys {
    ids: FxHashMap<(String, String), NodeId>,
}

impl NodeKeys {
    pub fn get(&self, procedure: &str, key: &str) -> Option<NodeId> {
        self.ids
            .get(&(procedure.to_string(), key.to_string()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl ProgramDescription {
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Build every procedure's CFG.
    ///
    /// Fails on duplicate procedure names or node keys, on edges naming an
    /// unknown key, and on anything the CFG builder rejects.
    pub fn into_program(self) -> Result<(Program, NodeKeys)> {
        let mut builder = ProgramBuilder::new();
        let mut keys = NodeKeys::default();
        let mut seen_procedures = FxHashMap::default();

        for procedure in self.procedures {
            if seen_procedures.insert(procedure.name.clone(), ()).is_some() {
                return Err(SdgError::malformed(format!(
                    "procedure '{}' is described twice",
                    procedure.name
                )));
            }
            let name = procedure.name.clone();
            let signature = Signature {
                parameters: procedure.parameters,
                returns_value: procedure.returns_value,
            };
            let mut proc_builder = builder.procedure(name.clone(), signature);

            let mut local: FxHashMap<String, NodeId> = FxHashMap::default();
            local.insert(ENTRY_KEY.to_string(), proc_builder.entry());
            local.insert(EXIT_KEY.to_string(), proc_builder.exit());

            for node in procedure.nodes {
                if local.contains_key(&node.key) {
                    return Err(SdgError::malformed(format!(
                        "node key '{}' is reserved or used twice in '{}'",
                        node.key, name
                    )));
                }
                let actions = node.actions.into_iter().map(|mut a| {
                    a.host = None;
                    a
                });
                let id = proc_builder.statement(node.label, actions);
                if let Some(line) = node.line {
                    proc_builder.set_line(id, line)?;
                }
                for site in node.calls {
                    proc_builder.call(id, site)?;
                }
                local.insert(node.key, id);
            }

            let lookup = |key: &str| {
                local.get(key).copied().ok_or_else(|| {
                    SdgError::malformed(format!("unknown node key '{}' in '{}'", key, name))
                })
            };
            for edge in &procedure.edges {
                let (from, to) = (lookup(edge.from.as_str())?, lookup(edge.to.as_str())?);
                if edge.executable {
                    proc_builder.flow(from, to);
                } else {
                    proc_builder.non_executable(from, to);
                }
            }
            for dep in &procedure.conditional_dependences {
                let (from, to) = (lookup(dep.from.as_str())?, lookup(dep.to.as_str())?);
                proc_builder.conditional_dependence(from, to, dep.kind);
            }
            proc_builder.finish()?;

            for (key, id) in local {
                keys.ids.insert((name.clone(), key), id);
            }
        }

        let program = builder.build();
        debug!(
            procedures = program.procedures().len(),
            nodes = program.arena().len(),
            "program description loaded"
        );
        Ok((program, keys))
    }
}
