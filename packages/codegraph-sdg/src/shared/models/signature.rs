use serde::{Deserialize, Serialize};

/// Reserved variable a `return` statement defines and the return formal-out uses
pub const RETURN_VARIABLE: &str = "-output-";

/// Parameter passing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterMode {
    /// Value flows into the callee only
    #[default]
    In,
    /// Value flows in and the callee's final value flows back to the argument
    InOut,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub mode: ParameterMode,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

/// Formal interface of a procedure
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub returns_value: bool,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: append an `In` parameter
    pub fn parameter(self, name: impl Into<String>) -> Self {
        self.parameter_with(name, ParameterMode::In, None)
    }

    /// Builder: append an `InOut` parameter
    pub fn in_out(self, name: impl Into<String>) -> Self {
        self.parameter_with(name, ParameterMode::InOut, None)
    }

    pub fn parameter_with(
        mut self,
        name: impl Into<String>,
        mode: ParameterMode,
        type_name: Option<String>,
    ) -> Self {
        self.parameters.push(Parameter {
            name: name.into(),
            mode,
            type_name,
        });
        self
    }

    /// Builder: the procedure returns a value
    pub fn returns(mut self) -> Self {
        self.returns_value = true;
        self
    }

    pub fn parameter_at(&self, position: usize) -> Option<&Parameter> {
        self.parameters.get(position)
    }
}
