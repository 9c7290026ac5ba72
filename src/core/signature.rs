use crate::core::error::PipelineError;
use std::fmt;
use std::str::FromStr;

/// The data contract of a step: the slots it consumes and the slot it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub inputs: Vec<String>,
    pub output: String,
}

impl Signature {
    pub fn new<I, S>(inputs: I, output: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            output: output.into(),
        }
    }
}

impl FromStr for Signature {
    type Err = PipelineError;

    /// Parses shorthand syntax: "input1, input2 -> output"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split("->").collect();
        if parts.len() != 2 {
            return Err(PipelineError::InvalidSignature(format!(
                "'{}' must contain exactly one '->'",
                s
            )));
        }

        let inputs = parts[0]
            .split(',')
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .map(String::from)
            .collect::<Vec<String>>();

        let output = parts[1].trim();
        if output.is_empty() || output.contains(',') {
            return Err(PipelineError::InvalidSignature(format!(
                "'{}' must name exactly one output slot",
                s
            )));
        }

        Ok(Signature {
            inputs,
            output: output.to_string(),
        })
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.inputs.join(", "), self.output)
    }
}
