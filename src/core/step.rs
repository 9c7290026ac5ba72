use crate::core::error::PipelineError;
use crate::core::signature::Signature;
use crate::core::SlotValue;
use std::fmt;
use std::sync::Arc;

/// What an extractor hands back: `Ok(None)` marks the slot as unresolved.
pub type Extraction = Result<Option<SlotValue>, PipelineError>;

/// Defines the behavior of one extraction step.
///
/// Arguments arrive in the order the step declared its `arg_refs`.
pub trait Extractor: Send + Sync + 'static {
    fn extract(&self, args: &[SlotValue]) -> Extraction;
}

impl<F> Extractor for F
where
    F: Fn(&[SlotValue]) -> Extraction + Send + Sync + 'static,
{
    fn extract(&self, args: &[SlotValue]) -> Extraction {
        self(args)
    }
}

/// One unit of extraction: an extractor plus the slots it consumes.
#[derive(Clone)]
pub struct Step {
    signature: Signature,
    readable_name: Option<String>,
    extractor: Arc<dyn Extractor>,
}

impl Step {
    /// Creates a step producing `name` from the listed slots.
    pub fn new<I, S, F>(name: impl Into<String>, arg_refs: I, extractor: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&[SlotValue]) -> Extraction + Send + Sync + 'static,
    {
        Self::with_extractor(Signature::new(arg_refs, name), Arc::new(extractor))
    }

    /// Creates a step from signature shorthand, e.g. `"prompt, element -> element_name"`.
    pub fn parse<F>(signature: &str, extractor: F) -> Result<Self, PipelineError>
    where
        F: Fn(&[SlotValue]) -> Extraction + Send + Sync + 'static,
    {
        Ok(Self::with_extractor(signature.parse()?, Arc::new(extractor)))
    }

    pub fn with_extractor(signature: Signature, extractor: Arc<dyn Extractor>) -> Self {
        Self {
            signature,
            readable_name: None,
            extractor,
        }
    }

    /// Sets the user-facing name used when this step cannot be resolved.
    pub fn readable(mut self, readable_name: impl Into<String>) -> Self {
        self.readable_name = Some(readable_name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.signature.output
    }

    pub fn arg_refs(&self) -> &[String] {
        &self.signature.inputs
    }

    pub fn readable_name(&self) -> Option<&str> {
        self.readable_name.as_deref()
    }

    /// The name shown to users: the readable name if declared, the step name otherwise.
    pub fn display_name(&self) -> &str {
        self.readable_name.as_deref().unwrap_or(self.name())
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Runs the extractor. Null and blank-string results count as unresolved.
    pub fn extract(&self, args: &[SlotValue]) -> Extraction {
        Ok(self.extractor.extract(args)?.filter(|value| {
            !value.is_null() && !value.as_str().is_some_and(|s| s.trim().is_empty())
        }))
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("signature", &self.signature.to_string())
            .field("readable_name", &self.readable_name)
            .finish()
    }
}

/// Reads argument `index` as text.
pub fn text_arg(args: &[SlotValue], index: usize) -> Result<&str, PipelineError> {
    args.get(index)
        .and_then(|v| v.as_str())
        .ok_or(PipelineError::ArgumentType {
            index,
            expected: "string",
        })
}
