use thiserror::Error;

/// Engine-wide error taxonomy.
///
/// `InvalidInput` and `UnknownComponent` are fatal to the single call that
/// raised them: the call aborts with no partial tree. `PatternTransform` is
/// never surfaced to callers of the transformer — it is logged and downgraded
/// to a null result for the offending element only.
#[derive(Debug, Error)]
pub enum WireError {
    /// Wire text (or markup handed to the parser) could not be parsed.
    #[error("Invalid JSON input: {0}")]
    InvalidInput(String),

    /// A descriptor named a tag with no registered component kind.
    #[error("Unknown component: {0}")]
    UnknownComponent(String),

    /// Selector text outside the supported grammar (tag, tag.class, .class,
    /// `A B` descendant) was passed to pattern registration.
    #[error("Unsupported selector: {0:?}")]
    InvalidSelector(String),

    /// A pattern handler failed. Always recovered by the transformer.
    #[error("Pattern handler for {selector:?} failed: {message}")]
    PatternTransform { selector: String, message: String },

    /// Raised by a component kind's own `from_data`/`to_data`.
    #[error("{0}")]
    Component(String),
}

impl WireError {
    /// Shorthand for kind-level failures (missing field, wrong shape).
    pub fn component(message: impl Into<String>) -> Self {
        WireError::Component(message.into())
    }
}
