use thiserror::Error;

#[derive(Error, Debug)]
/// Errors raised while binding lists to and from XML.
pub enum BindError {
    /// A required argument was rejected before the binding engine was involved.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// None of the write entry points accepts the given target.
    #[error("no marshal target found for {target}")]
    NoMatchingTarget { target: String },

    /// The element type cannot be bound, typically because its name is not a valid XML name.
    #[error("binding context: {0}")]
    Context(String),

    /// A marshaller property is unknown or its value cannot be parsed.
    #[error("marshaller property: {0}")]
    Property(String),

    /// Serializing or writing the document failed.
    #[error("marshal: {0}")]
    Marshal(String),

    /// Reading, parsing or deserializing the document failed.
    #[error("unmarshal: {0}")]
    Unmarshal(String),

    /// The resolved target could not be prepared for writing.
    #[error("failed to marshal to {target}")]
    Dispatch {
        target: String,
        #[source]
        source: std::io::Error,
    },
}

impl BindError {
    /// Returns `true` for errors detected locally from the caller's arguments.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            BindError::InvalidArgument(_) | BindError::NoMatchingTarget { .. }
        )
    }

    /// Returns `true` for errors raised by the binding engine itself.
    pub fn is_binding_failure(&self) -> bool {
        matches!(
            self,
            BindError::Context(_)
                | BindError::Property(_)
                | BindError::Marshal(_)
                | BindError::Unmarshal(_)
        )
    }
}
