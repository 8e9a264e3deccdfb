use thiserror::Error;

/// Errors raised while building a chart context or rendering it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    /// The requested chart cannot be built from the supplied inputs.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// A caller-supplied value is outside the supported range.
    #[error("Validation error: {message}")]
    Validation { message: String },
    /// An internal computation reached a state valid input can never produce.
    #[error("Invariant violated: {message}")]
    Invariant { message: String },
    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl ChartError {
    /// Inputs that cannot describe a chart, such as a missing partner or a
    /// malformed catalog.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// A value outside its accepted range.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// A computed value that valid input cannot produce.
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant {
            message: message.into(),
        }
    }
}

/// Errors produced by template substitution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The template names a slot the assembler never fills.
    #[error("Template placeholder '${name}' has no corresponding slot")]
    UnknownPlaceholder { name: String },
    /// A `$` not followed by a name, `{name}` or another `$`.
    #[error("Invalid placeholder in template at byte offset {offset}")]
    InvalidPlaceholder { offset: usize },
    /// A slot every template expects was not produced.
    #[error("Required fragment slot '{name}' is missing")]
    MissingSlot { name: String },
}

pub type Result<T> = std::result::Result<T, ChartError>;
