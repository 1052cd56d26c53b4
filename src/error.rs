//! Error types for argument parsing, command registration and configuration.

use crate::text::Message;
use thiserror::Error;

/// Request for a second parsing pass of an argument.
///
/// Not a failure: the coordinating command defers the argument, parses the
/// arguments after it and then calls back into `parse_fallback`.
#[derive(Debug, Clone)]
pub struct FallbackEscalation {
    /// Name of the escalating argument (the outermost wrapper once wrapped).
    pub argument: String,
    /// What the argument failed with on its first pass, or the wrapped inner
    /// escalation for decorating arguments.
    pub cause: Box<ParseError>,
}

impl FallbackEscalation {
    pub fn new(argument: impl Into<String>, cause: ParseError) -> Self {
        Self {
            argument: argument.into(),
            cause: Box::new(cause),
        }
    }

    /// Wrap an escalation raised by a child argument.
    pub fn wrap(argument: impl Into<String>, inner: FallbackEscalation) -> Self {
        Self::new(argument, ParseError::FallbackEscalation(inner))
    }

    /// The child's escalation, if this one wraps another.
    pub fn inner(&self) -> Option<&FallbackEscalation> {
        match self.cause.as_ref() {
            ParseError::FallbackEscalation(inner) => Some(inner),
            _ => None,
        }
    }

    /// The original, non-escalation failure at the bottom of the chain.
    pub fn root_cause(&self) -> &ParseError {
        match self.cause.as_ref() {
            ParseError::FallbackEscalation(inner) => inner.root_cause(),
            other => other,
        }
    }
}

/// Argument parsing failures.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("No more input tokens")]
    EndOfInput,

    #[error("{message}")]
    MissingArgument { argument: String, message: Message },

    #[error("{message}")]
    InvalidArgument {
        argument: String,
        input: String,
        message: Message,
    },

    #[error("{message}")]
    ArgumentRejected {
        argument: String,
        input: String,
        message: Message,
    },

    #[error("{message}")]
    RequiresActor { argument: String, message: Message },

    #[error("{message}")]
    UnexpectedInput { input: String, message: Message },

    #[error("Argument '{}' requested a fallback pass", .0.argument)]
    FallbackEscalation(FallbackEscalation),

    #[error("Argument '{argument}' requested a second fallback pass within one parse")]
    RepeatedEscalation { argument: String },
}

impl ParseError {
    /// Name of the argument the failure is attributed to.
    pub fn argument(&self) -> Option<&str> {
        match self {
            ParseError::MissingArgument { argument, .. }
            | ParseError::InvalidArgument { argument, .. }
            | ParseError::ArgumentRejected { argument, .. }
            | ParseError::RequiresActor { argument, .. }
            | ParseError::RepeatedEscalation { argument } => Some(argument),
            ParseError::FallbackEscalation(escalation) => Some(&escalation.argument),
            ParseError::EndOfInput | ParseError::UnexpectedInput { .. } => None,
        }
    }

    /// Raw text consumed by the failed attempt.
    pub fn input(&self) -> Option<&str> {
        match self {
            ParseError::InvalidArgument { input, .. }
            | ParseError::ArgumentRejected { input, .. }
            | ParseError::UnexpectedInput { input, .. } => Some(input),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&Message> {
        match self {
            ParseError::MissingArgument { message, .. }
            | ParseError::InvalidArgument { message, .. }
            | ParseError::ArgumentRejected { message, .. }
            | ParseError::RequiresActor { message, .. }
            | ParseError::UnexpectedInput { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_escalation(&self) -> bool {
        matches!(self, ParseError::FallbackEscalation(_))
    }

    /// Ordinary argument failures that an optional argument may turn into
    /// "no value". Escalations and internal errors are not.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ParseError::EndOfInput
                | ParseError::MissingArgument { .. }
                | ParseError::InvalidArgument { .. }
                | ParseError::ArgumentRejected { .. }
                | ParseError::RequiresActor { .. }
        )
    }
}

/// Command registration failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Command '{0}' is already registered somewhere")]
    AlreadyRegistered(String),

    #[error("Another command with this name is already registered: {0}")]
    NameTaken(String),

    #[error("Command '{0}' is registered somewhere else")]
    ForeignParent(String),

    #[error("Command '{0}' is not registered here")]
    NotRegistered(String),

    #[error("Command '{0}' cannot be registered under itself or its own descendant")]
    Cycle(String),
}

/// Crate-level error for setup paths (config, logging, registration).
#[derive(Debug, Error)]
pub enum ArgtreeError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for ArgtreeError {
    fn from(err: config::ConfigError) -> Self {
        ArgtreeError::ConfigError(err.to_string())
    }
}
