use paramcast_validator::{Changeset, FunctionError};

/// Error type for validation calls.
///
/// [`Error::Invalid`] is the ordinary outcome for bad input and carries the
/// full error tree. Every other variant is a defect in the schema or in
/// caller-supplied code and aborts the call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The input failed validation.
    #[error("invalid input: {} error(s) at the top level", .0.errors().len())]
    Invalid(Box<Changeset>),

    /// No module with the given name is registered.
    #[error("unknown module `{module}`")]
    UnknownModule { module: String },

    /// The module declares no schema for the given action.
    #[error("unknown action `{action}` in module `{module}`")]
    UnknownAction { module: String, action: String },

    /// Neither the library nor the module exports the validator.
    #[error("validator `{name}/{arity}` is exported by neither the library nor module `{module}`")]
    UnknownValidator {
        module: String,
        name: String,
        arity: usize,
    },

    /// A schema names a callback the module does not register.
    #[error("callback `{name}` is not registered in module `{module}`")]
    UnknownCallback { module: String, name: String },

    /// A validator or callback function returned an error.
    #[error("`{function}` failed in module `{module}`: {source}")]
    Function {
        module: String,
        function: String,
        #[source]
        source: FunctionError,
    },

    /// A serialized module definition could not be read.
    #[error("invalid module definition: {reason}")]
    Definition { reason: String },
}

impl Error {
    /// Broad error category for grouping in logs.
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::Invalid(_) => "validation",
            Self::UnknownModule { .. } | Self::UnknownAction { .. } => "lookup",
            Self::UnknownValidator { .. } | Self::UnknownCallback { .. } => "dispatch",
            Self::Function { .. } => "function",
            Self::Definition { .. } => "definition",
        }
    }

    /// Machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Invalid(_) => "PARAMCAST_INVALID",
            Self::UnknownModule { .. } => "PARAMCAST_UNKNOWN_MODULE",
            Self::UnknownAction { .. } => "PARAMCAST_UNKNOWN_ACTION",
            Self::UnknownValidator { .. } => "PARAMCAST_UNKNOWN_VALIDATOR",
            Self::UnknownCallback { .. } => "PARAMCAST_UNKNOWN_CALLBACK",
            Self::Function { .. } => "PARAMCAST_FUNCTION",
            Self::Definition { .. } => "PARAMCAST_DEFINITION",
        }
    }

    /// Whether this is a schema or caller-code defect rather than bad input.
    #[must_use]
    pub fn is_defect(&self) -> bool {
        !matches!(self, Self::Invalid(_))
    }

    /// The error tree, when the input was invalid.
    #[must_use]
    pub fn changeset(&self) -> Option<&Changeset> {
        match self {
            Self::Invalid(changeset) => Some(changeset),
            _ => None,
        }
    }

    /// Consume the error, returning the error tree when the input was invalid.
    #[must_use]
    pub fn into_changeset(self) -> Option<Changeset> {
        match self {
            Self::Invalid(changeset) => Some(*changeset),
            _ => None,
        }
    }
}
