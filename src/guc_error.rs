use super::*;

#[allow(unused_macros)]
#[macro_export]
macro_rules! gucbail_unrecognized {
    ($x:expr) => {
        return Err(GucError::unrecognized_parameter($x))
    };
}

#[allow(unused_macros)]
#[macro_export]
macro_rules! gucbail_invalid_value {
    ($x:expr, $y:expr) => {
        return Err(GucError::invalid_value($x, $y))
    };
}

#[allow(unused_macros)]
#[macro_export]
macro_rules! gucbail_invalid_name {
    ($x:expr, $y:expr) => {
        return Err(GucError::invalid_name($x, $y))
    };
}

#[allow(unused_macros)]
#[macro_export]
macro_rules! gucbail_invalid_prefix {
    ($x:expr, $y:expr) => {
        return Err(GucError::invalid_prefix($x, $y))
    };
}

#[allow(unused_macros)]
#[macro_export]
macro_rules! gucbail_invalid_definition {
    ($x:expr, $y:expr) => {
        return Err(GucError::invalid_definition($x, $y))
    };
}

#[allow(unused_macros)]
#[macro_export]
macro_rules! gucbail_already_registered {
    ($x:expr) => {
        return Err(GucError::already_registered($x))
    };
}

/// Everything the registry, a session, or the registration routine can refuse.
///
/// Messages follow the wording operators already know from the host server so
/// that a rejected `SET` reads the same whichever layer produced it.
#[derive(ThisError, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum GucError {
    #[error("unrecognized configuration parameter \"{name}\"")]
    UnrecognizedParameter { name: String },
    #[error("invalid value for parameter \"{name}\": \"{value}\"")]
    InvalidValue { name: String, value: String },
    #[error("parameter \"{name}\" requires a Boolean value")]
    RequiresBoolean { name: String },
    #[error("{value} is outside the valid range for parameter \"{name}\" ({min} .. {max})")]
    OutOfRange {
        name: String,
        value: i64,
        min: i32,
        max: i32,
    },
    #[error("invalid value for parameter \"{name}\": \"{value}\": {message}")]
    CheckFailed {
        name: String,
        value: String,
        message: String,
    },
    #[error("parameter \"{name}\" is of type {actual}, not {expected}")]
    TypeMismatch {
        name: String,
        expected: GucKind,
        actual: GucKind,
    },
    #[error("permission denied to set parameter \"{name}\"")]
    PermissionDenied { name: String },
    #[error("parameter \"{name}\" cannot be changed now")]
    CannotChangeNow { name: String },
    #[error("invalid configuration parameter name \"{name}\": {reason}")]
    InvalidName { name: String, reason: String },
    #[error("invalid configuration parameter prefix \"{prefix}\": {reason}")]
    InvalidPrefix { prefix: String, reason: String },
    #[error("attempt to redefine parameter \"{name}\"")]
    DuplicateParameter { name: String },
    #[error("storage for parameter \"{name}\" is already bound to \"{bound_to}\"")]
    AlreadyBound { name: String, bound_to: String },
    #[error("invalid definition of parameter \"{name}\": {message}")]
    InvalidDefinition { name: String, message: String },
    #[error("{what} already registered")]
    AlreadyRegistered { what: String },
}

impl GucError {
    pub fn unrecognized_parameter<T: ToString>(name: T) -> Self {
        Self::UnrecognizedParameter {
            name: name.to_string(),
        }
    }
    pub fn invalid_value<T: ToString, S: ToString>(name: T, value: S) -> Self {
        Self::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
    pub fn requires_boolean<T: ToString>(name: T) -> Self {
        Self::RequiresBoolean {
            name: name.to_string(),
        }
    }
    pub fn out_of_range<T: ToString>(name: T, value: i64, min: i32, max: i32) -> Self {
        Self::OutOfRange {
            name: name.to_string(),
            value,
            min,
            max,
        }
    }
    pub fn check_failed<T: ToString, S: ToString, R: ToString>(
        name: T,
        value: S,
        message: R,
    ) -> Self {
        Self::CheckFailed {
            name: name.to_string(),
            value: value.to_string(),
            message: message.to_string(),
        }
    }
    pub fn type_mismatch<T: ToString>(name: T, expected: GucKind, actual: GucKind) -> Self {
        Self::TypeMismatch {
            name: name.to_string(),
            expected,
            actual,
        }
    }
    pub fn permission_denied<T: ToString>(name: T) -> Self {
        Self::PermissionDenied {
            name: name.to_string(),
        }
    }
    pub fn cannot_change_now<T: ToString>(name: T) -> Self {
        Self::CannotChangeNow {
            name: name.to_string(),
        }
    }
    pub fn invalid_name<T: ToString, S: ToString>(name: T, reason: S) -> Self {
        Self::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
    pub fn invalid_prefix<T: ToString, S: ToString>(prefix: T, reason: S) -> Self {
        Self::InvalidPrefix {
            prefix: prefix.to_string(),
            reason: reason.to_string(),
        }
    }
    pub fn duplicate_parameter<T: ToString>(name: T) -> Self {
        Self::DuplicateParameter {
            name: name.to_string(),
        }
    }
    pub fn already_bound<T: ToString, S: ToString>(name: T, bound_to: S) -> Self {
        Self::AlreadyBound {
            name: name.to_string(),
            bound_to: bound_to.to_string(),
        }
    }
    pub fn invalid_definition<T: ToString, S: ToString>(name: T, message: S) -> Self {
        Self::InvalidDefinition {
            name: name.to_string(),
            message: message.to_string(),
        }
    }
    pub fn already_registered<T: ToString>(what: T) -> Self {
        Self::AlreadyRegistered {
            what: what.to_string(),
        }
    }

    /// The fully-qualified tunable name the error is about, if any.
    pub fn parameter_name(&self) -> Option<&str> {
        match self {
            Self::UnrecognizedParameter { name }
            | Self::InvalidValue { name, .. }
            | Self::RequiresBoolean { name }
            | Self::OutOfRange { name, .. }
            | Self::CheckFailed { name, .. }
            | Self::TypeMismatch { name, .. }
            | Self::PermissionDenied { name }
            | Self::CannotChangeNow { name }
            | Self::InvalidName { name, .. }
            | Self::DuplicateParameter { name }
            | Self::AlreadyBound { name, .. }
            | Self::InvalidDefinition { name, .. } => Some(name),
            Self::InvalidPrefix { .. } | Self::AlreadyRegistered { .. } => None,
        }
    }
}

pub type GucResult<T> = Result<T, GucError>;
