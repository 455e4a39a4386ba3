use core::fmt;

/// Result alias for `fuzzy-cmeans`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the clustering, normalization and defuzzification routines.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid parameter value or input shape.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: String,
    },

    /// Defuzzification of a membership curve with no area under it.
    EmptySupport,

    /// A normalization denominator came out as zero: an all-zero column, or
    /// an all-zero cluster row in a caller-supplied initial membership.
    DegenerateInput {
        /// What the index refers to ("column", "cluster").
        what: &'static str,
        /// Offending row/column.
        index: usize,
    },
}

impl Error {
    pub(crate) fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            Error::EmptySupport => write!(f, "membership curve has an empty support"),
            Error::DegenerateInput { what, index } => {
                write!(f, "degenerate input: {what} {index} normalizes by zero")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
