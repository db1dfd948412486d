use thiserror::Error;

/// The Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Enum encapsulating all the possible errors from this library.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Indicates invalid group or exponent-domain parameters.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Indicates that a pair of coordinates does not satisfy the curve equation.
    #[error("The point is not on the curve")]
    NotOnCurve,

    /// Indicates a subgroup index out of range.
    #[error("Invalid subgroup index: {0} is not below {1}")]
    InvalidSubgroupIndex(usize, usize),

    /// Indicates that no prime field was found for the requested order.
    #[error("No prime field found after {0} cofactor candidates")]
    NoPrimeFound(usize),

    /// Indicates that the randomness source failed.
    #[error("Randomness source failure: {0}")]
    Randomness(String),

    /// Indicates that elements belong to different groups.
    #[error("Invalid context")]
    InvalidContext,

    /// Indicates a serialization error.
    #[error("Serialization error")]
    SerializationError,
}

impl From<rand::Error> for Error {
    fn from(e: rand::Error) -> Self {
        Error::Randomness(e.to_string())
    }
}
