use thiserror::Error;

/// The Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Enum encapsulating all the possible errors from this library.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The composite-order group could not be generated for the requested
    /// sizes.
    #[error("Setup failure: {0}")]
    SetupFailure(String),

    /// The randomness source failed.
    #[error("Randomness failure: {0}")]
    RandomnessFailure(String),

    /// A ciphertext does not have exactly two components.
    #[error("Invalid ciphertext shape: expected 2 components, found {0}")]
    InvalidCiphertextShape(usize),

    /// Indicates an error from the underlying mathematical library.
    #[error("{0}")]
    MathError(clhe_math::Error),

    /// Indicates that there is an error in the parameters.
    #[error("{0}")]
    ParametersError(ParametersError),

    /// Indicates a serialization error.
    #[error("Serialization error")]
    SerializationError,

    /// Indicates a default error.
    #[error("{0}")]
    DefaultError(String),
}

impl From<clhe_math::Error> for Error {
    fn from(e: clhe_math::Error) -> Self {
        match e {
            clhe_math::Error::Randomness(reason) => Error::RandomnessFailure(reason),
            e => Error::MathError(e),
        }
    }
}

impl From<rand::Error> for Error {
    fn from(e: rand::Error) -> Self {
        Error::RandomnessFailure(e.to_string())
    }
}

/// Separate enum to indicate parameters-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParametersError {
    /// Indicates an unsupported number of prime factors.
    #[error("Invalid number of primes: {0}, only {1} is supported")]
    InvalidNumPrimes(usize, usize),

    /// Indicates that the size of the prime factors is out of bounds.
    #[error("Invalid factor size: {0} is not between {1} and {2}")]
    InvalidFactorSize(usize, usize, usize),
}
