/// Represents errors that can occur in the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Construction parameters out of range (capacity or load factor)
    InvalidArgument(&'static str),

    /// An absent key was passed to `put` or `get`
    NullKey,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(reason) => write!(f, "IntLongMapError: invalid argument: {reason}"),
            Self::NullKey => write!(f, "IntLongMapError: null is not allowed to be used as a key"),
        }
    }
}

impl std::error::Error for Error {}

/// Map result
pub type Result<T> = std::result::Result<T, Error>;
