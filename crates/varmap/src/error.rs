/// An error encountered while validating the arguments of a collection
/// operation.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct Error {
    kind: Box<ErrorKind>,
}

impl Error {
    /// Construct a new `Error` from an `ErrorKind`.
    pub fn new(kind: ErrorKind) -> Self {
        kind.into()
    }

    /// Construct an "invalid argument" error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        ErrorKind::InvalidArgument(msg.into()).into()
    }

    /// Construct an "out of range" error.
    pub fn out_of_range(msg: impl Into<String>) -> Self {
        ErrorKind::OutOfRange(msg.into()).into()
    }

    /// Get the kind of error that this is.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error {
            kind: Box::new(kind),
        }
    }
}

/// The kind of error.
#[derive(thiserror::Error, Debug)]
pub enum ErrorKind {
    /// An operation expecting an array-like argument received an incompatible
    /// value, or a size/count argument was unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A random selection asked for more entries than the collection holds.
    #[error("out of range: {0}")]
    OutOfRange(String),
}

/// A `Result` type that is either `Ok(T)` or `Err(varmap::Error)`.
pub type Result<T, E = Error> = std::result::Result<T, E>;
