//! Errors returned by the hybrid RLE encoder and decoder.

/// Errors of this crate.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// General error.
    /// Returned when the underlying byte sink fails.
    General(String),
    /// A value or a bit width that violates the contract agreed between the caller
    /// and the codec, e.g. a value that does not fit in the session's bit width.
    /// When decoding, an RLE value wider than the bit width.
    ///
    /// A bitpacked run whose payload is shorter than its `groups * num_bits` bytes
    /// (so the bytes left are not a whole number of groups) is not reported here but
    /// as [`Error::MalformedStream`], like any other truncated run.
    InvalidValue(String),
    /// When the encoded stream is known to be out of spec: truncated (including a
    /// bitpacked payload shorter than its header announces), or with runs that do
    /// not add up to the expected number of values.
    MalformedStream(String),
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::General(message) => {
                write!(fmt, "{}", message)
            }
            Error::InvalidValue(message) => {
                write!(fmt, "invalid value: {}", message)
            }
            Error::MalformedStream(message) => {
                write!(fmt, "malformed stream: {}", message)
            }
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::General(format!("underlying IO error: {}", e))
    }
}

/// A specialized `Result` for hybrid RLE errors.
pub type Result<T> = std::result::Result<T, Error>;

macro_rules! general_err {
    ($fmt:expr) => (Error::General($fmt.to_owned()));
    ($fmt:expr, $($args:expr),*) => (Error::General(format!($fmt, $($args),*)));
}

macro_rules! invalid_err {
    ($fmt:expr) => (Error::InvalidValue($fmt.to_owned()));
    ($fmt:expr, $($args:expr),*) => (Error::InvalidValue(format!($fmt, $($args),*)));
}

macro_rules! malformed_err {
    ($fmt:expr) => (Error::MalformedStream($fmt.to_owned()));
    ($fmt:expr, $($args:expr),*) => (Error::MalformedStream(format!($fmt, $($args),*)));
}
