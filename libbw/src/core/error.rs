//! error type shared by the bw engine

use std::error;
use std::fmt;
use std::io;
use std::result;

/// Errors reported by the bw engine.
///
/// Truncated payloads are deliberately absent: the decoder treats missing payload bytes
/// as zeros and keeps going.
#[derive(Debug)]
pub enum Error {
    /// An IO error occured while reading or writing a stream.
    IoError(io::Error),
    /// The compressed file is malformed and cannot be parsed.
    FormatError(&'static str),
    /// The stream asks for more than the decoder is willing or able to allocate.
    LimitError(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::IoError(ref err) => err.fmt(f),
            Error::FormatError(msg) => write!(f, "malformed bw file: {}", msg),
            Error::LimitError(constraint) => write!(f, "limit reached: {}", constraint),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::IoError(ref err) => Some(err),
            Error::FormatError(_) => None,
            Error::LimitError(_) => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::IoError(err)
    }
}

/// result type for bw stuff
pub type BwResult<T> = result::Result<T, Error>;

/// Convenience function to create a format error.
pub fn format_error<T>(desc: &'static str) -> BwResult<T> {
    Err(Error::FormatError(desc))
}

/// Convenience function to create a limit error.
pub fn limit_error<T>(constraint: &'static str) -> BwResult<T> {
    Err(Error::LimitError(constraint))
}
