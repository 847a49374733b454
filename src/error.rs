use alloc::string::String;

use embedded_io_async::ErrorKind;
use thiserror::Error;

/// Errors reported by buffer operations.
///
/// Decoding never produces an error; malformed text or bytes are mapped to
/// zero bits or replacement characters instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// A parameter fell outside the range the operation accepts.
    #[error("The value of \"{name}\" is out of range. It must be >= {min}{}. Received {received}", upper_bound(.max))]
    OutOfRange {
        name: &'static str,
        min: usize,
        max: Option<usize>,
        received: usize,
    },
    /// The buffer is shorter than the access width, so no offset is valid.
    #[error("Attempt to access memory outside buffer bounds")]
    OutOfBounds { name: &'static str },
    /// An encoding name outside `utf8`, `base64` and `hex`.
    #[error("Unknown encoding: {name}")]
    UnsupportedEncoding { name: String },
}

fn upper_bound(max: &Option<usize>) -> String {
    match max {
        Some(max) => alloc::format!(" and <= {max}"),
        None => String::new(),
    }
}

impl BufferError {
    /// Returns `true` for the bounds violations (`OutOfRange`, `OutOfBounds`).
    pub fn is_range_error(&self) -> bool {
        matches!(self, Self::OutOfRange { .. } | Self::OutOfBounds { .. })
    }
}

impl embedded_io_async::Error for BufferError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfRange { .. } | Self::OutOfBounds { .. } => ErrorKind::InvalidInput,
            Self::UnsupportedEncoding { .. } => ErrorKind::Unsupported,
        }
    }
}

pub type Result<T> = core::result::Result<T, BufferError>;
