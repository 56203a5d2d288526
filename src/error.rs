use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
///
/// `E` is the error type of the pulse channel in use.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Rejected input that never reached the hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ArgumentError {
    #[display("unsupported device type {_0}")]
    UnsupportedDevice(#[error(not(source))] u8),

    #[display("strip has no pixels")]
    ZeroLength,

    #[display("pixel index {index} out of range for {len} pixels")]
    IndexOutOfRange { index: usize, len: usize },

    #[display("clock source and divider must be non-zero")]
    InvalidClock,
}

/// Errors reported by strip operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Error<E> {
    #[display("invalid argument: {_0}")]
    InvalidArgument(ArgumentError),

    #[display("frame of {requested} bytes exceeds buffer capacity of {capacity}")]
    OutOfMemory { requested: usize, capacity: usize },

    #[display("previous transmission did not complete in time")]
    Timeout,

    #[display("buffer is locked by an in-flight transmission")]
    TransmissionInProgress,

    #[display("pulse channel error: {_0:?}")]
    Hardware(E),
}

impl<E: core::fmt::Debug> core::error::Error for Error<E> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::InvalidArgument(err) => Some(err),
            _ => None,
        }
    }
}

impl<E> From<ArgumentError> for Error<E> {
    fn from(err: ArgumentError) -> Self {
        Self::InvalidArgument(err)
    }
}
