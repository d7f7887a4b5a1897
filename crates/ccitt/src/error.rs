use thiserror::Error;

/// An error when reading a CCITT encoded bi-level image
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FaxError {
    /// A bit was requested after the last byte of the input was consumed
    ///
    /// This is fatal for the current decode pass, running out of input in
    /// the middle of a code means the stream is truncated or corrupt.
    #[error("end of data while reading bit")]
    EndOfData,
}

/// Type alias for convenience
pub type FaxResult<T> = Result<T, FaxError>;
