//! Result and Error types for the pxr module

/// Type alias for `Result<T, pxr::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `pxtools-pxr`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// Failure to deserialise a byte stream
    #[error("failed to deserialise byte stream")]
    UnableToDeserialise(#[from] Box<bincode::ErrorKind>),

    /// Decoded values do not form a valid volume
    #[error("invalid volume")]
    Volume(#[from] pxtools_volume::Error),

    /// Header declares a negative number of cells
    #[error("negative extent in header ({axis} = {value})")]
    NegativeExtent { axis: char, value: i32 },

    /// Extent too large to be written back into an i32 header field
    #[error("extent {0} does not fit the header")]
    ExtentTooLarge(usize),

    /// Unexpected length of bytes based on file content
    #[error("unexpected byte length (expected {expected:?}, found {found:?})")]
    UnexpectedByteLength { expected: usize, found: usize },
}
