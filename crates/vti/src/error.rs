//! Result and Error types for the vti module

/// Type alias for `Result<T, vti::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `pxtools-vti`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// Invalid volume passed through from the volume module
    #[error("invalid volume")]
    Volume(#[from] pxtools_volume::Error),

    /// The data array name is required
    #[error("data array label must not be empty")]
    EmptyLabel,

    /// Payload byte length does not fit the 32-bit size prefix
    #[error("payload of {0} cells does not fit a 32-bit size prefix")]
    PayloadTooLarge(usize),

    /// The file does not follow the expected image data layout
    #[error("malformed vti file: {0}")]
    MalformedFile(String),

    /// Unexpected length of bytes based on file content
    #[error("unexpected byte length (expected {expected:?}, found {found:?})")]
    UnexpectedByteLength { expected: usize, found: usize },
}
