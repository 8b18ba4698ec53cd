//! Result and Error types for the volume module

/// Type alias for `Result<T, volume::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug, PartialEq)]
/// The error type for `pxtools-volume`
pub enum Error {
    /// Number of values does not match the product of the extents
    #[error("value array does not match extents {extents} (expected {expected:?}, found {found:?})")]
    ShapeMismatch {
        extents: String,
        expected: usize,
        found: usize,
    },

    /// Product of the extents does not fit in memory addressing
    #[error("extents {0} overflow the addressable number of cells")]
    ExtentOverflow(String),
}
