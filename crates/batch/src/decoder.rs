// standard library
use std::path::Path;

// pxtools modules
use pxtools_pxr::{read_pxr_file, PxrDecoder, PXR_EXTENSION};
use pxtools_volume::ScalarVolume;

// external crates
use log::debug;

/// Anything that turns a field dump on disk into a [ScalarVolume]
///
/// The batch converter only needs to know which files to pick up and how to
/// read one. [PxrDecoder] is the implementation used for PICSAR dumps.
pub trait FieldDecoder {
    /// Error returned for files that cannot be decoded
    type Error: std::error::Error + Send + Sync + 'static;

    /// Extension of the files this decoder reads, without the dot
    fn extension(&self) -> &str;

    /// Read a single field dump
    fn decode(&self, path: &Path) -> Result<ScalarVolume, Self::Error>;
}

impl FieldDecoder for PxrDecoder {
    type Error = pxtools_pxr::Error;

    fn extension(&self) -> &str {
        PXR_EXTENSION
    }

    fn decode(&self, path: &Path) -> Result<ScalarVolume, Self::Error> {
        let field = read_pxr_file(path)?;
        debug!("{field}");
        Ok(field.volume)
    }
}
