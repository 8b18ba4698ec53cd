//! Result and Error types for the batch module

// standard library
use std::path::PathBuf;

/// Type alias for `Result<T, batch::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `pxtools-batch`
///
/// Every variant ends the whole run. Failures of individual files are a
/// [JobError] and only end the run in fail-fast mode.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Underlying terminal I/O error
    #[error("failure in terminal I/O")]
    IOError(#[from] std::io::Error),

    /// No field name was given
    #[error("please name the field to convert (or \"all\", \"show\")")]
    EmptySelector,

    /// The selector matched no source files
    #[error("given field name \"{selector}\" does not match any .{extension} file in {directory:?}")]
    NoMatch {
        selector: String,
        extension: String,
        directory: PathBuf,
    },

    /// The source directory could not be listed
    #[error("unable to list source directory {path:?}")]
    SourceDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output directory could not be created
    #[error("unable to create output directory {path:?}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A job failed while running in fail-fast mode
    #[error("conversion of {path:?} failed")]
    JobFailed {
        path: PathBuf,
        #[source]
        source: JobError,
    },

    /// Progress bar could not be set up
    #[error("unable to initialise progress bar: {0}")]
    ProgressBar(String),
}

/// Failure of a single conversion job
#[derive(thiserror::Error, Debug)]
pub enum JobError {
    /// The decoder could not read the source file
    #[error("unable to decode field dump")]
    Decode(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The image data file could not be written
    #[error("unable to write image data")]
    Encode(#[from] pxtools_vti::Error),
}
