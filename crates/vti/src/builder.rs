// internal modules
use crate::header::ExtentMode;
use crate::writer::VolumeToVti;

// extrenal crates
use log::warn;

/// Builder implementation for VolumeToVti configuration
///
/// The fields of [VolumeToVti] are left public for direct use but the module
/// also implements a builder for chained setter calls. Any number of
/// parameters can be set this way (including none).
///
/// To get the final [VolumeToVti] from the builder, call
/// [build()](VolumeToVtiBuilder::build).
///
/// ```rust, no_run
/// # use pxtools_vti::{ExtentMode, VolumeToVti};
/// # use pxtools_volume::ScalarVolume;
/// # let volume = ScalarVolume::default();
/// let converter = VolumeToVti::builder()
///     .extent_mode(ExtentMode::Legacy)
///     .escape_labels(true)
///     .atomic(true)
///     .build();
///
/// converter.write(&volume, "jx", "./vti_data/jx.vti").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct VolumeToVtiBuilder {
    /// Upper bound convention for the extent attributes
    extent_mode: ExtentMode,
    /// Escape reserved XML characters in the label
    escape_labels: bool,
    /// Write through a temporary file and rename on success
    atomic: bool,
}

impl VolumeToVtiBuilder {
    /// Create a new instance of the builder with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the [VolumeToVti] type
    pub fn build(self) -> VolumeToVti {
        VolumeToVti {
            extent_mode: self.extent_mode,
            escape_labels: self.escape_labels,
            atomic: self.atomic,
        }
    }

    /// Upper bound convention for the extent attributes
    ///
    /// Existing viewers are set up for [ExtentMode::Legacy], where the cell
    /// count itself is the upper bound. Only switch if every consumer of the
    /// files expects point extents.
    pub fn extent_mode(mut self, mode: ExtentMode) -> Self {
        if mode == ExtentMode::Corrected {
            warn!("Warning: Corrected extents are not compatible with legacy vti outputs");
        }
        self.extent_mode = mode;
        self
    }

    /// Escape reserved XML characters in the data array label
    ///
    /// Off by default so files stay byte-identical to the legacy converter.
    /// Labels containing `&`, `<`, `>`, or quotes produce invalid XML
    /// otherwise.
    pub fn escape_labels(mut self, escape: bool) -> Self {
        self.escape_labels = escape;
        self
    }

    /// Write through a temporary `.part` file, renamed on success
    pub fn atomic(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }
}
