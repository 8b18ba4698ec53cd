//! Write operations for VTK image data files

// standard library
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

// pxtools modules
use pxtools_format::f;
use pxtools_volume::ScalarVolume;

// crate modules
use crate::builder::VolumeToVtiBuilder;
use crate::error::{Error, Result};
use crate::header::{render_header, DataArrayDecl, ExtentMode, FOOTER};

// external crates
use log::{debug, trace, warn};

/// Write a [ScalarVolume] to `path` with the default configuration
///
/// The label is used verbatim as the name of the single cell data array.
/// The file is created, or overwritten if it already exists.
///
/// ```rust, no_run
/// # use pxtools_vti::write_vti;
/// # use pxtools_volume::ScalarVolume;
/// let volume = ScalarVolume::from_fn(4, 4, 4, |ix, iy, iz| (ix + iy + iz) as f32).unwrap();
/// write_vti(&volume, "rho", "./vti_data/rho.vti").unwrap();
/// ```
pub fn write_vti<P: AsRef<Path>>(volume: &ScalarVolume, label: &str, path: P) -> Result<()> {
    VolumeToVti::default().write(volume, label, path)
}

/// Convert scalar volumes to VTK XML image data
///
/// Files are a textual XML header, a single appended raw data block, and a
/// textual footer:
///
/// ```text
/// <VTKFile type="ImageData" ...>
/// ... one Float32 cell data array, format="appended" offset="0" ...
/// <AppendedData encoding="raw">
/// _<i32 byte count><f32><f32>...</AppendedData></VTKFile>
/// ```
///
/// The byte count is `4 * nx * ny * nz` and every number is little endian.
/// Values follow the [ScalarVolume] storage order, `ix` outermost and `iz`
/// innermost.
///
/// The fields remain public for direct use, but a builder is also available.
///
/// ```rust
/// # use pxtools_vti::{ExtentMode, VolumeToVti};
/// // Write n-1 upper bounds and escape reserved label characters
/// let converter = VolumeToVti::builder()
///     .extent_mode(ExtentMode::Corrected)
///     .escape_labels(true)
///     .build();
/// ```
///
/// # Partial files
///
/// By default a failed write may leave a truncated file behind. With
/// `atomic` set, data go to a sibling `.part` file that is only renamed over
/// the target once everything has been written.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct VolumeToVti {
    /// Upper bound convention for the extent attributes
    pub extent_mode: ExtentMode,
    /// Escape reserved XML characters in the label
    pub escape_labels: bool,
    /// Write through a temporary file and rename on success
    pub atomic: bool,
}

// Public API
impl VolumeToVti {
    /// Start with the default configuration
    pub fn new() -> VolumeToVti {
        Default::default()
    }

    /// Get an instance of the [VolumeToVtiBuilder]
    pub fn builder() -> VolumeToVtiBuilder {
        VolumeToVtiBuilder::default()
    }

    /// Header text for a volume, up to and including the `_` marker
    pub fn header(&self, volume: &ScalarVolume, label: &str) -> Result<String> {
        if label.is_empty() {
            return Err(Error::EmptyLabel);
        }

        Ok(render_header(
            volume.extents(),
            self.extent_mode,
            &[DataArrayDecl::new(label, 0)],
            self.escape_labels,
        ))
    }

    /// Encode a complete file into any writer
    ///
    /// Everything is validated before the first byte goes out, so an error
    /// from here without an I/O cause means nothing was written.
    pub fn encode<W: Write>(&self, volume: &ScalarVolume, label: &str, mut writer: W) -> Result<()> {
        let header = self.header(volume, label)?;
        let byte_length = payload_byte_length(volume)?;

        writer.write_all(header.as_bytes())?;
        writer.write_all(&byte_length.to_le_bytes())?;
        for value in volume.values() {
            writer.write_all(&value.to_le_bytes())?;
        }
        writer.write_all(FOOTER.as_bytes())?;
        writer.flush()?;

        trace!("Encoded {} payload bytes for \"{label}\"", byte_length);
        Ok(())
    }

    /// Write a volume to `path`, creating or overwriting the file
    pub fn write<P: AsRef<Path>>(&self, volume: &ScalarVolume, label: &str, path: P) -> Result<()> {
        let path = path.as_ref();
        debug!("Writing {} volume to {}", volume.extents(), path.display());

        match self.atomic {
            true => self.write_atomic(volume, label, path),
            false => self.encode(volume, label, init_writer(path)?),
        }
    }
}

impl VolumeToVti {
    /// Write to a sibling temporary file and move it into place
    fn write_atomic(&self, volume: &ScalarVolume, label: &str, path: &Path) -> Result<()> {
        let partial = partial_path(path)?;

        let result = init_writer(&partial)
            .and_then(|writer| self.encode(volume, label, writer))
            .and_then(|_| fs::rename(&partial, path).map_err(Error::from));

        if result.is_err() && partial.exists() {
            if let Err(e) = fs::remove_file(&partial) {
                warn!("Unable to remove {}: {e}", partial.display());
            }
        }

        result
    }
}

/// Size prefix value for the payload, checked against the i32 range
fn payload_byte_length(volume: &ScalarVolume) -> Result<i32> {
    volume
        .len()
        .checked_mul(std::mem::size_of::<f32>())
        .and_then(|n| i32::try_from(n).ok())
        .ok_or(Error::PayloadTooLarge(volume.len()))
}

/// Temporary path alongside the target, e.g. `rho.vti.part`
fn partial_path(path: &Path) -> Result<PathBuf> {
    let Some(name) = path.file_name() else {
        return Err(Error::IOError(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            f!("no file name in {}", path.display()),
        )));
    };

    let mut name = OsString::from(name);
    name.push(".part");
    Ok(path.with_file_name(name))
}

/// Initialise a writer from anything that can be turned into a path
fn init_writer<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>> {
    let file = File::create(path)?;
    Ok(BufWriter::new(file))
}
