//! Read back image data files written by this crate
//!
//! This is not a general VTK parser. It understands exactly the layout the
//! writer produces: one Float32 cell data array in a raw appended block with
//! a 32-bit size prefix. Handy for checking outputs without a viewer.

// standard library
use std::borrow::Cow;
use std::fs;
use std::path::Path;

// pxtools modules
use pxtools_format::f;
use pxtools_volume::{Extents, ScalarVolume};

// crate modules
use crate::error::{Error, Result};
use crate::header::{unescape_attribute, ExtentMode, APPENDED_OPENER, FOOTER};

/// Contents of a single-array image data file
#[derive(Debug, Clone, PartialEq)]
pub struct VtiImage {
    /// The six `WholeExtent` values as written
    pub whole_extent: [usize; 6],
    /// `Name` of the cell data array exactly as it appears in the header
    pub label: String,
    /// Payload values in file order
    pub values: Vec<f32>,
}

impl VtiImage {
    /// Grid extents implied by the header under the given convention
    ///
    /// Corrected extents write both an empty axis and a single cell axis as
    /// `0 0`. Such an axis is read as one cell, or as zero cells when the
    /// payload is empty. A volume mixing empty and single cell axes therefore
    /// comes back with every one of those axes empty.
    pub fn extents(&self, mode: ExtentMode) -> Result<Extents> {
        let [_, x, _, y, _, z] = self.whole_extent;
        match mode {
            ExtentMode::Legacy => Ok(Extents::new(x, y, z)),
            ExtentMode::Corrected => {
                let cells = |upper: usize| match upper {
                    0 if self.values.is_empty() => Ok(0),
                    _ => upper
                        .checked_add(1)
                        .ok_or_else(|| malformed(&f!("extent upper bound {upper} overflows"))),
                };
                Ok(Extents::new(cells(x)?, cells(y)?, cells(z)?))
            }
        }
    }

    /// Label with the predefined XML entities replaced
    ///
    /// Only meaningful for files written with
    /// [escape_labels](crate::VolumeToVti::escape_labels) set. Legacy files
    /// hold the label verbatim, so use [label](VtiImage::label) for those.
    pub fn unescaped_label(&self) -> Cow<'_, str> {
        unescape_attribute(&self.label)
    }

    /// Rebuild the volume, checking the payload against the header extents
    pub fn into_volume(self, mode: ExtentMode) -> Result<ScalarVolume> {
        let extents = self.extents(mode)?;
        Ok(ScalarVolume::new(extents, self.values)?)
    }
}

/// Read a vti file written by [VolumeToVti](crate::VolumeToVti)
///
/// ```rust, no_run
/// # use pxtools_vti::{read_vti, ExtentMode};
/// let image = read_vti("./vti_data/rho.vti").unwrap();
/// let volume = image.into_volume(ExtentMode::Legacy).unwrap();
/// println!("{volume}");
/// ```
pub fn read_vti<P: AsRef<Path>>(path: P) -> Result<VtiImage> {
    let bytes = fs::read(path)?;
    parse_vti(&bytes)
}

/// Parse the bytes of a complete vti file
pub fn parse_vti(bytes: &[u8]) -> Result<VtiImage> {
    let marker = find(bytes, APPENDED_OPENER.as_bytes())
        .ok_or_else(|| malformed("missing raw appended data marker"))?;

    let header_end = marker + APPENDED_OPENER.len();
    let header = std::str::from_utf8(&bytes[..header_end])
        .map_err(|_| malformed("header is not valid UTF-8"))?;

    let whole_extent = parse_extent(attribute(header, "WholeExtent")?)?;
    let piece_extent = parse_extent(attribute(header, "Extent")?)?;
    if whole_extent != piece_extent {
        return Err(malformed("piece extent differs from whole extent"));
    }

    let label = attribute(header, "Name")?.to_string();
    let values = parse_payload(&bytes[header_end..])?;

    Ok(VtiImage {
        whole_extent,
        label,
        values,
    })
}

/// Size prefix, values, and the footer that must follow them
fn parse_payload(bytes: &[u8]) -> Result<Vec<f32>> {
    let prefix: [u8; 4] = bytes
        .get(..4)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| malformed("missing payload size prefix"))?;

    let byte_length = usize::try_from(i32::from_le_bytes(prefix))
        .map_err(|_| malformed("negative payload size prefix"))?;

    if byte_length % std::mem::size_of::<f32>() != 0 {
        return Err(malformed("payload size is not a whole number of floats"));
    }

    let body = &bytes[4..];
    let expected = byte_length + FOOTER.len();
    if body.len() != expected {
        return Err(Error::UnexpectedByteLength {
            expected,
            found: body.len(),
        });
    }

    let (payload, footer) = body.split_at(byte_length);
    if footer != FOOTER.as_bytes() {
        return Err(malformed("unexpected footer after payload"));
    }

    Ok(payload
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// Value of the first ` key="..."` attribute in the header
fn attribute<'a>(header: &'a str, key: &str) -> Result<&'a str> {
    let pattern = f!(" {key}=\"");
    let start = header
        .find(&pattern)
        .map(|i| i + pattern.len())
        .ok_or_else(|| malformed(&f!("missing {key} attribute")))?;

    let len = header[start..]
        .find('"')
        .ok_or_else(|| malformed(&f!("unterminated {key} attribute")))?;

    Ok(&header[start..start + len])
}

/// Six whitespace separated non-negative integers
fn parse_extent(s: &str) -> Result<[usize; 6]> {
    let values = s
        .split_whitespace()
        .map(|v| v.parse::<usize>())
        .collect::<std::result::Result<Vec<usize>, _>>()
        .map_err(|_| malformed(&f!("invalid extent \"{s}\"")))?;

    values
        .try_into()
        .map_err(|_| malformed(&f!("expected six extent values in \"{s}\"")))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn malformed(reason: &str) -> Error {
    Error::MalformedFile(reason.to_string())
}
