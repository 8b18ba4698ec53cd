//! Read operations for .pxr field dumps
//!
//! The file is binary: a fixed 60 byte header followed by every cell value as
//! a little-endian `f64`. See [PxrField] for the layout.

// standard library
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

// pxtools modules
use pxtools_volume::{Extents, ScalarVolume};

// crate modules
use crate::error::{Error, Result};
use crate::field::{Header, PxrField};

// external crates
use bincode::deserialize;
use log::{debug, trace};

/// Deserialise a binary .pxr file
///
/// Returns a Result containing a [PxrField] with the grid header and the
/// volume of cell values extracted from the file at `path`.
///
/// ```rust, no_run
/// # use pxtools_pxr::read_pxr_file;
/// let field = read_pxr_file("./RESULTS/rho.pxr").unwrap();
///
/// // Print a summary of the data
/// println!("{field}");
/// ```
pub fn read_pxr_file<P: AsRef<Path>>(path: P) -> Result<PxrField> {
    let path = path.as_ref();
    debug!("Reading {}", path.display());

    let mut reader = init_reader(path)?;

    let header = parse_header(&mut reader)?;
    let volume = parse_field_data(&mut reader, &header)?;

    Ok(PxrField { header, volume })
}

/// Marker for the .pxr format
///
/// Stateless; a unit struct so that batch tools can hold it behind a common
/// decoder interface alongside other formats. Reading goes through
/// [read_pxr_file()].
#[derive(Debug, Default, Clone, Copy)]
pub struct PxrDecoder;

/// Initialise a reader from anything that can be turned into a path
fn init_reader(path: impl AsRef<Path>) -> Result<BufReader<File>> {
    let file = File::open(path)?;
    Ok(BufReader::new(file))
}

/// Deserialise the grid header
fn parse_header<R: Read>(reader: &mut R) -> Result<Header> {
    let mut buffer = [0u8; Header::BYTE_LENGTH];
    reader.read_exact(&mut buffer)?;

    let header: Header = deserialize(&buffer)?;
    trace!("{header:?}");

    // reject nonsense before trying to allocate anything
    header.extents()?;
    Ok(header)
}

/// Deserialise the cell values into a row-major volume
fn parse_field_data<R: Read>(reader: &mut R, header: &Header) -> Result<ScalarVolume> {
    let expected = header.field_byte_length()?;

    // grow with what is actually on disk, the header is not trusted for sizing
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    if bytes.len() != expected {
        return Err(Error::UnexpectedByteLength {
            expected,
            found: bytes.len(),
        });
    }

    let extents = header.extents()?;
    reorder(&bytes, extents)
}

/// Narrow to f32 and move from `ix` fastest to `ix` slowest
fn reorder(bytes: &[u8], extents: Extents) -> Result<ScalarVolume> {
    const WIDTH: usize = std::mem::size_of::<f64>();
    let Extents { nx, ny, .. } = extents;

    ScalarVolume::from_fn(extents.nx, extents.ny, extents.nz, |ix, iy, iz| {
        let start = (ix + nx * (iy + ny * iz)) * WIDTH;
        let mut value = [0u8; WIDTH];
        value.copy_from_slice(&bytes[start..start + WIDTH]);
        f64::from_le_bytes(value) as f32
    })
    .map_err(Error::from)
}
