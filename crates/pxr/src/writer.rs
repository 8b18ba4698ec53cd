//! Write operations for .pxr field dumps
//!
//! Mostly useful for producing test inputs and for round tripping edited
//! fields back to the simulation's own format.

// standard library
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::field::PxrField;

// external crates
use bincode::serialize;

/// Write a [PxrField] to a binary .pxr file
///
/// Cell counts in the written header are always taken from the volume, so
/// the file is consistent even if the header extents were edited. Values are
/// widened back to `f64` in the file's `ix` fastest order.
///
/// ```rust, no_run
/// # use pxtools_pxr::{read_pxr_file, write_pxr_file};
/// let field = read_pxr_file("./RESULTS/ex.pxr").unwrap();
/// write_pxr_file(&field, "./ex_copy.pxr").unwrap();
/// ```
pub fn write_pxr_file<P: AsRef<Path>>(field: &PxrField, path: P) -> Result<()> {
    let mut writer = init_writer(path)?;

    let extents = field.volume.extents();
    let mut header = field.header;
    header.x.n = to_header_extent(extents.nx)?;
    header.y.n = to_header_extent(extents.ny)?;
    header.z.n = to_header_extent(extents.nz)?;

    writer.write_all(&serialize(&header)?)?;

    for iz in 0..extents.nz {
        for iy in 0..extents.ny {
            for ix in 0..extents.nx {
                // all indices are within the volume's own extents
                let value = field.volume.get(ix, iy, iz).unwrap_or_default() as f64;
                writer.write_all(&value.to_le_bytes())?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

fn to_header_extent(n: usize) -> Result<i32> {
    i32::try_from(n).map_err(|_| Error::ExtentTooLarge(n))
}

/// Initialise a writer from anything that can be turned into a path
fn init_writer<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>> {
    let file = File::create(path)?;
    Ok(BufWriter::new(file))
}
