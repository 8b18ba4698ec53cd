// pxtools modules
use pxtools_format::{f, NumFormat};
use pxtools_volume::{Extents, ScalarVolume};

// crate modules
use crate::error::{Error, Result};

// external crates
use serde::{Deserialize, Serialize};

/// File extension of field dumps, without the dot
pub const PXR_EXTENSION: &str = "pxr";

/// Representation of data in a .pxr field dump
///
/// The byte layout is very simple. The nine values in the first block are
/// stored as a [Header], three per axis.
///
/// ```text
/// <xmin> <xmax> <nx> <ymin> <ymax> <ny> <zmin> <zmax> <nz>
/// ```
///
/// Bounds are `f64` and the cell counts are `i32`. The second block is every
/// cell value as `f64`, with `ix` varying fastest:
///
/// ```text
/// (0,0,0) (1,0,0) ... (nx-1,0,0) (0,1,0) ... (nx-1,ny-1,0) (0,0,1) ...
/// ```
///
/// The volume holds those values narrowed to `f32` and reordered with `ix`
/// slowest, ready for writing.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PxrField {
    /// The grid description from the first block
    pub header: Header,
    /// Cell values from the second block
    pub volume: ScalarVolume,
}

impl std::fmt::Display for PxrField {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = "PxrField {\n".to_string();
        s += &f!("    x: {}\n", self.header.x);
        s += &f!("    y: {}\n", self.header.y);
        s += &f!("    z: {}\n", self.header.z);
        s += &match self.volume.finite_range() {
            Some((lo, hi)) => f!("    range: [{}, {}]\n}}", lo.sci(5, 2), hi.sci(5, 2)),
            None => "    range: none\n}".to_string(),
        };

        write!(f, "{}", s)
    }
}

/// Bounds and cell count along one axis
#[derive(Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq)]
pub struct Axis {
    /// Lower domain bound
    pub min: f64,
    /// Upper domain bound
    pub max: f64,
    /// Number of cells
    pub n: i32,
}

impl Axis {
    /// New axis from bounds and cell count
    pub fn new(min: f64, max: f64, n: i32) -> Self {
        Self { min, max, n }
    }

    /// Cell width, zero for an axis without cells
    pub fn spacing(&self) -> f64 {
        match self.n {
            n if n > 0 => (self.max - self.min) / n as f64,
            _ => 0.0,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} cells over [{}, {}]",
            self.n,
            self.min.sci(5, 2),
            self.max.sci(5, 2)
        )
    }
}

/// Grid description in the first .pxr data block
///
/// Serialised by bincode as the nine values in order, 60 bytes in total.
#[derive(Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq)]
pub struct Header {
    /// Bounds and cells in x
    pub x: Axis,
    /// Bounds and cells in y
    pub y: Axis,
    /// Bounds and cells in z
    pub z: Axis,
}

impl Header {
    /// Size of the header block in bytes
    pub const BYTE_LENGTH: usize = 3 * (2 * std::mem::size_of::<f64>() + std::mem::size_of::<i32>());

    /// Validated cell counts for each axis
    pub fn extents(&self) -> Result<Extents> {
        Ok(Extents::new(
            non_negative('x', self.x.n)?,
            non_negative('y', self.y.n)?,
            non_negative('z', self.z.n)?,
        ))
    }

    /// Cell widths for each axis
    pub fn spacing(&self) -> [f64; 3] {
        [self.x.spacing(), self.y.spacing(), self.z.spacing()]
    }

    /// Expected size of the value block based on the header dimensions
    pub fn field_byte_length(&self) -> Result<usize> {
        let extents = self.extents()?;
        extents
            .checked_number_of_cells()
            .and_then(|n| n.checked_mul(std::mem::size_of::<f64>()))
            .ok_or_else(|| pxtools_volume::Error::ExtentOverflow(extents.to_string()).into())
    }
}

fn non_negative(axis: char, value: i32) -> Result<usize> {
    usize::try_from(value).map_err(|_| Error::NegativeExtent { axis, value })
}
