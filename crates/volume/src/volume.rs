// pxtools modules
use pxtools_format::{f, NumFormat};

// crate modules
use crate::error::{Error, Result};

/// Number of cells along each grid axis
///
/// Extents are plain cell counts, so any of them may be zero. A volume with a
/// zero extent simply holds no values.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extents {
    /// Number of cells in x
    pub nx: usize,
    /// Number of cells in y
    pub ny: usize,
    /// Number of cells in z
    pub nz: usize,
}

impl Extents {
    /// Extents from the three axis cell counts
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self { nx, ny, nz }
    }

    /// Total number of cells, `None` on overflow
    pub fn checked_number_of_cells(&self) -> Option<usize> {
        self.nx.checked_mul(self.ny)?.checked_mul(self.nz)
    }

    /// Total number of cells, or [Error::ExtentOverflow]
    pub fn number_of_cells(&self) -> Result<usize> {
        self.checked_number_of_cells()
            .ok_or_else(|| Error::ExtentOverflow(self.to_string()))
    }

    /// Flat index of a cell in row-major order, `ix` slowest
    pub fn flat_index(&self, ix: usize, iy: usize, iz: usize) -> Option<usize> {
        if ix >= self.nx || iy >= self.ny || iz >= self.nz {
            return None;
        }
        Some((ix * self.ny + iy) * self.nz + iz)
    }
}

impl std::fmt::Display for Extents {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.nx, self.ny, self.nz)
    }
}

/// A dense 3D array of single precision cell values
///
/// The volume is immutable once built. Values are held in one contiguous
/// vector addressed by `(ix, iy, iz)` with `ix` the slowest varying index:
///
/// ```text
/// (0,0,0) (0,0,1) ... (0,0,nz-1) (0,1,0) ... (0,ny-1,nz-1) (1,0,0) ...
/// ```
///
/// Construction checks that the number of values matches the extents, so
/// every [ScalarVolume] is internally consistent.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScalarVolume {
    extents: Extents,
    values: Vec<f32>,
}

impl ScalarVolume {
    /// Build a volume from extents and values already in row-major order
    ///
    /// ```rust
    /// # use pxtools_volume::{Extents, ScalarVolume};
    /// let volume = ScalarVolume::new(Extents::new(2, 3, 1), vec![0.0; 6]).unwrap();
    /// assert_eq!(volume.len(), 6);
    ///
    /// // wrong number of values
    /// assert!(ScalarVolume::new(Extents::new(2, 3, 1), vec![0.0; 5]).is_err());
    /// ```
    pub fn new(extents: Extents, values: Vec<f32>) -> Result<Self> {
        let expected = extents.number_of_cells()?;

        if values.len() != expected {
            return Err(Error::ShapeMismatch {
                extents: extents.to_string(),
                expected,
                found: values.len(),
            });
        }

        Ok(Self { extents, values })
    }

    /// Build a volume by evaluating `value(ix, iy, iz)` for every cell
    ///
    /// Cells are visited in storage order. Fails with [Error::ExtentOverflow]
    /// before evaluating anything if the cell count does not fit a `usize`.
    pub fn from_fn<F>(nx: usize, ny: usize, nz: usize, mut value: F) -> Result<Self>
    where
        F: FnMut(usize, usize, usize) -> f32,
    {
        let extents = Extents::new(nx, ny, nz);
        let mut values = Vec::with_capacity(extents.number_of_cells()?);
        for ix in 0..nx {
            for iy in 0..ny {
                for iz in 0..nz {
                    values.push(value(ix, iy, iz));
                }
            }
        }

        Ok(Self { extents, values })
    }

    /// Grid extents of the volume
    pub fn extents(&self) -> Extents {
        self.extents
    }

    /// Number of cell values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True for volumes with any zero extent
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of a single cell, `None` if out of bounds
    pub fn get(&self, ix: usize, iy: usize, iz: usize) -> Option<f32> {
        self.extents
            .flat_index(ix, iy, iz)
            .map(|idx| self.values[idx])
    }

    /// All values in storage order, `iz` fastest
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Take ownership of the underlying values
    pub fn into_values(self) -> Vec<f32> {
        self.values
    }

    /// Minimum and maximum of the finite values, if any
    pub fn finite_range(&self) -> Option<(f32, f32)> {
        self.values
            .iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

impl std::fmt::Display for ScalarVolume {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = "ScalarVolume {\n".to_string();
        s += &f!("    extents: {}\n", self.extents);
        s += &f!("    cells: {}\n", self.len());
        s += &match self.finite_range() {
            Some((lo, hi)) => f!("    range: [{}, {}]\n}}", lo.sci(5, 2), hi.sci(5, 2)),
            None => "    range: none\n}".to_string(),
        };

        write!(f, "{}", s)
    }
}
