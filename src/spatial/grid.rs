//! Fixed-size symbol grid with row-major storage
//!
//! The grid is the unit of data flowing through the synthesis pipeline.
//! Copies are deep: cloning a grid never aliases the original, which is what
//! lets every pipeline stage read one buffer while writing another.

use ndarray::Array2;

use crate::io::error::{AlgorithmError, Result};

/// Two-dimensional array of symbol ids
///
/// Storage is an `Array2` of shape `(height, width)` in standard layout, so
/// iteration order is row-major: `x` varies fastest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<i32>,
}

impl Grid {
    /// Create a grid filled with `default`
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if either dimension is zero
    pub fn new(width: usize, height: usize, default: i32) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            cells: Array2::from_elem((height, width), default),
        })
    }

    /// Create a grid from row-major cell data
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if either dimension is zero, or
    /// `InvalidDocument` if `cells` does not hold exactly `width * height` values
    pub fn from_cells(width: usize, height: usize, cells: Vec<i32>) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = width
            .checked_mul(height)
            .ok_or_else(|| AlgorithmError::InvalidDocument {
                reason: format!("a {width}x{height} grid has more cells than fit in memory"),
            })?;
        if cells.len() != expected {
            return Err(AlgorithmError::InvalidDocument {
                reason: format!(
                    "cell data holds {} values, expected {expected} for a {width}x{height} grid",
                    cells.len()
                ),
            });
        }

        let cells = Array2::from_shape_vec((height, width), cells).map_err(|e| {
            AlgorithmError::InvalidDocument {
                reason: e.to_string(),
            }
        })?;
        Ok(Self { cells })
    }

    /// Create a grid from rows of cell values, `rows[y][x]`
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if there are no rows or `N` is zero
    pub fn from_rows<const N: usize>(rows: &[[i32; N]]) -> Result<Self> {
        let cells = rows.iter().flatten().copied().collect();
        Self::from_cells(N, rows.len(), cells)
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; a grid has at least one cell
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read the cell at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Option<i32> {
        self.cells.get([y, x]).copied()
    }

    /// Mutable access to the cell at column `x`, row `y`
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut i32> {
        self.cells.get_mut([y, x])
    }

    /// Write the cell at column `x`, row `y`
    ///
    /// # Errors
    ///
    /// Returns `CellOutOfBounds` if the position lies outside the grid
    pub fn set(&mut self, x: usize, y: usize, value: i32) -> Result<()> {
        let (width, height) = (self.width(), self.height());
        let cell = self
            .cells
            .get_mut([y, x])
            .ok_or(AlgorithmError::CellOutOfBounds {
                x,
                y,
                width,
                height,
            })?;
        *cell = value;
        Ok(())
    }

    /// Check whether a signed position lies inside the grid
    pub fn in_bounds(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height()
    }

    /// Replace the storage with a `new_width` x `new_height` grid of `default`
    ///
    /// Existing content is discarded.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if either dimension is zero; the grid is
    /// left untouched in that case
    pub fn resize(&mut self, new_width: usize, new_height: usize, default: i32) -> Result<()> {
        check_dimensions(new_width, new_height)?;
        self.cells = Array2::from_elem((new_height, new_width), default);
        Ok(())
    }

    /// Fill every cell with `value`
    pub fn clear(&mut self, value: i32) {
        self.cells.fill(value);
    }

    /// Iterate cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.cells.iter().copied()
    }

    /// Copy cells out in row-major order
    pub fn to_vec(&self) -> Vec<i32> {
        self.iter().collect()
    }

    /// Check whether every cell holds `value`
    pub fn all(&self, value: i32) -> bool {
        self.cells.iter().all(|&cell| cell == value)
    }

    /// Borrow the underlying array, indexed `[row, col]`
    pub const fn as_array(&self) -> &Array2<i32> {
        &self.cells
    }
}

const fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(AlgorithmError::InvalidDimensions { width, height });
    }
    Ok(())
}
