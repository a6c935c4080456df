// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The one two-dimensional container.
//!
//! Pixels, energies and seam costs all live in a `TwoDimensionalMap`.
//! Every address goes through `get_index`, which refuses anything
//! outside the map instead of quietly landing in the next row.

use crate::error::{CarveError, Result};
use std::ops::{Index, IndexMut};

/// An addressable, row-major field of `P`, addressed as `(x, y)`.
/// Never empty: both dimensions are at least one.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Default + Copy> {
    width: u32,
    height: u32,
    data: Vec<P>,
}

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// Allocate a map filled with `P::default()`.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let cells = cell_count(width, height)?;
        let mut data = Vec::new();
        data.try_reserve_exact(cells)
            .map_err(|_| CarveError::AllocationFailed { width, height })?;
        data.resize(cells, P::default());
        Ok(TwoDimensionalMap {
            width,
            height,
            data,
        })
    }

    /// Wrap an existing row-major buffer.
    pub fn from_vec(width: u32, height: u32, data: Vec<P>) -> Result<Self> {
        let cells = cell_count(width, height)?;
        if data.len() != cells {
            return Err(CarveError::BufferSize {
                expected: cells,
                got: data.len(),
            });
        }
        Ok(TwoDimensionalMap {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.
    fn get_index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    fn out_of_range(&self, x: u32, y: u32) -> CarveError {
        CarveError::IndexOutOfRange {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    /// Get the value at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> Result<P> {
        self.get_index(x, y)
            .map(|index| self.data[index])
            .ok_or_else(|| self.out_of_range(x, y))
    }

    /// Set the value at `(x, y)`.
    pub fn put(&mut self, x: u32, y: u32, value: P) -> Result<()> {
        let index = self
            .get_index(x, y)
            .ok_or_else(|| self.out_of_range(x, y))?;
        self.data[index] = value;
        Ok(())
    }

    /// One full row, left to right.
    pub fn row(&self, y: u32) -> Option<&[P]> {
        let start = self.get_index(0, y)?;
        self.data.get(start..start + self.width as usize)
    }

    /// The whole backing buffer, row-major.
    pub fn as_slice(&self) -> &[P] {
        &self.data
    }
}

fn cell_count(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(CarveError::InvalidDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(CarveError::AllocationFailed { width, height })
}

// The pipeline stages address cells they have already proven to be
// inside the map; a miss here is a bug, so it panics like a slice would.

impl<P: Default + Copy> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    fn index(&self, (x, y): (u32, u32)) -> &P {
        match self.get_index(x, y) {
            Some(index) => &self.data[index],
            None => panic!(
                "({}, {}) is outside a {}x{} map",
                x, y, self.width, self.height
            ),
        }
    }
}

impl<P: Default + Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        match self.get_index(x, y) {
            Some(index) => &mut self.data[index],
            None => panic!(
                "({}, {}) is outside a {}x{} map",
                x, y, self.width, self.height
            ),
        }
    }
}
