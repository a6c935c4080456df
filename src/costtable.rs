// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The seam cost table
//!
//! Every cell holds the cheapest total energy of any top-to-bottom path
//! that ends there, where a path moves at most one column left or right
//! per row.
//!
//! ```text
//!           ⎧ M(x−1,y−1)
//! M(x,y)=min⎨ M(x,y−1)    + e(x,y)
//!           ⎩ M(x+1,y−1)
//! ```
//!
//! Unlike the energy field, nothing wraps here.  Candidates past the
//! left or right edge simply do not exist.

use crate::energy::EnergyMap;
use crate::error::Result;
use crate::twodmap::TwoDimensionalMap;
use tracing::debug;

/// Cumulative minimal path costs, same shape as the energy map.
pub type CostTable = TwoDimensionalMap<f64>;

/// Of the cells in row `y` at columns `x`, `x - 1` and `x + 1`, the
/// column with the smallest cost.  Only a strictly smaller cost
/// displaces the current choice, so ties go straight up first, then
/// left, then right.
///
/// Building the table and walking it back both come through here; the
/// walk can only retrace the table if the two agree on ties.
pub(crate) fn cheapest_parent(table: &CostTable, x: u32, y: u32) -> u32 {
    let maxwidth = table.width() - 1;
    let mut best = x;
    if x > 0 && table[(x - 1, y)] < table[(best, y)] {
        best = x - 1;
    }
    if x < maxwidth && table[(x + 1, y)] < table[(best, y)] {
        best = x + 1;
    }
    best
}

/// Energy Map -> Cost Table
pub fn build_cost_table(energy: &EnergyMap) -> Result<CostTable> {
    let (width, height) = (energy.width(), energy.height());
    let mut table = CostTable::new(width, height)?;

    // The first row costs exactly its own energy.
    for x in 0..width {
        table[(x, 0)] = f64::from(energy[(x, 0)]);
    }

    // Each row needs only the finished row above it.
    for y in 1..height {
        for x in 0..width {
            let parent = table[(cheapest_parent(&table, x, y - 1), y - 1)];
            table[(x, y)] = f64::from(energy[(x, y)]) + parent;
        }
    }
    debug!(width, height, "built seam cost table");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENERGY_DATA: [u8; 20] = [9, 9, 0, 9, 9, 9, 1, 9, 8, 9, 9, 9, 9, 9, 0, 9, 9, 9, 0, 9];
    const COST_DATA: [f64; 20] = [
        9.0, 9.0, 0.0, 9.0, 9.0, 18.0, 1.0, 9.0, 8.0, 18.0, 10.0, 10.0, 10.0, 17.0, 8.0, 19.0,
        19.0, 19.0, 8.0, 17.0,
    ];

    #[test]
    fn energy_grid_to_cost_table() {
        let energy = EnergyMap::from_vec(5, 4, ENERGY_DATA.to_vec()).unwrap();
        let table = build_cost_table(&energy).unwrap();
        assert_eq!(table.as_slice(), &COST_DATA[..]);
    }

    #[test]
    fn first_row_is_copied_verbatim() {
        let energy = EnergyMap::from_vec(4, 1, vec![3, 1, 4, 1]).unwrap();
        let table = build_cost_table(&energy).unwrap();
        assert_eq!(table.as_slice(), &[3.0, 1.0, 4.0, 1.0]);
    }

    // The cheap cell sits at the far right of row 0.  Column 0 of row 1
    // cannot reach it by wrapping around the left edge.
    #[test]
    fn edges_do_not_wrap() {
        let energy = EnergyMap::from_vec(3, 2, vec![50, 50, 0, 1, 1, 1]).unwrap();
        let table = build_cost_table(&energy).unwrap();
        assert_eq!(table.row(1).unwrap(), &[51.0, 1.0, 1.0]);
    }

    #[test]
    fn ties_prefer_up_then_left() {
        let table = CostTable::from_vec(3, 1, vec![2.0, 2.0, 2.0]).unwrap();
        assert_eq!(cheapest_parent(&table, 1, 0), 1);
        let table = CostTable::from_vec(3, 1, vec![1.0, 2.0, 1.0]).unwrap();
        assert_eq!(cheapest_parent(&table, 1, 0), 0);
        let table = CostTable::from_vec(3, 1, vec![3.0, 2.0, 1.0]).unwrap();
        assert_eq!(cheapest_parent(&table, 1, 0), 2);
    }

    #[test]
    fn single_column_only_looks_up() {
        let energy = EnergyMap::from_vec(1, 3, vec![4, 5, 6]).unwrap();
        let table = build_cost_table(&energy).unwrap();
        assert_eq!(table.as_slice(), &[4.0, 9.0, 15.0]);
    }
}
