// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Recovering a seam from the cost table.

use crate::costtable::{build_cost_table, cheapest_parent, CostTable};
use crate::energy::calculate_energy;
use crate::error::Result;
use crate::raster::Raster;

/// One column index per row, top to bottom.  Consecutive entries never
/// differ by more than one.
pub type Seam = Vec<u32>;

/// This trait defines how we will return seams from an image.  It's a
/// primitive interface, just enough to make room for other energy
/// functions as well as caching.
pub trait SeamFinder {
    /// Once a SeamFinder has an image (or whatever it needs to make a
    /// rational decision), request the cheapest vertical seam.
    fn find_vertical_seam(&self) -> Result<Seam>;
}

/// The leftmost column holding the smallest cost on the bottom row.
pub fn cheapest_bottom_column(table: &CostTable) -> u32 {
    let bottom = table.height() - 1;
    (1..table.width()).fold(0, |best, x| {
        cq!(table[(x, bottom)] < table[(best, bottom)], x, best)
    })
}

/// Given a cost table, return the list of x-coordinates that, when
/// mapped with the range (0..height), give the XY coordinates for each
/// pixel in the seam to be removed.
pub fn recover_vertical_seam(table: &CostTable) -> Seam {
    let height = table.height();
    let bottom = height - 1;

    let mut seam_col = cheapest_bottom_column(table);
    // Working backwards, choose each row's column from the three above
    // the last choice, then reverse.
    (0..height)
        .rev()
        .fold(Vec::with_capacity(height as usize), |mut acc, y| {
            if y != bottom {
                seam_col = cheapest_parent(table, seam_col, y);
            }
            acc.push(seam_col);
            acc
        })
        .into_iter()
        .rev()
        .collect()
}

/// Image -> Energy -> Cost Table -> Seam
pub fn find_vertical_seam(image: &Raster) -> Result<Seam> {
    let energy = calculate_energy(image)?;
    let table = build_cost_table(&energy)?;
    Ok(recover_vertical_seam(&table))
}

/// The dual-gradient seam engine: just a simple image reference holder.
pub struct DualGradient<'a> {
    image: &'a Raster,
}

impl<'a> DualGradient<'a> {
    /// Takes a reference to an image, and holds onto it.
    pub fn new(image: &'a Raster) -> Self {
        DualGradient { image }
    }
}

impl<'a> SeamFinder for DualGradient<'a> {
    fn find_vertical_seam(&self) -> Result<Seam> {
        find_vertical_seam(self.image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::EnergyMap;

    const ENERGY_DATA: [u8; 20] = [9, 9, 0, 9, 9, 9, 1, 9, 8, 9, 9, 9, 9, 9, 0, 9, 9, 9, 0, 9];

    fn assert_connected(seam: &[u32]) {
        for pair in seam.windows(2) {
            let step = cq!(pair[0] > pair[1], pair[0] - pair[1], pair[1] - pair[0]);
            assert!(step <= 1, "seam jumps {:?}", pair);
        }
    }

    #[test]
    fn energy_grid_to_vertical_seam() {
        let energy = EnergyMap::from_vec(5, 4, ENERGY_DATA.to_vec()).unwrap();
        let table = build_cost_table(&energy).unwrap();
        assert_eq!(recover_vertical_seam(&table), [2, 3, 4, 3]);
    }

    #[test]
    fn bottom_choice_is_the_true_minimum() {
        let energy = EnergyMap::from_vec(5, 4, ENERGY_DATA.to_vec()).unwrap();
        let table = build_cost_table(&energy).unwrap();
        let bottom = table.row(3).unwrap();
        let brute = bottom.iter().cloned().fold(f64::INFINITY, f64::min);
        assert_eq!(table[(cheapest_bottom_column(&table), 3)], brute);
    }

    #[test]
    fn bottom_ties_go_left() {
        let table = CostTable::from_vec(4, 1, vec![5.0, 2.0, 2.0, 2.0]).unwrap();
        assert_eq!(cheapest_bottom_column(&table), 1);
        assert_eq!(recover_vertical_seam(&table), [1]);
    }

    // Up and up-left tie at 1.0 above the chosen bottom cell; up wins.
    #[test]
    fn backtrack_prefers_straight_up_over_left() {
        let table = CostTable::from_vec(3, 2, vec![1.0, 1.0, 5.0, 9.0, 2.0, 9.0]).unwrap();
        assert_eq!(recover_vertical_seam(&table), [1, 1]);
    }

    #[test]
    fn backtrack_prefers_left_over_right() {
        let table = CostTable::from_vec(3, 2, vec![1.0, 4.0, 1.0, 9.0, 2.0, 9.0]).unwrap();
        assert_eq!(recover_vertical_seam(&table), [0, 1]);
    }

    #[test]
    fn flat_images_still_give_a_full_seam() {
        let raster = Raster::from_raw(6, 4, &[128; 6 * 4 * 3]).unwrap();
        let seam = DualGradient::new(&raster).find_vertical_seam().unwrap();
        assert_eq!(seam.len(), 6);
        assert!(seam.iter().all(|&x| x < 4));
        assert_connected(&seam);
    }

    #[test]
    fn seams_stay_connected_on_busy_images() {
        let samples: Vec<u8> = (0..9 * 7 * 3).map(|i| ((i * 37) ^ (i / 5)) as u8).collect();
        let raster = Raster::from_raw(9, 7, &samples).unwrap();
        let seam = find_vertical_seam(&raster).unwrap();
        assert_eq!(seam.len(), 9);
        assert_connected(&seam);
    }
}
