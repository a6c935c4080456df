// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam carving: narrow an image one column at a time by removing the
//! connected top-to-bottom path of pixels that carries the least
//! energy.
//!
//! One pass is four stages, each feeding the next:
//!
//! 1. `energy::calculate_energy`: Raster -> EnergyMap
//! 2. `costtable::build_cost_table`: EnergyMap -> CostTable
//! 3. `seamfinder::recover_vertical_seam`: CostTable -> Seam
//! 4. `seamcarver::remove_vertical_seam`: Raster + Seam -> Raster
//!
//! `SeamCarver` runs that as many times as asked.

// A ternary.  Rust's ifs are already expressions, but `cargo fmt`
// breaks them up line-by-line, and the edge rules of both the energy
// field and the seam search read better on one line each.
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}

pub mod costtable;
pub mod energy;
pub mod error;
pub mod persist;
pub mod pixelpairs;
pub mod raster;
pub mod seamcarver;
pub mod seamfinder;
pub mod twodmap;

pub use costtable::{build_cost_table, CostTable};
pub use energy::{calculate_energy, EnergyMap};
pub use error::{CarveError, Result};
pub use raster::Raster;
pub use seamcarver::{carve_once, remove_vertical_seam, seamcarve, CarveConfig, SeamCarver};
pub use seamfinder::{find_vertical_seam, recover_vertical_seam, DualGradient, Seam, SeamFinder};
pub use twodmap::TwoDimensionalMap;
