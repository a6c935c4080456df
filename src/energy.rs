// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! The energy of a pixel is the dual gradient: the color difference
//! between its left and right neighbors plus the difference between
//! its upper and lower neighbors, square-rooted and scaled down by ten
//! so it fits in a byte.
//!
//! Neighbors wrap around the image like a torus.  The left neighbor of
//! column zero is the last column, and the pixel above row zero is on
//! the bottom row.  This is *not* how the seam search treats the edges;
//! see `costtable`.

use crate::error::Result;
use crate::pixelpairs::{gradient_of_pair, MAX_PAIR_GRADIENT};
use crate::raster::{Raster, RgbPixel};
use crate::twodmap::TwoDimensionalMap;
use itertools::iproduct;
use tracing::debug;

/// One energy scalar per pixel.
pub type EnergyMap = TwoDimensionalMap<u8>;

/// The scale applied to the gradient magnitude.  Output compatibility
/// depends on this exact value and on truncating, not rounding.
const ENERGY_DIVISOR: f64 = 10.0;

/// Horizontal plus vertical, both at their worst.
const MAX_GRADIENT: u32 = 2 * MAX_PAIR_GRADIENT;

// sqrt(MAX_GRADIENT) / 10 < 256 exactly when MAX_GRADIENT < 2560².  The
// worst case is 62, so narrowing to u8 never loses anything.
const _: () = assert!(MAX_GRADIENT < 2560 * 2560);

#[inline]
fn before(i: u32, bound: u32) -> u32 {
    cq!(i == 0, bound - 1, i - 1)
}

#[inline]
fn after(i: u32, bound: u32) -> u32 {
    cq!(i + 1 >= bound, 0, i + 1)
}

/// Squared gradient -> energy byte.
fn scale_gradient(gradient: u32) -> u8 {
    debug_assert!(gradient <= MAX_GRADIENT);
    let scaled = f64::from(gradient).sqrt() / ENERGY_DIVISOR;
    // Unreachable saturation; the const assertion above rules it out.
    num_traits::cast::<f64, u8>(scaled.trunc()).unwrap_or(u8::MAX)
}

fn pixel_energy(pixels: &TwoDimensionalMap<RgbPixel>, x: u32, y: u32) -> u8 {
    let (width, height) = (pixels.width(), pixels.height());
    let horizontal = gradient_of_pair(
        &pixels[(after(x, width), y)],
        &pixels[(before(x, width), y)],
    );
    let vertical = gradient_of_pair(
        &pixels[(x, after(y, height))],
        &pixels[(x, before(y, height))],
    );
    scale_gradient(horizontal + vertical)
}

// Image -> Energy Map

/// Compute the energy of every pixel in an image.
pub fn calculate_energy(image: &Raster) -> Result<EnergyMap> {
    let pixels = image.pixels();
    let (width, height) = (pixels.width(), pixels.height());

    let mut emap = EnergyMap::new(width, height)?;
    for (y, x) in iproduct!(0..height, 0..width) {
        emap[(x, y)] = pixel_energy(pixels, x, y);
    }
    debug!(width, height, "computed energy map");
    Ok(emap)
}
