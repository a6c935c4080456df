// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the gradient across a pixel pair
//!
//! Given the two pixels on either side of a point, the gradient
//! between them is the sum over the channels of the squared channel
//! differences:
//!
//! ```text
//!        |Δ|² = (Δr)² + (Δg)² + (Δb)²
//! ```

use crate::raster::RgbPixel;

/// The largest value `gradient_of_pair` can return: every channel
/// differs by the full 255.
pub const MAX_PAIR_GRADIENT: u32 = 3 * 255 * 255;

/// (Pixel, Pixel) -> squared gradient
#[inline]
pub fn gradient_of_pair(p1: &RgbPixel, p2: &RgbPixel) -> u32 {
    p1.iter()
        .zip(p2.iter())
        .map(|(&c1, &c2)| {
            let d = u32::from(cq!(c1 > c2, c1 - c2, c2 - c1));
            d * d
        })
        .sum()
}
