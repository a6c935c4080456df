// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main function
//!
//! Removing a seam from an image, and the driver that does it over and
//! over.  Each pass takes the image by value and hands back a new one,
//! so there is never more than one owner of the image being carved.

use crate::error::{CarveError, Result};
use crate::raster::{Raster, RgbPixel};
use crate::seamfinder::{DualGradient, SeamFinder};
use crate::twodmap::TwoDimensionalMap;
use tracing::{debug, info, info_span};

/// Remove one pixel from every row, the one the seam names, and close
/// the gap by shifting the rest of the row left.
pub fn remove_vertical_seam(image: Raster, seam: &[u32]) -> Result<Raster> {
    let (height, width) = image.dimensions();
    if seam.len() != height as usize {
        return Err(CarveError::SeamLength {
            expected: height as usize,
            got: seam.len(),
        });
    }
    if let Some((y, &x)) = (0..height).zip(seam).find(|&(_, &x)| x >= width) {
        return Err(CarveError::IndexOutOfRange {
            x,
            y,
            width,
            height,
        });
    }
    if width < 2 {
        return Err(CarveError::InvalidDimensions {
            width: width - 1,
            height,
        });
    }

    let pixels = image.pixels();
    let mut carved = TwoDimensionalMap::<RgbPixel>::new(width - 1, height)?;
    for (y, &cut) in (0..height).zip(seam) {
        for x in (0..width).filter(|&x| x != cut) {
            carved[(cq!(x < cut, x, x - 1), y)] = pixels[(x, y)];
        }
    }
    Ok(Raster::from(carved))
}

/// Find the cheapest seam in an image and take it out.
pub fn carve_once(image: Raster) -> Result<Raster> {
    let seam = DualGradient::new(&image).find_vertical_seam()?;
    debug!(bottom = ?seam.last(), "found seam");
    remove_vertical_seam(image, &seam)
}

/// How much to carve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarveConfig {
    /// Columns to remove, one seam each.
    pub seams: u32,
}

impl Default for CarveConfig {
    fn default() -> Self {
        CarveConfig { seams: 1 }
    }
}

impl CarveConfig {
    pub fn with_seams(seams: u32) -> Self {
        CarveConfig { seams }
    }
}

/// A struct for holding the image to be carved.
pub struct SeamCarver {
    image: Raster,
}

impl SeamCarver {
    /// Creates a new SeamCarver that owns the image to be carved.
    pub fn new(image: Raster) -> Self {
        SeamCarver { image }
    }

    /// Carve the configured number of seams out of the image.
    pub fn carve(self, config: &CarveConfig) -> Result<Raster> {
        self.carve_with(config, |_, _| Ok(()))
    }

    /// As `carve`, but hands every intermediate image to `observer`
    /// along with the zero-based index of the pass that produced it.
    /// An observer error stops the carve.
    pub fn carve_with<F>(self, config: &CarveConfig, mut observer: F) -> Result<Raster>
    where
        F: FnMut(u32, &Raster) -> Result<()>,
    {
        let (height, width) = self.image.dimensions();
        if config.seams >= width {
            return Err(CarveError::InvalidDimensions {
                width: width.saturating_sub(config.seams),
                height,
            });
        }

        let mut scratch = self.image;
        for pass in 0..config.seams {
            let _span = info_span!("carve", pass).entered();
            scratch = carve_once(scratch)?;
            info!(width = scratch.width(), height = scratch.height(), "removed seam");
            observer(pass, &scratch)?;
        }
        Ok(scratch)
    }
}

/// Given an image and a number of columns to remove, repeatedly carve
/// seams out of the image.
pub fn seamcarve(image: Raster, seams: u32) -> Result<Raster> {
    SeamCarver::new(image).carve(&CarveConfig::with_seams(seams))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(height: u32, width: u32) -> Raster {
        let samples: Vec<u8> = (0..height * width)
            .flat_map(|i| vec![i as u8, 0, 0])
            .collect();
        Raster::from_raw(height, width, &samples).unwrap()
    }

    fn reds(raster: &Raster) -> Vec<u8> {
        raster.to_raw().chunks(3).map(|p| p[0]).collect()
    }

    #[test]
    fn seam_pixels_are_removed_and_rows_close_up() {
        let image = numbered(3, 4);
        // 0  1  2  3
        // 4  5  6  7
        // 8  9 10 11
        let carved = remove_vertical_seam(image, &[0, 1, 3]).unwrap();
        assert_eq!(carved.dimensions(), (3, 3));
        assert_eq!(reds(&carved), [1, 2, 3, 4, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn out_of_range_seams_are_reported_not_clamped() {
        let image = numbered(2, 3);
        assert!(matches!(
            remove_vertical_seam(image, &[0, 3]),
            Err(CarveError::IndexOutOfRange {
                x: 3,
                y: 1,
                width: 3,
                height: 2
            })
        ));
    }

    #[test]
    fn seams_must_cover_every_row() {
        let image = numbered(3, 3);
        assert!(matches!(
            remove_vertical_seam(image, &[0, 0]),
            Err(CarveError::SeamLength {
                expected: 3,
                got: 2
            })
        ));
    }

    #[test]
    fn single_column_cannot_be_carved() {
        let image = numbered(3, 1);
        assert!(matches!(
            remove_vertical_seam(image, &[0, 0, 0]),
            Err(CarveError::InvalidDimensions {
                width: 0,
                height: 3
            })
        ));
    }

    #[test]
    fn each_pass_narrows_by_one() {
        let image = numbered(5, 8);
        let carved = seamcarve(image, 3).unwrap();
        assert_eq!(carved.dimensions(), (5, 5));
    }

    #[test]
    fn observer_sees_every_pass() {
        let mut widths = Vec::new();
        let carved = SeamCarver::new(numbered(4, 6))
            .carve_with(&CarveConfig::with_seams(4), |pass, image| {
                widths.push((pass, image.width()));
                Ok(())
            })
            .unwrap();
        assert_eq!(carved.width(), 2);
        assert_eq!(widths, [(0, 5), (1, 4), (2, 3), (3, 2)]);
    }

    #[test]
    fn zero_seams_is_a_no_op() {
        let image = numbered(2, 2);
        assert_eq!(seamcarve(image.clone(), 0).unwrap(), image);
    }

    #[test]
    fn carving_the_whole_width_is_refused_up_front() {
        let mut calls = 0;
        let result = SeamCarver::new(numbered(2, 4)).carve_with(
            &CarveConfig::with_seams(4),
            |_, _| {
                calls += 1;
                Ok(())
            },
        );
        assert!(matches!(
            result,
            Err(CarveError::InvalidDimensions { width: 0, .. })
        ));
        assert_eq!(calls, 0);
    }
}
