// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pixel store: an RGB raster the pipeline reads and rebuilds.
//!
//! The public accessors are addressed the way people talk about
//! images, `(row, column, channel)`; internally everything is a
//! `TwoDimensionalMap` addressed `(x, y)`.

use crate::error::{CarveError, Result};
use crate::twodmap::TwoDimensionalMap;
use image::{ImageBuffer, Rgb, RgbImage};
use std::convert::TryFrom;

/// Samples per pixel.
pub const CHANNELS: usize = 3;

/// One pixel: red, green, blue.
pub type RgbPixel = [u8; CHANNELS];

/// An 8-bit RGB image.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pixels: TwoDimensionalMap<RgbPixel>,
}

impl Raster {
    /// A black image of the given size.
    pub fn new(height: u32, width: u32) -> Result<Self> {
        Ok(Raster {
            pixels: TwoDimensionalMap::new(width, height)?,
        })
    }

    /// Build from row-major interleaved RGB samples.
    pub fn from_raw(height: u32, width: u32, samples: &[u8]) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|cells| cells.checked_mul(CHANNELS))
            .ok_or(CarveError::AllocationFailed { width, height })?;
        if samples.len() != expected {
            return Err(CarveError::BufferSize {
                expected,
                got: samples.len(),
            });
        }
        let pixels = samples
            .chunks_exact(CHANNELS)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Ok(Raster {
            pixels: TwoDimensionalMap::from_vec(width, height, pixels)?,
        })
    }

    /// Row-major interleaved RGB samples.
    pub fn to_raw(&self) -> Vec<u8> {
        self.pixels.as_slice().iter().flatten().copied().collect()
    }

    /// `(height, width)`
    pub fn dimensions(&self) -> (u32, u32) {
        (self.pixels.height(), self.pixels.width())
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn get(&self, row: u32, col: u32, channel: usize) -> Result<u8> {
        let pixel = self.pixels.get(col, row)?;
        pixel
            .get(channel)
            .copied()
            .ok_or(CarveError::ChannelOutOfRange { channel })
    }

    pub fn set(&mut self, row: u32, col: u32, channel: usize, value: u8) -> Result<()> {
        if channel >= CHANNELS {
            return Err(CarveError::ChannelOutOfRange { channel });
        }
        let mut pixel = self.pixels.get(col, row)?;
        pixel[channel] = value;
        self.pixels.put(col, row, pixel)
    }

    pub fn pixel(&self, row: u32, col: u32) -> Result<RgbPixel> {
        self.pixels.get(col, row)
    }

    pub fn put_pixel(&mut self, row: u32, col: u32, pixel: RgbPixel) -> Result<()> {
        self.pixels.put(col, row, pixel)
    }

    pub(crate) fn pixels(&self) -> &TwoDimensionalMap<RgbPixel> {
        &self.pixels
    }

    /// Copy out into an `image` buffer for encoding.
    pub fn to_rgb_image(&self) -> RgbImage {
        ImageBuffer::from_fn(self.width(), self.height(), |x, y| {
            Rgb(self.pixels[(x, y)])
        })
    }
}

impl From<TwoDimensionalMap<RgbPixel>> for Raster {
    fn from(pixels: TwoDimensionalMap<RgbPixel>) -> Self {
        Raster { pixels }
    }
}

impl TryFrom<&RgbImage> for Raster {
    type Error = CarveError;

    fn try_from(image: &RgbImage) -> Result<Self> {
        Raster::from_raw(image.height(), image.width(), image.as_raw())
    }
}
