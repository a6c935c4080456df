// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors for the carving pipeline and its file collaborators.
//!
//! None of these are retried.  A stage that fails hands back one of
//! these and nothing else; there are no half-carved images.

use failure::Fail;
use std::io;

/// Result alias for seamcarve operations.
pub type Result<T> = std::result::Result<T, CarveError>;

/// Everything that can go wrong while carving, loading or saving.
#[derive(Debug, Fail)]
pub enum CarveError {
    /// A buffer for a `width` x `height` map could not be obtained.
    #[fail(display = "could not allocate a {}x{} buffer", width, height)]
    AllocationFailed { width: u32, height: u32 },

    /// A coordinate, usually a seam entry, fell outside the map.
    #[fail(
        display = "coordinate ({}, {}) is outside a {}x{} map",
        x, y, width, height
    )]
    IndexOutOfRange {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Pixels carry exactly three channels.
    #[fail(display = "channel {} does not exist, pixels are RGB", channel)]
    ChannelOutOfRange { channel: usize },

    /// Zero-sized images, or a carve that would leave nothing behind.
    #[fail(display = "invalid dimensions {}x{}", width, height)]
    InvalidDimensions { width: u32, height: u32 },

    /// A seam must name exactly one column for every row.
    #[fail(display = "seam has {} entries, image has {} rows", got, expected)]
    SeamLength { expected: usize, got: usize },

    /// A flat buffer handed in did not match the declared dimensions.
    #[fail(display = "buffer holds {} elements, expected {}", got, expected)]
    BufferSize { expected: usize, got: usize },

    /// A raw `.bin` raster file that cannot be what it claims to be.
    #[fail(display = "malformed raw raster: {}", reason)]
    MalformedRaw { reason: &'static str },

    #[fail(display = "i/o error: {}", _0)]
    Io(#[cause] io::Error),

    #[fail(display = "image codec error: {}", _0)]
    Image(#[cause] image::ImageError),
}

impl From<io::Error> for CarveError {
    fn from(err: io::Error) -> Self {
        CarveError::Io(err)
    }
}

impl From<image::ImageError> for CarveError {
    fn from(err: image::ImageError) -> Self {
        CarveError::Image(err)
    }
}
