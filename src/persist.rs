// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Loading and saving rasters.
//!
//! Paths ending in `.bin` use the bare raster layout: the height and the
//! width as little-endian 64-bit integers, followed by `height * width`
//! RGB triples in row-major order.  Everything else goes through the
//! `image` crate and whatever formats it recognises from the extension.

use crate::energy::EnergyMap;
use crate::error::{CarveError, Result};
use crate::raster::{Raster, CHANNELS};
use image::{GrayImage, ImageBuffer, Luma};
use std::convert::TryFrom;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

const HEADER_LEN: usize = 16;

fn is_raw(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("bin"))
}

/// Read a `.bin` raster.
pub fn read_raw<R: Read>(mut reader: R) -> Result<Raster> {
    let mut header = [0u8; HEADER_LEN];
    reader.read_exact(&mut header).map_err(truncated)?;
    let (h, w) = header.split_at(HEADER_LEN / 2);
    let height = dimension(h)?;
    let width = dimension(w)?;

    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|cells| cells.checked_mul(CHANNELS))
        .ok_or(CarveError::MalformedRaw {
            reason: "dimensions overflow",
        })?;
    // The header is only a claim; let the buffer grow with what the
    // file actually holds.
    let mut samples = Vec::new();
    reader.take(len as u64).read_to_end(&mut samples)?;
    if samples.len() != len {
        return Err(CarveError::MalformedRaw {
            reason: "file ends before the raster does",
        });
    }
    Raster::from_raw(height, width, &samples)
}

/// Write a `.bin` raster.
pub fn write_raw<W: Write>(image: &Raster, mut writer: W) -> Result<()> {
    let (height, width) = image.dimensions();
    writer.write_all(&u64::from(height).to_le_bytes())?;
    writer.write_all(&u64::from(width).to_le_bytes())?;
    writer.write_all(&image.to_raw())?;
    writer.flush()?;
    Ok(())
}

fn dimension(bytes: &[u8]) -> Result<u32> {
    let mut raw = [0u8; HEADER_LEN / 2];
    raw.copy_from_slice(bytes);
    u32::try_from(u64::from_le_bytes(raw)).map_err(|_| CarveError::MalformedRaw {
        reason: "dimension does not fit in 32 bits",
    })
}

fn truncated(err: io::Error) -> CarveError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        CarveError::MalformedRaw {
            reason: "file ends before the raster does",
        }
    } else {
        CarveError::Io(err)
    }
}

/// Load an image from disk as 8-bit RGB.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Raster> {
    let path = path.as_ref();
    let raster = if is_raw(path) {
        read_raw(BufReader::new(File::open(path)?))?
    } else {
        Raster::try_from(&image::open(path)?.to_rgb8())?
    };
    debug!(path = %path.display(), width = raster.width(), height = raster.height(), "loaded image");
    Ok(raster)
}

/// Save an image, choosing the encoding from the path's extension.
pub fn save<P: AsRef<Path>>(image: &Raster, path: P) -> Result<()> {
    let path = path.as_ref();
    if is_raw(path) {
        write_raw(image, BufWriter::new(File::create(path)?))?;
    } else {
        image.to_rgb_image().save(path)?;
    }
    debug!(path = %path.display(), "saved image");
    Ok(())
}

/// The energy map as a grayscale picture.
pub fn energy_to_image(energy: &EnergyMap) -> GrayImage {
    ImageBuffer::from_fn(energy.width(), energy.height(), |x, y| {
        Luma([energy[(x, y)]])
    })
}

/// Save an energy map.  A `.bin` target gets an RGB raster with the
/// energy in all three channels; anything else gets a grayscale image.
pub fn save_energy<P: AsRef<Path>>(energy: &EnergyMap, path: P) -> Result<()> {
    let path = path.as_ref();
    if is_raw(path) {
        let samples: Vec<u8> = energy
            .as_slice()
            .iter()
            .flat_map(|&e| [e; CHANNELS].to_vec())
            .collect();
        let raster = Raster::from_raw(energy.height(), energy.width(), &samples)?;
        write_raw(&raster, BufWriter::new(File::create(path)?))?;
    } else {
        energy_to_image(energy).save(path)?;
    }
    debug!(path = %path.display(), "saved energy map");
    Ok(())
}
