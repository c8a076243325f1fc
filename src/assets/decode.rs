use anyhow::Context;

use crate::foundation::error::{AudiogramError, AudiogramResult};
use crate::foundation::math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place};

/// Decoded raster image in premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PremulImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major premultiplied RGBA8 bytes.
    pub data: Vec<u8>,
}

impl PremulImage {
    /// Fully transparent image.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Wrap straight-alpha RGBA8 bytes, premultiplying in place.
    pub fn from_straight_rgba8(width: u32, height: u32, mut data: Vec<u8>) -> AudiogramResult<Self> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(AudiogramError::resource(format!(
                "rgba buffer is {} bytes, expected {width}x{height}x4",
                data.len()
            )));
        }
        premultiply_rgba8_in_place(&mut data);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Straight-alpha copy of the pixels, for writing PNG files.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut data = self.data.clone();
        unpremultiply_rgba8_in_place(&mut data);
        data
    }
}

/// Decode any format supported by `image` (PNG, JPEG, GIF, WebP, ...).
pub fn decode_image(bytes: &[u8]) -> AudiogramResult<PremulImage> {
    let dyn_img = image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(|e| AudiogramError::resource(format!("{e:#}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PremulImage::from_straight_rgba8(width, height, rgba.into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
