use crate::foundation::error::{AudiogramError, AudiogramResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Absolute 0-based output frame index.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Output rate of every audiogram video.
    pub const AUDIOGRAM: Fps = Fps { num: 30, den: 1 };

    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> AudiogramResult<Self> {
        if den == 0 {
            return Err(AudiogramError::config("fps den must be > 0"));
        }
        if num == 0 {
            return Err(AudiogramError::config("fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Duration of one frame in nanoseconds (33_333_333.3 at 30 fps).
    pub fn frame_duration_nanos(self) -> f64 {
        1e9 * f64::from(self.den) / f64::from(self.num)
    }

    /// Presentation timestamp of `frame` in nanoseconds, rounded to the nearest nanosecond.
    pub fn timestamp_nanos(self, frame: FrameIndex) -> u64 {
        (self.frame_duration_nanos() * frame.0 as f64).round() as u64
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Width and height as `u16`, the size limit of the CPU rasterizer.
    pub fn size_u16(self) -> AudiogramResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| AudiogramError::config("canvas width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| AudiogramError::config("canvas height exceeds u16"))?;
        Ok((w, h))
    }

    /// Number of pixels covered by the canvas.
    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Opaque black.
    pub const BLACK: Rgba8 = Rgba8::rgb(0, 0, 0);

    /// Opaque white.
    pub const WHITE: Rgba8 = Rgba8::rgb(255, 255, 255);

    /// Return the same color with alpha scaled by a `0..=100` percentage.
    pub fn with_opacity_percent(self, percent: f64) -> Self {
        let a = (f64::from(self.a) * (percent.clamp(0.0, 100.0) / 100.0)) as u8;
        Self { a, ..self }
    }

    /// Premultiplied RGBA8 bytes.
    pub fn to_premul(self) -> [u8; 4] {
        let a = u16::from(self.a);
        let premul = |c: u8| crate::foundation::math::mul_div255_u8(u16::from(c), a);
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
