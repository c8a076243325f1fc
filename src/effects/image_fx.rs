//! Per-image passes applied by the static layer: resize, pixel effects, filters, masks and
//! rotation. All functions operate on premultiplied RGBA8.

use crate::assets::decode::PremulImage;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{AudiogramError, AudiogramResult};
use crate::foundation::math::{
    over_premul, premultiply_rgba8_in_place, unpremultiply_rgba8_in_place,
};

/// Amplitude of the uniform per-channel noise added by [`jitter`].
pub const JITTER_AMOUNT: i32 = 25;

/// Opacity percentage of the flat color laid over an image by [`screen`].
pub const SCREEN_OPACITY_PERCENT: f64 = 50.0;

/// Largest width or height an image layer may be resized to.
pub const MAX_IMAGE_DIM: u32 = 16_384;

/// Resize to `width x height`. Zero on both axes keeps the native size; zero on one axis keeps
/// the aspect ratio.
pub fn resize(img: &PremulImage, width: f64, height: f64) -> AudiogramResult<PremulImage> {
    if width <= 0.0 && height <= 0.0 {
        return Ok(img.clone());
    }
    let (sw, sh) = (f64::from(img.width), f64::from(img.height));
    let (tw, th) = match (width > 0.0, height > 0.0) {
        (true, true) => (width, height),
        (true, false) => (width, sh * width / sw),
        _ => (sw * height / sh, height),
    };
    if !(tw <= f64::from(MAX_IMAGE_DIM) && th <= f64::from(MAX_IMAGE_DIM)) {
        return Err(AudiogramError::config(format!(
            "resized image {tw:.0}x{th:.0} exceeds {MAX_IMAGE_DIM}px"
        )));
    }
    let (tw, th) = (tw.round().max(1.0) as u32, th.round().max(1.0) as u32);
    if (tw, th) == (img.width, img.height) {
        return Ok(img.clone());
    }

    let src = image::RgbaImage::from_raw(img.width, img.height, img.data.clone())
        .ok_or_else(|| AudiogramError::resource("image byte length mismatch"))?;
    let out = image::imageops::resize(&src, tw, th, image::imageops::FilterType::Lanczos3);
    Ok(PremulImage {
        width: tw,
        height: th,
        data: out.into_raw(),
    })
}

/// Luma grayscale, `(77 r + 151 g + 28 b) / 256`.
pub fn grayscale(img: &mut PremulImage) {
    for px in img.data.chunks_exact_mut(4) {
        let luma = (77 * u32::from(px[0]) + 151 * u32::from(px[1]) + 28 * u32::from(px[2])) >> 8;
        let luma = luma.min(u32::from(px[3])) as u8;
        px[0] = luma;
        px[1] = luma;
        px[2] = luma;
    }
}

/// Add uniform noise in `[-JITTER_AMOUNT, JITTER_AMOUNT]` to every color channel. Alpha is kept.
pub fn jitter(img: &mut PremulImage, rng: &mut fastrand::Rng) {
    unpremultiply_rgba8_in_place(&mut img.data);
    for px in img.data.chunks_exact_mut(4) {
        for c in &mut px[..3] {
            let n = rng.i32(-JITTER_AMOUNT..=JITTER_AMOUNT);
            *c = (i32::from(*c) + n).clamp(0, 255) as u8;
        }
    }
    premultiply_rgba8_in_place(&mut img.data);
}

/// Lay `fill` over the whole image at [`SCREEN_OPACITY_PERCENT`].
pub fn screen(img: &mut PremulImage, fill: Rgba8) {
    let overlay = fill.with_opacity_percent(SCREEN_OPACITY_PERCENT).to_premul();
    for px in img.data.chunks_exact_mut(4) {
        let out = over_premul([px[0], px[1], px[2], px[3]], overlay, 1.0);
        px.copy_from_slice(&out);
    }
}

/// Keep only the largest centered circle, with an anti-aliased rim.
pub fn mask_circle(img: &mut PremulImage) {
    let (w, h) = (f64::from(img.width), f64::from(img.height));
    let r = w.min(h) / 2.0;
    let (cx, cy) = (w / 2.0, h / 2.0);
    apply_coverage(img, |x, y| {
        let d = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
        (r - d + 0.5).clamp(0.0, 1.0)
    });
}

/// Keep only the largest centered square.
pub fn mask_square(img: &mut PremulImage) {
    let (w, h) = (f64::from(img.width), f64::from(img.height));
    let side = w.min(h);
    let (x0, y0) = ((w - side) / 2.0, (h - side) / 2.0);
    apply_coverage(img, |x, y| {
        let cx = ((x + 0.5).min(x0 + side) - (x - 0.5).max(x0)).clamp(0.0, 1.0);
        let cy = ((y + 0.5).min(y0 + side) - (y - 0.5).max(y0)).clamp(0.0, 1.0);
        cx * cy
    });
}

/// Scale every pixel by a coverage sampled at its center.
fn apply_coverage(img: &mut PremulImage, coverage: impl Fn(f64, f64) -> f64) {
    let w = img.width as usize;
    for (i, px) in img.data.chunks_exact_mut(4).enumerate() {
        let (x, y) = ((i % w) as f64 + 0.5, (i / w) as f64 + 0.5);
        let c = coverage(x, y);
        if c >= 1.0 {
            continue;
        }
        let k = (c * 255.0).round() as u16;
        for ch in px.iter_mut() {
            *ch = crate::foundation::math::mul_div255_u8(u16::from(*ch), k);
        }
    }
}

/// Canvas size needed to hold `w x h` rotated by `degrees`.
pub fn rotated_size(w: u32, h: u32, degrees: f64) -> (u32, u32) {
    let rad = degrees.to_radians();
    let (s, c) = (rad.sin().abs(), rad.cos().abs());
    let (w, h) = (f64::from(w), f64::from(h));
    // Snap tiny float noise (e.g. cos 90°) before flooring.
    let snap = |v: f64| (v + 1e-9).floor().max(1.0) as u32;
    (snap(w * c + h * s), snap(h * c + w * s))
}

/// Rotate clockwise by `degrees` about the image center. The canvas grows to the rotated
/// bounding box with the image centered; uncovered pixels are transparent.
pub fn rotate(img: &PremulImage, degrees: f64) -> PremulImage {
    let (nw, nh) = rotated_size(img.width, img.height, degrees);
    let rad = degrees.to_radians();
    let (sin, cos) = rad.sin_cos();
    let (scx, scy) = (f64::from(img.width) / 2.0, f64::from(img.height) / 2.0);
    let (dcx, dcy) = (f64::from(nw) / 2.0, f64::from(nh) / 2.0);

    let mut data = vec![0u8; nw as usize * nh as usize * 4];
    for y in 0..nh {
        for x in 0..nw {
            let dx = f64::from(x) + 0.5 - dcx;
            let dy = f64::from(y) + 0.5 - dcy;
            // Inverse rotation back into source space.
            let sx = cos * dx + sin * dy + scx - 0.5;
            let sy = -sin * dx + cos * dy + scy - 0.5;
            let px = sample_bilinear(img, sx, sy);
            let idx = (y as usize * nw as usize + x as usize) * 4;
            data[idx..idx + 4].copy_from_slice(&px);
        }
    }
    PremulImage {
        width: nw,
        height: nh,
        data,
    }
}

fn sample_bilinear(img: &PremulImage, x: f64, y: f64) -> [u8; 4] {
    let (x0, y0) = (x.floor(), y.floor());
    let (fx, fy) = (x - x0, y - y0);
    let fetch = |xi: f64, yi: f64| -> [f64; 4] {
        if xi < 0.0 || yi < 0.0 || xi >= f64::from(img.width) || yi >= f64::from(img.height) {
            return [0.0; 4];
        }
        let idx = (yi as usize * img.width as usize + xi as usize) * 4;
        let p = &img.data[idx..idx + 4];
        [p[0].into(), p[1].into(), p[2].into(), p[3].into()]
    };
    let (a, b) = (fetch(x0, y0), fetch(x0 + 1.0, y0));
    let (c, d) = (fetch(x0, y0 + 1.0), fetch(x0 + 1.0, y0 + 1.0));
    let mut out = [0u8; 4];
    for i in 0..4 {
        let top = a[i] + (b[i] - a[i]) * fx;
        let bottom = c[i] + (d[i] - c[i]) * fx;
        out[i] = (top + (bottom - top) * fy).round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/image_fx.rs"]
mod tests;
