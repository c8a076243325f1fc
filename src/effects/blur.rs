//! Separable Gaussian blur over premultiplied RGBA8 with mirrored edges.

use crate::foundation::error::{AudiogramError, AudiogramResult};

/// Blur with the kernel radius used by image layers: `sigma = radius / 3`.
pub fn blur_radius(src: &[u8], width: u32, height: u32, radius: u32) -> AudiogramResult<Vec<u8>> {
    blur_rgba8_premul(src, width, height, radius, radius as f32 / 3.0)
}

/// Horizontal then vertical Gaussian pass. Samples past an edge are mirrored back inside.
pub fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> AudiogramResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| AudiogramError::input("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(AudiogramError::input(
            "blur expects src matching width*height*4",
        ));
    }
    if radius == 0 || expected_len == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(src, &mut tmp, width, height, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> AudiogramResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(AudiogramError::config("blur sigma must be > 0"));
    }

    let r = radius as i64;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = i as f64;
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(AudiogramError::input("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = (((wf / sum) * 65536.0).round() as i64).clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Rounding drift goes to the center tap so the kernel sums to exactly 1.0 in q16.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

/// Mirror an out-of-range sample index back into `0..n` (edge pixel repeated once).
fn reflect(i: i64, n: i64) -> usize {
    let period = 2 * n;
    let m = i.rem_euclid(period);
    (if m >= n { period - 1 - m } else { m }) as usize
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let w = width as usize;
    for y in 0..height as usize {
        let row = y * w;
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = reflect(x as i64 + ki as i64 - radius, w as i64);
                let idx = (row + sx) * 4;
                for (c, a) in acc.iter_mut().enumerate() {
                    *a += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = (row + x) * 4;
            for (c, a) in acc.into_iter().enumerate() {
                dst[out_idx + c] = q16_to_u8(a);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let w = width as usize;
    let h = height as i64;
    for y in 0..height as usize {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = reflect(y as i64 + ki as i64 - radius, h);
                let idx = (sy * w + x) * 4;
                for (c, a) in acc.iter_mut().enumerate() {
                    *a += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = (y * w + x) * 4;
            for (c, a) in acc.into_iter().enumerate() {
                dst[out_idx + c] = q16_to_u8(a);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
