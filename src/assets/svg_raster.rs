use anyhow::Context;

use crate::assets::decode::PremulImage;
use crate::foundation::error::{AudiogramError, AudiogramResult};

const MAX_DIM: u32 = 16_384;

/// Parse SVG bytes, resolving `<text>` against the process font library.
pub fn parse_svg(bytes: &[u8]) -> AudiogramResult<usvg::Tree> {
    let opts = usvg::Options {
        fontdb: crate::assets::fonts::library(),
        ..usvg::Options::default()
    };
    usvg::Tree::from_data(bytes, &opts)
        .context("parse svg tree")
        .map_err(|e| AudiogramError::resource(format!("{e:#}")))
}

/// Rasterize `tree` stretched to `width x height`. Zero on an axis uses the SVG's own size.
pub fn rasterize_svg(tree: &usvg::Tree, width: f64, height: f64) -> AudiogramResult<PremulImage> {
    fn to_px(v: f64) -> AudiogramResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(AudiogramError::resource("svg has invalid width/height"));
        }
        let px = (v.ceil() as u32).max(1);
        if px > MAX_DIM {
            return Err(AudiogramError::resource(format!(
                "svg raster size too large: {px} (max {MAX_DIM})"
            )));
        }
        Ok(px)
    }

    let size = tree.size();
    let w = to_px(if width > 0.0 { width } else { f64::from(size.width()) })?;
    let h = to_px(if height > 0.0 { height } else { f64::from(size.height()) })?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(w, h)
        .ok_or_else(|| AudiogramError::resource("failed to allocate svg pixmap"))?;
    let sx = (w as f32) / size.width();
    let sy = (h as f32) / size.height();
    resvg::render(
        tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    // tiny-skia pixmaps are already premultiplied RGBA8.
    Ok(PremulImage {
        width: w,
        height: h,
        data: pixmap.data().to_vec(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg_raster.rs"]
mod tests;
