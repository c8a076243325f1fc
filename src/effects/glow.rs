use kurbo::Shape as _;

use crate::assets::decode::PremulImage;
use crate::effects::blur::blur_radius;
use crate::foundation::core::{Affine, BezPath, Point, Rgba8};
use crate::foundation::error::{AudiogramError, AudiogramResult};
use crate::foundation::math::mul_div255_u8;
use crate::render::painter::{Painter, render_offscreen};
use crate::scene::model::GlowSpec;

/// Build the glow halo for `path`: a white core at `spec.opacity`, blurred, re-tinted with
/// `spec.color` and blurred again. Returns the halo and its top-left canvas position.
pub fn glow_layer(path: &BezPath, spec: &GlowSpec) -> AudiogramResult<(PremulImage, Point)> {
    let bbox = path.bounding_box();
    let pad = f64::from(spec.size) * 2.0 + 1.0;
    let origin = Point::new((bbox.x0 - pad).floor(), (bbox.y0 - pad).floor());
    let w = (bbox.x1 + pad).ceil() - origin.x;
    let h = (bbox.y1 + pad).ceil() - origin.y;
    let to_u16 = |v: f64| -> AudiogramResult<u16> {
        if v.is_finite() && (1.0..=f64::from(u16::MAX)).contains(&v) {
            Ok(v as u16)
        } else {
            Err(AudiogramError::input(format!("glow area {v} out of range")))
        }
    };
    let (w, h) = (to_u16(w)?, to_u16(h)?);

    let local = Affine::translate(-origin.to_vec2()) * path.clone();
    let silhouette = render_offscreen(w, h, |p| {
        p.fill_path(&local, Rgba8::WHITE);
        Ok(())
    })?;

    let core_opacity = (spec.opacity.clamp(0.0, 1.0) * 255.0).round() as u16;
    let mut core = Vec::with_capacity(silhouette.data_as_u8_slice().len());
    for px in silhouette.data_as_u8_slice().chunks_exact(4) {
        let a = mul_div255_u8(u16::from(px[3]), core_opacity);
        core.extend_from_slice(&[a, a, a, a]);
    }
    let core = blur_radius(&core, u32::from(w), u32::from(h), spec.size)?;

    let tint = spec.color;
    let mut halo = Vec::with_capacity(core.len());
    for px in core.chunks_exact(4) {
        let a = mul_div255_u8(u16::from(px[3]), u16::from(tint.a));
        let a16 = u16::from(a);
        halo.extend_from_slice(&[
            mul_div255_u8(u16::from(tint.r), a16),
            mul_div255_u8(u16::from(tint.g), a16),
            mul_div255_u8(u16::from(tint.b), a16),
            a,
        ]);
    }
    let halo = blur_radius(&halo, u32::from(w), u32::from(h), spec.size)?;

    Ok((
        PremulImage {
            width: u32::from(w),
            height: u32::from(h),
            data: halo,
        },
        origin,
    ))
}

/// Composite the glow halo of `path` onto the painter.
pub fn draw_glow(path: &BezPath, spec: &GlowSpec, painter: &mut Painter<'_>) -> AudiogramResult<()> {
    let (halo, origin) = glow_layer(path, spec)?;
    painter.draw_image(&halo, origin, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/glow.rs"]
mod tests;
