use kurbo::Shape as _;

use crate::foundation::core::{Affine, BezPath, Point};
use crate::foundation::error::{AudiogramError, AudiogramResult};
use crate::plot::curve::{Bend, fit_curve};
use crate::scene::amplitude::bin;
use crate::scene::model::WaveformLayer;

/// Horizontal distance between consecutive ribbon anchors before width scaling.
pub const POINT_SPACING: f64 = 25.0;

/// Curve stiffness used for the ribbon outline.
pub const RIBBON_BEND: Bend = Bend::uniform(5.0);

/// Anchor points of the upper ribbon edge.
///
/// The band list is walked twice so the ribbon shows two periods of the spectrum. The outline
/// starts and ends on the baseline.
pub fn ribbon_anchors(
    amplitudes: &[f32],
    band_count: usize,
    origin: Point,
) -> AudiogramResult<Vec<Point>> {
    if band_count == 0 {
        return Err(AudiogramError::out_of_range("amplitude bin", 0, 0));
    }

    let mut points = Vec::with_capacity(2 * band_count + 2);
    points.push(origin);
    for i in 0..2 * band_count {
        let amp = f64::from(bin(amplitudes, i % band_count)?);
        points.push(Point::new(
            origin.x + POINT_SPACING * (i + 1) as f64,
            origin.y - amp,
        ));
    }
    let last_x = points.last().map_or(origin.x, |p| p.x);
    points.push(Point::new(last_x + POINT_SPACING, origin.y));
    Ok(points)
}

/// Closed ribbon outline for one amplitude frame.
///
/// The upper edge is mirrored about `pos_y` and the whole shape is scaled horizontally about
/// `(pos_x, pos_y)` so its bounding box is exactly `width` wide.
pub fn ribbon_path(
    amplitudes: &[f32],
    band_count: usize,
    wf: &WaveformLayer,
) -> AudiogramResult<BezPath> {
    let origin = Point::new(wf.pos_x, wf.pos_y);
    let anchors = ribbon_anchors(amplitudes, band_count, origin)?;
    let upper = fit_curve(&anchors, RIBBON_BEND, true)?;

    let mirror = Affine::new([1.0, 0.0, 0.0, -1.0, 0.0, 2.0 * origin.y]);
    let mut ribbon = upper.clone();
    ribbon.apply_affine(mirror);
    ribbon.extend(upper);

    let natural_width = ribbon.bounding_box().width();
    if natural_width > 0.0 {
        let sx = wf.width / natural_width;
        let scale = Affine::translate(origin.to_vec2())
            * Affine::scale_non_uniform(sx, 1.0)
            * Affine::translate(-origin.to_vec2());
        ribbon.apply_affine(scale);
    }
    Ok(ribbon)
}

#[cfg(test)]
#[path = "../../tests/unit/plot/ribbon.rs"]
mod tests;
