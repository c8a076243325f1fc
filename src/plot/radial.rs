use crate::foundation::core::{Affine, BezPath, Point};
use crate::foundation::error::{AudiogramError, AudiogramResult};
use crate::plot::curve::{Bend, fit_curve};
use crate::render::painter::Painter;
use crate::scene::amplitude::bin;
use crate::scene::model::WaveformLayer;

/// Anchors on each half of the ring.
pub const ANCHORS_PER_SIDE: usize = 7;

/// Angle of the first anchor, in radians.
pub const START_ANGLE: f64 = 44.0 / 7.0 - 44.0 / 28.0;

/// Angle between neighbouring anchors, in radians.
pub const ANGLE_STEP: f64 = (44.0 / 7.0) / 12.0;

/// Gain applied to the summed amplitude pair of a spike.
pub const SPIKE_GAIN: f64 = 0.7;

const RING_BEND: Bend = Bend::uniform(5.0);
const RING_OPACITY_PERCENT: f64 = 10.0;
const INNER_SCALES: [f64; 2] = [0.9, 0.65];

/// One frame of radial geometry.
#[derive(Clone, Debug)]
pub struct RadialGeometry {
    /// Closed ring outline.
    pub ring: BezPath,
    /// Ring and disc center.
    pub center: Point,
    /// Base ring radius (`width / 2`).
    pub radius: f64,
    /// Diameter of the center disc.
    pub disc_diameter: f64,
}

/// Radial distance of anchor `i`: even anchors sit on the base circle, odd anchors are pushed
/// out by the pair of bins `(i - 1, i)`.
fn anchor_radius(amplitudes: &[f32], radius: f64, i: usize) -> AudiogramResult<f64> {
    if i % 2 == 0 {
        return Ok(radius);
    }
    let pair = f64::from(bin(amplitudes, i - 1)?) + f64::from(bin(amplitudes, i)?);
    Ok(radius + pair * SPIKE_GAIN)
}

/// Anchor points of the ring: seven outward anchors then seven returning ones mirrored through
/// the center in reverse order.
pub fn radial_anchors(
    amplitudes: &[f32],
    center: Point,
    radius: f64,
) -> AudiogramResult<Vec<Point>> {
    let mut radii = [0.0; ANCHORS_PER_SIDE];
    for (i, r) in radii.iter_mut().enumerate() {
        *r = anchor_radius(amplitudes, radius, i)?;
    }

    let mut points = Vec::with_capacity(2 * ANCHORS_PER_SIDE);
    for (i, r) in radii.iter().enumerate() {
        let theta = START_ANGLE + i as f64 * ANGLE_STEP;
        points.push(Point::new(
            center.x + r * theta.cos(),
            center.y + r * theta.sin(),
        ));
    }
    for (i, r) in radii.iter().enumerate().rev() {
        let theta = START_ANGLE + (ANCHORS_PER_SIDE - 1 - i) as f64 * ANGLE_STEP;
        points.push(Point::new(
            center.x - r * theta.cos(),
            center.y - r * theta.sin(),
        ));
    }
    Ok(points)
}

/// Ring outline and center disc for one amplitude frame.
pub fn radial_geometry(amplitudes: &[f32], wf: &WaveformLayer) -> AudiogramResult<RadialGeometry> {
    let center = Point::new(wf.pos_x, wf.pos_y);
    let radius = wf.width / 2.0;
    let anchors = radial_anchors(amplitudes, center, radius)?;
    let ring = fit_curve(&anchors, RING_BEND, true)?;
    let disc_diameter = radius * 1.4 + f64::from(bin(amplitudes, 1)?) / 4.0;
    Ok(RadialGeometry {
        ring,
        center,
        radius,
        disc_diameter,
    })
}

/// Paint the ring, its two scaled inner copies, then the center disc.
pub fn draw(geom: &RadialGeometry, wf: &WaveformLayer, painter: &mut Painter<'_>) -> AudiogramResult<()> {
    let (Some(fill2), Some(fill3)) = (wf.fill2, wf.fill3) else {
        return Err(AudiogramError::config(
            "waveform: spectral_flux requires fill2 and fill3",
        ));
    };

    painter.fill_path(
        &geom.ring,
        wf.fill1.with_opacity_percent(RING_OPACITY_PERCENT),
    );
    for (scale, fill) in INNER_SCALES.into_iter().zip([fill2, fill3]) {
        let about_center = Affine::translate(geom.center.to_vec2())
            * Affine::scale(scale)
            * Affine::translate(-geom.center.to_vec2());
        painter.fill_path(&(about_center * geom.ring.clone()), fill);
    }
    painter.fill_circle(geom.center, geom.disc_diameter / 2.0, wf.fill1);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/plot/radial.rs"]
mod tests;
