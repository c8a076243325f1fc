use super::*;
use crate::foundation::core::Rgba8;
use crate::scene::model::{WaveformDesign, WaveformType};

const SCENARIO: [f32; 7] = [10.0, 20.0, 10.0, 20.0, 10.0, 20.0, 10.0];

fn layer() -> WaveformLayer {
    WaveformLayer {
        kind: WaveformType::Fad,
        design: WaveformDesign::SpectralFlux,
        pos_x: 320.0,
        pos_y: 240.0,
        width: 200.0,
        fill1: Rgba8::rgb(255, 0, 0),
        fill2: Some(Rgba8::rgb(0, 255, 0)),
        fill3: Some(Rgba8::rgb(0, 0, 255)),
        glow: None,
    }
}

#[test]
fn fourteen_anchors_with_spikes_on_odd_indices() {
    let center = Point::new(320.0, 240.0);
    let pts = radial_anchors(&SCENARIO, center, 100.0).unwrap();
    assert_eq!(pts.len(), 14);

    let dist = |p: Point| (p - center).hypot();
    for (i, p) in pts[..7].iter().enumerate() {
        let expected = if i % 2 == 0 { 100.0 } else { 121.0 };
        assert!((dist(*p) - expected).abs() < 1e-9, "anchor {i}");
    }
}

#[test]
fn returning_anchors_mirror_outward_ones_through_center() {
    let center = Point::new(320.0, 240.0);
    let pts = radial_anchors(&SCENARIO, center, 100.0).unwrap();

    // Anchor 7 is anchor 0's direction reflected, at anchor 6's radius (both on the base circle).
    let mirrored = Point::new(2.0 * center.x - pts[0].x, 2.0 * center.y - pts[0].y);
    assert!((pts[7] - mirrored).hypot() < 1e-9);
    assert!(((pts[8] - center).hypot() - 121.0).abs() < 1e-9);
}

#[test]
fn first_anchor_uses_start_angle() {
    let center = Point::new(0.0, 0.0);
    let pts = radial_anchors(&SCENARIO, center, 100.0).unwrap();
    assert!((pts[0].x - 100.0 * START_ANGLE.cos()).abs() < 1e-9);
    assert!((pts[0].y - 100.0 * START_ANGLE.sin()).abs() < 1e-9);
}

#[test]
fn disc_diameter_follows_second_bin() {
    let geom = radial_geometry(&SCENARIO, &layer()).unwrap();
    assert_eq!(geom.radius, 100.0);
    assert!((geom.disc_diameter - 145.0).abs() < 1e-9);
    assert_eq!(geom.center, Point::new(320.0, 240.0));
}

#[test]
fn ring_is_closed() {
    let geom = radial_geometry(&SCENARIO, &layer()).unwrap();
    assert!(matches!(
        geom.ring.elements().last(),
        Some(kurbo::PathEl::ClosePath)
    ));
}

#[test]
fn short_frame_is_out_of_range() {
    assert!(matches!(
        radial_geometry(&[1.0, 2.0, 3.0], &layer()),
        Err(AudiogramError::IndexOutOfRange { index: 3, .. })
    ));
}

#[test]
fn draw_requires_inner_fills() {
    let geom = radial_geometry(&SCENARIO, &layer()).unwrap();
    let mut wf = layer();
    wf.fill3 = None;
    let mut ctx = vello_cpu::RenderContext::new(64, 64);
    let mut painter = Painter::new(&mut ctx);
    assert!(matches!(
        draw(&geom, &wf, &mut painter),
        Err(AudiogramError::InvalidConfiguration(_))
    ));
}

#[test]
fn center_disc_is_painted_opaque_in_fill1() {
    let wf = layer();
    let geom = radial_geometry(&SCENARIO, &wf).unwrap();
    let pixmap = crate::render::painter::render_offscreen(640, 480, |p| draw(&geom, &wf, p)).unwrap();
    let idx = (240 * 640 + 320) * 4;
    assert_eq!(&pixmap.data_as_u8_slice()[idx..idx + 4], &[255, 0, 0, 255]);
}
