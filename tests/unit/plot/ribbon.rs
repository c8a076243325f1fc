use super::*;
use crate::foundation::core::Rgba8;
use crate::scene::model::{WaveformDesign, WaveformType};

fn layer(width: f64) -> WaveformLayer {
    WaveformLayer {
        kind: WaveformType::Fad,
        design: WaveformDesign::Default,
        pos_x: 100.0,
        pos_y: 300.0,
        width,
        fill1: Rgba8::WHITE,
        fill2: None,
        fill3: None,
        glow: None,
    }
}

#[test]
fn anchors_walk_bands_twice_between_baseline_points() {
    let pts = ribbon_anchors(&[10.0, 20.0, 30.0], 3, Point::new(0.0, 50.0)).unwrap();
    assert_eq!(pts.len(), 8);
    assert_eq!(pts[0], Point::new(0.0, 50.0));
    assert_eq!(pts[1], Point::new(25.0, 40.0));
    assert_eq!(pts[3], Point::new(75.0, 20.0));
    assert_eq!(pts[4], Point::new(100.0, 40.0));
    assert_eq!(pts[7], Point::new(175.0, 50.0));
}

#[test]
fn ribbon_bounding_box_matches_configured_width() {
    let amps = [5.0, 40.0, 12.0, 80.0, 3.0];
    for width in [120.0, 640.0, 1500.0] {
        let bbox = ribbon_path(&amps, amps.len(), &layer(width))
            .unwrap()
            .bounding_box();
        assert!((bbox.width() - width).abs() < 1e-6, "width {width}: {bbox:?}");
        assert!((bbox.x0 - 100.0).abs() < 1e-6);
    }
}

#[test]
fn ribbon_is_mirrored_about_baseline() {
    let amps = [5.0, 40.0, 12.0, 80.0, 3.0];
    let bbox = ribbon_path(&amps, amps.len(), &layer(500.0))
        .unwrap()
        .bounding_box();
    assert!((bbox.y0 + bbox.y1 - 600.0).abs() < 1e-6);
    assert!(bbox.y0 < 300.0 - 70.0);
}

#[test]
fn silent_frame_collapses_to_baseline() {
    let bbox = ribbon_path(&[0.0; 4], 4, &layer(500.0))
        .unwrap()
        .bounding_box();
    assert!(bbox.height().abs() < 1e-9);
}

#[test]
fn short_frame_is_out_of_range() {
    let err = ribbon_path(&[1.0, 2.0], 3, &layer(500.0)).unwrap_err();
    assert!(matches!(
        err,
        AudiogramError::IndexOutOfRange { index: 2, len: 2, .. }
    ));
}

#[test]
fn zero_bands_is_out_of_range() {
    assert!(matches!(
        ribbon_path(&[], 0, &layer(500.0)),
        Err(AudiogramError::IndexOutOfRange { .. })
    ));
}
