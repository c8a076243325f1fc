use super::*;
use crate::foundation::core::Rgba8;
use crate::render::painter::render_offscreen;

fn layer(kind: TrackerType) -> TrackerLayer {
    TrackerLayer {
        display: true,
        kind,
        pos_x: 10.0,
        pos_y: 20.0,
        length: 200.0,
        height: 50.0,
        fill: Rgba8::WHITE,
        opacity: 100.0,
    }
}

#[test]
fn bar_grows_with_progress() {
    let l = layer(TrackerType::HorizontalBar);
    assert_eq!(bar_rect(&l, 0.0).width(), 0.0);
    assert_eq!(bar_rect(&l, 0.25), Rect::new(10.0, 20.0, 60.0, 30.0));
    assert_eq!(bar_rect(&l, 2.0).width(), 200.0);
}

#[test]
fn border_trace_walks_clockwise() {
    let l = layer(TrackerType::BoxBorder);
    assert!(border_trace(&l, 0.0).is_none());

    // Perimeter is 500: half of it covers the top edge plus the full right edge.
    let path = border_trace(&l, 0.5).unwrap();
    let end = path.elements().last().and_then(|el| el.end_point()).unwrap();
    assert!((end - Point::new(210.0, 70.0)).hypot() < 1e-9);

    let quarter = border_trace(&l, 0.2).unwrap();
    let end = quarter.elements().last().and_then(|el| el.end_point()).unwrap();
    assert!((end.x - 110.0).abs() < 1e-9);
    assert!((end.y - 20.0).abs() < 1e-9);

    let full = border_trace(&l, 1.0).unwrap();
    let end = full.elements().last().and_then(|el| el.end_point()).unwrap();
    assert!((end - Point::new(10.0, 20.0)).hypot() < 1e-9);
}

#[test]
fn hidden_tracker_draws_nothing() {
    let mut l = layer(TrackerType::HorizontalBar);
    l.display = false;
    let pixmap = render_offscreen(240, 80, |p| {
        draw_tracker(&l, 1.0, p);
        Ok(())
    })
    .unwrap();
    assert!(pixmap.data_as_u8_slice().iter().all(|&b| b == 0));
}

#[test]
fn bar_is_ten_pixels_tall() {
    let l = layer(TrackerType::HorizontalBar);
    let pixmap = render_offscreen(240, 80, |p| {
        draw_tracker(&l, 0.5, p);
        Ok(())
    })
    .unwrap();
    let a = |x: usize, y: usize| pixmap.data_as_u8_slice()[(y * 240 + x) * 4 + 3];
    assert_eq!(a(50, 25), 255);
    assert_eq!(a(50, 31), 0);
    assert_eq!(a(150, 25), 0);
}
