use super::*;

fn pixel(pixmap: &vello_cpu::Pixmap, x: u32, y: u32) -> [u8; 4] {
    let idx = ((y * u32::from(pixmap.width()) + x) * 4) as usize;
    let d = pixmap.data_as_u8_slice();
    [d[idx], d[idx + 1], d[idx + 2], d[idx + 3]]
}

#[test]
fn fill_rect_covers_interior_only() {
    let pixmap = render_offscreen(16, 16, |p| {
        p.fill_rect(Rect::new(4.0, 4.0, 12.0, 12.0), Rgba8::rgb(255, 0, 0));
        Ok(())
    })
    .unwrap();

    assert_eq!(pixel(&pixmap, 8, 8), [255, 0, 0, 255]);
    assert_eq!(pixel(&pixmap, 1, 1), [0, 0, 0, 0]);
}

#[test]
fn fill_circle_paints_center_not_corner() {
    let pixmap = render_offscreen(20, 20, |p| {
        p.fill_circle(Point::new(10.0, 10.0), 6.0, Rgba8::WHITE);
        Ok(())
    })
    .unwrap();

    assert_eq!(pixel(&pixmap, 10, 10)[3], 255);
    assert_eq!(pixel(&pixmap, 0, 0)[3], 0);
}

#[test]
fn draw_image_places_top_left_at_origin() {
    let image = PremulImage {
        width: 2,
        height: 2,
        data: [0, 0, 255, 255].repeat(4),
    };
    let pixmap = render_offscreen(8, 8, |p| p.draw_image(&image, Point::new(4.0, 4.0), 1.0)).unwrap();

    assert_eq!(pixel(&pixmap, 4, 4), [0, 0, 255, 255]);
    assert_eq!(pixel(&pixmap, 5, 5), [0, 0, 255, 255]);
    assert_eq!(pixel(&pixmap, 3, 3)[3], 0);
}

#[test]
fn premul_image_length_mismatch_is_rejected() {
    let image = PremulImage {
        width: 2,
        height: 2,
        data: vec![0; 7],
    };
    assert!(matches!(
        premul_image_to_pixmap(&image),
        Err(AudiogramError::ResourceLoad(_))
    ));
}

#[test]
fn clear_pixmap_sets_every_pixel() {
    let mut pixmap = vello_cpu::Pixmap::new(3, 2);
    clear_pixmap(&mut pixmap, [1, 2, 3, 4]);
    assert!(pixmap.data_as_u8_slice().chunks_exact(4).all(|px| px == [1, 2, 3, 4]));
}
