use super::*;
use crate::foundation::core::Rect;

fn square() -> BezPath {
    Rect::new(40.0, 40.0, 60.0, 60.0).to_path(0.1)
}

fn alpha_at(img: &PremulImage, origin: Point, x: f64, y: f64) -> u8 {
    let lx = (x - origin.x) as u32;
    let ly = (y - origin.y) as u32;
    img.data[((ly * img.width + lx) * 4 + 3) as usize]
}

#[test]
fn halo_extends_past_the_shape() {
    let spec = GlowSpec {
        color: Rgba8::rgb(0, 200, 255),
        size: 5,
        opacity: 1.0,
    };
    let (halo, origin) = glow_layer(&square(), &spec).unwrap();

    assert!(origin.x <= 40.0 - 10.0 && origin.y <= 40.0 - 10.0);
    assert!(alpha_at(&halo, origin, 50.0, 50.0) > 200);
    assert!(alpha_at(&halo, origin, 62.0, 50.0) > 0);
    assert_eq!(alpha_at(&halo, origin, origin.x, origin.y), 0);
}

#[test]
fn halo_is_tinted_with_glow_color() {
    let spec = GlowSpec {
        color: Rgba8::rgb(255, 0, 0),
        size: 3,
        opacity: 1.0,
    };
    let (halo, origin) = glow_layer(&square(), &spec).unwrap();
    let idx = (((50.0 - origin.y) as u32 * halo.width + (50.0 - origin.x) as u32) * 4) as usize;
    let px = &halo.data[idx..idx + 4];
    assert_eq!(px[1], 0);
    assert_eq!(px[2], 0);
    assert_eq!(px[0], px[3]);
}

#[test]
fn zero_opacity_core_produces_no_halo() {
    let spec = GlowSpec {
        color: Rgba8::WHITE,
        size: 4,
        opacity: 0.0,
    };
    let (halo, _) = glow_layer(&square(), &spec).unwrap();
    assert!(halo.data.iter().all(|&b| b == 0));
}
