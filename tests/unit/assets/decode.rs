use std::io::Cursor;

use super::*;

#[test]
fn decode_png_dimensions_and_premul() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50, 200, 128]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let decoded = decode_image(&buf).unwrap();
    assert_eq!((decoded.width, decoded.height), (1, 1));
    assert_eq!(
        decoded.data,
        vec![
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
}

#[test]
fn garbage_bytes_are_a_resource_error() {
    assert!(matches!(
        decode_image(b"not an image"),
        Err(AudiogramError::ResourceLoad(_))
    ));
}

#[test]
fn straight_rgba_length_is_checked() {
    assert!(PremulImage::from_straight_rgba8(2, 2, vec![0; 15]).is_err());
    let img = PremulImage::from_straight_rgba8(1, 1, vec![200, 100, 0, 0]).unwrap();
    assert_eq!(img.data, vec![0, 0, 0, 0]);
}

#[test]
fn transparent_has_expected_size() {
    let img = PremulImage::transparent(3, 2);
    assert_eq!(img.data.len(), 24);
    assert!(img.data.iter().all(|&b| b == 0));
}
