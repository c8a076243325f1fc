use super::*;

#[test]
fn radius_zero_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    assert_eq!(blur_rgba8_premul(&src, 1, 2, 0, 1.0).unwrap(), src);
}

#[test]
fn constant_image_is_unchanged() {
    let (w, h) = (4u32, 3u32);
    let src = [10u8, 20, 30, 40].repeat((w * h) as usize);
    assert_eq!(blur_radius(&src, w, h, 3).unwrap(), src);
}

#[test]
fn radius_larger_than_image_stays_constant() {
    let src = [200u8, 100, 50, 255].repeat(6);
    assert_eq!(blur_radius(&src, 3, 2, 200).unwrap(), src);
}

#[test]
fn single_pixel_spreads_and_conserves_energy() {
    let (w, h) = (9u32, 9u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((4 * w + 4) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_rgba8_premul(&src, w, h, 2, 1.2).unwrap();

    assert!(out.chunks_exact(4).filter(|px| px[3] != 0).count() > 1);
    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 6, "{sum_a}");
}

#[test]
fn mirrored_edges_keep_edge_mass() {
    // A bright left column blurred with mirrored edges keeps more weight at x=0 than at x=1.
    let (w, h) = (6u32, 1u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    src[..4].copy_from_slice(&[255, 255, 255, 255]);
    let out = blur_radius(&src, w, h, 3).unwrap();
    assert!(out[3] > out[7]);
    assert!(out[7] > 0);
}

#[test]
fn reflect_index_mirrors_both_sides() {
    assert_eq!(reflect(-1, 4), 0);
    assert_eq!(reflect(-2, 4), 1);
    assert_eq!(reflect(4, 4), 3);
    assert_eq!(reflect(5, 4), 2);
    assert_eq!(reflect(2, 4), 2);
    assert_eq!(reflect(-9, 4), 0);
}

#[test]
fn length_mismatch_is_rejected() {
    assert!(matches!(
        blur_radius(&[0; 7], 1, 2, 3),
        Err(AudiogramError::InvalidInput(_))
    ));
}
