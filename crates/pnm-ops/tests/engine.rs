//! End-to-end runs through the codec and the transform registry.

use pnm_core::PixelPlane;
use pnm_ops::{ParamValue, TransformRegistry};

fn gray_values(image: &pnm_core::Image) -> &[i32] {
    match image.plane() {
        PixelPlane::Gray { pixels, .. } => pixels,
        _ => panic!("expected gray plane"),
    }
}

#[test]
fn negative_of_decoded_gradient() {
    let reg = TransformRegistry::new();
    let img = pnm_io::decode("P2\n3 3\n255\n10 20 30\n40 50 60\n70 80 90\n").expect("decode");
    let out = reg.apply("negative", img, None).expect("negative");
    assert_eq!(
        gray_values(&out),
        &[245, 235, 225, 215, 205, 195, 185, 175, 165]
    );
}

#[test]
fn negative_round_trips_through_text() {
    let reg = TransformRegistry::new();
    let img = pnm_io::decode("P2\n2 2\n255\n0 10\n20 255\n").expect("decode");
    let out = reg.apply("negative", img, None).expect("negative");
    let text = pnm_io::encode(&out);
    let again = pnm_io::decode(&text).expect("re-decode");
    assert_eq!(again.plane(), out.plane());
}

#[test]
fn convolution_shrinks_decoded_image() {
    let reg = TransformRegistry::new();
    let img = pnm_io::decode(
        "P2\n5 5\n255\n\
         1 1 1 1 1\n1 1 1 1 1\n1 1 1 1 1\n1 1 1 1 1\n1 1 1 1 1\n",
    )
    .expect("decode");
    let blurred = reg
        .apply("gaussian", img.clone(), Some(&ParamValue::Int(3)))
        .expect("gaussian 3x3");
    assert_eq!(blurred.dimensions(), (3, 3));
    let wide = reg
        .apply("gaussian", img, Some(&ParamValue::Int(5)))
        .expect("gaussian 5x5");
    assert_eq!(wide.dimensions(), (1, 1));
}

#[test]
fn morphology_pipeline_on_decoded_bitmap() {
    let reg = TransformRegistry::new();
    let img = pnm_io::decode("P1\n5 5\n11111\n11111\n11011\n11111\n11111\n").expect("decode");

    let eroded = reg
        .apply("erode", img.clone(), Some(&ParamValue::Int(3)))
        .expect("erode");
    let dilated = reg
        .apply("dilate", img.clone(), Some(&ParamValue::Int(3)))
        .expect("dilate");

    let original = match img.plane() {
        PixelPlane::Bitmap { bits } => bits,
        _ => unreachable!(),
    };
    let eroded_bits = match eroded.plane() {
        PixelPlane::Bitmap { bits } => bits,
        _ => unreachable!(),
    };
    let dilated_bits = match dilated.plane() {
        PixelPlane::Bitmap { bits } => bits,
        _ => unreachable!(),
    };
    for i in 0..original.len() {
        assert!(eroded_bits[i] <= original[i], "erosion grew pixel {i}");
        assert!(dilated_bits[i] >= original[i], "dilation shrank pixel {i}");
    }
}

#[test]
fn grayscale_then_threshold_retags_to_bitmap() {
    let reg = TransformRegistry::new();
    let img = pnm_io::decode("P3\n2 1\n255\n200 200 200 10 10 10\n").expect("decode");
    let out = reg
        .apply("threshold", img, Some(&ParamValue::Int(127)))
        .expect("threshold");
    assert!(out.is_binary());
    assert_eq!(pnm_io::encode(&out), "P1\n2 1\n1\n0\n");
}

#[test]
fn rotate_keeps_pixels_across_save_and_load() {
    let reg = TransformRegistry::new();
    let img = pnm_io::decode("P2\n3 2\n255\n1 2 3\n4 5 6\n").expect("decode");
    let rotated = reg
        .apply("rotate", img, Some(&ParamValue::Int(90)))
        .expect("rotate");
    assert_eq!(rotated.dimensions(), (2, 3));
    let again = pnm_io::decode(&pnm_io::encode(&rotated)).expect("re-decode");
    assert_eq!(gray_values(&again), &[4, 1, 5, 2, 6, 3]);
}

#[test]
fn pop_art_output_survives_round_trip() {
    let reg = TransformRegistry::new();
    let img = pnm_io::decode("P2\n2 2\n255\n0 85\n170 255\n").expect("decode");
    let art = reg.apply("pop-art", img, None).expect("pop-art");
    assert_eq!(art.dimensions(), (4, 4));
    let again = pnm_io::decode(&pnm_io::encode(&art)).expect("re-decode");
    assert_eq!(again.plane(), art.plane());
}
