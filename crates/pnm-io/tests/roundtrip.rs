//! File-level round trips through the codec.

use pnm_core::{Color, PnmFormat};
use std::fs;
use tempfile::tempdir;

#[test]
fn read_write_round_trip_preserves_image() {
    let dir = tempdir().expect("tempdir");
    let src = dir.path().join("gradient.pgm");
    fs::write(&src, "P2\n# synthetic gradient\n3 3\n255\n10 20 30\n40 50 60\n70 80 90\n")
        .expect("write fixture");

    let img = pnm_io::read(&src).expect("read");
    assert_eq!(img.path(), src);
    assert_eq!(img.comment(), "synthetic gradient");

    let dst = pnm_io::write(&img, dir.path().join("copy.pgm")).expect("write");
    let again = pnm_io::read(&dst).expect("re-read");
    assert_eq!(again.plane(), img.plane());
    assert_eq!(again.dimensions(), img.dimensions());
    assert_eq!(again.maxval(), img.maxval());
    assert_eq!(again.comment(), img.comment());
}

#[test]
fn write_appends_missing_extension() {
    let dir = tempdir().expect("tempdir");
    let src = dir.path().join("dots.pbm");
    fs::write(&src, "P1\n2 2\n10\n01\n").expect("write fixture");
    let img = pnm_io::read(&src).expect("read");

    let written = pnm_io::write(&img, dir.path().join("out")).expect("write");
    assert_eq!(written, dir.path().join("out.pbm"));

    // An already-correct extension is left alone, case-insensitively.
    let kept = pnm_io::write(&img, dir.path().join("out2.PBM")).expect("write");
    assert_eq!(kept, dir.path().join("out2.PBM"));
}

#[test]
fn read_missing_file_is_io_error() {
    let dir = tempdir().expect("tempdir");
    let err = pnm_io::read(dir.path().join("absent.pgm")).unwrap_err();
    assert!(matches!(err, pnm_io::IoError::Io(_)));
}

#[test]
fn read_binary_variant_is_rejected_with_cause() {
    let dir = tempdir().expect("tempdir");
    let src = dir.path().join("binary.pgm");
    fs::write(&src, "P5\n2 2\n255\n").expect("write fixture");
    let err = pnm_io::read(&src).unwrap_err();
    assert!(err.to_string().contains("P5"));
}

#[test]
fn decoded_pixels_read_in_reference_range() {
    let dir = tempdir().expect("tempdir");
    let src = dir.path().join("half.pgm");
    // maxval 4: raw value 2 reads as mid gray
    fs::write(&src, "P2\n1 1\n4\n2\n").expect("write fixture");
    let img = pnm_io::read(&src).expect("read");
    assert_eq!(img.format(), PnmFormat::Pgm);
    assert_eq!(img.pixel(0, 0), Some(Color::gray(128)));
}
