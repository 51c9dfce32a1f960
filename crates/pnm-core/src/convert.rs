//! Conversions between the three plane variants.
//!
//! Each function clones when the image already has the target variant, so
//! callers always get an independent image back. Conversions toward richer
//! variants are lossless; Rgb to Gray averages channels and Gray to Bitmap
//! thresholds at zero, both lossy by design of the format family.

use crate::error::Result;
use crate::image::Image;
use crate::plane::PixelPlane;

/// Converts any image to the RGB (P3) variant.
///
/// Gray intensities are replicated into all three channels. A source with
/// maxval 1 (bitmaps, or a graymap declared two-level) is scaled into the
/// target's default maxval of 255; any other maxval is preserved.
pub fn to_rgb(image: &Image) -> Result<Image> {
    let (width, height) = image.dimensions();
    match image.plane() {
        PixelPlane::Rgb { .. } => Ok(image.clone()),
        PixelPlane::Gray { maxval, pixels } => {
            let (maxval, scale) = if *maxval == 1 { (255, 255) } else { (*maxval, 1) };
            let pixels = pixels.iter().map(|&v| [v * scale; 3]).collect();
            image.rebuild(PixelPlane::Rgb { maxval, pixels }, width, height)
        }
        PixelPlane::Bitmap { bits } => {
            let pixels = bits.iter().map(|&b| [b * 255; 3]).collect();
            image.rebuild(PixelPlane::Rgb { maxval: 255, pixels }, width, height)
        }
    }
}

/// Converts any image to the grayscale (P2) variant.
///
/// RGB pixels collapse to the unweighted integer mean of their channels,
/// keeping the source maxval. Bitmap bits scale into the default maxval 255.
pub fn to_gray(image: &Image) -> Result<Image> {
    let (width, height) = image.dimensions();
    match image.plane() {
        PixelPlane::Gray { .. } => Ok(image.clone()),
        PixelPlane::Rgb { maxval, pixels } => {
            let pixels = pixels.iter().map(|p| (p[0] + p[1] + p[2]) / 3).collect();
            image.rebuild(
                PixelPlane::Gray {
                    maxval: *maxval,
                    pixels,
                },
                width,
                height,
            )
        }
        PixelPlane::Bitmap { bits } => {
            let pixels = bits.iter().map(|&b| b * 255).collect();
            image.rebuild(
                PixelPlane::Gray {
                    maxval: 255,
                    pixels,
                },
                width,
                height,
            )
        }
    }
}

/// Converts any image to the bitmap (P1) variant.
///
/// Any value above zero becomes 1. RGB sources pass through the grayscale
/// conversion first. The result's maxval is the implicit bitmap 1.
pub fn to_bitmap(image: &Image) -> Result<Image> {
    let (width, height) = image.dimensions();
    match image.plane() {
        PixelPlane::Bitmap { .. } => Ok(image.clone()),
        PixelPlane::Gray { pixels, .. } => {
            let bits = pixels.iter().map(|&v| (v > 0) as i32).collect();
            image.rebuild(PixelPlane::Bitmap { bits }, width, height)
        }
        PixelPlane::Rgb { .. } => to_bitmap(&to_gray(image)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::PnmFormat;

    fn gray(maxval: i32, pixels: Vec<i32>, width: u32, height: u32) -> Image {
        Image::from_plane(PixelPlane::Gray { maxval, pixels }, width, height).unwrap()
    }

    #[test]
    fn test_gray_to_rgb_replicates_channels() {
        let img = gray(255, vec![10, 20], 2, 1);
        let rgb = to_rgb(&img).unwrap();
        assert_eq!(rgb.format(), PnmFormat::Ppm);
        assert_eq!(rgb.maxval(), 255);
        match rgb.plane() {
            PixelPlane::Rgb { pixels, .. } => {
                assert_eq!(pixels.as_slice(), &[[10, 10, 10], [20, 20, 20]])
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_two_level_gray_scales_up() {
        let img = gray(1, vec![0, 1], 2, 1);
        let rgb = to_rgb(&img).unwrap();
        assert_eq!(rgb.maxval(), 255);
        match rgb.plane() {
            PixelPlane::Rgb { pixels, .. } => {
                assert_eq!(pixels.as_slice(), &[[0, 0, 0], [255, 255, 255]])
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_bitmap_to_rgb() {
        let img =
            Image::from_plane(PixelPlane::Bitmap { bits: vec![1, 0] }, 2, 1).unwrap();
        let rgb = to_rgb(&img).unwrap();
        match rgb.plane() {
            PixelPlane::Rgb { pixels, .. } => {
                assert_eq!(pixels.as_slice(), &[[255, 255, 255], [0, 0, 0]])
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_rgb_to_gray_is_integer_mean() {
        let plane = PixelPlane::Rgb {
            maxval: 255,
            pixels: vec![[10, 20, 31], [0, 0, 2]],
        };
        let img = Image::from_plane(plane, 2, 1).unwrap();
        let g = to_gray(&img).unwrap();
        assert_eq!(g.maxval(), 255);
        match g.plane() {
            PixelPlane::Gray { pixels, .. } => assert_eq!(pixels.as_slice(), &[20, 0]),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_gray_to_bitmap_thresholds_at_zero() {
        let img = gray(255, vec![0, 1, 200], 3, 1);
        let b = to_bitmap(&img).unwrap();
        assert_eq!(b.maxval(), 1);
        match b.plane() {
            PixelPlane::Bitmap { bits } => assert_eq!(bits.as_slice(), &[0, 1, 1]),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_to_gray_idempotent() {
        let img = gray(99, vec![4, 5, 6], 3, 1);
        let once = to_gray(&img).unwrap();
        let twice = to_gray(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_to_bitmap_idempotent() {
        let img = gray(255, vec![0, 3], 2, 1);
        let once = to_bitmap(&img).unwrap();
        let twice = to_bitmap(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_conversion_keeps_metadata() {
        let mut img = gray(255, vec![1], 1, 1);
        img.append_comment_line("scanned plate");
        let rgb = to_rgb(&img).unwrap();
        assert_eq!(rgb.comment(), "scanned plate");
    }
}
