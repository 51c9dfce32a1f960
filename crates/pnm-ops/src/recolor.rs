//! Variant-changing transforms: grayscale, thresholding, channel
//! separation, and the four-panel pop-art effect.

use crate::registry::TransformRegistry;
use crate::transform::{int_param, text_param, ParamOption, ParamValue, Transform};
use crate::{OpsError, OpsResult};
use pnm_core::{convert, Image, PixelPlane};
use rand::seq::SliceRandom;
use rand::thread_rng;

/// Collapse an RGB image to grayscale through the conversion pipeline.
pub struct Grayscale;

impl Transform for Grayscale {
    fn name(&self) -> &'static str {
        "grayscale"
    }

    fn description(&self) -> &'static str {
        "Average RGB channels into a graymap"
    }

    fn supports_bitmap(&self) -> bool {
        false
    }

    fn supports_toned(&self) -> bool {
        true
    }

    fn apply(
        &self,
        image: Image,
        _param: Option<&ParamValue>,
        _registry: &TransformRegistry,
    ) -> OpsResult<Image> {
        if matches!(image.plane(), PixelPlane::Gray { .. }) {
            return Ok(image);
        }
        Ok(convert::to_gray(&image)?)
    }
}

/// Threshold a toned image into a bitmap.
///
/// The thresholds are fixed percentages of the 8-bit reference ceiling, not
/// of the image's own maxval.
pub struct BlackWhite;

impl Transform for BlackWhite {
    fn name(&self) -> &'static str {
        "threshold"
    }

    fn description(&self) -> &'static str {
        "Binarize against a percentage of the 255 ceiling"
    }

    fn supports_bitmap(&self) -> bool {
        false
    }

    fn supports_toned(&self) -> bool {
        true
    }

    fn options(&self) -> Vec<ParamOption> {
        vec![
            ParamOption::new("10%", ParamValue::Int(25)),
            ParamOption::new("25%", ParamValue::Int(63)),
            ParamOption::new("33%", ParamValue::Int(84)),
            ParamOption::new("50%", ParamValue::Int(127)),
            ParamOption::new("66%", ParamValue::Int(168)),
            ParamOption::new("75%", ParamValue::Int(191)),
            ParamOption::new("90%", ParamValue::Int(229)),
        ]
    }

    fn apply(
        &self,
        image: Image,
        param: Option<&ParamValue>,
        registry: &TransformRegistry,
    ) -> OpsResult<Image> {
        let threshold = int_param(param, 127) as i32;
        let image = if matches!(image.plane(), PixelPlane::Rgb { .. }) {
            registry.apply("grayscale", image, None)?
        } else {
            image
        };
        let (width, height) = image.dimensions();
        match image.plane() {
            PixelPlane::Gray { pixels, .. } => {
                let bits = pixels.iter().map(|&v| (v > threshold) as i32).collect();
                Ok(image.rebuild(PixelPlane::Bitmap { bits }, width, height)?)
            }
            _ => Err(OpsError::Precondition(
                "threshold expects a gray plane after staging".into(),
            )),
        }
    }
}

/// Keep one RGB channel and zero the other two.
pub struct ChannelSeparation;

impl Transform for ChannelSeparation {
    fn name(&self) -> &'static str {
        "channel"
    }

    fn description(&self) -> &'static str {
        "Isolate the red, green, or blue channel"
    }

    fn supports_bitmap(&self) -> bool {
        false
    }

    fn supports_toned(&self) -> bool {
        true
    }

    fn options(&self) -> Vec<ParamOption> {
        vec![
            ParamOption::new("red", ParamValue::Text("r")),
            ParamOption::new("green", ParamValue::Text("g")),
            ParamOption::new("blue", ParamValue::Text("b")),
        ]
    }

    fn apply(
        &self,
        image: Image,
        param: Option<&ParamValue>,
        _registry: &TransformRegistry,
    ) -> OpsResult<Image> {
        let keep = match text_param(param, "r") {
            "b" => 2,
            "g" => 1,
            _ => 0,
        };
        let mut image = if matches!(image.plane(), PixelPlane::Rgb { .. }) {
            image
        } else {
            convert::to_rgb(&image)?
        };
        if let PixelPlane::Rgb { pixels, .. } = image.plane_mut() {
            for pixel in pixels {
                for (channel, value) in pixel.iter_mut().enumerate() {
                    if channel != keep {
                        *value = 0;
                    }
                }
            }
        }
        Ok(image)
    }
}

/// The four fixed 4-color palettes of the pop-art effect.
const PALETTES: [[[i32; 3]; 4]; 4] = [
    [[45, 165, 195], [149, 248, 63], [209, 206, 54], [95, 15, 191]],
    [[127, 219, 218], [173, 228, 152], [237, 230, 130], [254, 191, 99]],
    [[0, 0, 92], [106, 9, 125], [192, 96, 161], [255, 220, 180]],
    [[235, 236, 241], [32, 106, 93], [31, 64, 104], [27, 28, 37]],
];

/// Four-panel pop-art recolor.
///
/// The gray range is quantized into four bands, each band mapped to one
/// color of a palette; four copies of the image, one per palette, tile a
/// canvas of doubled width and height. Palette order is shuffled per call.
/// In mirrored mode the panels of the last two palettes use the
/// horizontally mirrored source.
pub struct PopArt;

impl Transform for PopArt {
    fn name(&self) -> &'static str {
        "pop-art"
    }

    fn description(&self) -> &'static str {
        "Tile four recolored copies into a doubled canvas"
    }

    fn supports_bitmap(&self) -> bool {
        false
    }

    fn supports_toned(&self) -> bool {
        true
    }

    fn options(&self) -> Vec<ParamOption> {
        vec![
            ParamOption::new("normal", ParamValue::Int(0)),
            ParamOption::new("mirrored", ParamValue::Int(1)),
        ]
    }

    fn apply(
        &self,
        image: Image,
        param: Option<&ParamValue>,
        registry: &TransformRegistry,
    ) -> OpsResult<Image> {
        let mirrored = int_param(param, 0) == 1;
        let image = if matches!(image.plane(), PixelPlane::Rgb { .. }) {
            registry.apply("grayscale", image, None)?
        } else {
            image
        };
        let (w, h) = (image.width() as usize, image.height() as usize);
        let maxval = image.maxval();
        let gray = match image.plane() {
            PixelPlane::Gray { pixels, .. } => pixels,
            _ => {
                return Err(OpsError::Precondition(
                    "pop-art expects a gray plane after staging".into(),
                ));
            }
        };

        let mut palettes = PALETTES;
        palettes.shuffle(&mut thread_rng());

        let per_band = maxval as f64 / palettes.len() as f64;
        let band = |v: i32| ((v as f64 / per_band) as usize).min(3);

        // One recolored copy per palette; in mirrored mode the last two
        // read the source right-to-left.
        let panels: Vec<Vec<[i32; 3]>> = palettes
            .iter()
            .enumerate()
            .map(|(i, palette)| {
                if mirrored && i >= palettes.len() / 2 {
                    (0..h)
                        .flat_map(|r| (0..w).rev().map(move |c| (r, c)))
                        .map(|(r, c)| palette[band(gray[r * w + c])])
                        .collect()
                } else {
                    gray.iter().map(|&v| palette[band(v)]).collect()
                }
            })
            .collect();

        // Panel selection and source position both stride by the
        // pre-doubling width, preserving the original arrangement.
        let (out_w, out_h) = (w * 2, h * 2);
        let mut pixels = Vec::with_capacity(out_w * out_h);
        for r in 0..out_h {
            for c in 0..out_w {
                let panel = (c / w).min(1) * 2 + (r / w).min(1);
                let source = ((r % w) * w + (c % h)).min(gray.len() - 1);
                pixels.push(panels[panel][source]);
            }
        }

        Ok(image.rebuild(
            PixelPlane::Rgb {
                maxval: 255,
                pixels,
            },
            out_w as u32,
            out_h as u32,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TransformRegistry;

    fn gray(maxval: i32, pixels: Vec<i32>, width: u32, height: u32) -> Image {
        Image::from_plane(PixelPlane::Gray { maxval, pixels }, width, height).unwrap()
    }

    fn rgb_pixels(image: &Image) -> &[[i32; 3]] {
        match image.plane() {
            PixelPlane::Rgb { pixels, .. } => pixels,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_threshold_binarizes_and_retags() {
        let reg = TransformRegistry::new();
        let img = gray(255, vec![0, 127, 128, 255], 4, 1);
        let out = reg
            .apply("threshold", img, Some(&ParamValue::Int(127)))
            .unwrap();
        assert!(out.is_binary());
        assert_eq!(out.maxval(), 1);
        match out.plane() {
            PixelPlane::Bitmap { bits } => assert_eq!(bits.as_slice(), &[0, 0, 1, 1]),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_threshold_stages_rgb_through_grayscale() {
        let reg = TransformRegistry::new();
        let plane = PixelPlane::Rgb {
            maxval: 255,
            pixels: vec![[255, 255, 255], [10, 10, 10]],
        };
        let img = Image::from_plane(plane, 2, 1).unwrap();
        let out = reg
            .apply("threshold", img, Some(&ParamValue::Int(127)))
            .unwrap();
        match out.plane() {
            PixelPlane::Bitmap { bits } => assert_eq!(bits.as_slice(), &[1, 0]),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_channel_keeps_only_selected() {
        let reg = TransformRegistry::new();
        let plane = PixelPlane::Rgb {
            maxval: 255,
            pixels: vec![[10, 20, 30]],
        };
        let img = Image::from_plane(plane, 1, 1).unwrap();
        let out = ChannelSeparation
            .apply(img, Some(&ParamValue::Text("g")), &reg)
            .unwrap();
        assert_eq!(rgb_pixels(&out), &[[0, 20, 0]]);
    }

    #[test]
    fn test_channel_promotes_gray_to_rgb() {
        let reg = TransformRegistry::new();
        let img = gray(255, vec![40], 1, 1);
        let out = ChannelSeparation.apply(img, None, &reg).unwrap();
        assert_eq!(rgb_pixels(&out), &[[40, 0, 0]]);
    }

    #[test]
    fn test_pop_art_doubles_canvas_and_recolors() {
        let reg = TransformRegistry::new();
        // Constant mid-gray: every panel is a solid band-2 color.
        let img = gray(255, vec![128; 9], 3, 3);
        let out = reg.apply("pop-art", img, None).unwrap();
        assert_eq!(out.dimensions(), (6, 6));
        assert_eq!(out.maxval(), 255);
        assert!(out.validate().is_ok());

        // 128 / (255/4) = 2.007.. -> band 2 of each palette, in some order.
        let mut panel_colors: Vec<[i32; 3]> = [(0u32, 0u32), (0, 3), (3, 0), (3, 3)]
            .iter()
            .map(|&(r, c)| {
                let idx = r as usize * 6 + c as usize;
                rgb_pixels(&out)[idx]
            })
            .collect();
        panel_colors.sort();
        let mut expected: Vec<[i32; 3]> = PALETTES.iter().map(|p| p[2]).collect();
        expected.sort();
        assert_eq!(panel_colors, expected);
    }

    #[test]
    fn test_pop_art_band_clamps_at_maxval() {
        let reg = TransformRegistry::new();
        // A pixel at exactly maxval quantizes past the last band and must
        // clamp to it instead of overflowing.
        let img = gray(255, vec![255; 4], 2, 2);
        let out = reg.apply("pop-art", img, None).unwrap();
        let first = rgb_pixels(&out)[0];
        assert!(PALETTES.iter().any(|p| p[3] == first));
    }

    #[test]
    fn test_pop_art_mirrored_panels_flip() {
        let reg = TransformRegistry::new();
        // Left column black, right column white: mirrored panels swap them.
        let img = gray(255, vec![0, 255, 0, 255], 2, 2);
        let out = reg
            .apply("pop-art", img, Some(&ParamValue::Int(1)))
            .unwrap();
        let pixels = rgb_pixels(&out);
        // Panels sit at (c/w)*2 + (r/w): the left-hand panels 0 and 1 are
        // unmirrored, the right-hand panels 2 and 3 mirrored.
        let unmirrored = pixels[0]; // panel 0, source (0,0) -> band 0
        let mirrored = pixels[2]; // panel 2, source column flipped -> band 3
        assert!(PALETTES.iter().any(|p| p[0] == unmirrored));
        assert!(PALETTES.iter().any(|p| p[3] == mirrored));
    }
}
