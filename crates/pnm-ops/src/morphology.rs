//! Binary morphology over bitmap images.
//!
//! Erosion and dilation walk the interior pixels (those whose whole element
//! footprint is in bounds) and scatter writes outward: erosion forces the
//! element-aligned neighbors of every background pixel to 0, dilation forces
//! the element-aligned neighbors of every foreground pixel to 1. Reads come
//! from a snapshot of the input, so writes never cascade within one pass.
//! Border pixels are written through scattering but never drive it.
//!
//! Erosion only clears bits and dilation only sets them, so erosion output
//! is always a subset of the input and dilation output a superset.

use crate::registry::TransformRegistry;
use crate::transform::{int_param, ParamOption, ParamValue, Transform};
use crate::OpsResult;
use pnm_core::{Error, Image, PixelPlane, PnmFormat};

const EROSION_3X3: [i32; 9] = [
    1, 1, 0, //
    1, 1, 1, //
    0, 1, 1,
];

const DILATION_3X3: [i32; 9] = [
    1, 0, 1, //
    0, 1, 0, //
    1, 0, 0,
];

const ELEMENT_5X5: [i32; 25] = [
    1, 1, 0, 0, 1, //
    1, 0, 0, 1, 1, //
    1, 1, 0, 0, 0, //
    1, 1, 0, 0, 1, //
    1, 1, 1, 1, 1,
];

const ELEMENT_7X7: [i32; 49] = [
    0, 0, 1, 0, 0, 0, 0, //
    1, 1, 1, 1, 1, 0, 1, //
    0, 0, 1, 0, 0, 0, 0, //
    1, 1, 1, 1, 1, 0, 1, //
    0, 0, 1, 0, 0, 0, 0, //
    1, 1, 1, 1, 1, 0, 1, //
    1, 0, 0, 1, 0, 1, 1,
];

const ELEMENT_9X9: [i32; 81] = [
    0, 0, 1, 0, 0, 0, 0, 1, 1, //
    0, 0, 1, 1, 1, 1, 1, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 1, 1, //
    1, 1, 1, 1, 1, 1, 1, 1, 1, //
    0, 0, 1, 0, 0, 0, 0, 0, 0, //
    1, 1, 1, 1, 0, 0, 1, 0, 1, //
    0, 0, 1, 0, 1, 1, 0, 0, 0, //
    1, 1, 1, 0, 0, 1, 1, 0, 1, //
    1, 0, 0, 1, 0, 1, 1, 0, 0,
];

/// A fixed binary mask tested against pixel neighborhoods.
pub(crate) struct StructElement {
    size: usize,
    cells: &'static [i32],
}

impl StructElement {
    #[inline]
    fn cell(&self, row: usize, col: usize) -> i32 {
        self.cells[row * self.size + col]
    }
}

/// The erosion element for a given size choice. Unknown sizes fall back to
/// the 3x3 pattern.
pub(crate) fn erosion_element(size: i64) -> StructElement {
    match size {
        9 => StructElement { size: 9, cells: &ELEMENT_9X9 },
        7 => StructElement { size: 7, cells: &ELEMENT_7X7 },
        5 => StructElement { size: 5, cells: &ELEMENT_5X5 },
        _ => StructElement { size: 3, cells: &EROSION_3X3 },
    }
}

/// The dilation element for a given size choice. Only the 3x3 pattern
/// differs from the erosion set.
pub(crate) fn dilation_element(size: i64) -> StructElement {
    match size {
        9 => StructElement { size: 9, cells: &ELEMENT_9X9 },
        7 => StructElement { size: 7, cells: &ELEMENT_7X7 },
        5 => StructElement { size: 5, cells: &ELEMENT_5X5 },
        _ => StructElement { size: 3, cells: &DILATION_3X3 },
    }
}

fn size_options() -> Vec<ParamOption> {
    vec![
        ParamOption::new("3x3", ParamValue::Int(3)),
        ParamOption::new("5x5", ParamValue::Int(5)),
        ParamOption::new("7x7", ParamValue::Int(7)),
        ParamOption::new("9x9", ParamValue::Int(9)),
    ]
}

pub(crate) fn erode(mut image: Image, element: &StructElement) -> OpsResult<Image> {
    let (w, h) = (image.width() as usize, image.height() as usize);
    let format = image.format();
    let k = element.size / 2;
    match image.plane_mut() {
        PixelPlane::Bitmap { bits } => {
            let src = bits.clone();
            for r in k..h.saturating_sub(k) {
                for c in k..w.saturating_sub(k) {
                    if src[r * w + c] != 0 {
                        continue;
                    }
                    for er in 0..element.size {
                        for ec in 0..element.size {
                            if element.cell(er, ec) == 1 {
                                bits[(r - k + er) * w + (c - k + ec)] = 0;
                            }
                        }
                    }
                }
            }
        }
        _ => {
            return Err(Error::PlaneMismatch {
                expected: PnmFormat::Pbm,
                actual: format,
            }
            .into());
        }
    }
    Ok(image)
}

pub(crate) fn dilate(mut image: Image, element: &StructElement) -> OpsResult<Image> {
    let (w, h) = (image.width() as usize, image.height() as usize);
    let format = image.format();
    let k = element.size / 2;
    match image.plane_mut() {
        PixelPlane::Bitmap { bits } => {
            let src = bits.clone();
            for r in k..h.saturating_sub(k) {
                for c in k..w.saturating_sub(k) {
                    if src[r * w + c] != 1 {
                        continue;
                    }
                    for er in 0..element.size {
                        for ec in 0..element.size {
                            if element.cell(er, ec) == 1 {
                                bits[(r - k + er) * w + (c - k + ec)] = 1;
                            }
                        }
                    }
                }
            }
        }
        _ => {
            return Err(Error::PlaneMismatch {
                expected: PnmFormat::Pbm,
                actual: format,
            }
            .into());
        }
    }
    Ok(image)
}

/// Bitwise XOR of two equal-geometry bitmaps, stored into the first.
fn xor_bits(mut image: Image, other: &Image) -> OpsResult<Image> {
    let format = image.format();
    match (image.plane_mut(), other.plane()) {
        (PixelPlane::Bitmap { bits }, PixelPlane::Bitmap { bits: other_bits }) => {
            for (bit, other_bit) in bits.iter_mut().zip(other_bits) {
                *bit ^= *other_bit;
            }
        }
        _ => {
            return Err(Error::PlaneMismatch {
                expected: PnmFormat::Pbm,
                actual: format,
            }
            .into());
        }
    }
    Ok(image)
}

/// Set erosion with a fixed structuring element.
pub struct Erosion;

impl Transform for Erosion {
    fn name(&self) -> &'static str {
        "erode"
    }

    fn description(&self) -> &'static str {
        "Shrink foreground regions with a structuring element"
    }

    fn supports_bitmap(&self) -> bool {
        true
    }

    fn supports_toned(&self) -> bool {
        false
    }

    fn options(&self) -> Vec<ParamOption> {
        size_options()
    }

    fn apply(
        &self,
        image: Image,
        param: Option<&ParamValue>,
        _registry: &TransformRegistry,
    ) -> OpsResult<Image> {
        erode(image, &erosion_element(int_param(param, 3)))
    }
}

/// Set dilation with a fixed structuring element.
pub struct Dilation;

impl Transform for Dilation {
    fn name(&self) -> &'static str {
        "dilate"
    }

    fn description(&self) -> &'static str {
        "Grow foreground regions with a structuring element"
    }

    fn supports_bitmap(&self) -> bool {
        true
    }

    fn supports_toned(&self) -> bool {
        false
    }

    fn options(&self) -> Vec<ParamOption> {
        size_options()
    }

    fn apply(
        &self,
        image: Image,
        param: Option<&ParamValue>,
        _registry: &TransformRegistry,
    ) -> OpsResult<Image> {
        dilate(image, &dilation_element(int_param(param, 3)))
    }
}

/// Erosion followed by dilation with the same size choice.
pub struct Opening;

impl Transform for Opening {
    fn name(&self) -> &'static str {
        "open"
    }

    fn description(&self) -> &'static str {
        "Erode then dilate, removing small foreground specks"
    }

    fn supports_bitmap(&self) -> bool {
        true
    }

    fn supports_toned(&self) -> bool {
        false
    }

    fn options(&self) -> Vec<ParamOption> {
        size_options()
    }

    fn apply(
        &self,
        image: Image,
        param: Option<&ParamValue>,
        registry: &TransformRegistry,
    ) -> OpsResult<Image> {
        let image = registry.apply("erode", image, param)?;
        registry.apply("dilate", image, param)
    }
}

/// Dilation followed by erosion with the same size choice.
pub struct Closing;

impl Transform for Closing {
    fn name(&self) -> &'static str {
        "close"
    }

    fn description(&self) -> &'static str {
        "Dilate then erode, filling small background holes"
    }

    fn supports_bitmap(&self) -> bool {
        true
    }

    fn supports_toned(&self) -> bool {
        false
    }

    fn options(&self) -> Vec<ParamOption> {
        size_options()
    }

    fn apply(
        &self,
        image: Image,
        param: Option<&ParamValue>,
        registry: &TransformRegistry,
    ) -> OpsResult<Image> {
        let image = registry.apply("dilate", image, param)?;
        registry.apply("erode", image, param)
    }
}

/// `original XOR erosion(original)`.
pub struct EdgeByErosion;

impl Transform for EdgeByErosion {
    fn name(&self) -> &'static str {
        "edge-erode"
    }

    fn description(&self) -> &'static str {
        "Keep the pixels erosion removes"
    }

    fn supports_bitmap(&self) -> bool {
        true
    }

    fn supports_toned(&self) -> bool {
        false
    }

    fn options(&self) -> Vec<ParamOption> {
        size_options()
    }

    fn apply(
        &self,
        image: Image,
        param: Option<&ParamValue>,
        registry: &TransformRegistry,
    ) -> OpsResult<Image> {
        let eroded = registry.apply("erode", image.clone(), param)?;
        xor_bits(image, &eroded)
    }
}

/// `original XOR dilation(original)`.
pub struct EdgeByDilation;

impl Transform for EdgeByDilation {
    fn name(&self) -> &'static str {
        "edge-dilate"
    }

    fn description(&self) -> &'static str {
        "Keep the pixels dilation adds"
    }

    fn supports_bitmap(&self) -> bool {
        true
    }

    fn supports_toned(&self) -> bool {
        false
    }

    fn options(&self) -> Vec<ParamOption> {
        size_options()
    }

    fn apply(
        &self,
        image: Image,
        param: Option<&ParamValue>,
        registry: &TransformRegistry,
    ) -> OpsResult<Image> {
        let dilated = registry.apply("dilate", image.clone(), param)?;
        xor_bits(image, &dilated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TransformRegistry;

    fn bitmap(bits: Vec<i32>, width: u32, height: u32) -> Image {
        Image::from_plane(PixelPlane::Bitmap { bits }, width, height).unwrap()
    }

    fn bits_of(image: &Image) -> &[i32] {
        match image.plane() {
            PixelPlane::Bitmap { bits } => bits,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_erosion_scatters_zeros_from_background() {
        // All ones except the center: the single background pixel clears
        // every element-aligned neighbor, reaching the borders.
        let img = bitmap(vec![1, 1, 1, 1, 0, 1, 1, 1, 1], 3, 3);
        let out = erode(img, &erosion_element(3)).unwrap();
        assert_eq!(bits_of(&out), &[0, 0, 1, 0, 0, 0, 1, 0, 0]);
    }

    #[test]
    fn test_erosion_of_all_ones_is_identity() {
        // No background pixels means nothing scatters; borders included.
        let img = bitmap(vec![1; 9], 3, 3);
        let out = erode(img.clone(), &erosion_element(3)).unwrap();
        assert_eq!(out.plane(), img.plane());
    }

    #[test]
    fn test_erosion_output_is_subset() {
        let img = bitmap(
            vec![
                1, 0, 1, 1, 0, //
                1, 1, 1, 0, 1, //
                0, 1, 1, 1, 1, //
                1, 1, 0, 1, 1, //
                1, 0, 1, 1, 1,
            ],
            5,
            5,
        );
        let out = erode(img.clone(), &erosion_element(3)).unwrap();
        for (before, after) in bits_of(&img).iter().zip(bits_of(&out)) {
            assert!(after <= before);
        }
    }

    #[test]
    fn test_dilation_stamps_element_pattern() {
        let img = bitmap(vec![0, 0, 0, 0, 1, 0, 0, 0, 0], 3, 3);
        let out = dilate(img, &dilation_element(3)).unwrap();
        assert_eq!(bits_of(&out), &DILATION_3X3);
    }

    #[test]
    fn test_dilation_output_is_superset() {
        let img = bitmap(
            vec![
                0, 0, 1, 0, 0, //
                0, 1, 0, 0, 0, //
                0, 0, 1, 1, 0, //
                0, 0, 0, 1, 0, //
                0, 1, 0, 0, 0,
            ],
            5,
            5,
        );
        let out = dilate(img.clone(), &dilation_element(3)).unwrap();
        for (before, after) in bits_of(&img).iter().zip(bits_of(&out)) {
            assert!(after >= before);
        }
    }

    #[test]
    fn test_image_smaller_than_element_is_untouched() {
        let img = bitmap(vec![1, 0, 0, 1], 2, 2);
        let out = erode(img.clone(), &erosion_element(5)).unwrap();
        assert_eq!(out.plane(), img.plane());
    }

    #[test]
    fn test_opening_removes_isolated_speck() {
        let reg = TransformRegistry::new();
        let mut bits = vec![0; 25];
        bits[12] = 1;
        let img = bitmap(bits, 5, 5);
        let out = reg.apply("open", img, Some(&ParamValue::Int(3))).unwrap();
        assert!(bits_of(&out).iter().all(|&b| b == 0));
    }

    #[test]
    fn test_closing_fills_isolated_pinhole() {
        let reg = TransformRegistry::new();
        let mut bits = vec![1; 25];
        bits[12] = 0;
        let img = bitmap(bits, 5, 5);
        let out = reg.apply("close", img, Some(&ParamValue::Int(3))).unwrap();
        assert!(bits_of(&out).iter().all(|&b| b == 1));
    }

    #[test]
    fn test_edge_by_erosion_is_xor_with_eroded() {
        let reg = TransformRegistry::new();
        let img = bitmap(vec![1, 1, 1, 1, 0, 1, 1, 1, 1], 3, 3);
        let out = reg
            .apply("edge-erode", img, Some(&ParamValue::Int(3)))
            .unwrap();
        // original ^ [0,0,1,0,0,0,1,0,0]
        assert_eq!(bits_of(&out), &[1, 1, 0, 1, 0, 1, 0, 1, 1]);
    }

    #[test]
    fn test_edge_by_dilation_on_lone_pixel() {
        let reg = TransformRegistry::new();
        let img = bitmap(vec![0, 0, 0, 0, 1, 0, 0, 0, 0], 3, 3);
        let out = reg
            .apply("edge-dilate", img, Some(&ParamValue::Int(3)))
            .unwrap();
        // dilation stamps the element; XOR clears the surviving center
        assert_eq!(bits_of(&out), &[1, 0, 1, 0, 0, 0, 1, 0, 0]);
    }
}
