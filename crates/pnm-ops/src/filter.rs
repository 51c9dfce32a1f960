//! Convolution filters and edge detectors.
//!
//! All kernels are square with odd size `2k+1`. Convolution only visits
//! interior pixels (those whose whole neighborhood is in bounds) and emits a
//! buffer shrunk by `2k` in both dimensions; border pixels are dropped, not
//! approximated. Weighted sums are truncated to integers, so filters with
//! negative weights can store negative values.

use crate::registry::TransformRegistry;
use crate::transform::{int_param, ParamOption, ParamValue, Transform};
use crate::OpsResult;
use pnm_core::{Error, Image, PixelPlane, PnmFormat};
use tracing::trace;

const GAUSSIAN_3: ([i32; 9], f64) = ([1, 2, 1, 2, 4, 2, 1, 2, 1], 16.0);
const GAUSSIAN_5: ([i32; 25], f64) = (
    [
        1, 4, 7, 4, 1, //
        4, 16, 26, 16, 4, //
        7, 26, 41, 26, 7, //
        4, 16, 26, 16, 4, //
        1, 4, 7, 4, 1,
    ],
    273.0,
);
const GAUSSIAN_7: ([i32; 49], f64) = (
    [
        0, 0, 1, 2, 1, 0, 0, //
        0, 3, 13, 22, 13, 3, 0, //
        1, 13, 59, 97, 59, 13, 1, //
        2, 22, 97, 159, 97, 22, 2, //
        1, 13, 59, 97, 59, 13, 1, //
        0, 3, 13, 22, 13, 3, 0, //
        0, 0, 1, 2, 1, 0, 0,
    ],
    1003.0,
);

/// A square odd-sized convolution kernel.
#[derive(Debug, Clone)]
pub struct Kernel {
    size: usize,
    weights: Vec<f64>,
}

impl Kernel {
    fn scaled(values: &[i32], size: usize, divisor: f64) -> Self {
        Self {
            size,
            weights: values.iter().map(|&v| v as f64 / divisor).collect(),
        }
    }

    /// The 3x3 sharpening kernel.
    pub fn sharpen() -> Self {
        Self::scaled(&[0, -1, 0, -1, 5, -1, 0, -1, 0], 3, 1.0)
    }

    /// The uniform 3x3 averaging kernel of weight 1/9.
    pub fn box_blur() -> Self {
        Self {
            size: 3,
            weights: vec![1.0 / 9.0; 9],
        }
    }

    /// A fixed normalized Gaussian kernel of size 3, 5, or 7.
    ///
    /// Unknown sizes fall back to 3x3.
    pub fn gaussian(size: i64) -> Self {
        match size {
            7 => Self::scaled(&GAUSSIAN_7.0, 7, GAUSSIAN_7.1),
            5 => Self::scaled(&GAUSSIAN_5.0, 5, GAUSSIAN_5.1),
            _ => Self::scaled(&GAUSSIAN_3.0, 3, GAUSSIAN_3.1),
        }
    }

    /// One of the three fixed Laplacian-style edge kernels.
    ///
    /// Unknown variants fall back to the first.
    pub fn edge_detect(variant: i64) -> Self {
        match variant {
            3 => Self::scaled(&[1, 0, -1, 0, 0, 0, -1, 0, 1], 3, 1.0),
            2 => Self::scaled(&[0, 1, 0, 1, -4, 1, 0, 1, 0], 3, 1.0),
            _ => Self::scaled(&[-1, -1, -1, -1, 8, -1, -1, -1, -1], 3, 1.0),
        }
    }

    /// Kernel side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Half-size `k` of a `2k+1` kernel.
    #[inline]
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    #[inline]
    fn weight(&self, row: usize, col: usize) -> f64 {
        self.weights[row * self.size + col]
    }
}

/// Convolves the image with `kernel`, shrinking both dimensions by `2k`.
///
/// An image smaller than the kernel footprint yields an empty result.
pub(crate) fn convolve(image: &Image, kernel: &Kernel) -> OpsResult<Image> {
    let k = kernel.radius();
    let w = image.width() as usize;
    let h = image.height() as usize;
    let out_w = w.saturating_sub(2 * k) as u32;
    let out_h = h.saturating_sub(2 * k) as u32;
    trace!(w, h, kernel = kernel.size, "convolve");

    match image.plane() {
        PixelPlane::Gray { maxval, pixels } => {
            let mut out = Vec::with_capacity(out_w as usize * out_h as usize);
            for r in k..h.saturating_sub(k) {
                for c in k..w.saturating_sub(k) {
                    let mut sum = 0.0;
                    for kr in 0..kernel.size {
                        for kc in 0..kernel.size {
                            let v = pixels[(r - k + kr) * w + (c - k + kc)];
                            sum += v as f64 * kernel.weight(kr, kc);
                        }
                    }
                    out.push(sum as i32);
                }
            }
            Ok(image.rebuild(
                PixelPlane::Gray {
                    maxval: *maxval,
                    pixels: out,
                },
                out_w,
                out_h,
            )?)
        }
        PixelPlane::Rgb { maxval, pixels } => {
            let mut out = Vec::with_capacity(out_w as usize * out_h as usize);
            for r in k..h.saturating_sub(k) {
                for c in k..w.saturating_sub(k) {
                    let mut sum = [0.0f64; 3];
                    for kr in 0..kernel.size {
                        for kc in 0..kernel.size {
                            let p = pixels[(r - k + kr) * w + (c - k + kc)];
                            let weight = kernel.weight(kr, kc);
                            for ch in 0..3 {
                                sum[ch] += p[ch] as f64 * weight;
                            }
                        }
                    }
                    out.push([sum[0] as i32, sum[1] as i32, sum[2] as i32]);
                }
            }
            Ok(image.rebuild(
                PixelPlane::Rgb {
                    maxval: *maxval,
                    pixels: out,
                },
                out_w,
                out_h,
            )?)
        }
        PixelPlane::Bitmap { .. } => Err(Error::PlaneMismatch {
            expected: PnmFormat::Pgm,
            actual: PnmFormat::Pbm,
        }
        .into()),
    }
}

const SOBEL_X: [i32; 9] = [-1, 0, 1, 2, 0, -2, 1, 0, -1];
const SOBEL_Y: [i32; 9] = [1, 2, 1, 0, 0, 0, -1, -2, -1];

/// Sobel gradient magnitude with the catalogue's thresholding rule:
/// a magnitude at or below the threshold becomes 0, anything above passes
/// through truncated to an integer. The raw magnitude is kept even when it
/// exceeds the maxval.
fn sobel(image: &Image, threshold: f64) -> OpsResult<Image> {
    let w = image.width() as usize;
    let h = image.height() as usize;
    let out_w = w.saturating_sub(2) as u32;
    let out_h = h.saturating_sub(2) as u32;

    let magnitude = |gx: f64, gy: f64| {
        let mag = (gx * gx + gy * gy).sqrt();
        if mag <= threshold { 0 } else { mag as i32 }
    };

    match image.plane() {
        PixelPlane::Gray { maxval, pixels } => {
            let mut out = Vec::with_capacity(out_w as usize * out_h as usize);
            for r in 1..h.saturating_sub(1) {
                for c in 1..w.saturating_sub(1) {
                    let (mut gx, mut gy) = (0.0, 0.0);
                    for kr in 0..3 {
                        for kc in 0..3 {
                            let v = pixels[(r - 1 + kr) * w + (c - 1 + kc)] as f64;
                            gx += v * SOBEL_X[kr * 3 + kc] as f64;
                            gy += v * SOBEL_Y[kr * 3 + kc] as f64;
                        }
                    }
                    out.push(magnitude(gx, gy));
                }
            }
            Ok(image.rebuild(
                PixelPlane::Gray {
                    maxval: *maxval,
                    pixels: out,
                },
                out_w,
                out_h,
            )?)
        }
        PixelPlane::Rgb { maxval, pixels } => {
            let mut out = Vec::with_capacity(out_w as usize * out_h as usize);
            for r in 1..h.saturating_sub(1) {
                for c in 1..w.saturating_sub(1) {
                    let mut channels = [0i32; 3];
                    for (ch, slot) in channels.iter_mut().enumerate() {
                        let (mut gx, mut gy) = (0.0, 0.0);
                        for kr in 0..3 {
                            for kc in 0..3 {
                                let v = pixels[(r - 1 + kr) * w + (c - 1 + kc)][ch] as f64;
                                gx += v * SOBEL_X[kr * 3 + kc] as f64;
                                gy += v * SOBEL_Y[kr * 3 + kc] as f64;
                            }
                        }
                        *slot = magnitude(gx, gy);
                    }
                    out.push(channels);
                }
            }
            Ok(image.rebuild(
                PixelPlane::Rgb {
                    maxval: *maxval,
                    pixels: out,
                },
                out_w,
                out_h,
            )?)
        }
        PixelPlane::Bitmap { .. } => Err(Error::PlaneMismatch {
            expected: PnmFormat::Pgm,
            actual: PnmFormat::Pbm,
        }
        .into()),
    }
}

/// 3x3 unsharp kernel.
pub struct Sharpen;

impl Transform for Sharpen {
    fn name(&self) -> &'static str {
        "sharpen"
    }

    fn description(&self) -> &'static str {
        "Accentuate local contrast with a 3x3 kernel"
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
        convolve(&image, &Kernel::sharpen())
    }
}

/// Uniform 3x3 averaging blur.
pub struct BoxBlur;

impl Transform for BoxBlur {
    fn name(&self) -> &'static str {
        "box-blur"
    }

    fn description(&self) -> &'static str {
        "Average each pixel with its 3x3 neighborhood"
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
        convolve(&image, &Kernel::box_blur())
    }
}

/// Fixed-kernel Gaussian blur at 3x3, 5x5, or 7x7.
pub struct GaussianBlur;

impl Transform for GaussianBlur {
    fn name(&self) -> &'static str {
        "gaussian"
    }

    fn description(&self) -> &'static str {
        "Gaussian blur with a fixed normalized kernel"
    }

    fn supports_bitmap(&self) -> bool {
        false
    }

    fn supports_toned(&self) -> bool {
        true
    }

    fn options(&self) -> Vec<ParamOption> {
        vec![
            ParamOption::new("3x3", ParamValue::Int(3)),
            ParamOption::new("5x5", ParamValue::Int(5)),
            ParamOption::new("7x7", ParamValue::Int(7)),
        ]
    }

    fn apply(
        &self,
        image: Image,
        param: Option<&ParamValue>,
        _registry: &TransformRegistry,
    ) -> OpsResult<Image> {
        convolve(&image, &Kernel::gaussian(int_param(param, 3)))
    }
}

/// One of three fixed Laplacian-style edge kernels.
pub struct EdgeDetect;

impl Transform for EdgeDetect {
    fn name(&self) -> &'static str {
        "edge-detect"
    }

    fn description(&self) -> &'static str {
        "Convolve with a fixed edge-detection kernel"
    }

    fn supports_bitmap(&self) -> bool {
        false
    }

    fn supports_toned(&self) -> bool {
        true
    }

    fn options(&self) -> Vec<ParamOption> {
        vec![
            ParamOption::new("filter 1", ParamValue::Int(1)),
            ParamOption::new("filter 2", ParamValue::Int(2)),
            ParamOption::new("filter 3", ParamValue::Int(3)),
        ]
    }

    fn apply(
        &self,
        image: Image,
        param: Option<&ParamValue>,
        _registry: &TransformRegistry,
    ) -> OpsResult<Image> {
        convolve(&image, &Kernel::edge_detect(int_param(param, 1)))
    }
}

/// Sobel gradient magnitude with threshold clamping.
pub struct SobelEdges;

impl Transform for SobelEdges {
    fn name(&self) -> &'static str {
        "sobel"
    }

    fn description(&self) -> &'static str {
        "Gradient magnitude, zeroed at or below the threshold"
    }

    fn supports_bitmap(&self) -> bool {
        false
    }

    fn supports_toned(&self) -> bool {
        true
    }

    fn options(&self) -> Vec<ParamOption> {
        vec![
            ParamOption::new("64", ParamValue::Int(64)),
            ParamOption::new("128", ParamValue::Int(128)),
            ParamOption::new("200", ParamValue::Int(200)),
        ]
    }

    fn apply(
        &self,
        image: Image,
        param: Option<&ParamValue>,
        _registry: &TransformRegistry,
    ) -> OpsResult<Image> {
        sobel(&image, int_param(param, 64) as f64)
    }
}
