//! Point transforms: per-pixel value remapping.
//!
//! All three operate through [`map_values`], which applies a unary function
//! to every stored value independently: per channel for RGB planes, per
//! pixel otherwise. Raw values are remapped in the plane's own
//! `0..=maxval` scale.

use crate::registry::TransformRegistry;
use crate::transform::{ParamOption, ParamValue, Transform};
use crate::{OpsError, OpsResult};
use pnm_core::{Image, PixelPlane};

/// Applies `f` to every stored value of the image, per channel for RGB.
pub(crate) fn map_values(image: &mut Image, f: impl Fn(i32) -> i32) {
    match image.plane_mut() {
        PixelPlane::Bitmap { bits } => {
            for v in bits {
                *v = f(*v);
            }
        }
        PixelPlane::Gray { pixels, .. } => {
            for v in pixels {
                *v = f(*v);
            }
        }
        PixelPlane::Rgb { pixels, .. } => {
            for pixel in pixels {
                for channel in pixel {
                    *channel = f(*channel);
                }
            }
        }
    }
}

/// Inverts every value against the maxval: `v -> maxval - v`.
///
/// Self-inverse for any maxval, and the only point transform that also
/// applies to bitmaps (where it flips bits against maxval 1).
pub struct Negative;

impl Transform for Negative {
    fn name(&self) -> &'static str {
        "negative"
    }

    fn description(&self) -> &'static str {
        "Invert every value against the maxval"
    }

    fn supports_bitmap(&self) -> bool {
        true
    }

    fn supports_toned(&self) -> bool {
        true
    }

    fn apply(
        &self,
        mut image: Image,
        _param: Option<&ParamValue>,
        _registry: &TransformRegistry,
    ) -> OpsResult<Image> {
        let maxval = image.maxval();
        map_values(&mut image, |v| maxval - v);
        Ok(image)
    }
}

/// Gamma correction: `v -> ((v/maxval)^gamma) * maxval`, truncated.
pub struct GammaCorrection;

impl Transform for GammaCorrection {
    fn name(&self) -> &'static str {
        "gamma"
    }

    fn description(&self) -> &'static str {
        "Raise normalized values to the chosen exponent"
    }

    fn supports_bitmap(&self) -> bool {
        false
    }

    fn supports_toned(&self) -> bool {
        true
    }

    fn options(&self) -> Vec<ParamOption> {
        const EXPONENTS: [(&str, f64); 14] = [
            ("0.10", 0.10),
            ("0.25", 0.25),
            ("0.33", 0.33),
            ("0.50", 0.50),
            ("0.66", 0.66),
            ("0.75", 0.75),
            ("0.90", 0.90),
            ("1.10", 1.10),
            ("1.25", 1.25),
            ("1.33", 1.33),
            ("1.50", 1.50),
            ("1.66", 1.66),
            ("1.75", 1.75),
            ("1.90", 1.90),
        ];
        EXPONENTS
            .iter()
            .map(|&(label, g)| ParamOption::new(label, ParamValue::Float(g)))
            .collect()
    }

    fn apply(
        &self,
        mut image: Image,
        param: Option<&ParamValue>,
        _registry: &TransformRegistry,
    ) -> OpsResult<Image> {
        let gamma = param
            .and_then(ParamValue::as_float)
            .ok_or_else(|| OpsError::InvalidParameter("gamma requires an exponent".into()))?;
        let maxval = image.maxval() as f64;
        map_values(&mut image, |v| {
            ((v as f64 / maxval).powf(gamma) * maxval) as i32
        });
        Ok(image)
    }
}

/// Log transform: `v -> ln(1 + v/maxval) * maxval`, truncated.
pub struct LogTransform;

impl Transform for LogTransform {
    fn name(&self) -> &'static str {
        "log"
    }

    fn description(&self) -> &'static str {
        "Compress the value range logarithmically"
    }

    fn supports_bitmap(&self) -> bool {
        false
    }

    fn supports_toned(&self) -> bool {
        true
    }

    fn apply(
        &self,
        mut image: Image,
        _param: Option<&ParamValue>,
        _registry: &TransformRegistry,
    ) -> OpsResult<Image> {
        let maxval = image.maxval() as f64;
        map_values(&mut image, |v| {
            ((1.0 + v as f64 / maxval).ln() * maxval) as i32
        });
        Ok(image)
    }
}
