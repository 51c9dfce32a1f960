//! Lossless geometric remaps: quarter-turn rotations and mirrors.
//!
//! Every remap builds the output buffer by pulling each destination pixel
//! from its source position, so no pixel is lost or invented. Quarter turns
//! swap width and height.

use crate::registry::TransformRegistry;
use crate::transform::{int_param, ParamOption, ParamValue, Transform};
use crate::{OpsError, OpsResult};
use pnm_core::{Image, PixelPlane};

/// Pulls a `out_h x out_w` buffer out of `src`, reading the source position
/// `map(row, col)` gives for every destination pixel.
fn remap<T: Copy>(
    src: &[T],
    src_w: usize,
    out_w: usize,
    out_h: usize,
    map: impl Fn(usize, usize) -> (usize, usize),
) -> Vec<T> {
    let mut out = Vec::with_capacity(out_w * out_h);
    for r in 0..out_h {
        for c in 0..out_w {
            let (sr, sc) = map(r, c);
            out.push(src[sr * src_w + sc]);
        }
    }
    out
}

fn remap_image(
    image: &Image,
    out_w: usize,
    out_h: usize,
    map: impl Fn(usize, usize) -> (usize, usize),
) -> OpsResult<Image> {
    let src_w = image.width() as usize;
    let plane = match image.plane() {
        PixelPlane::Bitmap { bits } => PixelPlane::Bitmap {
            bits: remap(bits, src_w, out_w, out_h, map),
        },
        PixelPlane::Gray { maxval, pixels } => PixelPlane::Gray {
            maxval: *maxval,
            pixels: remap(pixels, src_w, out_w, out_h, map),
        },
        PixelPlane::Rgb { maxval, pixels } => PixelPlane::Rgb {
            maxval: *maxval,
            pixels: remap(pixels, src_w, out_w, out_h, map),
        },
    };
    Ok(image.rebuild(plane, out_w as u32, out_h as u32)?)
}

/// Quarter-turn rotation. 90 and 270 degrees swap the image dimensions.
pub struct Rotate;

impl Transform for Rotate {
    fn name(&self) -> &'static str {
        "rotate"
    }

    fn description(&self) -> &'static str {
        "Rotate by a multiple of 90 degrees"
    }

    fn supports_bitmap(&self) -> bool {
        true
    }

    fn supports_toned(&self) -> bool {
        true
    }

    fn options(&self) -> Vec<ParamOption> {
        vec![
            ParamOption::new("90 cw", ParamValue::Int(90)),
            ParamOption::new("90 ccw", ParamValue::Int(270)),
            ParamOption::new("180", ParamValue::Int(180)),
        ]
    }

    fn apply(
        &self,
        image: Image,
        param: Option<&ParamValue>,
        _registry: &TransformRegistry,
    ) -> OpsResult<Image> {
        let degrees = int_param(param, 90);
        let w = image.width() as usize;
        let h = image.height() as usize;
        match degrees.rem_euclid(360) / 90 {
            1 => remap_image(&image, h, w, |r, c| (h - 1 - c, r)),
            2 => remap_image(&image, w, h, |r, c| (h - 1 - r, w - 1 - c)),
            3 => remap_image(&image, h, w, |r, c| (c, w - 1 - r)),
            _ => Err(OpsError::InvalidParameter(format!(
                "rotation must be 90, 180 or 270 degrees, got {degrees}"
            ))),
        }
    }
}

/// Mirror along one axis.
pub struct Mirror;

impl Transform for Mirror {
    fn name(&self) -> &'static str {
        "mirror"
    }

    fn description(&self) -> &'static str {
        "Mirror horizontally or vertically"
    }

    fn supports_bitmap(&self) -> bool {
        true
    }

    fn supports_toned(&self) -> bool {
        true
    }

    fn options(&self) -> Vec<ParamOption> {
        vec![
            ParamOption::new("horizontal", ParamValue::Int(1)),
            ParamOption::new("vertical", ParamValue::Int(0)),
        ]
    }

    fn apply(
        &self,
        image: Image,
        param: Option<&ParamValue>,
        _registry: &TransformRegistry,
    ) -> OpsResult<Image> {
        let w = image.width() as usize;
        let h = image.height() as usize;
        if int_param(param, 0) == 1 {
            remap_image(&image, w, h, |r, c| (r, w - 1 - c))
        } else {
            remap_image(&image, w, h, |r, c| (h - 1 - r, c))
        }
    }
}
