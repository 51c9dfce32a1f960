//! The transform catalogue.
//!
//! [`TransformRegistry`] is an explicitly constructed, immutable list of
//! every operation the engine offers. Transforms that compose with others
//! (opening, closing, the morphological edge detectors, staged grayscale
//! conversions) receive the registry through `apply` instead of reaching
//! for global state.

use crate::filter::{BoxBlur, EdgeDetect, GaussianBlur, Sharpen, SobelEdges};
use crate::geometry::{Mirror, Rotate};
use crate::morphology::{Closing, Dilation, EdgeByDilation, EdgeByErosion, Erosion, Opening};
use crate::point::{GammaCorrection, LogTransform, Negative};
use crate::recolor::{BlackWhite, ChannelSeparation, Grayscale, PopArt};
use crate::transform::{ParamValue, Transform};
use crate::{OpsError, OpsResult};
use pnm_core::Image;
use tracing::debug;

/// Immutable catalogue of named transforms.
pub struct TransformRegistry {
    transforms: Vec<Box<dyn Transform>>,
}

impl TransformRegistry {
    /// Builds the full catalogue.
    pub fn new() -> Self {
        Self {
            transforms: vec![
                Box::new(Negative),
                Box::new(GammaCorrection),
                Box::new(LogTransform),
                Box::new(Sharpen),
                Box::new(BoxBlur),
                Box::new(GaussianBlur),
                Box::new(SobelEdges),
                Box::new(EdgeDetect),
                Box::new(Grayscale),
                Box::new(BlackWhite),
                Box::new(ChannelSeparation),
                Box::new(Erosion),
                Box::new(Dilation),
                Box::new(Opening),
                Box::new(Closing),
                Box::new(EdgeByErosion),
                Box::new(EdgeByDilation),
                Box::new(Rotate),
                Box::new(Mirror),
                Box::new(PopArt),
            ],
        }
    }

    /// Iterates the catalogue in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Transform> {
        self.transforms.iter().map(AsRef::as_ref)
    }

    /// Looks a transform up by name.
    pub fn get(&self, name: &str) -> Option<&dyn Transform> {
        self.transforms
            .iter()
            .find(|t| t.name() == name)
            .map(AsRef::as_ref)
    }

    /// Transforms applicable to the given image class.
    pub fn applicable(&self, binary: bool) -> impl Iterator<Item = &dyn Transform> {
        self.iter().filter(move |t| {
            if binary {
                t.supports_bitmap()
            } else {
                t.supports_toned()
            }
        })
    }

    /// Runs a transform by name, enforcing the precondition check and the
    /// binary/toned applicability gate.
    pub fn apply(
        &self,
        name: &str,
        image: Image,
        param: Option<&ParamValue>,
    ) -> OpsResult<Image> {
        let transform = self
            .get(name)
            .ok_or_else(|| OpsError::UnknownTransform(name.to_string()))?;
        image
            .validate()
            .map_err(|e| OpsError::Precondition(e.to_string()))?;
        let allowed = if image.is_binary() {
            transform.supports_bitmap()
        } else {
            transform.supports_toned()
        };
        if !allowed {
            return Err(OpsError::NotApplicable {
                transform: name.to_string(),
                format: image.format(),
            });
        }
        debug!(transform = name, format = %image.format(), "applying transform");
        transform.apply(image, param, self)
    }
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pnm_core::{PixelPlane, PnmFormat};

    #[test]
    fn test_catalogue_is_complete() {
        let reg = TransformRegistry::new();
        let names: Vec<&str> = reg.iter().map(|t| t.name()).collect();
        assert_eq!(
            names,
            [
                "negative",
                "gamma",
                "log",
                "sharpen",
                "box-blur",
                "gaussian",
                "sobel",
                "edge-detect",
                "grayscale",
                "threshold",
                "channel",
                "erode",
                "dilate",
                "open",
                "close",
                "edge-erode",
                "edge-dilate",
                "rotate",
                "mirror",
                "pop-art",
            ]
        );
    }

    #[test]
    fn test_lookup_by_name() {
        let reg = TransformRegistry::new();
        assert!(reg.get("sobel").is_some());
        assert!(reg.get("sepia").is_none());
    }

    #[test]
    fn test_gating_bitmap_only() {
        let reg = TransformRegistry::new();
        let img = Image::new(PnmFormat::Pgm, 3, 3);
        let err = reg.apply("erode", img, None).unwrap_err();
        assert!(matches!(
            err,
            OpsError::NotApplicable { format: PnmFormat::Pgm, .. }
        ));
    }

    #[test]
    fn test_gating_toned_only() {
        let reg = TransformRegistry::new();
        let img = Image::new(PnmFormat::Pbm, 3, 3);
        let err = reg.apply("gaussian", img, None).unwrap_err();
        assert!(matches!(
            err,
            OpsError::NotApplicable { format: PnmFormat::Pbm, .. }
        ));
    }

    #[test]
    fn test_unknown_transform() {
        let reg = TransformRegistry::new();
        let img = Image::new(PnmFormat::Pgm, 1, 1);
        assert!(matches!(
            reg.apply("swirl", img, None),
            Err(OpsError::UnknownTransform(_))
        ));
    }

    #[test]
    fn test_precondition_guard_catches_broken_invariant() {
        let reg = TransformRegistry::new();
        let mut img = Image::new(PnmFormat::Pgm, 2, 2);
        // Break the buffer/geometry invariant through the raw plane.
        if let PixelPlane::Gray { pixels, .. } = img.plane_mut() {
            pixels.pop();
        }
        assert!(matches!(
            reg.apply("negative", img, None),
            Err(OpsError::Precondition(_))
        ));
    }

    #[test]
    fn test_applicable_split_covers_catalogue() {
        let reg = TransformRegistry::new();
        let binary: Vec<&str> = reg.applicable(true).map(|t| t.name()).collect();
        let toned: Vec<&str> = reg.applicable(false).map(|t| t.name()).collect();
        assert_eq!(
            binary,
            [
                "negative",
                "erode",
                "dilate",
                "open",
                "close",
                "edge-erode",
                "edge-dilate",
                "rotate",
                "mirror",
            ]
        );
        assert_eq!(toned.len(), 14);
        assert!(toned.contains(&"pop-art"));
        assert!(!toned.contains(&"erode"));
    }
}
