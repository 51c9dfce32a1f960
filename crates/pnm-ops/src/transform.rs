//! The transform contract.
//!
//! Every operation in the catalogue implements [`Transform`]: a display
//! name, applicability flags for the two image classes, an optional list of
//! enumerated parameters, and `apply`. Transforms consume the image and
//! return the authoritative result; callers must not assume an in-place
//! mutation survives a variant or geometry change.

use crate::registry::TransformRegistry;
use crate::OpsResult;
use pnm_core::Image;
use std::fmt;

/// A parameter value a transform can be invoked with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    /// Integer-valued parameter (kernel sizes, thresholds, angles).
    Int(i64),
    /// Float-valued parameter (gamma exponents).
    Float(f64),
    /// Symbolic parameter (channel selectors).
    Text(&'static str),
}

impl ParamValue {
    /// The integer value, if this is an [`ParamValue::Int`].
    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The numeric value as a float, accepting both numeric variants.
    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParamValue::Float(v) => Some(*v),
            ParamValue::Int(v) => Some(*v as f64),
            ParamValue::Text(_) => None,
        }
    }

    /// The symbolic value, if this is a [`ParamValue::Text`].
    #[inline]
    pub fn as_text(&self) -> Option<&'static str> {
        match self {
            ParamValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Text(v) => f.write_str(v),
        }
    }
}

/// One selectable parameter: a human-readable label and the value passed to
/// [`Transform::apply`].
#[derive(Clone, Copy, Debug)]
pub struct ParamOption {
    /// Label shown to the caller.
    pub label: &'static str,
    /// Value handed back on selection.
    pub value: ParamValue,
}

impl ParamOption {
    pub(crate) const fn new(label: &'static str, value: ParamValue) -> Self {
        Self { label, value }
    }
}

/// A named image operation.
pub trait Transform: Send + Sync {
    /// Registry key and display name.
    fn name(&self) -> &'static str;

    /// One-line description of the effect.
    fn description(&self) -> &'static str {
        ""
    }

    /// Whether binary (bitmap) images are accepted.
    fn supports_bitmap(&self) -> bool;

    /// Whether toned (gray/RGB) images are accepted.
    fn supports_toned(&self) -> bool;

    /// Enumerated parameter choices, empty when the transform takes none.
    fn options(&self) -> Vec<ParamOption> {
        Vec::new()
    }

    /// Runs the transform and returns the authoritative image.
    ///
    /// The registry is passed in so composed operations (opening, closing,
    /// the morphological edge detectors, staged grayscale conversions) can
    /// invoke their building blocks without global state.
    fn apply(
        &self,
        image: Image,
        param: Option<&ParamValue>,
        registry: &TransformRegistry,
    ) -> OpsResult<Image>;
}

/// Integer parameter with a fallback, ignoring mistyped values.
pub(crate) fn int_param(param: Option<&ParamValue>, default: i64) -> i64 {
    param.and_then(ParamValue::as_int).unwrap_or(default)
}

/// Symbolic parameter with a fallback, ignoring mistyped values.
pub(crate) fn text_param(param: Option<&ParamValue>, default: &'static str) -> &'static str {
    param.and_then(ParamValue::as_text).unwrap_or(default)
}
