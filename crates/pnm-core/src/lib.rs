//! # pnm-core
//!
//! Core types for plain-text Netpbm (P1/P2/P3) processing.
//!
//! This crate is the foundation of the workspace and has no internal
//! dependencies; the codec (`pnm-io`) and transform engine (`pnm-ops`) both
//! build on it:
//!
//! - [`Color`] - an RGB value in the 0-255 reference range
//! - [`PixelPlane`] - tagged per-format pixel storage (bitmap/gray/rgb)
//! - [`Image`] - an owned plane plus geometry, path, and comment metadata
//! - [`PnmFormat`] - the three plain-text format tags
//! - [`convert`] - the bitmap/gray/rgb conversion pipeline
//!
//! ## Design
//!
//! The plane is a closed tagged union: every consumer dispatches by matching
//! the three variants, and the image's format tag is derived from the variant
//! rather than stored beside it. Raw buffer values live in the plane's own
//! `0..=maxval` range; the [`Color`] boundary rescales to and from the 8-bit
//! reference range.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod color;
pub mod convert;
pub mod error;
pub mod format;
pub mod image;
pub mod plane;

pub use color::Color;
pub use convert::{to_bitmap, to_gray, to_rgb};
pub use error::{Error, Result};
pub use format::PnmFormat;
pub use image::Image;
pub use plane::PixelPlane;
