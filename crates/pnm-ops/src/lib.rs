//! # pnm-ops
//!
//! Transform engine for plain-text Netpbm images.
//!
//! The engine is a catalogue of named operations over [`pnm_core::Image`]:
//!
//! - [`point`] - negative, gamma correction, log transform
//! - [`filter`] - convolution filters, Sobel and Laplacian-style edges
//! - [`morphology`] - erosion, dilation, opening, closing, edge extraction
//! - [`geometry`] - quarter-turn rotations and mirrors
//! - [`recolor`] - grayscale, thresholding, channel separation, pop-art
//!
//! Operations are reached through the [`TransformRegistry`], which owns the
//! catalogue, gates each transform on the image's binary/toned class, and is
//! handed to every `apply` call so composed operations can invoke their
//! building blocks.
//!
//! # Example
//!
//! ```rust
//! use pnm_core::{Image, PnmFormat};
//! use pnm_ops::TransformRegistry;
//!
//! let registry = TransformRegistry::new();
//! let image = Image::new(PnmFormat::Pgm, 8, 8);
//! let negated = registry.apply("negative", image, None)?;
//! assert_eq!(negated.dimensions(), (8, 8));
//! # Ok::<(), pnm_ops::OpsError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod filter;
pub mod geometry;
pub mod morphology;
pub mod point;
pub mod recolor;
mod registry;
mod transform;

pub use error::{OpsError, OpsResult};
pub use registry::TransformRegistry;
pub use transform::{ParamOption, ParamValue, Transform};
