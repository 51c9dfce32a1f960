//! # pnm-io
//!
//! Codec for the plain-text Netpbm family (P1 bitmap, P2 graymap, P3
//! pixmap). The binary-encoded variants P4/P5/P6 are recognized and
//! rejected.
//!
//! Decoding builds a [`pnm_core::Image`] with the plane variant matching the
//! magic; encoding writes the same layout back: magic, `# ` comment lines,
//! dimensions, maxval (P2/P3), one pixel per line. `decode(encode(img))`
//! reproduces the pixel buffer, geometry, and maxval exactly.
//!
//! # Example
//!
//! ```rust
//! use pnm_io::{decode, encode};
//!
//! let img = decode("P2\n2 2\n255\n0 64\n128 255\n")?;
//! assert_eq!(img.dimensions(), (2, 2));
//! let text = encode(&img);
//! assert!(text.starts_with("P2\n"));
//! # Ok::<(), pnm_io::IoError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod codec;
mod error;
mod reader;

pub use codec::{decode, encode, read, write};
pub use error::{IoError, IoResult};
