//! Owned image container.
//!
//! [`Image`] couples one [`PixelPlane`] with the metadata the codec reads and
//! writes: geometry, source path, and accumulated header comments. The format
//! tag is not stored separately; it is always derived from the plane variant,
//! so the two can never drift apart.
//!
//! # Ownership
//!
//! An image exclusively owns its plane. Cloning deep-copies the buffer and
//! every scalar field; two images never share pixel storage, so a transform
//! that clones before mutating keeps the original intact for comparison.
//!
//! # Geometry invariant
//!
//! After construction and after every successful operation,
//! `plane.len() == width * height`. Operations that change geometry must go
//! through [`Image::rebuild`] (or [`Image::from_plane`]), which re-checks the
//! invariant; [`Image::validate`] is the explicit precondition guard the
//! transform layer runs before touching a buffer.

use crate::error::{Error, Result};
use crate::format::PnmFormat;
use crate::plane::{PixelPlane, from_reference};
use crate::Color;
use std::fmt;
use std::path::{Path, PathBuf};

/// A decoded plain-text Netpbm image.
///
/// # Example
///
/// ```rust
/// use pnm_core::{Image, PnmFormat};
///
/// let img = Image::new(PnmFormat::Pgm, 4, 3);
/// assert_eq!(img.dimensions(), (4, 3));
/// assert_eq!(img.format(), PnmFormat::Pgm);
/// assert_eq!(img.maxval(), 255);
/// ```
#[derive(Clone, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    path: PathBuf,
    comment: String,
    plane: PixelPlane,
}

impl Image {
    /// Creates a zero-filled image of the given format and geometry.
    pub fn new(format: PnmFormat, width: u32, height: u32) -> Self {
        let count = width as usize * height as usize;
        Self {
            width,
            height,
            path: PathBuf::new(),
            comment: String::new(),
            plane: PixelPlane::zeroed(format, count),
        }
    }

    /// Wraps an existing plane, checking it against the declared geometry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferMismatch`] if the plane does not hold exactly
    /// `width * height` entries.
    pub fn from_plane(plane: PixelPlane, width: u32, height: u32) -> Result<Self> {
        let expected = width as usize * height as usize;
        if plane.len() != expected {
            return Err(Error::BufferMismatch {
                expected,
                actual: plane.len(),
            });
        }
        Ok(Self {
            width,
            height,
            path: PathBuf::new(),
            comment: String::new(),
            plane,
        })
    }

    /// Builds a new image that keeps this image's path and comment but
    /// replaces the plane and geometry.
    ///
    /// This is the constructor transforms use when they change variant or
    /// dimensions; the invariant check from [`Image::from_plane`] applies.
    pub fn rebuild(&self, plane: PixelPlane, width: u32, height: u32) -> Result<Self> {
        let mut out = Self::from_plane(plane, width, height)?;
        out.path = self.path.clone();
        out.comment = self.comment.clone();
        Ok(out)
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of pixels declared by the geometry.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// The format tag, derived from the owned plane variant.
    #[inline]
    pub fn format(&self) -> PnmFormat {
        self.plane.format()
    }

    /// Whether this is a binary (bitmap) image.
    #[inline]
    pub fn is_binary(&self) -> bool {
        self.format().is_binary()
    }

    /// Declared maximum value of the plane.
    #[inline]
    pub fn maxval(&self) -> i32 {
        self.plane.maxval()
    }

    /// Sets the declared maximum value. No-op on bitmaps.
    pub fn set_maxval(&mut self, value: i32) {
        self.plane.set_maxval(value);
    }

    /// The path this image was loaded from, empty if decoded from memory.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records the path this image is associated with.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
    }

    /// Accumulated header comment text, newline-joined in encounter order.
    #[inline]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Replaces the comment text.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    /// Appends one comment line, joining with a newline when text exists.
    pub fn append_comment_line(&mut self, line: &str) {
        if !self.comment.is_empty() {
            self.comment.push('\n');
        }
        self.comment.push_str(line);
    }

    /// Borrows the pixel plane.
    #[inline]
    pub fn plane(&self) -> &PixelPlane {
        &self.plane
    }

    /// Mutably borrows the pixel plane.
    ///
    /// Callers that swap buffers through this borrow are responsible for
    /// keeping the geometry invariant; prefer [`Image::rebuild`] when the
    /// entry count changes.
    #[inline]
    pub fn plane_mut(&mut self) -> &mut PixelPlane {
        &mut self.plane
    }

    /// Buffer index for row `row`, column `col`.
    #[inline]
    pub fn offset(&self, row: u32, col: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }

    /// Reads the pixel at `(row, col)` as a reference-range [`Color`].
    ///
    /// Returns `None` outside the image bounds.
    pub fn pixel(&self, row: u32, col: u32) -> Option<Color> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.plane.sample(self.offset(row, col))
    }

    /// Writes an RGB pixel, rescaling each channel into the plane's maxval.
    ///
    /// # Errors
    ///
    /// [`Error::PlaneMismatch`] when the plane is not RGB,
    /// [`Error::OutOfBounds`] outside the geometry.
    pub fn set_pixel(&mut self, row: u32, col: u32, color: Color) -> Result<()> {
        if row >= self.height || col >= self.width {
            return Err(Error::out_of_bounds(row, col, self.width, self.height));
        }
        let index = self.offset(row, col);
        match &mut self.plane {
            PixelPlane::Rgb { maxval, pixels } => {
                pixels[index] = [
                    from_reference(color.r() as i32, *maxval),
                    from_reference(color.g() as i32, *maxval),
                    from_reference(color.b() as i32, *maxval),
                ];
                Ok(())
            }
            other => Err(Error::PlaneMismatch {
                expected: PnmFormat::Ppm,
                actual: other.format(),
            }),
        }
    }

    /// Writes a scalar pixel value on a bitmap or gray plane.
    ///
    /// Bitmap planes reduce the value to a bit; gray planes store it raw.
    ///
    /// # Errors
    ///
    /// [`Error::PlaneMismatch`] on an RGB plane, [`Error::OutOfBounds`]
    /// outside the geometry.
    pub fn set_value(&mut self, row: u32, col: u32, value: i32) -> Result<()> {
        if row >= self.height || col >= self.width {
            return Err(Error::out_of_bounds(row, col, self.width, self.height));
        }
        let index = self.offset(row, col);
        match &mut self.plane {
            PixelPlane::Bitmap { bits } => {
                bits[index] = value.rem_euclid(2);
                Ok(())
            }
            PixelPlane::Gray { pixels, .. } => {
                pixels[index] = value;
                Ok(())
            }
            other => Err(Error::PlaneMismatch {
                expected: PnmFormat::Pgm,
                actual: other.format(),
            }),
        }
    }

    /// Re-checks the buffer-length invariant.
    ///
    /// # Errors
    ///
    /// [`Error::BufferMismatch`] when the plane no longer matches the
    /// declared geometry. This indicates an internal invariant breach.
    pub fn validate(&self) -> Result<()> {
        let expected = self.pixel_count();
        if self.plane.len() != expected {
            return Err(Error::BufferMismatch {
                expected,
                actual: self.plane.len(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format())
            .field("maxval", &self.maxval())
            .field("path", &self.path)
            .finish()
    }
}
