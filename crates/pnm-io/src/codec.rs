//! Plain-text Netpbm decode and encode.
//!
//! The header grammar is shared by all three variants: magic on its own
//! logical line, `width height` together on the next, then a maxval line for
//! P2/P3. The pixel body differs per variant: P1 is a stream of `0`/`1`
//! digits that needs no separating whitespace, P2 is whitespace-separated
//! integers, P3 the same in runs of three per pixel, row-major.

use crate::error::{IoError, IoResult};
use crate::reader::LineReader;
use pnm_core::{Image, PixelPlane, PnmFormat};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Decodes a plain-text Netpbm document.
///
/// # Errors
///
/// [`IoError::UnsupportedFormat`] for the binary P4/P5/P6 magics,
/// [`IoError::Parse`] for any other malformed header or pixel body,
/// including a token count that does not match the declared geometry.
pub fn decode(text: &str) -> IoResult<Image> {
    let mut reader = LineReader::new(text);

    let magic = reader
        .next_field()
        .ok_or_else(|| IoError::Parse("missing magic number".into()))?;
    let format = match PnmFormat::from_magic(magic) {
        Some(format) => format,
        None if PnmFormat::is_binary_variant(magic) => {
            return Err(IoError::UnsupportedFormat(magic.to_string()));
        }
        None => {
            return Err(IoError::Parse(format!("unrecognized magic {magic:?}")));
        }
    };

    let dims = reader
        .next_field()
        .ok_or_else(|| IoError::Parse("missing image dimensions".into()))?;
    let mut fields = dims.split_whitespace();
    let width = parse_dimension(fields.next(), "width")?;
    let height = parse_dimension(fields.next(), "height")?;

    let maxval = if format.has_maxval() {
        let line = reader
            .next_field()
            .ok_or_else(|| IoError::Parse("missing maxval".into()))?;
        let maxval: i32 = line
            .parse()
            .map_err(|_| IoError::Parse(format!("invalid maxval {line:?}")))?;
        if maxval <= 0 {
            return Err(IoError::Parse(format!("maxval must be positive, got {maxval}")));
        }
        maxval
    } else {
        1
    };

    let body = reader.rest();
    let count = width as usize * height as usize;
    let plane = match format {
        PnmFormat::Pbm => PixelPlane::Bitmap {
            bits: parse_bits(&body, count)?,
        },
        PnmFormat::Pgm => {
            let pixels = parse_values(&body)?;
            check_count(pixels.len(), count)?;
            PixelPlane::Gray { maxval, pixels }
        }
        PnmFormat::Ppm => {
            let values = parse_values(&body)?;
            check_count(values.len(), count * 3)?;
            let pixels = values.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
            PixelPlane::Rgb { maxval, pixels }
        }
    };

    let comments: Vec<String> = reader.comments().iter().map(|c| c.to_string()).collect();
    let mut image = Image::from_plane(plane, width, height)?;
    for comment in &comments {
        image.append_comment_line(comment);
    }
    Ok(image)
}

/// Serializes an image back to the plain-text layout.
///
/// Layout: magic line, one `# `-prefixed line per accumulated comment,
/// `width height`, the maxval line for P2/P3, then one pixel per line (a
/// single digit for P1, one integer for P2, three space-separated integers
/// for P3).
pub fn encode(image: &Image) -> String {
    let mut out = String::new();
    out.push_str(image.format().magic());
    out.push('\n');
    for line in image.comment().lines() {
        out.push_str("# ");
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(&format!("{} {}\n", image.width(), image.height()));
    if image.format().has_maxval() {
        out.push_str(&format!("{}\n", image.maxval()));
    }
    match image.plane() {
        PixelPlane::Bitmap { bits } => {
            for bit in bits {
                out.push_str(&format!("{bit}\n"));
            }
        }
        PixelPlane::Gray { pixels, .. } => {
            for v in pixels {
                out.push_str(&format!("{v}\n"));
            }
        }
        PixelPlane::Rgb { pixels, .. } => {
            for [r, g, b] in pixels {
                out.push_str(&format!("{r} {g} {b}\n"));
            }
        }
    }
    out
}

/// Reads and decodes an image file, recording its path on the image.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let mut image = decode(&text)?;
    image.set_path(path);
    debug!(
        path = %path.display(),
        format = %image.format(),
        width = image.width(),
        height = image.height(),
        "decoded image"
    );
    Ok(image)
}

/// Encodes and writes an image, appending the variant extension when the
/// given name lacks it. Returns the path actually written.
pub fn write<P: AsRef<Path>>(image: &Image, path: P) -> IoResult<PathBuf> {
    let path = path.as_ref();
    let extension = image.format().extension();
    let path = if path
        .to_string_lossy()
        .to_lowercase()
        .ends_with(extension)
    {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_os_string();
        name.push(extension);
        PathBuf::from(name)
    };
    fs::write(&path, encode(image))?;
    debug!(path = %path.display(), format = %image.format(), "encoded image");
    Ok(path)
}

fn parse_dimension(token: Option<&str>, name: &str) -> IoResult<u32> {
    let token = token.ok_or_else(|| IoError::Parse(format!("missing {name}")))?;
    token
        .parse()
        .map_err(|_| IoError::Parse(format!("invalid {name} {token:?}")))
}

fn parse_values(body: &str) -> IoResult<Vec<i32>> {
    body.split_whitespace()
        .map(|token| {
            token
                .parse::<i32>()
                .map_err(|_| IoError::Parse(format!("invalid pixel token {token:?}")))
        })
        .collect()
}

fn parse_bits(body: &str, expected: usize) -> IoResult<Vec<i32>> {
    let bits: Vec<i32> = body
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '0' => Ok(0),
            '1' => Ok(1),
            other => Err(IoError::Parse(format!("invalid bitmap digit {other:?}"))),
        })
        .collect::<IoResult<_>>()?;
    check_count(bits.len(), expected)?;
    Ok(bits)
}

fn check_count(actual: usize, expected: usize) -> IoResult<()> {
    if actual != expected {
        return Err(IoError::Parse(format!(
            "pixel body holds {actual} values, expected {expected}"
        )));
    }
    Ok(())
}
