//! Image info command.
//!
//! Prints the metadata the header carries: variant, geometry, maxval, and
//! any accumulated comment lines.

use crate::InfoArgs;
use anyhow::Result;

pub fn run(args: InfoArgs) -> Result<()> {
    for (i, path) in args.input.iter().enumerate() {
        let image = super::load_image(path)?;

        if i > 0 {
            println!();
        }
        println!("{}", path.display());
        println!("  Format:     {} ({})", image.format(), variant_name(&image));
        println!("  Resolution: {}x{}", image.width(), image.height());
        println!("  Pixels:     {}", image.pixel_count());
        println!("  Maxval:     {}", image.maxval());
        if !image.comment().is_empty() {
            println!("  Comment:");
            for line in image.comment().lines() {
                println!("    {line}");
            }
        }
    }

    Ok(())
}

fn variant_name(image: &pnm_core::Image) -> &'static str {
    match image.format() {
        pnm_core::PnmFormat::Pbm => "bitmap",
        pnm_core::PnmFormat::Pgm => "graymap",
        pnm_core::PnmFormat::Ppm => "pixmap",
    }
}
