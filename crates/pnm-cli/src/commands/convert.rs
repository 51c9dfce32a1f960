//! Variant conversion command.

use crate::ConvertArgs;
use anyhow::Result;
use pnm_core::convert;

pub fn run(args: ConvertArgs) -> Result<()> {
    let image = super::load_image(&args.input)?;

    let converted = match args.to.as_str() {
        "p1" => convert::to_bitmap(&image)?,
        "p2" => convert::to_gray(&image)?,
        _ => convert::to_rgb(&image)?,
    };

    let written = super::save_image(&converted, &args.output)?;
    println!(
        "{} ({}) -> {} ({})",
        args.input.display(),
        image.format(),
        written.display(),
        converted.format()
    );
    Ok(())
}
