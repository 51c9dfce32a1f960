//! Transform application command.

use crate::ApplyArgs;
use anyhow::{bail, Context, Result};
use pnm_ops::{ParamValue, Transform, TransformRegistry};

pub fn run(args: ApplyArgs) -> Result<()> {
    let registry = TransformRegistry::new();
    let transform = registry
        .get(&args.name)
        .with_context(|| format!("unknown transform {:?} (see `pnm ops`)", args.name))?;

    let param = args
        .param
        .as_deref()
        .map(|text| resolve_param(transform, text))
        .transpose()?;

    let image = super::load_image(&args.input)?;
    let result = registry
        .apply(&args.name, image, param.as_ref())
        .with_context(|| format!("Failed to apply {:?}", args.name))?;

    let written = super::save_image(&result, &args.output)?;
    println!(
        "{} -> {} ({}, {}x{})",
        args.input.display(),
        written.display(),
        result.format(),
        result.width(),
        result.height()
    );
    Ok(())
}

/// Matches the given text against the transform's option list, by label
/// first and by literal value second.
fn resolve_param(transform: &dyn Transform, text: &str) -> Result<ParamValue> {
    let options = transform.options();
    if options.is_empty() {
        bail!("transform {:?} takes no parameter", transform.name());
    }
    for option in &options {
        if option.label == text || option.value.to_string() == text {
            return Ok(option.value);
        }
    }
    let labels: Vec<&str> = options.iter().map(|o| o.label).collect();
    bail!(
        "invalid parameter {text:?} for {:?}; options: {}",
        transform.name(),
        labels.join(", ")
    )
}
