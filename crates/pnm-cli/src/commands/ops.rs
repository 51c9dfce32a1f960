//! Transform catalogue listing.

use crate::OpsArgs;
use anyhow::Result;
use pnm_ops::{Transform, TransformRegistry};

pub fn run(args: OpsArgs) -> Result<()> {
    let registry = TransformRegistry::new();

    let transforms: Vec<&dyn Transform> = if args.binary {
        registry.applicable(true).collect()
    } else if args.toned {
        registry.applicable(false).collect()
    } else {
        registry.iter().collect()
    };

    for transform in transforms {
        let class = match (transform.supports_bitmap(), transform.supports_toned()) {
            (true, true) => "binary+toned",
            (true, false) => "binary",
            _ => "toned",
        };
        println!("{:<12} {:<13} {}", transform.name(), class, transform.description());

        let options = transform.options();
        if !options.is_empty() {
            let labels: Vec<&str> = options.iter().map(|o| o.label).collect();
            println!("{:<12} {:<13}   options: {}", "", "", labels.join(", "));
        }
    }

    Ok(())
}
