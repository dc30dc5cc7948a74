use std::path::Path;

use anyhow::Result;

use scroller_core::{Dispatcher, Error, ScrollerConfig};

use crate::script::PageScript;

pub fn run(config: &ScrollerConfig, path: &Path) -> Result<()> {
    let script = PageScript::load(path)?;

    if script.regions.is_empty() {
        println!("No regions in {}.", path.display());
        return Ok(());
    }

    let mut dispatcher = Dispatcher::new(script.page(&config.attribute_area), config.clone());

    println!("Regions ({}):\n", script.regions.len());

    for region in &script.regions {
        match dispatcher.locate(&region.name) {
            Ok(corrected) => {
                let coordinate = dispatcher
                    .cache()
                    .region(&region.name)
                    .and_then(|r| r.coordinate().copied());
                let clamped = if coordinate.is_some_and(|c| c.corrected < c.top) {
                    " (clamped)"
                } else {
                    ""
                };
                println!("  {:<16} {}{}", region.name, corrected, clamped);
                if let Some(c) = coordinate {
                    println!("    top: {}  bottom: {}", c.top, c.bottom);
                }
            }
            Err(Error::RegionNotFound(_)) => {
                println!("  {:<16} (not found)", region.name);
            }
            Err(e) => return Err(e.into()),
        }
    }

    println!("\nSelector: {}", config.selector_for("<name>"));
    println!(
        "Trigger:  {}",
        config.trigger_attributes("<name>", Some(config.duration_ms))
    );

    Ok(())
}
