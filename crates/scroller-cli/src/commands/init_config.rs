use std::path::Path;

use anyhow::Result;

use scroller_core::ScrollerConfig;

pub fn run(config: &ScrollerConfig, path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }

    config.save_to(path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
