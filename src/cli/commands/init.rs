use std::path::Path;

use crate::config::Config;

pub fn cmd_init(path: Option<&Path>) -> anyhow::Result<()> {
    let shown = path.unwrap_or_else(|| Path::new("config.toml")).display();
    if Config::create_default_if_missing(path)? {
        println!("✓ Created {shown} with default settings");
    } else {
        println!("{shown} already exists, leaving it untouched");
    }
    Ok(())
}
