use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_path, Settings};

pub fn run(init: bool) -> Result<()> {
    if init {
        let path = save_settings(&Settings::default())?;
        println!("Wrote default settings to {}", path.display());
        return Ok(());
    }
    let path = settings_path();
    let source = if path.exists() { "" } else { " (not found, using defaults)" };
    println!("# {}{source}", path.display());
    println!("{}", serde_json::to_string_pretty(&load_settings())?);
    Ok(())
}
