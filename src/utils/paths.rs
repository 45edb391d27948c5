use anyhow::{anyhow, Result};
use std::path::PathBuf;

pub fn get_pin_tui_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
    Ok(home.join(".pin-tui"))
}

pub fn get_config_path() -> Result<PathBuf> {
    let app_dir = get_pin_tui_dir()?;
    Ok(app_dir.join("config.toml"))
}

pub fn get_logs_dir() -> Result<PathBuf> {
    let app_dir = get_pin_tui_dir()?;
    Ok(app_dir.join("logs"))
}

pub fn get_crash_log_path() -> Result<PathBuf> {
    let app_dir = get_pin_tui_dir()?;
    Ok(app_dir.join("crash.log"))
}
