//! Config command handlers.

use anyhow::{Context, Result};
use rdash_core::config::{self, Config};

pub fn path() {
    println!("{}", config::paths::config_path().display());
}

pub fn init() -> Result<()> {
    let config_path = config::paths::config_path();
    Config::init(&config_path)
        .with_context(|| format!("init config at {}", config_path.display()))?;
    println!("Created config at {}", config_path.display());
    Ok(())
}

pub fn generate() -> Result<()> {
    let toml = Config::generate()?;
    print!("{toml}");
    Ok(())
}

pub fn set_admin_password(password: &str) -> Result<()> {
    if password.trim().is_empty() {
        anyhow::bail!("The admin password cannot be empty");
    }
    let config_path = config::paths::config_path();
    Config::save_admin_password_to(&config_path, password)
        .with_context(|| format!("update admin password in {}", config_path.display()))?;
    println!("Updated admin password in {}", config_path.display());
    Ok(())
}
