use std::fs;
use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "xtask", about = "rdash maintainer tasks")]
struct Cli {
    #[command(subcommand)]
    command: Option<CommandName>,
}

#[derive(Debug, Default, Subcommand)]
enum CommandName {
    /// Update default_config.toml by running `rdash config generate`.
    #[default]
    UpdateDefaultConfig,
    /// Fail if default_config.toml differs from `rdash config generate`.
    CheckDefaultConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    match command {
        CommandName::UpdateDefaultConfig => update_default_config(),
        CommandName::CheckDefaultConfig => check_default_config(),
    }
}

fn default_config_path() -> Result<PathBuf> {
    Ok(project_root()?
        .join("crates")
        .join("rdash-core")
        .join("default_config.toml"))
}

/// Runs `rdash config generate` against an empty RDASH_HOME.
fn generate_config() -> Result<Vec<u8>> {
    let root = project_root()?;
    let temp_dir = tempfile::tempdir().context("create temp dir for RDASH_HOME")?;

    let output = Command::new("cargo")
        .current_dir(&root)
        .env("RDASH_HOME", temp_dir.path())
        .arg("run")
        .arg("-p")
        .arg("rdash")
        .arg("--")
        .arg("config")
        .arg("generate")
        .output()
        .context("run `cargo run -p rdash -- config generate`")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("config generate failed: {}", stderr);
    }
    Ok(output.stdout)
}

fn update_default_config() -> Result<()> {
    let dest = default_config_path()?;
    let generated = generate_config()?;

    fs::write(&dest, &generated)
        .with_context(|| format!("write config to {}", dest.display()))?;

    println!("Updated {}", dest.display());
    Ok(())
}

fn check_default_config() -> Result<()> {
    let path = default_config_path()?;
    let current = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
    if current != generate_config()? {
        bail!(
            "{} is stale; run `cargo xtask update-default-config`",
            path.display()
        );
    }
    println!("{} is up to date", path.display());
    Ok(())
}

fn project_root() -> Result<PathBuf> {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let root = manifest_dir
        .ancestors()
        .nth(2)
        .context("locate workspace root from CARGO_MANIFEST_DIR")?;
    Ok(root.to_path_buf())
}
