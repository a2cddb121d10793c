//! Configuration management for rdash.
//!
//! Loads configuration from ${RDASH_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use toml_edit::{DocumentMut, Item, Table};

/// Digest of the canonical demo admin password (`demodemo`).
pub const DEFAULT_ADMIN_PASSWORD_SHA256: &str =
    "4011ba02e51104c678c31a76a444485b38f3865e504d89c3a0a80b439bb1a237";

/// Admin authority configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Hex SHA-256 digest of the admin password. Empty disables admin mode.
    pub password_sha256: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password_sha256: DEFAULT_ADMIN_PASSWORD_SHA256.to_string(),
        }
    }
}

/// Mock review service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    pub delay_ms: u64,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            delay_ms: Config::DEFAULT_REVIEW_DELAY_MS,
        }
    }
}

/// Page sizes for the paginated admin panels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesConfig {
    pub tokens: usize,
    pub requests: usize,
    pub projects: usize,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            tokens: 10,
            requests: 5,
            projects: 5,
        }
    }
}

/// Mock dataset configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Fixed seed for generated datasets. `None` seeds from entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub admin: AdminConfig,
    pub review: ReviewConfig,
    pub pages: PagesConfig,
    pub mock: MockConfig,
    pub log: LogConfig,
}

/// Commented template shipped with the binary.
const TEMPLATE: &str = include_str!("../default_config.toml");

/// An editable config file: the commented template with user values
/// layered on top. Unknown user keys are kept.
struct ConfigDocument {
    doc: DocumentMut,
}

impl ConfigDocument {
    fn template() -> Result<Self> {
        let doc = TEMPLATE
            .parse()
            .context("Failed to parse default config template")?;
        Ok(Self { doc })
    }

    /// The template overlaid with the file at `path`, if it exists.
    fn open(path: &Path) -> Result<Self> {
        let mut document = Self::template()?;
        if path.exists() {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            document
                .layer(&text)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        }
        Ok(document)
    }

    fn layer(&mut self, text: &str) -> Result<()> {
        let values: DocumentMut = text.parse()?;
        overlay(self.doc.as_table_mut(), values.as_table());
        Ok(())
    }

    fn set(&mut self, table: &str, key: &str, value: impl Into<toml_edit::Value>) {
        self.doc[table][key] = Item::Value(value.into());
    }

    /// Writes through a sibling temp file and a rename, so readers never
    /// see a half-written config.
    fn save(&self, path: &Path) -> Result<()> {
        write_atomic(path, &self.doc.to_string())
    }
}

/// Copies every value of `values` into `base`, descending into tables that
/// exist on both sides so `base`'s comments survive.
fn overlay(base: &mut Table, values: &Table) {
    for (key, item) in values {
        match (base.get_mut(key), item) {
            (Some(Item::Table(base_table)), Item::Table(value_table)) => {
                overlay(base_table, value_table);
            }
            (_, Item::None) => {}
            _ => base[key] = item.clone(),
        }
    }
}

fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }
    let staging = path.with_extension("toml.tmp");
    fs::write(&staging, content)
        .with_context(|| format!("Failed to write {}", staging.display()))?;
    fs::rename(&staging, path)
        .with_context(|| format!("Failed to move {} into place", staging.display()))
}

pub mod paths {
    //! Path resolution for rdash configuration and data directories.
    //!
    //! RDASH_HOME resolution order:
    //! 1. RDASH_HOME environment variable (if set)
    //! 2. ~/.config/rdash (default)
    //! 3. ./.rdash when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the rdash home directory.
    pub fn rdash_home() -> PathBuf {
        if let Ok(home) = std::env::var("RDASH_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".rdash"),
            |h| h.join(".config").join("rdash"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        rdash_home().join("config.toml")
    }

    /// Returns the directory holding rolling log files.
    pub fn log_dir() -> PathBuf {
        rdash_home().join("logs")
    }
}

impl Config {
    const DEFAULT_REVIEW_DELAY_MS: u64 = 1000;

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Mock review latency.
    pub fn review_delay(&self) -> Duration {
        Duration::from_millis(self.review.delay_ms)
    }

    /// Saves only the admin password digest to the default config file.
    ///
    /// # Errors
    /// Returns an error if the config cannot be read, parsed, or written.
    pub fn save_admin_password(password: &str) -> Result<()> {
        Self::save_admin_password_to(&paths::config_path(), password)
    }

    /// Saves only `admin.password_sha256` to a specific config file path.
    ///
    /// A missing file is created from the template. Other values and the
    /// template's comments are kept.
    ///
    /// # Errors
    /// Returns an error if the config cannot be read, parsed, or written.
    pub fn save_admin_password_to(path: &Path, password: &str) -> Result<()> {
        let mut document = ConfigDocument::open(path)?;
        document.set(
            "admin",
            "password_sha256",
            crate::auth::hash_password(password),
        );
        document.save(path)
    }

    /// Writes the commented template to `path`.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }
        write_atomic(path, TEMPLATE)
    }

    /// Renders `Config::default()` into the commented template.
    ///
    /// `xtask update-default-config` writes the result back to
    /// `default_config.toml`, keeping the template in step with the code.
    ///
    /// # Errors
    /// Returns an error if serialization or template parsing fails.
    pub fn generate() -> Result<String> {
        let defaults =
            toml::to_string(&Config::default()).context("Failed to serialize default config")?;
        let mut document = ConfigDocument::template()?;
        document
            .layer(&defaults)
            .context("Failed to parse serialized defaults")?;
        Ok(document.doc.to_string())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.review_delay(), Duration::from_millis(1000));
        assert_eq!(config.pages.tokens, 10);
        assert_eq!(config.pages.requests, 5);
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let parsed: Config = toml::from_str(TEMPLATE).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[review]\ndelay_ms = 5\n[mock]\nseed = 7\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.review.delay_ms, 5);
        assert_eq!(config.mock.seed, Some(7));
        assert_eq!(config.admin, AdminConfig::default());
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_init_refuses_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        Config::init(&path).unwrap();
        let err = Config::init(&path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_save_admin_password_preserves_other_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[review]\ndelay_ms = 250\n").unwrap();

        Config::save_admin_password_to(&path, "s3cret").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("# SHA-256 digest"));
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.review.delay_ms, 250);
        assert_eq!(
            config.admin.password_sha256,
            crate::auth::hash_password("s3cret")
        );
    }

    #[test]
    fn test_generate_round_trips_defaults() {
        let generated = Config::generate().unwrap();
        let parsed: Config = toml::from_str(&generated).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
