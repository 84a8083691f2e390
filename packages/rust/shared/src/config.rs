//! Application configuration for VoyageLog.
//!
//! User config lives at `~/.voyagelog/voyagelog.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, VoyageLogError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "voyagelog.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".voyagelog";

// ---------------------------------------------------------------------------
// Config structs (matching voyagelog.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the chapter list comes from.
    #[serde(default)]
    pub source: SourceConfig,

    /// Page rendering settings.
    #[serde(default)]
    pub site: SiteConfig,
}

/// `[source]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path or http(s) URL of the journal JSON document.
    #[serde(default = "default_data")]
    pub data: String,

    /// Optional HTTP timeout in seconds when `data` is a URL. Unset means
    /// the fetch waits for as long as the server takes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            data: default_data(),
            timeout_secs: None,
        }
    }
}

fn default_data() -> String {
    "src/data/journal.json".into()
}

/// `[site]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Suffix for page titles.
    #[serde(default = "default_site_title")]
    pub site_title: String,

    /// Page that hosts the chapter detail view in query routing.
    #[serde(default = "default_detail_page")]
    pub detail_page: String,

    /// How the chapter identifier is carried in the URL.
    #[serde(default)]
    pub routing: Routing,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_title: default_site_title(),
            detail_page: default_detail_page(),
            routing: Routing::default(),
        }
    }
}

fn default_site_title() -> String {
    "Nhật Ký Hải Trình".into()
}
fn default_detail_page() -> String {
    "voyage.html".into()
}

/// Where a page reads its chapter identifier from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Routing {
    /// `#v3` fragment; the page without a fragment is the chapter index.
    Hash,
    /// `?v=3` query parameter on a dedicated detail page.
    #[default]
    Query,
}

impl std::fmt::Display for Routing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hash => write!(f, "hash"),
            Self::Query => write!(f, "query"),
        }
    }
}

impl std::str::FromStr for Routing {
    type Err = VoyageLogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hash" => Ok(Self::Hash),
            "query" => Ok(Self::Query),
            other => Err(VoyageLogError::config(format!(
                "unknown routing mode '{other}': expected 'hash' or 'query'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.voyagelog/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| VoyageLogError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.voyagelog/voyagelog.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| VoyageLogError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| VoyageLogError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| VoyageLogError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| VoyageLogError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| VoyageLogError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
