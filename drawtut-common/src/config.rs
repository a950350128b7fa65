//! Configuration resolution for the tutorial generator
//!
//! Provides two-tier configuration resolution with ENV → TOML priority and
//! compiled defaults, plus content-root directory initialization.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default listening port for drawtut-tg
pub const DEFAULT_PORT: u16 = 5730;

/// Environment variable holding the generative API credential
pub const ENV_API_KEY: &str = "DRAWTUT_GEMINI_API_KEY";
/// Environment variable overriding the listening port
pub const ENV_PORT: &str = "DRAWTUT_PORT";
/// Environment variable overriding the content root folder
pub const ENV_CONTENT_ROOT: &str = "DRAWTUT_CONTENT_ROOT";

/// TOML configuration file contents (`~/.config/drawtut/drawtut-tg.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Generative API credential
    pub gemini_api_key: Option<String>,
    /// HTTP listening port
    pub port: Option<u16>,
    /// Root folder for uploads and generated artifacts
    pub content_root: Option<String>,
}

impl TomlConfig {
    /// Default configuration file path for the platform
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("drawtut").join("drawtut-tg.toml"))
    }

    /// Load configuration from a TOML file, if it exists
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))?;
        Ok(Some(config))
    }
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Generative API credential
    pub api_key: String,
    /// HTTP listening port
    pub port: u16,
    /// Content root (parent of `uploads/` and `generated/`)
    pub content_root: PathBuf,
}

impl ServiceConfig {
    /// Resolve configuration with ENV → TOML → default priority
    pub fn resolve() -> Result<Self> {
        let toml_config = match TomlConfig::default_path() {
            Some(path) => TomlConfig::load(&path)?.unwrap_or_default(),
            None => TomlConfig::default(),
        };
        Self::resolve_from(&toml_config)
    }

    /// Resolve configuration against an already-loaded TOML tier
    pub fn resolve_from(toml_config: &TomlConfig) -> Result<Self> {
        let api_key = resolve_api_key(toml_config)?;
        let port = resolve_port(toml_config);
        let content_root = resolve_content_root(toml_config);

        Ok(Self {
            api_key,
            port,
            content_root,
        })
    }
}

/// Resolve the generative API key
///
/// Priority: ENV → TOML. A missing or blank key is a startup error.
fn resolve_api_key(toml_config: &TomlConfig) -> Result<String> {
    if let Ok(key) = std::env::var(ENV_API_KEY) {
        if is_valid_key(&key) {
            info!("Generative API key loaded from environment variable");
            return Ok(key);
        }
        warn!("{} is set but blank, falling through to TOML", ENV_API_KEY);
    }

    if let Some(key) = toml_config.gemini_api_key.as_ref() {
        if is_valid_key(key) {
            info!("Generative API key loaded from TOML config");
            return Ok(key.clone());
        }
    }

    Err(Error::Config(format!(
        "Generative API key not configured. Please configure using one of:\n\
         1. Environment: {}=your-key-here\n\
         2. TOML config: ~/.config/drawtut/drawtut-tg.toml (gemini_api_key = \"your-key\")",
        ENV_API_KEY
    )))
}

/// Resolve the listening port
///
/// Priority: ENV → TOML → compiled default. An unparseable ENV value is
/// logged and skipped rather than fatal.
fn resolve_port(toml_config: &TomlConfig) -> u16 {
    if let Ok(raw) = std::env::var(ENV_PORT) {
        match raw.trim().parse::<u16>() {
            Ok(port) => return port,
            Err(_) => warn!("{}={:?} is not a valid port, ignoring", ENV_PORT, raw),
        }
    }

    toml_config.port.unwrap_or(DEFAULT_PORT)
}

/// Resolve the content root folder
///
/// Priority: ENV → TOML → OS-dependent default.
fn resolve_content_root(toml_config: &TomlConfig) -> PathBuf {
    if let Ok(path) = std::env::var(ENV_CONTENT_ROOT) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = toml_config.content_root.as_ref() {
        return PathBuf::from(path);
    }

    dirs::data_local_dir()
        .map(|d| d.join("drawtut"))
        .unwrap_or_else(|| PathBuf::from("./drawtut_data"))
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Resolved content root with its two served subdirectories
#[derive(Debug, Clone)]
pub struct ContentRoot {
    root: PathBuf,
}

impl ContentRoot {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Directory for raw uploaded originals
    pub fn uploads_dir(&self) -> PathBuf {
        self.root.join("uploads")
    }

    /// Directory for generated artifacts
    pub fn generated_dir(&self) -> PathBuf {
        self.root.join("generated")
    }

    /// Create `uploads/` and `generated/` if missing (idempotent)
    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(self.uploads_dir())?;
        std::fs::create_dir_all(self.generated_dir())?;
        info!("Content root initialized: {}", self.root.display());
        Ok(())
    }
}
