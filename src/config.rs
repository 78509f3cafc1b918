//! Configuration for libris paths.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (LIBRIS_HOME, LIBRIS_SHELF)
//! 2. Config file (.libris/config.yaml)
//! 3. Defaults (~/.libris)
//!
//! Config file discovery:
//! - Searches current directory and parents for .libris/config.yaml
//! - Paths in config file are relative to the config file's parent directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<std::result::Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Libris state directory (relative to config file)
    pub home: Option<String>,
    /// Shelf file location (relative to the project root)
    pub shelf: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to libris home
    pub home: PathBuf,
    /// Absolute path to the shelf file
    pub shelf: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".libris").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's parent
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    // Default home directory
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".libris");

    // Check for config file
    let config_file = find_config_file();

    let (home, shelf) = if let Some(ref config_path) = config_file {
        // Config file found - use it as base
        let config = load_config_file(config_path)?;

        // Base directory is the parent of .libris/ (i.e., grandparent of config.yaml)
        let base_dir = config_path
            .parent() // .libris/
            .and_then(|p| p.parent()) // project root
            .unwrap_or(Path::new("."));

        // Resolve home path
        let home = if let Ok(env_home) = std::env::var("LIBRIS_HOME") {
            PathBuf::from(env_home)
        } else if let Some(ref home_path) = config.paths.home {
            // home is relative to the .libris/ directory
            let libris_dir = config_path.parent().unwrap_or(Path::new("."));
            resolve_path(libris_dir, home_path)
        } else {
            default_home.clone()
        };

        // Resolve shelf path
        let shelf = if let Ok(env_shelf) = std::env::var("LIBRIS_SHELF") {
            PathBuf::from(env_shelf)
        } else if let Some(ref shelf_path) = config.paths.shelf {
            resolve_path(base_dir, shelf_path)
        } else {
            home.join("library.json")
        };

        (home, shelf)
    } else {
        // No config file - use env vars or defaults
        let home = std::env::var("LIBRIS_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_home.clone());

        let shelf = std::env::var("LIBRIS_SHELF")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join("library.json"));

        (home, shelf)
    };

    Ok(ResolvedConfig {
        home,
        shelf,
        config_file,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

/// Get the libris home directory.
pub fn libris_home() -> Result<PathBuf> {
    Ok(config()?.home.clone())
}

/// Get the shelf file path ($LIBRIS_HOME/library.json by default)
pub fn shelf_path() -> Result<PathBuf> {
    Ok(config()?.shelf.clone())
}
