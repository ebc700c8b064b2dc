mod schema;

pub use schema::{Config, SourceConfig};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Get the config directory path (~/.config/lead-scout/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("lead-scout"))
}

/// Get the default config file path (~/.config/lead-scout/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/lead-scout/config.yaml)
/// * `required` - When false, a missing file yields an empty config instead of an error
///
/// # Errors
///
/// Returns an error if:
/// - The config file does not exist and `required` is set
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>, required: bool) -> Result<Config> {
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if !config_path.exists() {
        if required {
            anyhow::bail!(
                "Config file not found at {}. Create ~/.config/lead-scout/config.yaml or pass --input",
                config_path.display()
            );
        }
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    Ok(config)
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (i, source) in config.sources.iter().enumerate() {
        if source.path.trim().is_empty() {
            errors.push(format!("sources[{}].path: must not be empty", i));
        } else if let Err(e) = glob::Pattern::new(&source.path) {
            errors.push(format!(
                "sources[{}].path: invalid pattern '{}' - {}",
                i, source.path, e
            ));
        }
    }

    if let Some(ref level) = config.log_level {
        if let Err(e) = EnvFilter::try_new(level) {
            errors.push(format!("log_level: invalid filter '{}' - {}", level, e));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
