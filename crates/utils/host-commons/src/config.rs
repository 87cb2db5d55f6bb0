//! Environment configuration system for the extension host
//!
//! This module provides type-safe configuration management with support for
//! multiple environments and TOML file parsing using Figment.

use std::path::PathBuf;
use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Deserialize, Serialize};
use crate::error::HostError;
use crate::logging::LoggingConfig;

/// Trait for configuration types
///
/// # Examples
///
/// ```rust
/// use host_commons::config::Config;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct MyConfig {
///     name: String,
///     port: u16,
/// }
///
/// impl Config for MyConfig {}
///
/// // This would work with proper config files:
/// // let config: MyConfig = MyConfig::load("development").unwrap();
/// ```
pub trait Config: for<'de> Deserialize<'de> + Sized {
    /// Load configuration for the specified environment
    fn load(environment: &str) -> Result<Self, HostError> {
        load_config(environment)
    }
    
    /// Load configuration with custom figment
    fn load_with_figment(figment: Figment) -> Result<Self, HostError> {
        figment.extract().map_err(|e| HostError::Configuration {
            message: format!("Failed to parse configuration: {}", e),
            file: None,
        })
    }
}

/// Load configuration for the specified environment
///
/// # Examples
///
/// ```rust
/// use host_commons::config::load_config;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct AppConfig {
///     database_url: String,
///     log_level: String,
/// }
///
/// // This would work with proper config files:
/// // let config: AppConfig = load_config("production").unwrap();
/// ```
pub fn load_config<T>(environment: &str) -> Result<T, HostError>
where
    T: for<'de> Deserialize<'de>,
{
    let figment = Figment::new()
        .merge(Toml::file("config/default.toml"))
        .merge(Toml::file(format!("config/{}.toml", environment)))
        .merge(Env::prefixed("EXTENSION_HOST_"));
    
    figment.extract().map_err(|e| HostError::Configuration {
        message: format!("Failed to load {} configuration: {}", environment, e),
        file: Some(PathBuf::from(format!("config/{}.toml", environment))),
    })
}

/// Default configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultConfig {
    /// Logging system configuration
    pub logging: LoggingConfig,
    /// Filesystem operations configuration
    pub filesystem: FilesystemConfig,
    /// Debug and development configuration
    pub debug: DebugConfig,
}

/// Filesystem configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesystemConfig {
    /// Temporary directory path (optional, uses system default if None)
    pub temp_dir: Option<PathBuf>,
    /// Maximum file size in bytes for operations
    pub max_file_size: u64,
    /// Whether to use atomic writes for file operations
    pub atomic_writes: bool,
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Whether duck debugging is enabled
    pub duck_debugging: bool,
    /// Whether performance logging is enabled
    pub performance_logging: bool,
}

impl Config for DefaultConfig {}
