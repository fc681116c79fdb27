//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.userdash/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use clap::ValueEnum;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ThemeMode;
use crate::core::table::{DEFAULT_ROWS_PER_PAGE, ROWS_PER_PAGE_OPTIONS};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UserdashConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub notification: NotificationConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SourceConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    pub theme: Option<ThemeMode>,
    pub rows_per_page: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NotificationConfig {
    pub auto_hide_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_ENDPOINT: &str = "https://my.api.mockaroo.com/test.json";
/// Key for the bundled mockaroo endpoint; not sent anywhere else.
pub const DEFAULT_API_KEY: &str = "e1780e30";
pub const DEFAULT_AUTO_HIDE_MS: u64 = 6000;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub theme: ThemeMode,
    pub rows_per_page: usize,
    pub notification_timeout: Duration,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub endpoint: Option<String>,
    pub theme: Option<ThemeMode>,
    pub rows_per_page: Option<usize>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.userdash/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".userdash").join("config.toml"))
}

/// Load config from `~/.userdash/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `UserdashConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<UserdashConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(UserdashConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(UserdashConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<UserdashConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: UserdashConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# userdash configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [source]
# endpoint = "https://my.api.mockaroo.com/test.json"   # Or set USERDASH_ENDPOINT
# api_key = "..."                                       # Or set USERDASH_API_KEY; sent as ?key=
#                                                       # The default endpoint uses a built-in key

# [display]
# theme = "light"          # "light" or "dark" (USERDASH_THEME)
# rows_per_page = 10       # 10, 25 or 50

# [notification]
# auto_hide_ms = 6000
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &UserdashConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Endpoint: CLI → env → config → default
    let endpoint = cli
        .endpoint
        .clone()
        .or_else(|| std::env::var("USERDASH_ENDPOINT").ok())
        .or_else(|| config.source.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    // API key: env → config → built-in key for the default endpoint
    let api_key = std::env::var("USERDASH_API_KEY")
        .ok()
        .or_else(|| config.source.api_key.clone())
        .or_else(|| (endpoint == DEFAULT_ENDPOINT).then(|| DEFAULT_API_KEY.to_string()));

    // Theme: CLI → env → config → default
    let theme = cli
        .theme
        .or_else(|| {
            std::env::var("USERDASH_THEME")
                .ok()
                .and_then(|s| ThemeMode::from_str(&s, true).ok())
        })
        .or(config.display.theme)
        .unwrap_or_default();

    let requested_rows = cli
        .rows_per_page
        .or(config.display.rows_per_page)
        .unwrap_or(DEFAULT_ROWS_PER_PAGE);
    let rows_per_page = if ROWS_PER_PAGE_OPTIONS.contains(&requested_rows) {
        requested_rows
    } else {
        warn!(
            "rows_per_page {} is not one of {:?}, using {}",
            requested_rows, ROWS_PER_PAGE_OPTIONS, DEFAULT_ROWS_PER_PAGE
        );
        DEFAULT_ROWS_PER_PAGE
    };

    ResolvedConfig {
        endpoint,
        api_key,
        theme,
        rows_per_page,
        notification_timeout: Duration::from_millis(
            config
                .notification
                .auto_hide_ms
                .unwrap_or(DEFAULT_AUTO_HIDE_MS),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = UserdashConfig::default();
        assert!(config.source.endpoint.is_none());
        assert!(config.display.theme.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = UserdashConfig::default();
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.rows_per_page, DEFAULT_ROWS_PER_PAGE);
        assert_eq!(resolved.notification_timeout, Duration::from_millis(6000));
    }

    #[test]
    fn test_default_endpoint_gets_builtin_key() {
        let resolved = resolve(&UserdashConfig::default(), &CliOverrides::default());
        assert_eq!(resolved.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(resolved.api_key.as_deref(), Some(DEFAULT_API_KEY));
    }

    #[test]
    fn test_custom_endpoint_does_not_get_builtin_key() {
        let cli = CliOverrides {
            endpoint: Some("http://cli.example/users".to_string()),
            ..Default::default()
        };
        let resolved = resolve(&UserdashConfig::default(), &cli);
        assert!(resolved.api_key.is_none());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = UserdashConfig {
            display: DisplayConfig {
                theme: Some(ThemeMode::Dark),
                rows_per_page: Some(25),
            },
            notification: NotificationConfig {
                auto_hide_ms: Some(1500),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.rows_per_page, 25);
        assert_eq!(resolved.notification_timeout, Duration::from_millis(1500));
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = UserdashConfig {
            source: SourceConfig {
                endpoint: Some("http://config.example/users".to_string()),
                api_key: None,
            },
            display: DisplayConfig {
                theme: Some(ThemeMode::Light),
                rows_per_page: Some(25),
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            endpoint: Some("http://cli.example/users".to_string()),
            theme: Some(ThemeMode::Dark),
            rows_per_page: Some(50),
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.endpoint, "http://cli.example/users");
        assert_eq!(resolved.theme, ThemeMode::Dark);
        assert_eq!(resolved.rows_per_page, 50);
    }

    #[test]
    fn test_resolve_rejects_unsupported_page_size() {
        let config = UserdashConfig {
            display: DisplayConfig {
                theme: None,
                rows_per_page: Some(12),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.rows_per_page, DEFAULT_ROWS_PER_PAGE);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[source]
endpoint = "http://localhost:8080/users.json"
api_key = "abc123"

[display]
theme = "dark"
rows_per_page = 50

[notification]
auto_hide_ms = 2000
"#;
        let config: UserdashConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.source.endpoint.as_deref(),
            Some("http://localhost:8080/users.json")
        );
        assert_eq!(config.source.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.display.theme, Some(ThemeMode::Dark));
        assert_eq!(config.display.rows_per_page, Some(50));
        assert_eq!(config.notification.auto_hide_ms, Some(2000));
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[display]
theme = "light"
"#;
        let config: UserdashConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.display.theme, Some(ThemeMode::Light));
        assert!(config.source.endpoint.is_none());
        assert!(config.notification.auto_hide_ms.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("userdash-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[display\ntheme = ").unwrap();
        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));
        fs::remove_dir_all(&dir).unwrap();
    }
}
