//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.ghsearch/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GhsearchConfig {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GithubConfig {
    pub api_base_url: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SearchConfig {
    pub per_page: Option<u32>,
    pub initial_rate_limit: Option<i64>,
    pub refresh_interval_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    pub state_file: Option<String>,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub api_base_url: Option<String>,
    pub per_page: Option<u32>,
    pub state_file: Option<PathBuf>,
    pub no_persist: bool,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_PER_PAGE: u32 = 20;
/// Unauthenticated search quota per minute.
pub const DEFAULT_INITIAL_RATE_LIMIT: i64 = 10;
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;
/// GitHub caps `per_page` at 100.
const MAX_PER_PAGE: u32 = 100;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub api_base_url: String,
    pub github_token: Option<String>,
    pub per_page: u32,
    pub initial_rate_limit: i64,
    pub refresh_interval: Duration,
    /// Snapshot location. `None` disables persistence.
    pub state_file: Option<PathBuf>,
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

/// Returns `~/.ghsearch`.
pub fn app_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".ghsearch"))
}

/// Returns the path to `~/.ghsearch/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    app_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.ghsearch/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `GhsearchConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<GhsearchConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(GhsearchConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(GhsearchConfig::default());
    }

    load_config_from(&path)
}

/// Parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<GhsearchConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: GhsearchConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", redacted(&config));
    Ok(config)
}

/// Debug view of the config without the token.
fn redacted(config: &GhsearchConfig) -> String {
    format!(
        "github.api_base_url={:?} github.token={} search={:?} storage={:?}",
        config.github.api_base_url,
        if config.github.token.is_some() { "<set>" } else { "<unset>" },
        config.search,
        config.storage
    )
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# ghsearch Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [github]
# api_base_url = "https://api.github.com"   # Or GHSEARCH_API_BASE_URL / --api-url
# token = "ghp_..."                          # Or set GITHUB_TOKEN env var

# [search]
# per_page = 20                  # 1..=100, or GHSEARCH_PER_PAGE / --per-page
# initial_rate_limit = 10        # Assumed quota before the first response
# refresh_interval_secs = 60     # How often the quota is re-read

# [storage]
# state_file = "/home/me/.ghsearch/state.json"   # Or GHSEARCH_STATE_FILE / --state-file
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &GhsearchConfig, cli: &CliOverrides) -> ResolvedConfig {
    // API base URL: CLI → env → config → default
    let api_base_url = cli
        .api_base_url
        .clone()
        .or_else(|| std::env::var("GHSEARCH_API_BASE_URL").ok())
        .or_else(|| config.github.api_base_url.clone())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    // Token: env → config
    let github_token = std::env::var("GITHUB_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty())
        .or_else(|| config.github.token.clone());

    // Page size: CLI → env → config → default
    let per_page = cli
        .per_page
        .or_else(|| env_parse("GHSEARCH_PER_PAGE"))
        .or(config.search.per_page)
        .unwrap_or(DEFAULT_PER_PAGE);
    let per_page = clamp_per_page(per_page);

    let refresh_secs = config
        .search
        .refresh_interval_secs
        .unwrap_or(DEFAULT_REFRESH_INTERVAL_SECS);
    if refresh_secs == 0 {
        warn!("refresh_interval_secs = 0 is not allowed, using 1");
    }

    // Snapshot file: --no-persist → CLI → env → config → default
    let state_file = if cli.no_persist {
        None
    } else {
        cli.state_file
            .clone()
            .or_else(|| std::env::var("GHSEARCH_STATE_FILE").ok().map(PathBuf::from))
            .or_else(|| config.storage.state_file.as_ref().map(PathBuf::from))
            .or_else(|| app_dir().map(|d| d.join("state.json")))
    };

    ResolvedConfig {
        api_base_url,
        github_token,
        per_page,
        initial_rate_limit: config
            .search
            .initial_rate_limit
            .unwrap_or(DEFAULT_INITIAL_RATE_LIMIT),
        refresh_interval: Duration::from_secs(refresh_secs.max(1)),
        state_file,
    }
}

fn clamp_per_page(per_page: u32) -> u32 {
    let clamped = per_page.clamp(1, MAX_PER_PAGE);
    if clamped != per_page {
        warn!("per_page {} out of range, using {}", per_page, clamped);
    }
    clamped
}

/// Reads and parses an env var, ignoring (with a warning) values that don't parse.
fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid value", name, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = GhsearchConfig::default();
        assert!(config.github.token.is_none());
        assert!(config.search.per_page.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = GhsearchConfig::default();
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.initial_rate_limit, DEFAULT_INITIAL_RATE_LIMIT);
        assert_eq!(
            resolved.refresh_interval,
            Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS)
        );
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = GhsearchConfig {
            search: SearchConfig {
                per_page: Some(50),
                initial_rate_limit: Some(30),
                refresh_interval_secs: Some(15),
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            state_file: Some(PathBuf::from("/tmp/ghsearch-state.json")),
            ..Default::default()
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.initial_rate_limit, 30);
        assert_eq!(resolved.refresh_interval, Duration::from_secs(15));
        assert_eq!(
            resolved.state_file.as_deref(),
            Some(Path::new("/tmp/ghsearch-state.json"))
        );
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = GhsearchConfig {
            github: GithubConfig {
                api_base_url: Some("http://from-config".to_string()),
                token: None,
            },
            search: SearchConfig {
                per_page: Some(50),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            api_base_url: Some("http://from-cli".to_string()),
            per_page: Some(5),
            ..Default::default()
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.api_base_url, "http://from-cli");
        assert_eq!(resolved.per_page, 5);
    }

    #[test]
    fn test_no_persist_disables_state_file() {
        let config = GhsearchConfig {
            storage: StorageConfig {
                state_file: Some("/tmp/state.json".to_string()),
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            no_persist: true,
            ..Default::default()
        };
        assert!(resolve(&config, &cli).state_file.is_none());
    }

    #[test]
    fn test_zero_refresh_interval_is_raised() {
        let config = GhsearchConfig {
            search: SearchConfig {
                refresh_interval_secs: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.refresh_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_per_page_is_clamped() {
        assert_eq!(clamp_per_page(0), 1);
        assert_eq!(clamp_per_page(20), 20);
        assert_eq!(clamp_per_page(500), 100);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[github]
api_base_url = "http://localhost:8080"
token = "ghp_test"

[search]
per_page = 30
initial_rate_limit = 30
refresh_interval_secs = 120

[storage]
state_file = "/var/tmp/ghsearch.json"
"#;
        let config: GhsearchConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.github.api_base_url.as_deref(),
            Some("http://localhost:8080")
        );
        assert_eq!(config.github.token.as_deref(), Some("ghp_test"));
        assert_eq!(config.search.per_page, Some(30));
        assert_eq!(config.search.refresh_interval_secs, Some(120));
        assert_eq!(
            config.storage.state_file.as_deref(),
            Some("/var/tmp/ghsearch.json")
        );
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[search]
per_page = 7
"#;
        let config: GhsearchConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.search.per_page, Some(7));
        assert!(config.search.initial_rate_limit.is_none());
        assert!(config.github.api_base_url.is_none());
        assert!(config.storage.state_file.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let path = std::env::temp_dir().join(format!("ghsearch-bad-{}.toml", std::process::id()));
        fs::write(&path, "[search\nper_page = ").unwrap();
        let result = load_config_from(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_redacted_hides_token() {
        let config = GhsearchConfig {
            github: GithubConfig {
                api_base_url: None,
                token: Some("ghp_secret".to_string()),
            },
            ..Default::default()
        };
        let text = redacted(&config);
        assert!(!text.contains("ghp_secret"));
        assert!(text.contains("<set>"));
    }
}
