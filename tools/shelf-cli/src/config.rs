//! CLI configuration.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use shelf_auth::{AdminSession, Argon2Credentials, DEFAULT_ADMIN_USERNAME};
use shelf_core::browse::DEFAULT_PAGE_SIZE;
use shelf_data::{TimeoutConfig, DEFAULT_BASE_URL, DEFAULT_TOTAL_TIMEOUT};
use shelf_observability::{LogFormat, LogLevel};

/// Environment variable that overrides `[api] base_url`.
pub const API_URL_ENV: &str = "SHELF_API_URL";

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["shelf.toml", ".shelf.toml", "shelf.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog service settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Catalog list settings.
    #[serde(default)]
    pub browse: BrowseConfig,

    /// Back-office login settings.
    #[serde(default)]
    pub admin: AdminConfig,

    /// Local storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(path, &content)
    }

    /// Parse config text. `path` only decides the format.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Replace `[api] base_url` with a non-empty `SHELF_API_URL` value.
    pub fn apply_env_override(&mut self, env_override: Option<String>) {
        self.api.base_url = self.api.resolved_base_url(env_override);
    }

    /// Check values that serde cannot. Returns one message per problem.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.browse.page_size == 0 {
            problems.push("browse.page_size must be at least 1".to_string());
        }
        if self.api.timeout_ms == 0 {
            problems.push("api.timeout_ms must be at least 1".to_string());
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            problems.push(format!(
                "api.base_url must start with http:// or https:// (got {}; {} overrides it)",
                self.api.base_url, API_URL_ENV
            ));
        }
        if self.admin.session_ttl_secs <= 0 {
            problems.push("admin.session_ttl_secs must be positive".to_string());
        }
        if self.admin.password.is_some() && self.admin.password_hash.is_some() {
            problems.push("set only one of admin.password and admin.password_hash".to_string());
        }
        if let Some(hash) = &self.admin.password_hash {
            if let Err(e) = Argon2Credentials::new(&self.admin.username, hash) {
                problems.push(format!("admin.password_hash: {}", e));
            }
        }

        problems
    }

    /// Like [`validate`](Self::validate) but fails on the first problem.
    pub fn ensure_valid(&self) -> Result<()> {
        if let Some(problem) = self.validate().into_iter().next() {
            bail!("Invalid configuration: {}", problem);
        }
        Ok(())
    }
}

/// Catalog service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the catalog service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Total request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TOTAL_TIMEOUT.as_millis() as u64
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ApiConfig {
    /// The base URL after applying the environment override.
    pub fn resolved_base_url(&self, env_override: Option<String>) -> String {
        env_override
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| self.base_url.clone())
    }

    pub fn timeouts(&self) -> TimeoutConfig {
        TimeoutConfig::from_millis(self.timeout_ms)
    }
}

/// Catalog list settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseConfig {
    /// Items per catalog page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// Back-office login settings.
///
/// With neither `password` nor `password_hash` set, the built-in
/// credentials apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_username")]
    pub username: String,

    /// Plain-text password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Argon2 PHC hash, as printed by `shelf admin hash-password`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,

    /// Session lifetime in seconds.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: i64,
}

fn default_username() -> String {
    DEFAULT_ADMIN_USERNAME.to_string()
}

fn default_session_ttl() -> i64 {
    AdminSession::DEFAULT_TTL_SECS
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: None,
            password_hash: None,
            session_ttl_secs: default_session_ttl(),
        }
    }
}

/// Local storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the local storage file. Defaults to the user data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Log output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,

    /// Level used when `RUST_LOG` is unset.
    #[serde(default)]
    pub level: LogLevel,
}

/// Generate a default shelf.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Bookshelf storefront configuration

[api]
base_url = "{base_url}"
timeout_ms = {timeout_ms}

[browse]
page_size = {page_size}

[admin]
username = "{username}"
# Either a plain password or an Argon2 hash from `shelf admin hash-password`.
# password = "..."
# password_hash = "$argon2id$..."
session_ttl_secs = {ttl}

[storage]
# path = "/path/to/local-storage.json"

[logging]
format = "human"
level = "warn"
"#,
        base_url = DEFAULT_BASE_URL,
        timeout_ms = default_timeout_ms(),
        page_size = DEFAULT_PAGE_SIZE,
        username = DEFAULT_ADMIN_USERNAME,
        ttl = AdminSession::DEFAULT_TTL_SECS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = CliConfig::parse("shelf.toml", "").unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_ms, 10_000);
        assert_eq!(config.browse.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.admin.username, DEFAULT_ADMIN_USERNAME);
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_default_config_round_trips() {
        let config = CliConfig::parse("shelf.toml", &generate_default_config()).unwrap();
        assert_eq!(config.browse.page_size, 12);
        assert_eq!(config.admin.session_ttl_secs, AdminSession::DEFAULT_TTL_SECS);
        assert_eq!(config.logging.format, LogFormat::Human);
    }

    #[test]
    fn test_json_config() {
        let config = CliConfig::parse(
            "shelf.json",
            r#"{"api": {"base_url": "https://books.example.com"}, "logging": {"format": "json", "level": "debug"}}"#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://books.example.com");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn test_env_override() {
        let api = ApiConfig::default();
        assert_eq!(api.resolved_base_url(None), DEFAULT_BASE_URL);
        assert_eq!(api.resolved_base_url(Some("  ".into())), DEFAULT_BASE_URL);
        assert_eq!(
            api.resolved_base_url(Some("http://catalog:9000".into())),
            "http://catalog:9000"
        );
    }

    #[test]
    fn test_env_override_is_validated() {
        let mut config = CliConfig::default();
        config.apply_env_override(Some("catalog.internal:9000".into()));
        assert_eq!(config.api.base_url, "catalog.internal:9000");

        let problems = config.validate();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("catalog.internal:9000"));

        let mut config = CliConfig::default();
        config.apply_env_override(Some("https://books.example.com".into()));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_problems() {
        let config = CliConfig::parse(
            "shelf.toml",
            r#"
            [api]
            base_url = "localhost"
            [browse]
            page_size = 0
            [admin]
            password = "a"
            password_hash = "not-a-hash"
            "#,
        )
        .unwrap();
        let problems = config.validate();
        assert_eq!(problems.len(), 4);
        assert!(config.ensure_valid().is_err());
    }
}
