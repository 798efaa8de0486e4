//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use chrono::Duration;
use shelf_auth::{
    Argon2Credentials, AuthError, AuthGate, CredentialCheck, LocalStore, StaticCredentials,
};
use shelf_data::{HttpCatalog, OfflineCatalog};
use shelf_views::SharedCatalog;
use tracing::debug;

use crate::config::{CliConfig, API_URL_ENV, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Credentials from the `[admin]` config section.
#[derive(Debug, Clone)]
pub enum AdminCredentials {
    Plain(StaticCredentials),
    Hashed(Argon2Credentials),
}

impl AdminCredentials {
    pub fn from_config(config: &CliConfig) -> Result<Self> {
        let admin = &config.admin;
        if let Some(hash) = &admin.password_hash {
            let creds = Argon2Credentials::new(&admin.username, hash)
                .context("Invalid admin.password_hash")?;
            return Ok(Self::Hashed(creds));
        }
        Ok(match &admin.password {
            Some(password) => Self::Plain(StaticCredentials::new(&admin.username, password)),
            None => Self::Plain(StaticCredentials::default()),
        })
    }
}

impl CredentialCheck for AdminCredentials {
    fn verify(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        match self {
            Self::Plain(creds) => creds.verify(username, password),
            Self::Hashed(creds) => creds.verify(username, password),
        }
    }
}

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Serve from the bundled sample catalog.
    pub offline: bool,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, offline: bool, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match find_config_file(&cwd) {
                Some(path) => {
                    let config = CliConfig::load(&path.to_string_lossy())?;
                    (config, Some(path))
                }
                None => (CliConfig::default(), None),
            }
        };
        config.apply_env_override(std::env::var(API_URL_ENV).ok());

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            offline,
        })
    }

    /// Base URL of the catalog service, after the environment override.
    pub fn base_url(&self) -> String {
        self.config.api.base_url.clone()
    }

    /// The catalog the commands read from and write to.
    pub fn catalog(&self) -> Result<SharedCatalog> {
        if self.offline {
            debug!("using offline sample catalog");
            let catalog = OfflineCatalog::sample().context("Failed to load sample catalog")?;
            return Ok(Arc::new(catalog));
        }

        let base_url = self.base_url();
        debug!(%base_url, timeout_ms = self.config.api.timeout_ms, "using catalog service");
        let catalog = HttpCatalog::with_timeout(base_url, self.config.api.timeouts())
            .context("Failed to build HTTP client")?;
        Ok(Arc::new(catalog))
    }

    /// Path of the local storage file.
    pub fn storage_path(&self) -> PathBuf {
        match &self.config.storage.path {
            Some(path) => self.resolve_path(path),
            None => LocalStore::default_path(),
        }
    }

    /// The back-office login gate over the local storage file.
    pub fn auth_gate(&self) -> Result<AuthGate<AdminCredentials>> {
        let path = self.storage_path();
        let store = LocalStore::open(&path)
            .with_context(|| format!("Failed to open local storage: {}", path.display()))?;
        let credentials = AdminCredentials::from_config(&self.config)?;
        Ok(AuthGate::new(store, credentials)
            .with_ttl(Duration::seconds(self.config.admin.session_ttl_secs)))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// Find a config file in `start` or one of its ancestors.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".shelf.toml"), "").unwrap();

        assert_eq!(
            find_config_file(&nested),
            Some(dir.path().join(".shelf.toml"))
        );
    }

    #[test]
    fn test_credentials_from_config() {
        let mut config = CliConfig::default();
        let creds = AdminCredentials::from_config(&config).unwrap();
        assert!(creds.verify("bookstoreadmin", "ManageBook68").unwrap());

        config.admin.username = "clerk".into();
        config.admin.password = Some("shelve-it".into());
        let creds = AdminCredentials::from_config(&config).unwrap();
        assert!(creds.verify("clerk", "shelve-it").unwrap());
        assert!(!creds.verify("bookstoreadmin", "ManageBook68").unwrap());

        config.admin.password = None;
        config.admin.password_hash = Some(Argon2Credentials::hash_password("shelve-it").unwrap());
        let creds = AdminCredentials::from_config(&config).unwrap();
        assert!(matches!(creds, AdminCredentials::Hashed(_)));
        assert!(creds.verify("clerk", "shelve-it").unwrap());
    }

    #[test]
    fn test_offline_login_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.storage.path = Some(dir.path().join("store.json").to_string_lossy().into_owned());
        let ctx = Context {
            config,
            config_path: None,
            output: Output::new(false, true),
            cwd: dir.path().to_path_buf(),
            offline: true,
        };

        let mut gate = ctx.auth_gate().unwrap();
        gate.login("bookstoreadmin", "ManageBook68").unwrap();

        let mut reopened = ctx.auth_gate().unwrap();
        assert_eq!(reopened.check().unwrap().username, "bookstoreadmin");
    }
}
