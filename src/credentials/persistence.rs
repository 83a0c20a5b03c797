//! Persistence backends for the token pair.
//!
//! [`EnvFilePersistence`] mirrors the conventional deployment layout: the
//! partner credentials live in an env-style `KEY=VALUE` file, and only the
//! `ACCESS_TOKEN` / `REFRESH_TOKEN` lines are rewritten when the pair
//! rotates. [`InMemoryPersistence`] backs tests and callers that manage
//! durability elsewhere.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::config::{ApiHost, PartnerConfig, PartnerKey};
use crate::credentials::TokenPersistence;
use crate::error::ConfigError;

/// Errors that can occur while loading or persisting credentials.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The backing file could not be read or written.
    #[error("I/O error on persisted credentials: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted configuration is incomplete or malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Env-file persistence for partner credentials.
///
/// Expected keys: `PARTNER_ID`, `SHOP_ID`, `API_KEY` (the partner signing
/// key), and optionally `API_HOST`, `REDIRECT_URL`, `ACCESS_TOKEN`,
/// `REFRESH_TOKEN`. Unrelated keys and comments are preserved on update.
///
/// # Example
///
/// ```rust,no_run
/// use shopee_partner_api::credentials::{CredentialStore, EnvFilePersistence};
///
/// let backend = EnvFilePersistence::new(".env");
/// let config = backend.load()?;
/// let store = CredentialStore::new(config, Box::new(backend));
/// # Ok::<(), shopee_partner_api::credentials::PersistenceError>(())
/// ```
#[derive(Debug)]
pub struct EnvFilePersistence {
    path: PathBuf,
}

impl EnvFilePersistence {
    /// Creates a backend for the given env file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Io`] if the file cannot be read and
    /// [`PersistenceError::Config`] if required keys are missing or numeric
    /// values fail to parse.
    pub fn load(&self) -> Result<PartnerConfig, PersistenceError> {
        let content = fs::read_to_string(&self.path)?;

        let get = |key: &str| -> Option<String> {
            content.lines().find_map(|line| {
                let line = line.trim();
                line.strip_prefix(key)
                    .and_then(|rest| rest.strip_prefix('='))
                    .map(|value| value.trim().to_string())
            })
        };

        let parse_id = |key: &'static str| -> Result<u64, ConfigError> {
            let raw = get(key).ok_or(ConfigError::MissingRequiredField { field: key })?;
            raw.parse().map_err(|_| ConfigError::InvalidConfigValue {
                key: key.to_string(),
                value: raw,
            })
        };

        let partner_key = get("API_KEY").ok_or(ConfigError::MissingRequiredField {
            field: "API_KEY",
        })?;

        let mut builder = PartnerConfig::builder()
            .partner_id(parse_id("PARTNER_ID")?)
            .shop_id(parse_id("SHOP_ID")?)
            .partner_key(PartnerKey::new(partner_key)?);

        if let Some(host) = get("API_HOST") {
            builder = builder.api_host(ApiHost::new(host)?);
        }
        if let Some(url) = get("REDIRECT_URL") {
            builder = builder.redirect_url(url);
        }
        if let Some(token) = get("ACCESS_TOKEN") {
            builder = builder.access_token(token);
        }
        if let Some(token) = get("REFRESH_TOKEN") {
            builder = builder.refresh_token(token);
        }

        Ok(builder.build()?)
    }
}

impl TokenPersistence for EnvFilePersistence {
    fn persist(&self, access_token: &str, refresh_token: &str) -> Result<(), PersistenceError> {
        let content = fs::read_to_string(&self.path).unwrap_or_default();

        let mut wrote_access = false;
        let mut wrote_refresh = false;
        let mut lines: Vec<String> = content
            .lines()
            .map(|line| {
                if line.trim_start().starts_with("ACCESS_TOKEN=") {
                    wrote_access = true;
                    format!("ACCESS_TOKEN={access_token}")
                } else if line.trim_start().starts_with("REFRESH_TOKEN=") {
                    wrote_refresh = true;
                    format!("REFRESH_TOKEN={refresh_token}")
                } else {
                    line.to_string()
                }
            })
            .collect();

        if !wrote_access {
            lines.push(format!("ACCESS_TOKEN={access_token}"));
        }
        if !wrote_refresh {
            lines.push(format!("REFRESH_TOKEN={refresh_token}"));
        }

        fs::write(&self.path, lines.join("\n") + "\n")?;
        Ok(())
    }
}

/// In-memory persistence, primarily for tests.
///
/// The stored pair can be inspected through [`InMemoryPersistence::handle`].
#[derive(Debug, Default)]
pub struct InMemoryPersistence {
    stored: Arc<Mutex<Option<(String, String)>>>,
}

impl InMemoryPersistence {
    /// Returns a handle to the stored pair for inspection.
    #[must_use]
    pub fn handle(&self) -> Arc<Mutex<Option<(String, String)>>> {
        Arc::clone(&self.stored)
    }
}

impl TokenPersistence for InMemoryPersistence {
    fn persist(&self, access_token: &str, refresh_token: &str) -> Result<(), PersistenceError> {
        *self
            .stored
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) =
            Some((access_token.to_string(), refresh_token.to_string()));
        Ok(())
    }
}
