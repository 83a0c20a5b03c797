//! Credential ownership and persistence.
//!
//! The [`CredentialStore`] is the single writer of the mutable token pair.
//! Partner identity (partner id, shop id, signing key) is fixed for the
//! process lifetime; the access and refresh tokens change on every
//! successful token call and are always updated together.
//!
//! Other components never cache tokens: they take a fresh [`Credentials`]
//! snapshot per call, so a concurrent refresh is picked up by the next
//! request instead of being acted on stale.
//!
//! # Persistence
//!
//! Updated tokens are written through an injected [`TokenPersistence`]
//! backend so that a process restart resumes with the current pair. If the
//! backend fails, the in-memory update is kept and the failure is logged:
//! the process keeps serving with valid tokens and loses at most the
//! persisted copy (availability over durability).

mod persistence;

pub use persistence::{EnvFilePersistence, InMemoryPersistence, PersistenceError};

use std::sync::{Mutex, PoisonError};

use crate::config::{ApiHost, PartnerConfig, PartnerKey};

/// A point-in-time snapshot of the credential state.
///
/// Snapshots are cheap clones and become stale as soon as a refresh lands;
/// hold one for a single request only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    /// Partner (integration-level) id.
    pub partner_id: u64,
    /// Shop the credentials are scoped to.
    pub shop_id: u64,
    /// Current access token, if one has been obtained.
    pub access_token: Option<String>,
    /// Current refresh token, if one has been obtained.
    pub refresh_token: Option<String>,
}

#[derive(Debug)]
struct TokenPair {
    access: Option<String>,
    refresh: Option<String>,
}

/// Persistence backend for the token pair.
///
/// Implementations must be safe to call from multiple tasks; the store
/// already serializes calls, so no internal locking is required for
/// correctness, only `Send + Sync`.
pub trait TokenPersistence: Send + Sync {
    /// Writes the new token pair to the backing store, leaving all other
    /// persisted fields untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the backing store cannot be updated.
    fn persist(&self, access_token: &str, refresh_token: &str) -> Result<(), PersistenceError>;
}

/// Owner of the partner credentials and the current token pair.
///
/// Constructed once at startup from a [`PartnerConfig`] and an injected
/// persistence backend, then shared (via `Arc`) with every component that
/// signs or refreshes.
///
/// # Concurrency
///
/// [`CredentialStore::update_tokens`] serializes the read-modify-write of
/// the in-memory pair *and* the persistence call under one mutex, so two
/// concurrent refreshes can never interleave into a mismatched
/// access/refresh combination.
pub struct CredentialStore {
    partner_id: u64,
    shop_id: u64,
    partner_key: PartnerKey,
    api_host: ApiHost,
    redirect_url: Option<String>,
    tokens: Mutex<TokenPair>,
    persistence: Box<dyn TokenPersistence>,
}

// Verify CredentialStore is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CredentialStore>();
};

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("partner_id", &self.partner_id)
            .field("shop_id", &self.shop_id)
            .field("partner_key", &self.partner_key)
            .field("api_host", &self.api_host)
            .finish_non_exhaustive()
    }
}

impl CredentialStore {
    /// Creates a store seeded with the config's identity and initial tokens.
    #[must_use]
    pub fn new(config: PartnerConfig, persistence: Box<dyn TokenPersistence>) -> Self {
        Self {
            partner_id: config.partner_id(),
            shop_id: config.shop_id(),
            partner_key: config.partner_key().clone(),
            api_host: config.api_host().clone(),
            redirect_url: config.redirect_url().map(ToString::to_string),
            tokens: Mutex::new(TokenPair {
                access: config.access_token().map(ToString::to_string),
                refresh: config.refresh_token().map(ToString::to_string),
            }),
            persistence,
        }
    }

    /// Returns the partner id.
    #[must_use]
    pub const fn partner_id(&self) -> u64 {
        self.partner_id
    }

    /// Returns the shop id.
    #[must_use]
    pub const fn shop_id(&self) -> u64 {
        self.shop_id
    }

    /// Returns the partner signing key.
    #[must_use]
    pub const fn partner_key(&self) -> &PartnerKey {
        &self.partner_key
    }

    /// Returns the API host.
    #[must_use]
    pub const fn api_host(&self) -> &ApiHost {
        &self.api_host
    }

    /// Returns the redirect URL for the authorization flow, if configured.
    #[must_use]
    pub fn redirect_url(&self) -> Option<&str> {
        self.redirect_url.as_deref()
    }

    /// Returns a snapshot of the current credential state.
    ///
    /// Always succeeds; missing tokens are represented as `None`, never as
    /// an error.
    #[must_use]
    pub fn read(&self) -> Credentials {
        let pair = self.lock_tokens();
        Credentials {
            partner_id: self.partner_id,
            shop_id: self.shop_id,
            access_token: pair.access.clone(),
            refresh_token: pair.refresh.clone(),
        }
    }

    /// Returns the current access token, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.lock_tokens().access.clone()
    }

    /// Returns the current refresh token, if any.
    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.lock_tokens().refresh.clone()
    }

    /// Atomically replaces the token pair and writes it through to the
    /// persistence backend.
    ///
    /// Both tokens are always updated together. A persistence failure is
    /// logged and the in-memory update is kept, so in-flight traffic keeps
    /// working with the fresh pair.
    pub fn update_tokens(&self, access_token: &str, refresh_token: &str) {
        let mut pair = self.lock_tokens();
        pair.access = Some(access_token.to_string());
        pair.refresh = Some(refresh_token.to_string());

        // Persist while still holding the lock so that concurrent refreshes
        // cannot interleave writes to the backing store.
        if let Err(e) = self.persistence.persist(access_token, refresh_token) {
            tracing::error!(error = %e, "failed to persist updated tokens; keeping in-memory pair");
        }
    }

    fn lock_tokens(&self) -> std::sync::MutexGuard<'_, TokenPair> {
        // A poisoned lock only means another thread panicked mid-update;
        // the pair itself is always written atomically, so recover it.
        self.tokens.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
