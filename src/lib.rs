//! # Shopee Partner API Rust SDK
//!
//! A Rust SDK for the Shopee Open Platform partner API, providing request
//! signing, credential lifecycle management, and transparent recovery from
//! an access token that expires mid-operation.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`PartnerConfig`] and [`PartnerConfigBuilder`]
//! - HMAC-SHA256 request signing for both partner-level and shop-scoped calls
//! - Authorization URL generation and one-time code exchange via [`TokenClient`]
//! - Token refresh with stale-refresh-token detection
//! - A signed request executor ([`ShopClient`]) with a single
//!   refresh-and-retry cycle on an expired access token
//! - A background renewal loop ([`RenewalLoop`]) that keeps the refresh
//!   token inside its 30-day staleness window
//! - A [`CredentialStore`] that owns the token pair and writes updates
//!   through an injected persistence backend
//!
//! ## Quick Start
//!
//! ```rust
//! use shopee_partner_api::{PartnerConfig, PartnerKey};
//!
//! // Create configuration using the builder pattern
//! let config = PartnerConfig::builder()
//!     .partner_id(2_013_772)
//!     .shop_id(1_306_398_160)
//!     .partner_key(PartnerKey::new("your-partner-key").unwrap())
//!     .redirect_url("https://your-app.com/shopee/callback")
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Authorization
//!
//! The initial token pair comes from a redirect-based consent flow:
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shopee_partner_api::{CredentialStore, EnvFilePersistence, TokenClient};
//!
//! // Load persisted configuration and construct the store once
//! let backend = EnvFilePersistence::new(".env");
//! let config = backend.load()?;
//! let store = Arc::new(CredentialStore::new(config, Box::new(backend)));
//!
//! let token_client = Arc::new(TokenClient::new(Arc::clone(&store)));
//!
//! // Step 1: direct the user to the consent page
//! println!("authorize at: {}", token_client.authorization_url());
//!
//! // Step 2: exchange the one-time code arriving at the redirect URL
//! let tokens = token_client.exchange_code("the-code").await?;
//! ```
//!
//! ## Making Signed Requests
//!
//! ```rust,ignore
//! use shopee_partner_api::ShopClient;
//!
//! let shop = ShopClient::new(Arc::clone(&token_client));
//!
//! // The executor adds the auth fields and handles access-token expiry
//! // with exactly one refresh-and-retry cycle.
//! let orders = shop
//!     .get("/api/v2/order/get_order_list", &[
//!         ("time_range_field", "create_time"),
//!         ("page_size", "20"),
//!     ])
//!     .await?;
//! ```
//!
//! ## Background Renewal
//!
//! The partner contract expires a refresh token unused for 30 days, so
//! production deployments keep a renewal loop running:
//!
//! ```rust,ignore
//! use shopee_partner_api::RenewalLoop;
//!
//! let handle = RenewalLoop::new(Arc::clone(&token_client)).spawn();
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: credentials live in an explicit [`CredentialStore`]
//!   constructed once and shared by handle
//! - **Single writer**: only the store mutates the token pair, and always
//!   both tokens together
//! - **Fail-fast validation**: configuration newtypes validate on construction
//! - **Transport vs API errors**: connection failures and timeouts are never
//!   folded into token errors
//! - **Async-first**: designed for use with the Tokio runtime

pub mod auth;
pub mod clients;
pub mod config;
pub mod credentials;
pub mod error;
pub mod renewal;

// Re-export public types at crate root for convenience
pub use auth::{AuthError, TokenClient, TokenResult};
pub use clients::{HttpClient, HttpError, HttpMethod, ShopClient, ShopError};
pub use config::{ApiHost, PartnerConfig, PartnerConfigBuilder, PartnerKey};
pub use credentials::{
    CredentialStore, Credentials, EnvFilePersistence, InMemoryPersistence, PersistenceError,
    TokenPersistence,
};
pub use error::ConfigError;
pub use renewal::{RenewalLoop, RENEWAL_INTERVAL};
