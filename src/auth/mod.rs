//! Authentication for the Shopee partner API.
//!
//! This module covers the credential lifecycle:
//!
//! - [`signature`]: HMAC-SHA256 request signing (partner-level and
//!   shop-scoped forms)
//! - [`token`]: authorization URL generation, code exchange, and token
//!   refresh via [`TokenClient`]
//! - [`guard`]: inbound API-key validation for embedding services
//!
//! The typical lifecycle: direct the user to
//! [`TokenClient::authorization_url`], exchange the returned one-time code
//! with [`TokenClient::exchange_code`], then keep the pair alive with
//! [`TokenClient::refresh_access_token`] — either on demand (the signed
//! request executor does this on an expired access token) or on a schedule
//! (the [renewal loop](crate::renewal) does it every 110 minutes so the
//! refresh token never sits unused long enough to go stale).

pub mod error;
pub mod guard;
pub mod signature;
pub mod token;

pub use error::AuthError;
pub use guard::{ApiKeyGuard, GuardError};
pub use token::{TokenClient, TokenResult};
